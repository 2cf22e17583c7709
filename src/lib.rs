//! Five-class tweet sentiment classifier: token embedding, LSTM encoder
//! and linear head, trained with Burn.
//!
//! Layers, outermost first:
//!   cli → application → data / ml → domain, with infra on the side.
#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
