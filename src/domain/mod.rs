// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types for the concepts of the system:
// labelled tweets, the five sentiment classes and the
// token vocabulary.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// The five sentiment classes
pub mod sentiment;

// A raw tweet with its label, before vectorisation
pub mod tweet;

// Token string <-> index mapping
pub mod vocabulary;

// Core abstractions (traits) that other layers implement
pub mod traits;
