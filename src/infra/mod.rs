// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several layers:
//
//   metrics.rs : per-batch loss/accuracy CSV and a JSON run
//                summary, written only when a metrics
//                directory is configured

/// Training/evaluation metrics logger
pub mod metrics;
