// src/report/mod.rs
// =============================================================================
// The final Report: aggregation of every phase plus output sinks.
// =============================================================================

mod aggregate;
mod sink;

pub use aggregate::{
    build_report, recommend, PhaseOutputs, Priority, Recommendation, Report, Summary,
};
pub use sink::{JsonFileSink, MemorySink, ReportSink};
