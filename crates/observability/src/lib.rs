//! `astar-observability` — tracing/logging bootstrap.

mod tracing_init;

pub use tracing_init::init;
