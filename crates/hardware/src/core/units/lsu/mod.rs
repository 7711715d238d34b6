//! Load/Store Unit (LSU).
//!
//! This module holds the state the data transfer instructions share beyond
//! memory itself. It includes:
//! - [`exclusive`]: The single-address monitor behind `LDXR`/`STXR`.

/// Exclusive access monitor.
pub mod exclusive;

pub use exclusive::ExclusiveMonitor;
