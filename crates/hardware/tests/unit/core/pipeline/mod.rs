//! # Pipeline Tests
//!
//! This module covers hazard detection on hand-built stage slots and the
//! clocked behavior of the pipeline engine.


/// Hazard detection.
pub mod hazards;
