//! Configuration system for the LEGv8 simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** The segment layout of the LEGv8 reference simulator and run bounds.
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//!
//! Configuration is supplied as JSON through `Config::from_json`, or use
//! `Config::default()`. Every field is optional in JSON.

use serde::Deserialize;

use crate::common::constants;

/// Default configuration constants for the simulator.
mod defaults {
    /// Upper bound on instructions executed by `SingleCycleSimulator::run`.
    pub const MAX_STEPS: u64 = 1_000_000;

    /// Upper bound on clock cycles of `PipelinedSimulator::run`.
    pub const MAX_CYCLES: u64 = 5_000_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use legv8_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "memory": { "initial_sp": 549755813872 },
///     "pipeline": { "keep_log": false }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.initial_sp(), 0x7F_FFFF_FFF0);
/// assert!(!config.pipeline.keep_log);
/// assert_eq!(config.general.max_steps, 1_000_000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Segment layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline model settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - A JSON object; missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Also emit every execution log line as an `info` tracing event
    #[serde(default)]
    pub trace_instructions: bool,

    /// Maximum number of instructions `run` executes before faulting
    #[serde(default = "GeneralConfig::default_max_steps")]
    pub max_steps: u64,
}

impl GeneralConfig {
    fn default_max_steps() -> u64 {
        defaults::MAX_STEPS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { trace_instructions: false, max_steps: defaults::MAX_STEPS }
    }
}

/// Segment layout of the simulated address space.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Address of the first instruction
    #[serde(default = "MemoryConfig::default_text_segment_offset")]
    pub text_segment_offset: u64,

    /// Lowest valid data address
    #[serde(default = "MemoryConfig::default_dynamic_data_offset")]
    pub dynamic_data_offset: u64,

    /// Exclusive upper bound of valid data addresses
    #[serde(default = "MemoryConfig::default_stack_base")]
    pub stack_base: u64,

    /// Initial SP; defaults to `stack_base` when not set
    #[serde(default, rename = "initial_sp")]
    pub initial_sp_override: Option<u64>,
}

impl MemoryConfig {
    fn default_text_segment_offset() -> u64 {
        constants::TEXT_SEGMENT_OFFSET
    }

    fn default_dynamic_data_offset() -> u64 {
        constants::DYNAMIC_DATA_OFFSET
    }

    fn default_stack_base() -> u64 {
        constants::STACK_BASE
    }

    /// Value loaded into SP when a CPU is created.
    pub fn initial_sp(&self) -> u64 {
        self.initial_sp_override.unwrap_or(self.stack_base)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            text_segment_offset: constants::TEXT_SEGMENT_OFFSET,
            dynamic_data_offset: constants::DYNAMIC_DATA_OFFSET,
            stack_base: constants::STACK_BASE,
            initial_sp_override: None,
        }
    }
}

/// Pipeline model settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of cycles `run` clocks before faulting
    #[serde(default = "PipelineConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Accumulate the per-cycle textual pipeline log
    #[serde(default = "PipelineConfig::default_keep_log")]
    pub keep_log: bool,
}

impl PipelineConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_keep_log() -> bool {
        true
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_cycles: defaults::MAX_CYCLES, keep_log: true }
    }
}
