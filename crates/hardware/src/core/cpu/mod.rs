//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! architectural state of the single-cycle LEGv8 machine. It coordinates the following:
//! 1. **State Management:** Maintains the register files, NZCV flags, and instruction index.
//! 2. **Synchronization:** Owns the exclusive monitor used by `LDXR`/`STXR`.
//! 3. **Observability:** Accumulates the per-instruction execution log and branch outcome.

/// Instruction dispatch and per-instruction semantics.
pub mod execution;

/// Data transfer helpers (SP alignment, exclusive tag clearing).
pub mod memory;

/// Immutable copies of the register state.
pub mod snapshot;

pub use snapshot::CpuSnapshot;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::arch::flags::Flags;
use crate::core::units::lsu::ExclusiveMonitor;
use crate::isa::abi::SP;

/// Single-cycle LEGv8 processor.
///
/// Executes one instruction per call to [`Cpu::step`]. The program counter is
/// derived from the instruction index and the text segment base.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// Integer and floating-point registers.
    pub regs: RegisterFile,
    /// NZCV condition flags.
    pub flags: Flags,
    instruction_index: usize,
    text_segment_offset: u64,
    monitor: ExclusiveMonitor,
    branch_taken: bool,
    stxr_succeeded: bool,
    log: String,
    trace_instructions: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed registers and SP set from the configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration; supplies the initial SP, the
    ///   text segment base, and the instruction tracing switch.
    pub fn new(config: &Config) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(SP, config.memory.initial_sp());
        Self {
            regs,
            flags: Flags::default(),
            instruction_index: 0,
            text_segment_offset: config.memory.text_segment_offset,
            monitor: ExclusiveMonitor::new(),
            branch_taken: false,
            stxr_succeeded: false,
            log: String::new(),
            trace_instructions: config.general.trace_instructions,
        }
    }

    /// Index of the next instruction to execute.
    pub const fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    /// Address of the next instruction to execute.
    pub const fn pc(&self) -> u64 {
        self.text_segment_offset + self.instruction_index as u64 * INSTRUCTION_SIZE
    }

    /// Base address of the text segment.
    pub const fn text_segment_offset(&self) -> u64 {
        self.text_segment_offset
    }

    /// Whether the last executed instruction published a taken branch.
    pub const fn branch_taken(&self) -> bool {
        self.branch_taken
    }

    /// Whether the most recent `STXR` wrote memory.
    pub const fn stxr_succeeded(&self) -> bool {
        self.stxr_succeeded
    }

    /// Address currently tagged for exclusive access, if any.
    pub const fn exclusive_tag(&self) -> Option<u64> {
        self.monitor.tag()
    }

    /// Accumulated execution log.
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Copies the register files and flags.
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot::capture(self)
    }

    /// Appends one line to the execution log.
    fn note(&mut self, line: &str) {
        tracing::trace!(target: "legv8::cpu", "{line}");
        self.log.push_str(line);
        self.log.push('\n');
    }
}
