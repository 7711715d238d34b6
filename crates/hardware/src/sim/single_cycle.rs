//! Single-cycle simulator.
//!
//! Executes one instruction per step and exposes the read-only state a
//! presentation layer polls after each step.

use tracing::warn;

use crate::common::{AssemblyError, LineError, RegisterKind, RuntimeFault};
use crate::config::Config;
use crate::core::arch::flags::Flags;
use crate::core::cpu::{Cpu, CpuSnapshot};
use crate::isa::instruction::Instruction;
use crate::memory::Memory;
use crate::sim::program::Program;
use crate::stats::SimStats;

/// Result of a successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction at this index was executed.
    Executed(usize),
    /// Every instruction has been executed; nothing happened.
    Finished,
}

/// Runs a program one instruction at a time.
#[derive(Debug)]
pub struct SingleCycleSimulator {
    program: Program,
    cpu: Cpu,
    memory: Memory,
    max_steps: u64,
    current: Option<usize>,
    previous: Option<usize>,
    current_line: Option<usize>,
    runtime_error: Option<LineError>,
    stats: SimStats,
}

impl SingleCycleSimulator {
    /// Creates a simulator for an assembled program.
    ///
    /// # Arguments
    ///
    /// * `program` - The assembled program.
    /// * `config` - Simulator configuration.
    ///
    /// # Returns
    ///
    /// The simulator, or the program's compile errors.
    pub fn new(program: Program, config: &Config) -> Result<Self, AssemblyError> {
        let program = program.into_checked()?;
        let memory = Memory::new(&config.memory, program.instructions().len());
        Ok(Self {
            cpu: Cpu::new(config),
            memory,
            max_steps: config.general.max_steps,
            current: None,
            previous: None,
            current_line: None,
            runtime_error: None,
            stats: SimStats::default(),
            program,
        })
    }

    /// Assembles `source` and creates a simulator for it.
    pub fn from_source(source: &str, config: &Config) -> Result<Self, AssemblyError> {
        Self::new(Program::assemble(source), config)
    }

    /// Executes the next instruction.
    ///
    /// # Returns
    ///
    /// What happened, or the runtime fault. Once a fault has occurred every
    /// later call returns it again without executing anything.
    pub fn step(&mut self) -> Result<StepOutcome, LineError> {
        if let Some(err) = &self.runtime_error {
            return Err(err.clone());
        }
        let index = self.cpu.instruction_index();
        let Some(instr) = self.program.instructions().get(index) else {
            return Ok(StepOutcome::Finished);
        };
        self.previous = self.current;
        self.current = Some(index);
        self.current_line = Some(instr.line());

        match self.cpu.step(self.program.instructions(), &mut self.memory) {
            Ok(_) => {
                self.stats.cycles += 1;
                self.stats.record_retired(instr);
                Ok(StepOutcome::Executed(index))
            }
            Err(err) => {
                warn!(line = err.line, message = %err.message, "runtime fault");
                self.runtime_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Executes until the program ends or faults.
    ///
    /// # Returns
    ///
    /// The number of instructions executed, or the runtime fault. Exceeding
    /// `general.max_steps` is reported as a fault on the current line.
    pub fn run(&mut self) -> Result<u64, LineError> {
        let mut steps = 0;
        loop {
            if steps >= self.max_steps && !self.is_finished() {
                let err = LineError::new(
                    &RuntimeFault::StepLimit(self.max_steps),
                    self.current_line.unwrap_or_default(),
                );
                warn!(steps, "step limit reached");
                self.runtime_error = Some(err.clone());
                return Err(err);
            }
            match self.step()? {
                StepOutcome::Executed(_) => steps += 1,
                StepOutcome::Finished => return Ok(steps),
            }
        }
    }

    /// Whether every instruction has been executed.
    pub fn is_finished(&self) -> bool {
        self.cpu.instruction_index() >= self.program.instructions().len()
    }

    /// The assembled program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The CPU.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Data memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Instruction executed by the last step.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.current.and_then(|i| self.program.instructions().get(i))
    }

    /// Instruction executed by the step before the last.
    pub fn previous_instruction(&self) -> Option<&Instruction> {
        self.previous.and_then(|i| self.program.instructions().get(i))
    }

    /// Index of the instruction executed by the last step.
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Index of the instruction executed by the step before the last.
    pub const fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    /// Index of the next instruction to execute.
    pub const fn instruction_index(&self) -> usize {
        self.cpu.instruction_index()
    }

    /// Address of the next instruction to execute.
    pub const fn pc(&self) -> u64 {
        self.cpu.pc()
    }

    /// Whether the last instruction published a taken branch.
    pub const fn branch_taken(&self) -> bool {
        self.cpu.branch_taken()
    }

    /// Whether the most recent `STXR` succeeded.
    pub const fn stxr_succeeded(&self) -> bool {
        self.cpu.stxr_succeeded()
    }

    /// Accumulated execution log.
    pub fn cpu_log(&self) -> &str {
        self.cpu.log()
    }

    /// Source line of the instruction executed by the last step.
    pub const fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    /// The runtime fault that stopped execution, if any.
    pub const fn runtime_error(&self) -> Option<&LineError> {
        self.runtime_error.as_ref()
    }

    /// Reads a register.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is 32 or greater.
    pub fn register(&self, kind: RegisterKind, idx: usize) -> u64 {
        self.cpu.regs.read_kind(kind, idx)
    }

    /// Current condition flags.
    pub const fn flags(&self) -> Flags {
        self.cpu.flags
    }

    /// Copy of the current register state.
    pub fn snapshot(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
