//! Pipelined simulator.
//!
//! Clocks the five-stage pipeline. Register and flag reads reflect the
//! instruction that most recently left write-back, never one still in flight.

use tracing::warn;

use crate::common::{AssemblyError, LineError, RegisterKind, RuntimeFault};
use crate::config::Config;
use crate::core::arch::flags::Flags;
use crate::core::cpu::{Cpu, CpuSnapshot};
use crate::core::pipeline::Pipeline;
use crate::core::pipeline::hazards::HazardReport;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb, Stages};
use crate::memory::Memory;
use crate::sim::program::Program;
use crate::stats::SimStats;

/// Runs a program one clock cycle at a time.
#[derive(Debug)]
pub struct PipelinedSimulator {
    program: Program,
    cpu: Cpu,
    memory: Memory,
    pipeline: Pipeline,
    max_cycles: u64,
    runtime_error: Option<LineError>,
}

impl PipelinedSimulator {
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
        let cpu = Cpu::new(config);
        let pipeline = Pipeline::new(cpu.snapshot(), config.pipeline.keep_log);
        Ok(Self {
            program,
            cpu,
            memory,
            pipeline,
            max_cycles: config.pipeline.max_cycles,
            runtime_error: None,
        })
    }

    /// Assembles `source` and creates a simulator for it.
    pub fn from_source(source: &str, config: &Config) -> Result<Self, AssemblyError> {
        Self::new(Program::assemble(source), config)
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Returns
    ///
    /// The runtime fault of the instruction fetched this cycle. Once a fault
    /// has occurred every later call returns it again.
    pub fn clock(&mut self) -> Result<(), LineError> {
        if let Some(err) = &self.runtime_error {
            return Err(err.clone());
        }
        let result =
            self.pipeline.clock(&mut self.cpu, &mut self.memory, self.program.instructions());
        if let Err(err) = &result {
            warn!(line = err.line, message = %err.message, "runtime fault");
            self.runtime_error = Some(err.clone());
        }
        result
    }

    /// Clocks until the pipeline has drained or a fault occurs.
    ///
    /// # Returns
    ///
    /// The number of clock cycles run. Exceeding `pipeline.max_cycles` is
    /// reported as a fault on the current line.
    pub fn run(&mut self) -> Result<u64, LineError> {
        let mut cycles = 0;
        while !self.is_finished() {
            if cycles >= self.max_cycles {
                let err = LineError::new(
                    &RuntimeFault::StepLimit(self.max_cycles),
                    self.current_line().unwrap_or_default(),
                );
                warn!(cycles, "cycle limit reached");
                self.runtime_error = Some(err.clone());
                return Err(err);
            }
            self.clock()?;
            cycles += 1;
        }
        Ok(cycles)
    }

    /// Whether nothing is left to fetch and the pipeline is empty.
    pub fn is_finished(&self) -> bool {
        self.pipeline.is_drained(&self.cpu, self.program.instructions())
    }

    /// The assembled program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Data memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The five stage slots; index 0 is IF, index 4 is WB.
    pub const fn stages(&self) -> &Stages {
        self.pipeline.stages()
    }

    /// Hazards detected on the last clock.
    pub const fn hazards(&self) -> &HazardReport {
        self.pipeline.hazards()
    }

    /// IF/ID pipeline register.
    pub const fn if_id(&self) -> &IfId {
        &self.pipeline.registers().if_id
    }

    /// ID/EX pipeline register.
    pub const fn id_ex(&self) -> &IdEx {
        &self.pipeline.registers().id_ex
    }

    /// EX/MEM pipeline register.
    pub const fn ex_mem(&self) -> &ExMem {
        &self.pipeline.registers().ex_mem
    }

    /// MEM/WB pipeline register.
    pub const fn mem_wb(&self) -> &MemWb {
        &self.pipeline.registers().mem_wb
    }

    /// Accumulated per-cycle pipeline log.
    pub fn pipeline_log(&self) -> &str {
        self.pipeline.log()
    }

    /// Execution log of the underlying CPU.
    pub fn cpu_log(&self) -> &str {
        self.cpu.log()
    }

    /// Address of the next instruction to fetch.
    pub fn pc(&self) -> u64 {
        self.pipeline.pc(&self.cpu)
    }

    /// Source line of the instruction most recently fetched.
    pub const fn current_line(&self) -> Option<usize> {
        self.pipeline.current_line()
    }

    /// The runtime fault that stopped execution, if any.
    pub const fn runtime_error(&self) -> Option<&LineError> {
        self.runtime_error.as_ref()
    }

    /// Reads a register as of the last write-back.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is 32 or greater.
    pub fn register(&self, kind: RegisterKind, idx: usize) -> u64 {
        self.pipeline.visible().register(kind, idx)
    }

    /// Condition flags as of the last write-back.
    pub const fn flags(&self) -> Flags {
        self.pipeline.visible().flags
    }

    /// Architecturally visible register state.
    pub const fn visible(&self) -> &CpuSnapshot {
        self.pipeline.visible()
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }
}
