//! Five-stage pipeline engine.
//!
//! This module clocks the IF/ID/EX/MEM/WB pipeline on top of the single-cycle CPU.
//! Each fetched instruction is executed immediately; the pipeline models only when
//! its result becomes visible and where stalls, flushes, and forwards occur.
//! 1. **Clocking:** Fetch-and-execute, branch placeholders, bubbles, and draining.
//! 2. **Visibility:** Architectural state is the snapshot of the instruction leaving WB.
//! 3. **Hazards:** Detection runs after every movement and drives the next clock.
//! 4. **Observability:** A per-cycle stage log plus tracing events and statistics.

use tracing::{debug, trace};

use crate::common::constants::{INSTRUCTION_SIZE, PIPELINE_DEPTH};
use crate::common::LineError;
use crate::core::cpu::{Cpu, CpuSnapshot};
use crate::core::pipeline::hazards::{self, HazardReport};
use crate::core::pipeline::latches::{InFlight, PipelineRegisters, Stages};
use crate::isa::instruction::Instruction;
use crate::memory::Memory;
use crate::stats::SimStats;

/// Slot that receives the bubble on a data stall (EX).
const STALL_SLOT: usize = 2;
/// Write-back slot.
const WB_SLOT: usize = PIPELINE_DEPTH - 1;

/// The in-order five-stage pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Stages,
    registers: PipelineRegisters,
    hazards: HazardReport,
    data_stall: bool,
    branch_stall: bool,
    control_stall: bool,
    visible: CpuSnapshot,
    log: String,
    keep_log: bool,
    current_line: Option<usize>,
    stats: SimStats,
}

impl Pipeline {
    /// Creates an empty pipeline.
    ///
    /// # Arguments
    ///
    /// * `initial` - Register state visible before any instruction retires.
    /// * `keep_log` - Whether to accumulate the textual pipeline log.
    pub fn new(initial: CpuSnapshot, keep_log: bool) -> Self {
        Self {
            stages: Default::default(),
            registers: PipelineRegisters::default(),
            hazards: HazardReport::default(),
            data_stall: false,
            branch_stall: false,
            control_stall: false,
            visible: initial,
            log: String::new(),
            keep_log,
            current_line: None,
            stats: SimStats::default(),
        }
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU that executes each instruction as it is fetched.
    /// * `memory` - Data memory.
    /// * `program` - The decoded program.
    ///
    /// # Returns
    ///
    /// The runtime fault of the instruction fetched this cycle, if it faulted.
    /// The pipeline does not move on a fault.
    pub fn clock(
        &mut self,
        cpu: &mut Cpu,
        memory: &mut Memory,
        program: &[Instruction],
    ) -> Result<(), LineError> {
        if self.is_drained(cpu, program) {
            self.note("Execution has ended");
            return Ok(());
        }
        self.stats.cycles += 1;

        match program.get(cpu.instruction_index()) {
            None => self.drain(program),
            Some(_) if self.stall_pending() => self.insert_bubble(STALL_SLOT),
            Some(_) if self.stages[0].as_ref().is_some_and(|f| f.branch_taken) => {
                self.fetch_behind_branch(program);
            }
            Some(instr) => self.fetch_and_execute(instr, cpu, memory, program)?,
        }

        self.detect_hazards();
        Ok(())
    }

    /// The five stage slots; index 0 is IF.
    pub const fn stages(&self) -> &Stages {
        &self.stages
    }

    /// The four pipeline registers as of the last movement.
    pub const fn registers(&self) -> &PipelineRegisters {
        &self.registers
    }

    /// Hazards detected on the last clock.
    pub const fn hazards(&self) -> &HazardReport {
        &self.hazards
    }

    /// Architecturally visible register state.
    pub const fn visible(&self) -> &CpuSnapshot {
        &self.visible
    }

    /// Accumulated per-cycle log.
    pub fn log(&self) -> &str {
        &self.log
    }

    /// Source line of the instruction most recently fetched.
    pub const fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Whether every slot holds a bubble.
    pub fn is_empty(&self) -> bool {
        self.stages.iter().all(Option::is_none)
    }

    /// Whether there is nothing left to fetch and nothing left in flight.
    pub fn is_drained(&self, cpu: &Cpu, program: &[Instruction]) -> bool {
        cpu.instruction_index() >= program.len() && self.is_empty()
    }

    /// Address of the next instruction to fetch.
    pub fn pc(&self, cpu: &Cpu) -> u64 {
        self.stages[0]
            .as_ref()
            .filter(|f| f.before.is_some())
            .map_or_else(|| cpu.pc(), |f| f.pc + INSTRUCTION_SIZE)
    }

    const fn stall_pending(&self) -> bool {
        self.data_stall || self.branch_stall
    }

    /// No more instructions to fetch: let the pipeline empty itself.
    fn drain(&mut self, program: &[Instruction]) {
        self.note("We are at the last instruction");
        self.current_line = program.last().map(Instruction::line);
        if self.stall_pending() {
            self.insert_bubble(STALL_SLOT);
        } else {
            self.note("Moving the pipeline along");
            self.advance(None);
        }
    }

    /// Fetches the sequential successor of a taken branch without executing it.
    fn fetch_behind_branch(&mut self, program: &[Instruction]) {
        let next = self.stages[0].as_ref().and_then(|branch| {
            let index = branch.index + 1;
            program
                .get(index)
                .map(|i| InFlight::placeholder(i.clone(), index, branch.pc + INSTRUCTION_SIZE))
        });
        self.advance(next);
    }

    fn fetch_and_execute(
        &mut self,
        instr: &Instruction,
        cpu: &mut Cpu,
        memory: &mut Memory,
        program: &[Instruction],
    ) -> Result<(), LineError> {
        let index = cpu.instruction_index();
        let pc = cpu.pc();
        self.current_line = Some(instr.line());

        let before = cpu.snapshot();
        let _ = cpu.step(program, memory)?;

        if self.control_stall && !self.branch_stall {
            self.stages[0] = None;
            self.control_stall = false;
            self.stats.control_flushes += 1;
            debug!(pc = format_args!("{pc:#x}"), "fetch slot flushed");
        }

        self.advance(Some(InFlight {
            instruction: instr.clone(),
            index,
            before: Some(before),
            after: Some(cpu.snapshot()),
            pc,
            branch_taken: cpu.branch_taken(),
        }));
        Ok(())
    }

    /// Moves every instruction one stage toward WB and places `next` in IF.
    fn advance(&mut self, next: Option<InFlight>) {
        self.stages.rotate_right(1);
        self.stages[0] = next;
        self.after_movement();
    }

    /// Inserts a bubble at `pos`; instructions above it move on, those below stay.
    fn insert_bubble(&mut self, pos: usize) {
        self.stages[pos..].rotate_right(1);
        self.stages[pos] = None;
        self.data_stall = false;
        self.branch_stall = false;
        self.stats.stalls_data += 1;
        self.after_movement();
    }

    fn after_movement(&mut self) {
        if let Some(retiring) = &self.stages[WB_SLOT]
            && let Some(after) = &retiring.after
        {
            self.visible = after.clone();
            self.stats.record_retired(&retiring.instruction);
        }
        self.registers = PipelineRegisters::capture(&self.stages);
        let line = self
            .stages
            .iter()
            .map(|slot| slot.as_ref().map_or("bubble", |f| f.instruction.mnemonic().name()))
            .collect::<Vec<_>>()
            .join(" | ");
        self.note(&line);
    }

    fn detect_hazards(&mut self) {
        let report = hazards::detect(&self.stages, &self.registers);

        if report.control_flush {
            self.control_stall = true;
            self.note("Control Hazard: Flushing pipeline");
        }
        if report.branch_register_stall {
            self.branch_stall = true;
            self.note("Data Hazard: Stalling pipeline");
        }
        if report.flag_stall {
            self.branch_stall = true;
            self.note("Data Hazard: Stalling pipeline");
        }
        if report.load_use_stall {
            self.data_stall = true;
            self.note("Data Hazard: Stalling pipeline");
        }
        for (active, message) in [
            (report.ex_forward_a, "Data Hazard: EX, forward A"),
            (report.ex_forward_b, "Data Hazard: EX, forward B"),
            (report.mem_forward_a, "Data Hazard: MEM, forward A"),
            (report.mem_forward_b, "Data Hazard: MEM, forward B"),
        ] {
            if active {
                self.note(message);
            }
        }
        if report.ex_forward_a || report.ex_forward_b {
            self.stats.forwards_ex += 1;
        }
        if report.mem_forward_a || report.mem_forward_b {
            self.stats.forwards_mem += 1;
        }

        if report != HazardReport::default() {
            debug!(?report, "hazards detected");
        }
        self.hazards = report;
    }

    fn note(&mut self, line: &str) {
        trace!(target: "legv8::pipeline", "{line}");
        if self.keep_log {
            self.log.push_str(line);
            self.log.push('\n');
        }
    }
}
