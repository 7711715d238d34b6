//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for both simulators. It provides:
//! 1. **Cycle and CPI:** Clock cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, FP).
//! 3. **Hazards:** Data stall cycles, control flushes, and forwarding events.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;

use crate::isa::instruction::Instruction;

/// Simulation statistics structure tracking all execution metrics.
///
/// The single-cycle simulator counts one cycle per executed instruction; the
/// pipelined simulator counts clock ticks and retires instructions at WB.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of integer ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch instructions retired.
    pub inst_branch: u64,
    /// Count of FP arithmetic and compare instructions retired.
    pub inst_fp: u64,

    /// Bubbles inserted for data hazards (load-use and branch operands).
    pub stalls_data: u64,
    /// Fetch slots flushed behind taken branches.
    pub control_flushes: u64,
    /// Cycles with an EX/MEM forwarding path active.
    pub forwards_ex: u64,
    /// Cycles with a MEM/WB forwarding path active.
    pub forwards_mem: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_fp: 0,
            stalls_data: 0,
            control_flushes: 0,
            forwards_ex: 0,
            forwards_mem: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix"];

impl SimStats {
    /// Counts one retired instruction in the totals and the instruction mix.
    pub fn record_retired(&mut self, instr: &Instruction) {
        let m = instr.mnemonic();
        self.instructions_retired += 1;
        if m.is_load() {
            self.inst_load += 1;
        } else if m.is_store() {
            self.inst_store += 1;
        } else if m.is_branch() {
            self.inst_branch += 1;
        } else if m.is_float() {
            self.inst_fp += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Names from [`STATS_SECTIONS`], or empty for all.
    pub fn report(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, total: f64| (n as f64 / total) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "LEGv8 SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_cpi                  {:.4}", cyc / instr);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("hazards") {
            let _ = writeln!(out, "HAZARDS");
            let _ = writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            let _ = writeln!(out, "  flushes.control        {}", self.control_flushes);
            let _ = writeln!(out, "  forwards.ex            {}", self.forwards_ex);
            let _ = writeln!(out, "  forwards.mem           {}", self.forwards_mem);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.fp", self.inst_fp),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report(sections));
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
