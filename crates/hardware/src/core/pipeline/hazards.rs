//! Data and Control Hazard Detection.
//!
//! This module implements the checks that keep the five-stage pipeline consistent.
//! It provides:
//! 1. **Stall Detection:** Compare-and-branch register hazards, `B.cond` flag hazards,
//!    and load-use hazards, all of which insert a bubble.
//! 2. **Forwarding Detection:** EX and MEM hazards, which are resolved by bypassing
//!    and only reported.
//! 3. **Control Hazards:** A taken branch in decode flushes the fetch slot.

use serde::Serialize;

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, InFlight, MemWb, PipelineRegisters, Stages};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::abi::XZR;
use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::TokenType;

/// Outcome of one round of hazard detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HazardReport {
    /// `CBZ`/`CBNZ` in decode reads a register still being produced.
    pub branch_register_stall: bool,
    /// `B.cond` in decode while a flag-setting instruction is in EX or MEM.
    pub flag_stall: bool,
    /// Load in EX produces a register the instruction in decode reads.
    pub load_use_stall: bool,
    /// A taken branch is in decode; the fetch slot is flushed next cycle.
    pub control_flush: bool,
    /// EX/MEM result forwarded to the first ALU operand.
    pub ex_forward_a: bool,
    /// EX/MEM result forwarded to the second ALU operand.
    pub ex_forward_b: bool,
    /// MEM/WB result forwarded to the first ALU operand.
    pub mem_forward_a: bool,
    /// MEM/WB result forwarded to the second ALU operand.
    pub mem_forward_b: bool,
}

impl HazardReport {
    /// Whether a branch-operand stall (register or flags) was detected.
    pub const fn branch_stall(&self) -> bool {
        self.branch_register_stall || self.flag_stall
    }

    /// Whether any forwarding path is active.
    pub const fn forwards(&self) -> bool {
        self.ex_forward_a || self.ex_forward_b || self.mem_forward_a || self.mem_forward_b
    }
}

/// Runs every detector against the post-shift pipeline.
///
/// # Arguments
///
/// * `stages` - The five stage slots.
/// * `regs` - Pipeline registers recomputed from `stages`.
///
/// # Returns
///
/// The hazards present this cycle.
pub fn detect(stages: &Stages, regs: &PipelineRegisters) -> HazardReport {
    let decode = stages[1].as_ref();
    HazardReport {
        branch_register_stall: branch_register_hazard(decode, &regs.id_ex, &regs.ex_mem),
        flag_stall: flag_hazard(stages),
        load_use_stall: load_use_hazard(stages[2].as_ref(), &regs.if_id, &regs.id_ex),
        control_flush: control_hazard(decode),
        ex_forward_a: ex_hazard(&regs.ex_mem, regs.id_ex.rn),
        ex_forward_b: ex_hazard(&regs.ex_mem, regs.id_ex.rm),
        mem_forward_a: mem_hazard(&regs.mem_wb, &regs.ex_mem, regs.id_ex.rn),
        mem_forward_b: mem_hazard(&regs.mem_wb, &regs.ex_mem, regs.id_ex.rm),
    }
}

/// A compare-and-branch group instruction in decode whose tested register is
/// the destination of the instruction in EX or MEM.
pub fn branch_register_hazard(decode: Option<&InFlight>, id_ex: &IdEx, ex_mem: &ExMem) -> bool {
    let Some(f) = decode else {
        return false;
    };
    if f.instruction.mnemonic().token_type() != TokenType::XMnemonicRl {
        return false;
    }
    let tested = Some(f.instruction.reg(0));
    tested == id_ex.rd || tested == ex_mem.rd
}

/// A `B.cond` in decode while flags are still being produced.
///
/// The MEM stage is consulted after the EX stage and its answer replaces
/// the EX answer whenever MEM holds an instruction.
pub fn flag_hazard(stages: &Stages) -> bool {
    let Some(f) = stages[1].as_ref() else {
        return false;
    };
    let m = f.instruction.mnemonic();
    if m.token_type() != TokenType::MnemonicL || m == Mnemonic::B {
        return false;
    }
    let mut hazard = false;
    if let Some(ex) = &stages[2] {
        hazard = ex.instruction.mnemonic().sets_flags();
    }
    if let Some(mem) = &stages[3] {
        hazard = mem.instruction.mnemonic().sets_flags();
    }
    hazard
}

/// A load in EX whose destination is a source of the instruction in decode.
///
/// There is no path from the data memory output back to EX, so this always stalls.
pub fn load_use_hazard(execute: Option<&InFlight>, if_id: &IfId, id_ex: &IdEx) -> bool {
    let Some(f) = execute else {
        return false;
    };
    *f.instruction.control() == ControlSignals::LOAD
        && id_ex.rd.is_some()
        && (id_ex.rd == if_id.rn || id_ex.rd == if_id.rm)
}

/// A branch in decode that redirected fetch.
///
/// `B` always flushes. Conditional branches flush only when they published a
/// taken outcome. `BL` and `BR` never flush: fetch follows them directly.
pub fn control_hazard(decode: Option<&InFlight>) -> bool {
    decode.is_some_and(|f| {
        let m = f.instruction.mnemonic();
        let conditional = m.condition().is_some() || matches!(m, Mnemonic::Cbz | Mnemonic::Cbnz);
        m == Mnemonic::B || (conditional && f.branch_taken)
    })
}

/// EX hazard: the EX/MEM destination feeds an ID/EX source.
pub fn ex_hazard(ex_mem: &ExMem, source: Option<usize>) -> bool {
    ex_mem.reg_write && source.is_some() && ex_mem.rd != Some(XZR) && ex_mem.rd == source
}

/// MEM hazard: the MEM/WB destination feeds an ID/EX source not already
/// covered by an EX hazard.
pub fn mem_hazard(mem_wb: &MemWb, ex_mem: &ExMem, source: Option<usize>) -> bool {
    mem_wb.reg_write
        && source.is_some()
        && mem_wb.rd != Some(XZR)
        && !ex_hazard(ex_mem, source)
        && mem_wb.rd == source
}
