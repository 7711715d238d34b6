//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the records carried through the five-stage pipeline
//! (IF → ID → EX → MEM → WB) and the four pipeline registers between them.
//!
//! 1. **Instruction Flow:** `InFlight` wraps an instruction with the register state
//!    before and after it executed.
//! 2. **Pipeline Registers:** `IfId`, `IdEx`, `ExMem`, and `MemWb` hold the register
//!    fields and control bits read by the hazard detectors.
//! 3. **Recomputation:** All four registers are rebuilt from the stage slots after
//!    every pipeline movement.

use serde::Serialize;

use crate::common::constants::PIPELINE_DEPTH;
use crate::common::RegisterKind;
use crate::core::cpu::CpuSnapshot;
use crate::isa::instruction::Instruction;
use crate::isa::token::TokenType;

/// An instruction occupying one pipeline stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Index of the instruction in the program.
    pub index: usize,
    /// Register state before execution; `None` for a fetch placeholder.
    pub before: Option<CpuSnapshot>,
    /// Register state after execution; `None` for a fetch placeholder.
    pub after: Option<CpuSnapshot>,
    /// Address the instruction was fetched from.
    pub pc: u64,
    /// Whether executing it published a taken branch.
    pub branch_taken: bool,
}

impl InFlight {
    /// An instruction fetched behind a taken branch. It is never executed and
    /// is flushed on the following cycle.
    pub const fn placeholder(instruction: Instruction, index: usize, pc: u64) -> Self {
        Self { instruction, index, before: None, after: None, pc, branch_taken: false }
    }

    /// Whether this record was fetched but never executed.
    pub const fn is_placeholder(&self) -> bool {
        self.after.is_none()
    }

    fn group(&self) -> TokenType {
        self.instruction.mnemonic().token_type()
    }

    fn before_x(&self, idx: usize) -> Option<u64> {
        self.before.as_ref().map(|s| s.register(RegisterKind::X, idx))
    }

    fn after_x(&self, idx: usize) -> Option<u64> {
        self.after.as_ref().map(|s| s.register(RegisterKind::X, idx))
    }

    /// Base register plus offset, as computed by the ALU of a data transfer.
    fn address(&self, base: usize, offset: usize) -> Option<u64> {
        self.before_x(self.instruction.reg(base))
            .map(|b| b.wrapping_add(self.instruction.arg(offset) as u64))
    }
}

/// The five stage slots; index 0 is IF, index 4 is WB. `None` is a bubble.
pub type Stages = [Option<InFlight>; PIPELINE_DEPTH];

/// IF/ID pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IfId {
    /// Fetch address of the instruction in decode.
    pub pc: Option<u64>,
    /// First source register.
    pub rn: Option<usize>,
    /// Second source register (or the stored / tested register).
    pub rm: Option<usize>,
    /// Destination register.
    pub rd: Option<usize>,
}

impl IfId {
    fn capture(f: &InFlight) -> Self {
        let i = &f.instruction;
        let mut reg = Self { pc: Some(f.pc), ..Self::default() };
        match f.group() {
            TokenType::XMnemonicRrr => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
                reg.rm = Some(i.reg(2));
            }
            TokenType::XMnemonicRri => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
            }
            TokenType::XMnemonicRm if i.control().reg_write.is_high() => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
            }
            TokenType::XMnemonicRm => {
                reg.rn = Some(i.reg(1));
                reg.rm = Some(i.reg(0));
            }
            TokenType::XMnemonicRrm => {
                reg.rd = Some(i.reg(1));
                reg.rn = Some(i.reg(2));
                reg.rm = Some(i.reg(0));
            }
            TokenType::XMnemonicRisi => reg.rd = Some(i.reg(0)),
            TokenType::XMnemonicRl => reg.rm = Some(i.reg(0)),
            _ => {}
        }
        reg
    }
}

/// ID/EX pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IdEx {
    /// WB: register write.
    pub reg_write: bool,
    /// WB: write-back from memory.
    pub mem_to_reg: bool,
    /// M: data memory read.
    pub mem_read: bool,
    /// M: data memory write.
    pub mem_write: bool,
    /// EX: 2-bit ALU operation class.
    pub alu_op: Option<u8>,
    /// EX: immediate second operand.
    pub alu_src: bool,
    /// First value read from the register file.
    pub read_data1: Option<u64>,
    /// Second value read from the register file.
    pub read_data2: Option<u64>,
    /// First source register.
    pub rn: Option<usize>,
    /// Second source register.
    pub rm: Option<usize>,
    /// Destination register.
    pub rd: Option<usize>,
}

impl IdEx {
    fn capture(f: &InFlight) -> Self {
        let i = &f.instruction;
        let c = i.control();
        let mut reg = Self {
            reg_write: c.reg_write.is_high(),
            mem_to_reg: c.mem_to_reg.is_high(),
            mem_read: c.mem_read.is_high(),
            mem_write: c.mem_write.is_high(),
            alu_op: c.alu_op,
            alu_src: c.alu_src.is_high(),
            ..Self::default()
        };
        match f.group() {
            TokenType::XMnemonicRrr => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
                reg.rm = Some(i.reg(2));
                reg.read_data1 = f.before_x(i.reg(1));
                reg.read_data2 = f.before_x(i.reg(2));
            }
            TokenType::XMnemonicRri => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
                reg.read_data1 = f.before_x(i.reg(1));
            }
            TokenType::XMnemonicRm if reg.reg_write => {
                reg.rd = Some(i.reg(0));
                reg.rn = Some(i.reg(1));
                reg.read_data1 = f.address(1, 2);
            }
            TokenType::XMnemonicRm => {
                reg.rn = Some(i.reg(1));
                reg.rm = Some(i.reg(0));
                reg.read_data1 = f.before_x(i.reg(1));
                reg.read_data2 = f.before_x(i.reg(0));
            }
            TokenType::XMnemonicRrm => {
                reg.rd = Some(i.reg(1));
                reg.rn = Some(i.reg(2));
                reg.rm = Some(i.reg(0));
                reg.read_data1 = f.before_x(i.reg(2));
                reg.read_data2 = f.before_x(i.reg(0));
            }
            TokenType::XMnemonicRisi => reg.rd = Some(i.reg(0)),
            TokenType::XMnemonicRl => reg.rm = Some(i.reg(0)),
            _ => {}
        }
        reg
    }
}

/// EX/MEM pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExMem {
    /// WB: register write.
    pub reg_write: bool,
    /// WB: write-back from memory.
    pub mem_to_reg: bool,
    /// M: data memory read.
    pub mem_read: bool,
    /// M: data memory write.
    pub mem_write: bool,
    /// ALU output (result or effective address).
    pub alu_result: Option<u64>,
    /// Value to be written to memory.
    pub write_data: Option<u64>,
    /// Destination register.
    pub rd: Option<usize>,
}

impl ExMem {
    fn capture(f: &InFlight) -> Self {
        let i = &f.instruction;
        let c = i.control();
        let mut reg = Self {
            reg_write: c.reg_write.is_high(),
            mem_to_reg: c.mem_to_reg.is_high(),
            mem_read: c.mem_read.is_high(),
            mem_write: c.mem_write.is_high(),
            ..Self::default()
        };
        match f.group() {
            TokenType::XMnemonicRrr | TokenType::XMnemonicRri | TokenType::XMnemonicRisi => {
                reg.rd = Some(i.reg(0));
                reg.alu_result = f.after_x(i.reg(0));
            }
            TokenType::XMnemonicRm => {
                if reg.reg_write {
                    reg.rd = Some(i.reg(0));
                } else {
                    reg.write_data = f.before_x(i.reg(0));
                }
                reg.alu_result = f.address(1, 2);
            }
            TokenType::XMnemonicRrm => {
                reg.rd = Some(i.reg(1));
                reg.alu_result = f.address(2, 3);
                reg.write_data = f.before_x(i.reg(0));
            }
            _ => {}
        }
        reg
    }
}

/// MEM/WB pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemWb {
    /// WB: register write.
    pub reg_write: bool,
    /// WB: write-back from memory.
    pub mem_to_reg: bool,
    /// Value read from data memory.
    pub read_data: Option<u64>,
    /// ALU output (result or effective address).
    pub alu_result: Option<u64>,
    /// Destination register.
    pub rd: Option<usize>,
}

impl MemWb {
    fn capture(f: &InFlight) -> Self {
        let i = &f.instruction;
        let c = i.control();
        let mut reg = Self {
            reg_write: c.reg_write.is_high(),
            mem_to_reg: c.mem_to_reg.is_high(),
            ..Self::default()
        };
        match f.group() {
            TokenType::XMnemonicRrr | TokenType::XMnemonicRri | TokenType::XMnemonicRisi => {
                reg.rd = Some(i.reg(0));
                reg.alu_result = f.after_x(i.reg(0));
            }
            TokenType::XMnemonicRm => {
                if reg.reg_write {
                    reg.rd = Some(i.reg(0));
                    reg.read_data = f.after_x(i.reg(0));
                }
                reg.alu_result = f.address(1, 2);
            }
            TokenType::XMnemonicRrm => {
                reg.rd = Some(i.reg(1));
                reg.alu_result = f.address(2, 3);
                reg.read_data = f.after_x(i.reg(1));
            }
            _ => {}
        }
        reg
    }
}

/// The four pipeline registers between the five stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineRegisters {
    /// Between fetch and decode.
    pub if_id: IfId,
    /// Between decode and execute.
    pub id_ex: IdEx,
    /// Between execute and memory.
    pub ex_mem: ExMem,
    /// Between memory and write-back.
    pub mem_wb: MemWb,
}

impl PipelineRegisters {
    /// Rebuilds every register from the instructions in ID, EX, MEM, and WB.
    ///
    /// Empty stages leave their register at its default (all fields unset).
    pub fn capture(stages: &Stages) -> Self {
        Self {
            if_id: stages[1].as_ref().map(IfId::capture).unwrap_or_default(),
            id_ex: stages[2].as_ref().map(IdEx::capture).unwrap_or_default(),
            ex_mem: stages[3].as_ref().map(ExMem::capture).unwrap_or_default(),
            mem_wb: stages[4].as_ref().map(MemWb::capture).unwrap_or_default(),
        }
    }
}
