//! Control unit signals.
//!
//! This module defines the control word bound to every instruction at decode
//! time. It performs:
//! 1. **Tri-state Signals:** Each single-bit signal is low, high, or "don't care"
//!    for instruction classes where the signal has no effect.
//! 2. **Class Presets:** One control word per instruction class, following the
//!    single-cycle LEGv8 datapath.
//! 3. **ALU Operations:** The operation an instruction asks of the integer ALU.

use std::fmt;

use serde::Serialize;

use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::Grammar;

/// Value of one control line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    /// Deasserted.
    #[default]
    Low,
    /// Asserted.
    High,
    /// Not applicable to this instruction class.
    DontCare,
}

impl Signal {
    /// Whether the line is asserted.
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "0",
            Self::High => "1",
            Self::DontCare => "",
        })
    }
}

/// ALU operation types for the integer datapath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Addition (also address generation).
    #[default]
    Add,
    /// Subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Orr,
    /// Bitwise exclusive OR.
    Eor,
    /// Low 64 bits of the product.
    Mul,
    /// High 64 bits of the signed product.
    Smulh,
    /// High 64 bits of the unsigned product.
    Umulh,
    /// Signed division.
    Sdiv,
    /// Unsigned division.
    Udiv,
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
}

/// The control word of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ControlSignals {
    /// Selects `Rt` (high) or `Rm` (low) as the second register read address.
    pub reg2loc: Signal,
    /// Unconditional branch.
    pub uncond_branch: Signal,
    /// Branch on the condition flags.
    pub flag_branch: Signal,
    /// Branch on a zero register value.
    pub zero_branch: Signal,
    /// Data memory read.
    pub mem_read: Signal,
    /// Write-back value comes from memory rather than the ALU.
    pub mem_to_reg: Signal,
    /// Data memory write.
    pub mem_write: Signal,
    /// Update the condition flags.
    pub flag_write: Signal,
    /// Second ALU operand is the immediate rather than a register.
    pub alu_src: Signal,
    /// 2-bit ALU operation class, `None` when the ALU is unused.
    pub alu_op: Option<u8>,
    /// Register file write.
    pub reg_write: Signal,
}

const L: Signal = Signal::Low;
const H: Signal = Signal::High;
const X: Signal = Signal::DontCare;

impl ControlSignals {
    /// Three-register arithmetic and logic.
    pub const RRR: Self = Self::word([L, L, L, L, L, L, L, L, L], Some(2), H);
    /// Three-register arithmetic and logic that sets flags.
    pub const RRR_FLAGS: Self = Self::word([L, L, L, L, L, L, L, H, L], Some(2), H);
    /// Register-immediate arithmetic, logic, and shifts.
    pub const RRI: Self = Self::word([X, L, L, L, L, L, L, L, H], Some(2), H);
    /// Register-immediate arithmetic and logic that sets flags.
    pub const RRI_FLAGS: Self = Self::word([X, L, L, L, L, L, L, H, H], Some(2), H);
    /// Loads.
    pub const LOAD: Self = Self::word([X, L, L, L, H, H, L, L, H], Some(0), H);
    /// Stores.
    pub const STORE: Self = Self::word([H, L, L, L, L, X, H, L, H], Some(0), L);
    /// Store-exclusive: stores and writes the outcome register.
    pub const STORE_EXCLUSIVE: Self = Self::word([H, L, L, L, H, H, H, L, H], Some(0), H);
    /// `MOVZ`/`MOVK`.
    pub const WIDE_IMMEDIATE: Self = Self::word([X, L, L, L, L, L, L, L, H], Some(2), H);
    /// `B`.
    pub const BRANCH: Self = Self::word([X, H, L, L, L, X, L, L, X], None, L);
    /// `B.cond`.
    pub const COND_BRANCH: Self = Self::word([X, L, H, L, L, X, L, L, X], None, L);
    /// `CBZ`/`CBNZ`.
    pub const COMPARE_BRANCH: Self = Self::word([H, L, L, H, L, X, L, L, L], Some(1), L);
    /// `BR`.
    pub const BRANCH_REGISTER: Self = Self::word([X, H, L, L, L, X, L, L, X], None, L);
    /// `BL`: branches and writes the link register.
    pub const BRANCH_LINK: Self = Self::word([X, H, L, L, L, L, L, L, X], None, H);
    /// `LDA`: writes a text address.
    pub const LOAD_ADDRESS: Self = Self::word([X, L, L, L, L, L, L, L, H], Some(2), H);
    /// `FCMPS`/`FCMPD`: sets flags without a register write.
    pub const FP_COMPARE: Self = Self::word([L, L, L, L, L, L, L, H, L], Some(2), L);

    /// Builds a control word from `[reg2loc, uncond_branch, flag_branch,
    /// zero_branch, mem_read, mem_to_reg, mem_write, flag_write, alu_src]`.
    const fn word(s: [Signal; 9], alu_op: Option<u8>, reg_write: Signal) -> Self {
        Self {
            reg2loc: s[0],
            uncond_branch: s[1],
            flag_branch: s[2],
            zero_branch: s[3],
            mem_read: s[4],
            mem_to_reg: s[5],
            mem_write: s[6],
            flag_write: s[7],
            alu_src: s[8],
            alu_op,
            reg_write,
        }
    }

    /// Selects the control word for a mnemonic.
    ///
    /// Pseudo-instructions get the word of the instruction they expand to.
    pub const fn for_mnemonic(m: Mnemonic) -> Self {
        match m {
            Mnemonic::Cmp => Self::RRR_FLAGS,
            Mnemonic::Cmpi => Self::RRI_FLAGS,
            Mnemonic::Mov => Self::RRR,
            Mnemonic::Br => Self::BRANCH_REGISTER,
            Mnemonic::Bl => Self::BRANCH_LINK,
            Mnemonic::B => Self::BRANCH,
            Mnemonic::Lda => Self::LOAD_ADDRESS,
            Mnemonic::Stxr => Self::STORE_EXCLUSIVE,
            Mnemonic::Fcmps | Mnemonic::Fcmpd => Self::FP_COMPARE,
            _ if m.is_load() => Self::LOAD,
            _ if m.is_store() => Self::STORE,
            _ => match m.form().grammar {
                Grammar::Rrr if m.sets_flags() => Self::RRR_FLAGS,
                Grammar::Rri if m.sets_flags() => Self::RRI_FLAGS,
                Grammar::Rri => Self::RRI,
                Grammar::Risi => Self::WIDE_IMMEDIATE,
                Grammar::L => Self::COND_BRANCH,
                Grammar::Rl => Self::COMPARE_BRANCH,
                _ => Self::RRR,
            },
        }
    }

    /// The ALU operation as a 2-bit string, empty when unused.
    pub fn alu_op_bits(&self) -> String {
        self.alu_op.map_or_else(String::new, |op| format!("{op:02b}"))
    }
}

impl Default for ControlSignals {
    fn default() -> Self {
        Self::RRR
    }
}
