//! LEGv8 instruction mnemonics.
//!
//! This module defines the catalog of supported mnemonics. Each entry records:
//! 1. **Spelling:** The upper-case name; the all-lower-case form is also accepted.
//! 2. **Class:** The lexer token class, which selects the operand grammar.
//! 3. **Encoding:** The opcode bit string and the 4-bit ALU control string
//!    shown by the datapath view. Pseudo-instructions carry neither.

use std::fmt;
use std::str::FromStr;

use crate::common::reg::RegisterKind;
use crate::core::arch::flags::Condition;
use crate::isa::token::{Form, Grammar, TokenType};

/// A LEGv8 instruction mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Add,
    Adds,
    Addi,
    Addis,
    Mul,
    Smulh,
    Umulh,
    Sdiv,
    Udiv,
    Sub,
    Subs,
    Subi,
    Subis,
    And,
    Ands,
    Andi,
    Andis,
    Orr,
    Orri,
    Eor,
    Eori,
    Lsl,
    Lsr,
    Ldur,
    Stur,
    Ldursw,
    Sturw,
    Ldurh,
    Sturh,
    Ldurb,
    Sturb,
    Ldxr,
    Stxr,
    Movz,
    Movk,
    Cbz,
    Cbnz,
    Lda,
    BEq,
    BNe,
    BHs,
    BLo,
    BHi,
    BLs,
    BGe,
    BLt,
    BGt,
    BLe,
    BMi,
    BPl,
    BVs,
    BVc,
    B,
    Br,
    Bl,
    Cmp,
    Cmpi,
    Mov,
    Fadds,
    Faddd,
    Fcmps,
    Fcmpd,
    Fdivs,
    Fdivd,
    Fmuls,
    Fmuld,
    Fsubs,
    Fsubd,
    Sturs,
    Ldurs,
    Sturd,
    Ldurd,
}

/// Static properties of one mnemonic.
#[derive(Clone, Copy, Debug)]
struct Info {
    upper: &'static str,
    class: TokenType,
    opcode: Option<&'static str>,
    alu_control: Option<&'static str>,
}

const fn info(
    upper: &'static str,
    class: TokenType,
    opcode: Option<&'static str>,
    alu_control: Option<&'static str>,
) -> Info {
    Info { upper, class, opcode, alu_control }
}

impl Mnemonic {
    /// Every mnemonic in catalog order.
    pub const ALL: [Self; 72] = [
        Self::Add,
        Self::Adds,
        Self::Addi,
        Self::Addis,
        Self::Mul,
        Self::Smulh,
        Self::Umulh,
        Self::Sdiv,
        Self::Udiv,
        Self::Sub,
        Self::Subs,
        Self::Subi,
        Self::Subis,
        Self::And,
        Self::Ands,
        Self::Andi,
        Self::Andis,
        Self::Orr,
        Self::Orri,
        Self::Eor,
        Self::Eori,
        Self::Lsl,
        Self::Lsr,
        Self::Ldur,
        Self::Stur,
        Self::Ldursw,
        Self::Sturw,
        Self::Ldurh,
        Self::Sturh,
        Self::Ldurb,
        Self::Sturb,
        Self::Ldxr,
        Self::Stxr,
        Self::Movz,
        Self::Movk,
        Self::Cbz,
        Self::Cbnz,
        Self::Lda,
        Self::BEq,
        Self::BNe,
        Self::BHs,
        Self::BLo,
        Self::BHi,
        Self::BLs,
        Self::BGe,
        Self::BLt,
        Self::BGt,
        Self::BLe,
        Self::BMi,
        Self::BPl,
        Self::BVs,
        Self::BVc,
        Self::B,
        Self::Br,
        Self::Bl,
        Self::Cmp,
        Self::Cmpi,
        Self::Mov,
        Self::Fadds,
        Self::Faddd,
        Self::Fcmps,
        Self::Fcmpd,
        Self::Fdivs,
        Self::Fdivd,
        Self::Fmuls,
        Self::Fmuld,
        Self::Fsubs,
        Self::Fsubd,
        Self::Sturs,
        Self::Ldurs,
        Self::Sturd,
        Self::Ldurd,
    ];

    const fn info(self) -> Info {
        use TokenType as T;
        const B_COND: Option<&str> = Some("01010100");
        match self {
            Self::Add => info("ADD", T::XMnemonicRrr, Some("10001011000"), Some("0010")),
            Self::Adds => info("ADDS", T::XMnemonicRrr, Some("10101011000"), Some("0010")),
            Self::Addi => info("ADDI", T::XMnemonicRri, Some("1001000100"), Some("0010")),
            Self::Addis => info("ADDIS", T::XMnemonicRri, Some("1011000111"), Some("0010")),
            Self::Mul => info("MUL", T::XMnemonicRrr, Some("10011011000"), Some("0010")),
            Self::Smulh => info("SMULH", T::XMnemonicRrr, Some("10011011010"), Some("0010")),
            Self::Umulh => info("UMULH", T::XMnemonicRrr, Some("10011011110"), Some("0010")),
            Self::Sdiv => info("SDIV", T::XMnemonicRrr, Some("10011010110"), Some("0010")),
            Self::Udiv => info("UDIV", T::XMnemonicRrr, Some("10011010110"), Some("0010")),
            Self::Sub => info("SUB", T::XMnemonicRrr, Some("11001011000"), Some("0110")),
            Self::Subs => info("SUBS", T::XMnemonicRrr, Some("11101011000"), Some("0110")),
            Self::Subi => info("SUBI", T::XMnemonicRri, Some("1101000100"), Some("0110")),
            Self::Subis => info("SUBIS", T::XMnemonicRri, Some("1111000100"), Some("0110")),
            Self::And => info("AND", T::XMnemonicRrr, Some("10001010000"), Some("0000")),
            Self::Ands => info("ANDS", T::XMnemonicRrr, Some("11101010000"), Some("0000")),
            Self::Andi => info("ANDI", T::XMnemonicRri, Some("1001001000"), Some("0000")),
            Self::Andis => info("ANDIS", T::XMnemonicRri, Some("1111001000"), Some("0000")),
            Self::Orr => info("ORR", T::XMnemonicRrr, Some("10101010000"), Some("0001")),
            Self::Orri => info("ORRI", T::XMnemonicRri, Some("1011001000"), Some("0001")),
            Self::Eor => info("EOR", T::XMnemonicRrr, Some("11001010000"), Some("1011")),
            Self::Eori => info("EORI", T::XMnemonicRri, Some("1101001000"), Some("1011")),
            Self::Lsl => info("LSL", T::XMnemonicRri, Some("11010011011"), Some("1101")),
            Self::Lsr => info("LSR", T::XMnemonicRri, Some("11010011010"), Some("1110")),
            Self::Ldur => info("LDUR", T::XMnemonicRm, Some("11111000010"), Some("0010")),
            Self::Stur => info("STUR", T::XMnemonicRm, Some("11111000000"), Some("0010")),
            Self::Ldursw => info("LDURSW", T::XMnemonicRm, Some("10111000100"), Some("0010")),
            Self::Sturw => info("STURW", T::XMnemonicRm, Some("10111000000"), Some("0010")),
            Self::Ldurh => info("LDURH", T::XMnemonicRm, Some("01111000010"), Some("0010")),
            Self::Sturh => info("STURH", T::XMnemonicRm, Some("01111000000"), Some("0010")),
            Self::Ldurb => info("LDURB", T::XMnemonicRm, Some("00111000010"), Some("0010")),
            Self::Sturb => info("STURB", T::XMnemonicRm, Some("00111000000"), Some("0010")),
            Self::Ldxr => info("LDXR", T::XMnemonicRm, Some("11001000010"), Some("0010")),
            Self::Stxr => info("STXR", T::XMnemonicRrm, Some("11001000000"), Some("0010")),
            Self::Movz => info("MOVZ", T::XMnemonicRisi, Some("110100101"), Some("0001")),
            Self::Movk => info("MOVK", T::XMnemonicRisi, Some("111100101"), Some("0001")),
            Self::Cbz => info("CBZ", T::XMnemonicRl, Some("10110100"), Some("0111")),
            Self::Cbnz => info("CBNZ", T::XMnemonicRl, Some("10110101"), Some("0111")),
            Self::Lda => info("LDA", T::XMnemonicRl, None, None),
            Self::BEq => info("B.EQ", T::MnemonicL, B_COND, None),
            Self::BNe => info("B.NE", T::MnemonicL, B_COND, None),
            Self::BHs => info("B.HS", T::MnemonicL, B_COND, None),
            Self::BLo => info("B.LO", T::MnemonicL, B_COND, None),
            Self::BHi => info("B.HI", T::MnemonicL, B_COND, None),
            Self::BLs => info("B.LS", T::MnemonicL, B_COND, None),
            Self::BGe => info("B.GE", T::MnemonicL, B_COND, None),
            Self::BLt => info("B.LT", T::MnemonicL, B_COND, None),
            Self::BGt => info("B.GT", T::MnemonicL, B_COND, None),
            Self::BLe => info("B.LE", T::MnemonicL, B_COND, None),
            Self::BMi => info("B.MI", T::MnemonicL, B_COND, None),
            Self::BPl => info("B.PL", T::MnemonicL, B_COND, None),
            Self::BVs => info("B.VS", T::MnemonicL, B_COND, None),
            Self::BVc => info("B.VC", T::MnemonicL, B_COND, None),
            Self::B => info("B", T::MnemonicL, Some("000101"), None),
            Self::Br => info("BR", T::XMnemonicR, Some("11010110000"), None),
            Self::Bl => info("BL", T::MnemonicL, Some("100101"), None),
            Self::Cmp => info("CMP", T::XMnemonicRr, None, None),
            Self::Cmpi => info("CMPI", T::XMnemonicRi, None, None),
            Self::Mov => info("MOV", T::XMnemonicRr, None, None),
            Self::Fadds => info("FADDS", T::SMnemonicRrr, Some("00011110001"), Some("0110")),
            Self::Faddd => info("FADDD", T::DMnemonicRrr, Some("00011110011"), Some("0110")),
            Self::Fcmps => info("FCMPS", T::SMnemonicRr, Some("00011110001"), Some("0110")),
            Self::Fcmpd => info("FCMPD", T::DMnemonicRr, Some("00011110011"), Some("0110")),
            Self::Fdivs => info("FDIVS", T::SMnemonicRrr, Some("00011110001"), Some("0000")),
            Self::Fdivd => info("FDIVD", T::DMnemonicRrr, Some("00011110011"), Some("0000")),
            Self::Fmuls => info("FMULS", T::SMnemonicRrr, Some("00011110001"), Some("0000")),
            Self::Fmuld => info("FMULD", T::DMnemonicRrr, Some("00011110011"), Some("0000")),
            Self::Fsubs => info("FSUBS", T::SMnemonicRrr, Some("00011110001"), Some("0001")),
            Self::Fsubd => info("FSUBD", T::DMnemonicRrr, Some("00011110011"), Some("0001")),
            Self::Sturs => info("STURS", T::SMnemonicRm, Some("10111100000"), Some("0010")),
            Self::Ldurs => info("LDURS", T::SMnemonicRm, Some("10111100010"), Some("0010")),
            Self::Sturd => info("STURD", T::DMnemonicRm, Some("11111100000"), Some("0010")),
            Self::Ldurd => info("LDURD", T::DMnemonicRm, Some("11111100010"), Some("0010")),
        }
    }

    /// Upper-case spelling.
    pub const fn name(self) -> &'static str {
        self.info().upper
    }

    /// Lexer class of the mnemonic.
    pub const fn token_type(self) -> TokenType {
        self.info().class
    }

    /// Operand grammar and register file.
    ///
    /// Every catalog entry uses a mnemonic token class, so the fallback arm
    /// is never taken.
    pub const fn form(self) -> Form {
        match self.info().class.form() {
            Some(form) => form,
            None => Form { grammar: Grammar::L, class: RegisterKind::X },
        }
    }

    /// Opcode bit string, or `None` for pseudo-instructions and `LDA`.
    pub const fn opcode(self) -> Option<&'static str> {
        self.info().opcode
    }

    /// 4-bit ALU control string, or `None` when the ALU is unused.
    pub const fn alu_control(self) -> Option<&'static str> {
        self.info().alu_control
    }

    /// Whether `text` is exactly the upper- or lower-case spelling.
    ///
    /// # Arguments
    ///
    /// * `text` - Candidate spelling without surrounding blanks.
    pub fn is_spelled(self, text: &str) -> bool {
        let upper = self.name();
        text == upper
            || (text.len() == upper.len()
                && text.bytes().zip(upper.bytes()).all(|(t, u)| t == u.to_ascii_lowercase()))
    }

    /// Branch condition of a `B.cond` mnemonic.
    pub const fn condition(self) -> Option<Condition> {
        Some(match self {
            Self::BEq => Condition::Eq,
            Self::BNe => Condition::Ne,
            Self::BHs => Condition::Hs,
            Self::BLo => Condition::Lo,
            Self::BHi => Condition::Hi,
            Self::BLs => Condition::Ls,
            Self::BGe => Condition::Ge,
            Self::BLt => Condition::Lt,
            Self::BGt => Condition::Gt,
            Self::BLe => Condition::Le,
            Self::BMi => Condition::Mi,
            Self::BPl => Condition::Pl,
            Self::BVs => Condition::Vs,
            Self::BVc => Condition::Vc,
            _ => return None,
        })
    }

    /// Whether the instruction writes the condition flags.
    pub const fn sets_flags(self) -> bool {
        matches!(
            self,
            Self::Adds
                | Self::Subs
                | Self::Ands
                | Self::Addis
                | Self::Subis
                | Self::Andis
                | Self::Fcmps
                | Self::Fcmpd
                | Self::Cmp
                | Self::Cmpi
        )
    }

    /// Whether the instruction reads data memory into a register.
    pub const fn is_load(self) -> bool {
        matches!(
            self,
            Self::Ldur
                | Self::Ldursw
                | Self::Ldurh
                | Self::Ldurb
                | Self::Ldxr
                | Self::Ldurs
                | Self::Ldurd
        )
    }

    /// Whether the instruction writes data memory.
    pub const fn is_store(self) -> bool {
        matches!(
            self,
            Self::Stur
                | Self::Sturw
                | Self::Sturh
                | Self::Sturb
                | Self::Stxr
                | Self::Sturs
                | Self::Sturd
        )
    }

    /// Whether the instruction can redirect the instruction index.
    pub const fn is_branch(self) -> bool {
        matches!(self.form().grammar, Grammar::L | Grammar::R)
            || matches!(self, Self::Cbz | Self::Cbnz)
    }

    /// Whether the instruction operates on the FP register file.
    pub const fn is_float(self) -> bool {
        !matches!(self.form().class, RegisterKind::X)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a mnemonic spelling.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} instruction mnemonic does not exist in LEGv8")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.is_spelled(s))
            .ok_or_else(|| UnknownMnemonic(s.to_owned()))
    }
}
