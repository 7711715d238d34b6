//! Lexical token catalog.
//!
//! This module defines the token classes of LEGv8 assembly and the `Token`
//! values produced by the lexer. It provides:
//! 1. **Catalog Order:** `TokenType::ALL` lists every class in the order the
//!    lexer tries them; earlier classes win over later ones at the same offset.
//! 2. **Display Names:** The names used in parser error messages.
//! 3. **Grammar Mapping:** The operand form selected by each mnemonic class.

use std::fmt;

use crate::common::reg::RegisterKind;

/// Lexical class of a token.
///
/// Mnemonic classes are named after the register file of their data operands
/// (`X`, `S`, `D`) and the shape of their operand list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// Decimal or hexadecimal immediate with optional `#` and sign.
    Immediate,
    /// Integer register (`X0`-`X30`, `XZR`, `SP`, `FP`, `LR`, `IP0`, `IP1`).
    XRegister,
    /// Single-precision register.
    SRegister,
    /// Double-precision register.
    DRegister,
    /// `BR`
    XMnemonicR,
    /// `MOVZ`, `MOVK`
    XMnemonicRisi,
    /// `CMPI`
    XMnemonicRi,
    /// `CMP`, `MOV`
    XMnemonicRr,
    /// `FCMPS`
    SMnemonicRr,
    /// `FCMPD`
    DMnemonicRr,
    /// Register-register-immediate integer operations and shifts.
    XMnemonicRri,
    /// Three-register integer operations.
    XMnemonicRrr,
    /// Three-register single-precision operations.
    SMnemonicRrr,
    /// Three-register double-precision operations.
    DMnemonicRrr,
    /// Integer loads and stores.
    XMnemonicRm,
    /// `LDURS`, `STURS`
    SMnemonicRm,
    /// `LDURD`, `STURD`
    DMnemonicRm,
    /// `STXR`
    XMnemonicRrm,
    /// `B`, `BL`, and the fourteen `B.cond` forms.
    MnemonicL,
    /// `CBZ`, `CBNZ`, `LDA`
    XMnemonicRl,
    /// Identifier followed by `:`.
    Label,
    /// Bare identifier, used for branch targets.
    Identifier,
    /// Run of blanks; never emitted.
    Whitespace,
    /// Any other run of non-whitespace characters.
    Error,
}

/// Operand grammar shared by a family of mnemonics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `reg`
    R,
    /// `reg , reg`
    Rr,
    /// `reg , reg , reg`
    Rrr,
    /// `reg , imm`
    Ri,
    /// `reg , reg , imm`
    Rri,
    /// `reg , [ xreg (, imm)? ]`
    Rm,
    /// `reg , reg , [ xreg (, imm)? ]`
    Rrm,
    /// `reg , imm (, LSL imm)?`
    Risi,
    /// `identifier`
    L,
    /// `reg , identifier`
    Rl,
}

/// A grammar together with the register file of its data operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Form {
    /// Operand shape.
    pub grammar: Grammar,
    /// Register file of the non-base register operands.
    pub class: RegisterKind,
}

impl TokenType {
    /// Every token class in lexer priority order.
    pub const ALL: [Self; 27] = [
        Self::LBracket,
        Self::RBracket,
        Self::Comma,
        Self::Immediate,
        Self::XRegister,
        Self::SRegister,
        Self::DRegister,
        Self::XMnemonicR,
        Self::XMnemonicRisi,
        Self::XMnemonicRi,
        Self::XMnemonicRr,
        Self::SMnemonicRr,
        Self::DMnemonicRr,
        Self::XMnemonicRri,
        Self::XMnemonicRrr,
        Self::SMnemonicRrr,
        Self::DMnemonicRrr,
        Self::XMnemonicRm,
        Self::SMnemonicRm,
        Self::DMnemonicRm,
        Self::XMnemonicRrm,
        Self::MnemonicL,
        Self::XMnemonicRl,
        Self::Label,
        Self::Identifier,
        Self::Whitespace,
        Self::Error,
    ];

    /// Name used for this class in parser error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Immediate => "IMMEDIATE",
            Self::XRegister => "XREGISTER",
            Self::SRegister => "SREGISTER",
            Self::DRegister => "DREGISTER",
            Self::XMnemonicR
            | Self::XMnemonicRisi
            | Self::XMnemonicRi
            | Self::XMnemonicRr
            | Self::XMnemonicRri
            | Self::XMnemonicRrr
            | Self::XMnemonicRm
            | Self::XMnemonicRrm
            | Self::XMnemonicRl => "XMNEMONIC",
            Self::SMnemonicRr | Self::SMnemonicRrr | Self::SMnemonicRm => "SMNEMONIC",
            Self::DMnemonicRr | Self::DMnemonicRrr | Self::DMnemonicRm => "DMNEMONIC",
            Self::MnemonicL => "MNEMONIC",
            Self::Label => "LABEL",
            Self::Identifier => "IDENTIFIER",
            Self::Whitespace => "WHITESPACE",
            Self::Error => "ERROR",
        }
    }

    /// Returns the operand form introduced by a mnemonic class.
    ///
    /// # Returns
    ///
    /// `None` for every class that is not a mnemonic.
    pub const fn form(self) -> Option<Form> {
        use Grammar as G;
        use RegisterKind as K;
        let (grammar, class) = match self {
            Self::XMnemonicR => (G::R, K::X),
            Self::XMnemonicRisi => (G::Risi, K::X),
            Self::XMnemonicRi => (G::Ri, K::X),
            Self::XMnemonicRr => (G::Rr, K::X),
            Self::SMnemonicRr => (G::Rr, K::S),
            Self::DMnemonicRr => (G::Rr, K::D),
            Self::XMnemonicRri => (G::Rri, K::X),
            Self::XMnemonicRrr => (G::Rrr, K::X),
            Self::SMnemonicRrr => (G::Rrr, K::S),
            Self::DMnemonicRrr => (G::Rrr, K::D),
            Self::XMnemonicRm => (G::Rm, K::X),
            Self::SMnemonicRm => (G::Rm, K::S),
            Self::DMnemonicRm => (G::Rm, K::D),
            Self::XMnemonicRrm => (G::Rrm, K::X),
            Self::MnemonicL => (G::L, K::X),
            Self::XMnemonicRl => (G::Rl, K::X),
            _ => return None,
        };
        Some(Form { grammar, class })
    }

    /// Whether this class introduces an instruction.
    pub const fn is_mnemonic(self) -> bool {
        self.form().is_some()
    }

    /// Returns the register token class for a register file.
    pub const fn register(kind: RegisterKind) -> Self {
        match kind {
            RegisterKind::X => Self::XRegister,
            RegisterKind::S => Self::SRegister,
            RegisterKind::D => Self::DRegister,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One lexeme of a source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Lexical class.
    pub kind: TokenType,
    /// Raw text, including the trailing blanks of a mnemonic.
    pub text: String,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenType, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}
