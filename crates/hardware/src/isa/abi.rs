//! LEGv8 register name aliases.
//!
//! Maps the named integer registers onto their fixed indices. The numeric
//! encoding matches the one used by the opcode and control tables.

/// Intra-procedure-call scratch register 0.
pub const IP0: usize = 16;
/// Intra-procedure-call scratch register 1.
pub const IP1: usize = 17;
/// Stack pointer.
pub const SP: usize = 28;
/// Frame pointer.
pub const FP: usize = 29;
/// Link register, written by `BL`.
pub const LR: usize = 30;
/// Zero register: reads as 0, writes are discarded.
pub const XZR: usize = 31;

/// An integer register that has an architectural name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedRegister {
    /// `IP0` (X16).
    Ip0,
    /// `IP1` (X17).
    Ip1,
    /// `SP` (X28).
    Sp,
    /// `FP` (X29).
    Fp,
    /// `LR` (X30).
    Lr,
    /// `XZR` (X31).
    Xzr,
}

impl NamedRegister {
    /// Every named register.
    pub const ALL: [Self; 6] = [Self::Ip0, Self::Ip1, Self::Sp, Self::Fp, Self::Lr, Self::Xzr];

    /// Returns the register index.
    pub const fn index(self) -> usize {
        match self {
            Self::Ip0 => IP0,
            Self::Ip1 => IP1,
            Self::Sp => SP,
            Self::Fp => FP,
            Self::Lr => LR,
            Self::Xzr => XZR,
        }
    }

    /// Returns the upper-case assembly spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ip0 => "IP0",
            Self::Ip1 => "IP1",
            Self::Sp => "SP",
            Self::Fp => "FP",
            Self::Lr => "LR",
            Self::Xzr => "XZR",
        }
    }

    /// Looks up a named register by its upper- or lower-case spelling.
    ///
    /// Mixed case spellings such as `Sp` are not names.
    pub fn from_name(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == text || r.name().to_ascii_lowercase() == text)
    }
}
