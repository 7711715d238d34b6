//! Condition flags.
//!
//! This module models the NZCV condition flags and the fourteen branch
//! conditions evaluated against them by `B.cond`.

use serde::Serialize;

/// The N, Z, C, and V condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Flags {
    /// Negative: bit 63 (or bit 31) of the result.
    pub n: bool,
    /// Zero: the result was zero.
    pub z: bool,
    /// Carry: unsigned carry out (set on no-borrow for subtraction).
    pub c: bool,
    /// Overflow: signed overflow.
    pub v: bool,
}

impl Flags {
    /// Creates a flag set from individual values.
    pub const fn new(n: bool, z: bool, c: bool, v: bool) -> Self {
        Self { n, z, c, v }
    }
}

/// Branch condition encoded in a `B.cond` mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Condition {
    /// Equal (`Z`).
    Eq,
    /// Not equal (`!Z`).
    Ne,
    /// Unsigned higher or same (`C`).
    Hs,
    /// Unsigned lower (`!C`).
    Lo,
    /// Unsigned higher (`!Z && C`).
    Hi,
    /// Unsigned lower or same (`!(!Z && C)`).
    Ls,
    /// Signed greater or equal (`N == V`).
    Ge,
    /// Signed less than (`N != V`).
    Lt,
    /// Signed greater than (`!Z && N == V`).
    Gt,
    /// Signed less or equal (`!(!Z && N == V)`).
    Le,
    /// Negative (`N`).
    Mi,
    /// Positive or zero (`!N`).
    Pl,
    /// Overflow set (`V`).
    Vs,
    /// Overflow clear (`!V`).
    Vc,
}

impl Condition {
    /// Evaluates the condition against a flag set.
    ///
    /// # Arguments
    ///
    /// * `flags` - The current condition flags.
    ///
    /// # Returns
    ///
    /// `true` if a branch guarded by this condition is taken.
    pub const fn holds(self, flags: Flags) -> bool {
        let Flags { n, z, c, v } = flags;
        match self {
            Self::Eq => z,
            Self::Ne => !z,
            Self::Hs => c,
            Self::Lo => !c,
            Self::Hi => !z && c,
            Self::Ls => !(!z && c),
            Self::Ge => n == v,
            Self::Lt => n != v,
            Self::Gt => !z && n == v,
            Self::Le => !(!z && n == v),
            Self::Mi => n,
            Self::Pl => !n,
            Self::Vs => v,
            Self::Vc => !v,
        }
    }

    /// Whether a taken branch on this condition is published as `branch_taken`.
    ///
    /// `B.LT` redirects the PC but leaves the observable flag clear, which also
    /// means the pipeline model never flushes after it.
    pub const fn publishes_taken(self) -> bool {
        !matches!(self, Self::Lt)
    }
}
