//! Decoded instructions.
//!
//! An `Instruction` is the immutable result of decoding one source line: the
//! mnemonic after pseudo-instruction expansion, integer operands, the source
//! line, and the control word bound at decode time.

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::mnemonic::Mnemonic;

/// A decoded, executable instruction.
///
/// Operands are stored in the order the executor consumes them:
/// register indices (0-31), immediates, or branch-target instruction indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    mnemonic: Mnemonic,
    args: Vec<i64>,
    line: usize,
    control: ControlSignals,
}

impl Instruction {
    /// Creates an instruction and binds the control word of its mnemonic.
    ///
    /// # Arguments
    ///
    /// * `mnemonic` - The executable mnemonic.
    /// * `args` - Integer operands.
    /// * `line` - Zero-based source line index.
    pub fn new(mnemonic: Mnemonic, args: Vec<i64>, line: usize) -> Self {
        Self { mnemonic, args, line, control: ControlSignals::for_mnemonic(mnemonic) }
    }

    /// The mnemonic executed.
    pub const fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    /// All integer operands.
    pub fn args(&self) -> &[i64] {
        &self.args
    }

    /// One operand; absent operands read as 0.
    pub fn arg(&self, idx: usize) -> i64 {
        self.args.get(idx).copied().unwrap_or(0)
    }

    /// One operand interpreted as a register index.
    pub fn reg(&self, idx: usize) -> usize {
        self.arg(idx) as usize
    }

    /// Zero-based index of the source line.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The control word bound at decode time.
    pub const fn control(&self) -> &ControlSignals {
        &self.control
    }
}
