//! Assembly and execution error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Parse Errors:** Structural problems in a token sequence, reported once per line.
//! 2. **Decode Errors:** Undefined labels, illegal immediates, and bad register numbers.
//! 3. **Runtime Faults:** Segment faults and alignment violations raised by execution.
//! 4. **Line Errors:** The `(message, line)` pairs handed to the presentation layer,
//!    and the `AssemblyError` gate that keeps a broken program from running.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Structural error found while driving the parser state machine over one line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not start with a label or a supported mnemonic.
    ///
    /// The associated text echoes the offending token (joined with its successor
    /// when that helps identify a misspelled mnemonic).
    #[error("Unsupported instruction: '{0}'")]
    UnsupportedInstruction(String),

    /// A token of the wrong class appeared where the grammar expects another.
    #[error("Invalid token: expected '{expected}', found '{found}'")]
    InvalidToken {
        /// Display name of the token class (or exact mnemonic) the grammar expects.
        expected: String,
        /// Raw text of the token that was found.
        found: String,
    },

    /// A token followed a complete instruction.
    #[error("Unexpected token: '{0}'. Remove this token.")]
    UnexpectedToken(String),

    /// The line ended before the instruction was complete.
    #[error("{0}")]
    MissingTokens(ExpectedTokens),
}

/// The token names still required to complete an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedTokens {
    /// Display names, in grammar order.
    pub names: Vec<String>,
    /// Whether the message uses the plural form.
    ///
    /// Follows the length of the full expectation list of the state, which can
    /// differ from `names` when the report starts part-way through that list.
    pub plural: bool,
}

impl fmt::Display for ExpectedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.plural { "Missing tokens: " } else { "Missing token: " })?;
        for name in &self.names {
            write!(f, "'{name}' ")?;
        }
        Ok(())
    }
}

/// Error raised while turning a validated line into an `Instruction`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A branch or `LDA` names a label that no line defines.
    #[error("Undefined label: '{0}'")]
    UndefinedLabel(String),

    /// An immediate lies outside the range its instruction class allows.
    #[error("Illegal immediate value: {text}. {permitted}")]
    ImmediateOutOfBounds {
        /// The immediate as written, without the leading `#`.
        text: String,
        /// The values the instruction accepts.
        permitted: Permitted,
    },

    /// A register name lexed correctly but its number is not 0-31.
    #[error("Invalid register: '{0}'")]
    InvalidRegister(String),
}

/// The permitted values of an immediate operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permitted {
    /// Any value in the inclusive range.
    Range(i64, i64),
    /// Exactly one of the listed values.
    Values(&'static [i64]),
}

impl Permitted {
    /// Whether `value` is acceptable.
    pub fn allows(self, value: i64) -> bool {
        match self {
            Self::Range(lo, hi) => (lo..=hi).contains(&value),
            Self::Values(values) => values.contains(&value),
        }
    }
}

impl fmt::Display for Permitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(lo, hi) => write!(f, "Permitted range: {lo} - {hi} inclusive."),
            Self::Values(values) => {
                f.write_str("Permitted values: ")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Memory segment named in a segment fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Segment {
    /// The data window between the dynamic data offset and the stack base.
    StackOrHeap,
    /// The instruction window of the loaded program.
    Text,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StackOrHeap => "stack or heap",
            Self::Text => "text",
        })
    }
}

/// Fault raised by an instruction while it executes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeFault {
    /// A data access or branch target fell outside its segment.
    #[error("Memory address out of bounds: 0x{address:x} is not in the {segment} segment")]
    SegmentFault {
        /// The first address that violated the bounds check.
        address: u64,
        /// The segment the address was required to lie in.
        segment: Segment,
    },

    /// A `BR` target is not a multiple of the instruction size.
    #[error("The address 0x{0:x} is not word aligned.")]
    PcAlignment(u64),

    /// An SP-based data transfer ran while SP was not 16-byte aligned.
    #[error("Data transfer operation with misaligned SP: 0x{0:x} is not quadword aligned.")]
    SpAlignment(u64),

    /// `run` executed the configured maximum number of steps without finishing.
    #[error("Execution step limit of {0} exceeded")]
    StepLimit(u64),

    /// A pseudo-instruction reached execution without being rewritten by the decoder.
    #[error("Pseudo-instruction '{0}' cannot be executed directly")]
    Undecoded(&'static str),
}

/// An error message tied to a source line.
///
/// `line` is the zero-based index of the line in the program text; the
/// `Display` form shows it one-based.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("line {}: {message}", .line + 1)]
pub struct LineError {
    /// Human readable message.
    pub message: String,
    /// Zero-based source line index.
    pub line: usize,
}

impl LineError {
    /// Creates a line error from any displayable error.
    ///
    /// # Arguments
    ///
    /// * `err` - The underlying parse, decode, or runtime error.
    /// * `line` - Zero-based index of the offending source line.
    pub fn new(err: &impl fmt::Display, line: usize) -> Self {
        Self { message: err.to_string(), line }
    }
}

/// Compile errors that prevent a program from being simulated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("program has {} compile error(s), first at {}", .errors.len(), first_error(.errors))]
pub struct AssemblyError {
    errors: Vec<LineError>,
}

fn first_error(errors: &[LineError]) -> String {
    errors.first().map_or_else(String::new, ToString::to_string)
}

impl AssemblyError {
    /// Wraps a list of compile errors.
    pub const fn new(errors: Vec<LineError>) -> Self {
        Self { errors }
    }

    /// Returns every compile error in source order.
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }
}
