//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains everything between LEGv8 source text and executable `Instruction`s.
//!
//! # Pipeline
//!
//! * `lexer`: splits a line into `token`s.
//! * `parser`: validates the token sequence against the operand grammar of its mnemonic.
//! * `decode`: resolves registers, immediates, and labels into an `instruction`.
//! * `disasm`: renders instructions back to text for logs.

/// Named register indices (`SP`, `FP`, `LR`, `XZR`, `IP0`, `IP1`).
pub mod abi;

/// Operand decoding, range checks, and pseudo-instruction expansion.
pub mod decode;

/// Instruction disassembler for logs and diagnostics.
pub mod disasm;

/// Decoded instruction with its bound control word.
pub mod instruction;

/// Line tokenizer.
pub mod lexer;

/// Mnemonic catalog with opcode and ALU-control bits.
pub mod mnemonic;

/// Parser state machine and error diagnosis.
pub mod parser;

/// Token classes and tokens.
pub mod token;
