//! Operand decoder.
//!
//! Turns a validated mnemonic and its operand strings into an `Instruction`.
//! It performs:
//! 1. **Register Resolution:** `Xn`/`Sn`/`Dn` numbers and the named aliases map
//!    to indices 0-31.
//! 2. **Immediate Checking:** Every immediate is parsed (decimal, `0x` hex, or
//!    leading-zero octal) and checked against the range of its class.
//! 3. **Label Resolution:** Branch targets become instruction indices.
//! 4. **Pseudo-instructions:** `CMP`, `CMPI`, and `MOV` expand to `SUBS`,
//!    `SUBIS`, and `ORR` with `XZR` in the unused position.

use std::collections::HashMap;

use crate::common::error::{DecodeError, Permitted};
use crate::isa::abi::{NamedRegister, XZR};
use crate::isa::instruction::Instruction;
use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::Grammar;

/// Arithmetic and logical immediates.
const ALU_IMMEDIATE: Permitted = Permitted::Range(0, 4095);
/// Data transfer offsets.
const OFFSET: Permitted = Permitted::Range(-256, 255);
/// Shift amounts of `LSL`/`LSR`.
const SHIFT_AMOUNT: Permitted = Permitted::Range(0, 63);
/// `MOVZ`/`MOVK` immediates.
const WIDE_IMMEDIATE: Permitted = Permitted::Range(0, 65535);
/// `MOVZ`/`MOVK` quadrant shifts.
const WIDE_SHIFT: Permitted = Permitted::Values(&[0, 16, 32, 48]);
/// Reported when a quadrant shift is not a number.
const WIDE_SHIFT_SPAN: Permitted = Permitted::Range(0, 48);
/// Exclusive access offsets.
const EXCLUSIVE_OFFSET: Permitted = Permitted::Values(&[0]);

/// Label name to the index of the instruction that follows it.
pub type BranchTable = HashMap<String, usize>;

/// Decodes one instruction.
///
/// # Arguments
///
/// * `mnemonic` - The mnemonic of the line.
/// * `operands` - Operand texts without commas, brackets, or blanks; a shift
///   keyword is kept as its own operand.
/// * `line` - Zero-based source line index.
/// * `branch_table` - Label bindings of the whole program.
///
/// # Returns
///
/// The decoded `Instruction`, or the first illegal operand found.
pub fn decode(
    mnemonic: Mnemonic,
    operands: &[String],
    line: usize,
    branch_table: &BranchTable,
) -> Result<Instruction, DecodeError> {
    let op = |i| operand(operands, i);
    let xzr = XZR as i64;

    let (mnemonic, args) = match mnemonic {
        Mnemonic::Cmp => (Mnemonic::Subs, vec![xzr, register(op(0))?, register(op(1))?]),
        Mnemonic::Cmpi => (
            Mnemonic::Subis,
            vec![xzr, register(op(0))?, immediate(op(1), ALU_IMMEDIATE)?],
        ),
        Mnemonic::Mov => (Mnemonic::Orr, vec![register(op(0))?, xzr, register(op(1))?]),
        m => (m, operands_of(m, operands, branch_table)?),
    };
    Ok(Instruction::new(mnemonic, args, line))
}

fn operand(operands: &[String], idx: usize) -> &str {
    operands.get(idx).map_or("", String::as_str)
}

fn operands_of(
    m: Mnemonic,
    operands: &[String],
    branch_table: &BranchTable,
) -> Result<Vec<i64>, DecodeError> {
    let op = |i| operand(operands, i);
    Ok(match m.form().grammar {
        Grammar::R => vec![register(op(0))?],
        Grammar::Rr => vec![register(op(0))?, register(op(1))?],
        Grammar::Rrr => vec![register(op(0))?, register(op(1))?, register(op(2))?],
        Grammar::Ri => vec![register(op(0))?, immediate(op(1), ALU_IMMEDIATE)?],
        Grammar::Rri => {
            let permitted = if matches!(m, Mnemonic::Lsl | Mnemonic::Lsr) {
                SHIFT_AMOUNT
            } else {
                ALU_IMMEDIATE
            };
            vec![register(op(0))?, register(op(1))?, immediate(op(2), permitted)?]
        }
        Grammar::Rm => {
            let permitted = if m == Mnemonic::Ldxr { EXCLUSIVE_OFFSET } else { OFFSET };
            vec![register(op(0))?, register(op(1))?, optional_immediate(op(2), permitted)?]
        }
        Grammar::Rrm => vec![
            register(op(0))?,
            register(op(1))?,
            register(op(2))?,
            optional_immediate(op(3), EXCLUSIVE_OFFSET)?,
        ],
        Grammar::Risi => {
            let shift = match op(3) {
                "" => 0,
                text => match parse_immediate(text) {
                    None => return Err(out_of_bounds(text, WIDE_SHIFT_SPAN)),
                    Some(v) if WIDE_SHIFT.allows(v) => v,
                    Some(_) => return Err(out_of_bounds(text, WIDE_SHIFT)),
                },
            };
            vec![register(op(0))?, immediate(op(1), WIDE_IMMEDIATE)?, shift]
        }
        Grammar::L => vec![label(op(0), branch_table)?],
        Grammar::Rl => vec![register(op(0))?, label(op(1), branch_table)?],
    })
}

/// Resolves a register name of any file to its index.
///
/// # Arguments
///
/// * `text` - A register token such as `X5`, `xzr`, `SP`, `S3`, or `D31`.
pub fn register(text: &str) -> Result<i64, DecodeError> {
    if let Some(named) = NamedRegister::from_name(text) {
        return Ok(named.index() as i64);
    }
    text.get(1..)
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|&n| n < 32)
        .map(i64::from)
        .ok_or_else(|| DecodeError::InvalidRegister(text.to_owned()))
}

/// Parses an immediate.
///
/// A leading `#` is optional. `0x`/`0X` selects hexadecimal and a leading `0`
/// followed by more digits selects octal.
///
/// # Returns
///
/// The value, or `None` if the text is not a number.
pub fn parse_immediate(text: &str) -> Option<i64> {
    let body = text.strip_prefix('#').unwrap_or(text);
    let (negative, digits) = body.strip_prefix('-').map_or((false, body), |rest| (true, rest));
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn immediate(text: &str, permitted: Permitted) -> Result<i64, DecodeError> {
    parse_immediate(text)
        .filter(|&v| permitted.allows(v))
        .ok_or_else(|| out_of_bounds(text, permitted))
}

fn optional_immediate(text: &str, permitted: Permitted) -> Result<i64, DecodeError> {
    if text.is_empty() { Ok(0) } else { immediate(text, permitted) }
}

fn out_of_bounds(text: &str, permitted: Permitted) -> DecodeError {
    DecodeError::ImmediateOutOfBounds {
        text: text.strip_prefix('#').unwrap_or(text).to_owned(),
        permitted,
    }
}

fn label(name: &str, branch_table: &BranchTable) -> Result<i64, DecodeError> {
    branch_table
        .get(name)
        .map(|&idx| idx as i64)
        .ok_or_else(|| DecodeError::UndefinedLabel(name.to_owned()))
}
