//! Program assembly.
//!
//! Runs the lexer, parser, and decoder over a whole source text. It performs:
//! 1. **Line Analysis:** Tokenizes and validates each line, extracting its label,
//!    mnemonic, and operand texts.
//! 2. **Label Binding:** Maps each label to the index of the next instruction.
//! 3. **Decoding:** Produces the instruction list once every label is known.
//! 4. **Error Collection:** Gathers one `(message, line)` error per bad line;
//!    a program with any error cannot be executed.

use tracing::debug;

use crate::common::{AssemblyError, LineError, ParseError};
use crate::isa::decode::{BranchTable, decode};
use crate::isa::instruction::Instruction;
use crate::isa::lexer::lex;
use crate::isa::mnemonic::Mnemonic;
use crate::isa::parser::parse_line;
use crate::isa::token::{Token, TokenType};

/// One line of source after lexing and parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceLine {
    /// Raw text.
    pub text: String,
    /// Tokens, whitespace excluded.
    pub tokens: Vec<Token>,
    /// Label defined on this line, without the colon.
    pub label: Option<String>,
    /// Mnemonic of the instruction on this line.
    pub mnemonic: Option<Mnemonic>,
    /// Operand texts after the mnemonic, without commas or brackets.
    pub operands: Vec<String>,
}

impl SourceLine {
    /// Lexes and validates one line.
    ///
    /// # Returns
    ///
    /// The analysed line, or the first structural error. A line without
    /// tokens is valid and defines nothing.
    pub fn analyse(text: &str) -> Result<Self, ParseError> {
        let tokens = lex(text);
        let mut line = Self { text: text.to_owned(), ..Self::default() };
        if tokens.is_empty() {
            return Ok(line);
        }
        parse_line(&tokens)?;

        line.label = tokens
            .first()
            .filter(|t| t.kind == TokenType::Label)
            .map(|t| t.text.trim_end_matches(':').to_owned());
        if let Some(pos) = tokens.iter().position(|t| t.kind.is_mnemonic()) {
            line.mnemonic = tokens[pos].text.trim().parse().ok();
            line.operands = tokens[pos + 1..]
                .iter()
                .filter(|t| {
                    !matches!(t.kind, TokenType::Comma | TokenType::LBracket | TokenType::RBracket)
                })
                .map(|t| t.text.trim().to_owned())
                .collect();
        }
        line.tokens = tokens;
        Ok(line)
    }
}

/// An assembled program: decoded instructions, label bindings, and errors.
#[derive(Clone, Debug, Default)]
pub struct Program {
    lines: Vec<SourceLine>,
    instructions: Vec<Instruction>,
    branch_table: BranchTable,
    errors: Vec<LineError>,
}

impl Program {
    /// Assembles a complete source text.
    ///
    /// # Examples
    ///
    /// ```
    /// use legv8_core::sim::program::Program;
    ///
    /// let program = Program::assemble("loop: ADDI X1, X1, #1\nB loop");
    /// assert!(program.errors().is_empty());
    /// assert_eq!(program.instructions().len(), 2);
    /// assert_eq!(program.branch_table()["loop"], 0);
    /// ```
    pub fn assemble(source: &str) -> Self {
        Self::from_lines(source.lines())
    }

    /// Assembles a program from individual source lines.
    ///
    /// Line numbers in errors and instructions are zero-based positions in `lines`.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut program = Self::default();

        for (i, text) in lines.into_iter().enumerate() {
            let text = text.as_ref();
            match SourceLine::analyse(text) {
                Ok(line) => program.lines.push(line),
                Err(err) => {
                    program.errors.push(LineError::new(&err, i));
                    program.lines.push(SourceLine { text: text.to_owned(), ..SourceLine::default() });
                }
            }
        }

        let mut count = 0;
        for line in &program.lines {
            if let Some(label) = &line.label {
                let _ = program.branch_table.insert(label.clone(), count);
            }
            if line.mnemonic.is_some() {
                count += 1;
            }
        }

        for (i, line) in program.lines.iter().enumerate() {
            let Some(mnemonic) = line.mnemonic else {
                continue;
            };
            match decode(mnemonic, &line.operands, i, &program.branch_table) {
                Ok(instr) => program.instructions.push(instr),
                Err(err) => program.errors.push(LineError::new(&err, i)),
            }
        }
        program.errors.sort_by_key(|e| e.line);

        debug!(
            lines = program.lines.len(),
            instructions = program.instructions.len(),
            labels = program.branch_table.len(),
            errors = program.errors.len(),
            "assembled program"
        );
        program
    }

    /// Compile errors, ordered by line.
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    /// Whether the program assembled without errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Decoded instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Label bindings.
    pub const fn branch_table(&self) -> &BranchTable {
        &self.branch_table
    }

    /// Every source line, including blank ones.
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Rejects a program that has compile errors.
    pub fn into_checked(self) -> Result<Self, AssemblyError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(AssemblyError::new(self.errors))
        }
    }
}
