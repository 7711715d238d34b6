//! Line parser.
//!
//! Validates the token sequence of one line with a table-driven state
//! machine. It provides:
//! 1. **States:** `Init`, `Labelled` (a label was read), and
//!    `Operands { form, position }`, a cursor into the operand layout of the
//!    grammar selected by the mnemonic.
//! 2. **Transitions:** `ParserState::transition` consumes one token and yields
//!    the next state or the reason the token was rejected.
//! 3. **Diagnostics:** `parse_line` turns the first rejection, or an early end
//!    of line, into a `ParseError` that names the offending text or the
//!    tokens still missing.

use crate::common::error::{ExpectedTokens, ParseError};
use crate::common::reg::RegisterKind;
use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::{Form, Grammar, Token, TokenType};

/// Spelling of the only shift accepted by `MOVZ`/`MOVK`.
const SHIFT_MNEMONIC: &str = "LSL";

/// One position of an operand layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// A data register from the register file of the form.
    Data,
    /// The integer base register inside brackets.
    Base,
    /// `,`
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// An immediate.
    Immediate,
    /// A branch target label.
    Identifier,
    /// The `LSL` keyword of a wide-immediate shift.
    Shift,
}

impl Slot {
    /// The token class accepted at this slot.
    const fn token_type(self, class: RegisterKind) -> TokenType {
        match self {
            Self::Data => TokenType::register(class),
            Self::Base => TokenType::XRegister,
            Self::Comma => TokenType::Comma,
            Self::LBracket => TokenType::LBracket,
            Self::RBracket => TokenType::RBracket,
            Self::Immediate => TokenType::Immediate,
            Self::Identifier => TokenType::Identifier,
            Self::Shift => TokenType::XMnemonicRri,
        }
    }

    /// Name of the slot in error messages.
    pub const fn name(self, class: RegisterKind) -> &'static str {
        match self {
            Self::Shift => SHIFT_MNEMONIC,
            other => other.token_type(class).display_name(),
        }
    }

    fn accepts(self, token: &Token, class: RegisterKind) -> bool {
        token.kind == self.token_type(class)
            && (self != Self::Shift || token.text.trim().eq_ignore_ascii_case(SHIFT_MNEMONIC))
    }
}

/// Returns the full operand layout of a grammar.
pub const fn layout(grammar: Grammar) -> &'static [Slot] {
    use Slot::{Base, Comma, Data, Identifier, Immediate, LBracket, RBracket, Shift};
    match grammar {
        Grammar::R => &[Data],
        Grammar::Rr => &[Data, Comma, Data],
        Grammar::Rrr => &[Data, Comma, Data, Comma, Data],
        Grammar::Ri => &[Data, Comma, Immediate],
        Grammar::Rri => &[Data, Comma, Data, Comma, Immediate],
        Grammar::Rm => &[Data, Comma, LBracket, Base, Comma, Immediate, RBracket],
        Grammar::Rrm => &[Data, Comma, Data, Comma, LBracket, Base, Comma, Immediate, RBracket],
        Grammar::Risi => &[Data, Comma, Immediate, Comma, Shift, Immediate],
        Grammar::L => &[Identifier],
        Grammar::Rl => &[Data, Comma, Identifier],
    }
}

/// Position after `reg , imm` where a wide-immediate instruction may end.
const RISI_SHORT_END: usize = 3;

/// State of the line parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    /// Start of a line.
    Init,
    /// A label was read; the line may end or continue with a mnemonic.
    Labelled,
    /// Reading the operands of a mnemonic.
    Operands {
        /// Grammar and register file selected by the mnemonic.
        form: Form,
        /// Index of the next layout slot.
        position: usize,
    },
}

/// Why a token was rejected by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No instruction starts with this token.
    Unsupported,
    /// The grammar expects a different token here.
    Invalid(Slot),
    /// The instruction is already complete.
    Unexpected,
}

impl ParserState {
    /// Whether a line may end in this state.
    pub const fn is_accepting(self) -> bool {
        match self {
            Self::Init => false,
            Self::Labelled => true,
            Self::Operands { form, position } => {
                position == layout(form.grammar).len()
                    || (matches!(form.grammar, Grammar::Risi) && position == RISI_SHORT_END)
            }
        }
    }

    /// Names of the tokens that would complete the instruction from here.
    pub fn expected(self) -> Vec<&'static str> {
        match self {
            Self::Init | Self::Labelled => Vec::new(),
            Self::Operands { form, position } => layout(form.grammar)
                .get(position..)
                .unwrap_or_default()
                .iter()
                .map(|slot| slot.name(form.class))
                .collect(),
        }
    }

    /// Consumes one token.
    ///
    /// # Arguments
    ///
    /// * `token` - The next token of the line.
    ///
    /// # Returns
    ///
    /// The next state, or the reason the token does not fit.
    pub fn transition(self, token: &Token) -> Result<Self, Rejection> {
        match self {
            Self::Init | Self::Labelled => {
                if self == Self::Init && token.kind == TokenType::Label {
                    return Ok(Self::Labelled);
                }
                token
                    .kind
                    .form()
                    .map(|form| Self::Operands { form, position: 0 })
                    .ok_or(Rejection::Unsupported)
            }
            Self::Operands { form, position } => {
                let slots = layout(form.grammar);
                let Some(&slot) = slots.get(position) else {
                    return Err(Rejection::Unexpected);
                };
                // `[Xn]` without an offset closes the address early.
                if token.kind == TokenType::RBracket
                    && position > 0
                    && slots[position - 1] == Slot::Base
                {
                    return Ok(Self::Operands { form, position: slots.len() });
                }
                if slot.accepts(token, form.class) {
                    Ok(Self::Operands { form, position: position + 1 })
                } else {
                    Err(Rejection::Invalid(slot))
                }
            }
        }
    }

    /// Builds the missing-tokens error for a line that ended in this state.
    ///
    /// # Arguments
    ///
    /// * `from` - Index into `expected()` of the first name to report.
    fn missing(self, from: usize) -> ParseError {
        let expected = self.expected();
        ParseError::MissingTokens(ExpectedTokens {
            plural: expected.len() != 1,
            names: expected.iter().skip(from).map(|s| (*s).to_owned()).collect(),
        })
    }
}

/// Validates the tokens of one line.
///
/// # Arguments
///
/// * `tokens` - The non-empty token sequence of the line.
///
/// # Returns
///
/// `Ok(())` when the line is a label, an instruction, or both.
pub fn parse_line(tokens: &[Token]) -> Result<(), ParseError> {
    let mut state = ParserState::Init;
    for (i, token) in tokens.iter().enumerate() {
        state = match state.transition(token) {
            Ok(next) => next,
            Err(Rejection::Unsupported) => return Err(unsupported(tokens, i)),
            Err(Rejection::Invalid(slot)) => return Err(invalid(state, slot, tokens, i)),
            Err(Rejection::Unexpected) => {
                return Err(ParseError::UnexpectedToken(token.text.clone()));
            }
        };
    }
    if state.is_accepting() { Ok(()) } else { Err(state.missing(0)) }
}

/// Diagnoses a line that does not start with a label or mnemonic.
///
/// A correctly spelled mnemonic that lexed as an identifier (no operands
/// followed it) is reported by the operands it lacks.
fn unsupported(tokens: &[Token], i: usize) -> ParseError {
    let token = &tokens[i];
    if let Some(next) = tokens.get(i + 1)
        && token.kind != TokenType::Identifier
    {
        return ParseError::UnsupportedInstruction(format!("{}{}", token.text, next.text));
    }
    token.text.parse::<Mnemonic>().map_or_else(
        |_| ParseError::UnsupportedInstruction(token.text.clone()),
        |m| ParserState::Operands { form: m.form(), position: 0 }.missing(0),
    )
}

/// Diagnoses a token of the wrong class.
fn invalid(state: ParserState, slot: Slot, tokens: &[Token], i: usize) -> ParseError {
    let token = &tokens[i];
    let class = match state {
        ParserState::Operands { form, .. } => form.class,
        _ => RegisterKind::X,
    };
    let expected = slot.name(class).to_owned();
    if slot == Slot::Shift && Mnemonic::Lsl.is_spelled(&token.text) {
        return match tokens.get(i + 1) {
            None => state.missing(1),
            Some(next) => {
                ParseError::InvalidToken { expected, found: format!("{}{}", token.text, next.text) }
            }
        };
    }
    ParseError::InvalidToken { expected, found: token.text.clone() }
}
