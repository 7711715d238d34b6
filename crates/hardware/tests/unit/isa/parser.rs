use legv8_core::common::error::ParseError;
use legv8_core::isa::lexer::lex;
use legv8_core::isa::parser::parse_line;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn parse(line: &str) -> Result<(), String> {
    parse_line(&lex(line)).map_err(|e| e.to_string())
}

#[rstest]
#[case("ADD X1, X2, X3")]
#[case("loop: SUBI X1, X1, #1")]
#[case("start:")]
#[case("LDUR X1, [X2, #8]")]
#[case("LDUR X1, [X2]")]
#[case("STXR X1, X2, [X3]")]
#[case("MOVZ X1, #5")]
#[case("MOVK X1, #5, LSL #48")]
#[case("CBNZ X9, loop")]
#[case("BR LR")]
#[case("FADDD D1, D2, D3")]
#[case("STURS S1, [SP, #-4]")]
#[case("CMP X1, X2")]
fn accepts_well_formed_lines(#[case] line: &str) {
    assert_eq!(parse(line), Ok(()));
}

#[rstest]
#[case("ADD X1, X2", "Missing tokens: ',' 'XREGISTER' ")]
#[case("B", "Missing token: 'IDENTIFIER' ")]
#[case("ADD X1, X2, #3", "Invalid token: expected 'XREGISTER', found '#3'")]
#[case("FADDS S1, D2, S3", "Invalid token: expected 'SREGISTER', found 'D2'")]
#[case("FOO X1", "Unsupported instruction: 'FOO'")]
#[case("ADDX1, X2", "Unsupported instruction: 'ADDX1'")]
#[case("#5 X1", "Unsupported instruction: '#5X1'")]
#[case("ADD X1, X2, X3, X4", "Unexpected token: ','. Remove this token.")]
#[case("MOVZ X1, #5, LSL", "Missing tokens: 'IMMEDIATE' ")]
#[case("MOVZ X1, #5, LSR #16", "Invalid token: expected 'LSL', found 'LSR '")]
fn reports_structural_errors(#[case] line: &str, #[case] message: &str) {
    assert_eq!(parse(line), Err(message.to_owned()));
}

#[test]
fn missing_tokens_carry_names() {
    let err = parse_line(&lex("LDUR X1, [X2")).expect_err("line is incomplete");
    let ParseError::MissingTokens(expected) = err else {
        panic!("expected a missing-token error, got {err:?}");
    };
    assert_eq!(expected.names.first().map(String::as_str), Some(","));
    assert!(expected.plural);
}
