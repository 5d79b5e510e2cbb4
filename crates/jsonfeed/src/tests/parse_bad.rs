use alloc::{string::{String, ToString}, vec::Vec};

use rstest::rstest;

use super::decode;
use crate::{
    DecodeError, Decoder, Frame, ParserState, Token, TokenizerState, Value, ValueSink,
};

#[test]
fn missing_member_value_is_a_grammar_error_in_value_state() {
    assert_eq!(
        decode(r#"{"a":}"#),
        Err(DecodeError::Grammar {
            token: Token::RightBrace,
            state: ParserState::Value,
        })
    );
}

#[test]
fn truncated_literal_is_a_lexical_error() {
    assert_eq!(
        decode(r#"{"a": tru}"#),
        Err(DecodeError::Lexical {
            byte: b'}',
            position: 9,
            offset: 9,
            state: TokenizerState::Literal,
        })
    );
}

#[test]
fn invalid_lead_byte_in_string_is_a_lexical_error() {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    let err = decoder.write(b"[\"ab\xFFcd\"]").unwrap_err();
    assert_eq!(
        err,
        DecodeError::Lexical {
            byte: 0xFF,
            position: 4,
            offset: 4,
            state: TokenizerState::String,
        }
    );
}

#[rstest]
#[case::trailing_comma("[1,]")]
#[case::leading_comma("[,1]")]
#[case::object_trailing_comma(r#"{"a":1,}"#)]
#[case::number_key("{1:1}")]
#[case::long_integer_key("{12345678901234567890123:1}")]
#[case::mismatched("[1}")]
#[case::colon_in_array("[1:2]")]
#[case::double_colon(r#"{"a"::1}"#)]
#[case::stray_closer("]")]
fn grammar_errors(#[case] src: &str) {
    let err = decode(src).unwrap_err();
    assert!(err.is_grammar(), "{src}: {err}");
}

#[test]
fn long_integer_cannot_name_a_member() {
    let err = decode(r#"{"a":12345678901234567890123,12345678901234567890123:1}"#).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Grammar {
            token: Token::Integer("12345678901234567890123".into()),
            state: ParserState::Key,
        }
    );
    assert_eq!(
        err.to_string(),
        "unexpected NUMBER(12345678901234567890123) in state KEY"
    );
}

#[rstest]
#[case::leading_zero("01 ")]
#[case::unquoted_key("{a:1}")]
#[case::bare_minus("[-]")]
#[case::leading_plus("+1")]
#[case::missing_fraction("1.]")]
#[case::missing_exponent("[1e]")]
#[case::hex_escape(r#""\x41""#)]
#[case::short_unicode_escape(r#""\u12""#)]
#[case::control_character("\"a\tb\"")]
#[case::single_quotes("'a'")]
#[case::capitalized_literal("True")]
#[case::overlong_encoding(b"\"\xC0\xAF\"")]
#[case::encoded_surrogate(b"\"\xED\xA0\x80\"")]
#[case::truncated_sequence(b"\"\xE2\x82\"")]
#[case::nan("NaN")]
fn lexical_errors(#[case] src: impl AsRef<[u8]>) {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    let err = decoder.write(src.as_ref()).unwrap_err();
    assert!(err.is_lexical(), "{err}");
}

#[rstest]
#[case::open_array("[1, 2", TokenizerState::Start, ParserState::Comma)]
#[case::open_object(r#"{"a":"#, TokenizerState::Start, ParserState::Value)]
#[case::open_string(r#""abc"#, TokenizerState::String, ParserState::Value)]
#[case::open_escape(r#""\u00"#, TokenizerState::StringUnicode, ParserState::Value)]
#[case::open_literal("nul", TokenizerState::Literal, ParserState::Value)]
#[case::bare_minus("-", TokenizerState::Number, ParserState::Value)]
fn incomplete_input_fails_on_finish(
    #[case] src: &str,
    #[case] tokenizer: TokenizerState,
    #[case] parser: ParserState,
) {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    decoder.write(src).unwrap();
    assert_eq!(
        decoder.finish(),
        Err(DecodeError::UnexpectedEnd { tokenizer, parser })
    );
}

#[test]
fn trailing_number_completing_a_bad_document_is_a_grammar_error() {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    decoder.write(r#"{"a" 1 "#).unwrap_err();
    assert!(decoder.is_halted());
    assert_eq!(decoder.finish(), Err(DecodeError::Halted));

    let mut decoder = Decoder::new(Vec::<Value>::new());
    decoder.write(r#"{1"#).unwrap();
    assert!(decoder.finish().unwrap_err().is_grammar());
}

#[test]
fn halted_decoder_rejects_further_input() {
    let mut decoder = Decoder::new(Vec::<Value>::new());
    assert!(decoder.write("[1,,").is_err());
    assert!(decoder.is_halted());
    assert_eq!(decoder.write("2]"), Err(DecodeError::Halted));
    // Values completed before the error were still delivered.
    assert_eq!(decoder.sink(), &[Value::Number(1.0)]);
}

#[derive(Default)]
struct Recorder {
    values: usize,
    errors: Vec<String>,
}

impl ValueSink for Recorder {
    fn on_value(&mut self, _value: &Value, _stack: &[Frame]) {
        self.values += 1;
    }

    fn on_error(&mut self, error: &DecodeError) {
        self.errors.push(alloc::format!("{error}"));
    }
}

#[test]
fn sink_is_notified_once_per_error() {
    let mut decoder = Decoder::new(Recorder::default());
    decoder.write("[true").unwrap();
    assert!(decoder.write("@").is_err());
    assert!(decoder.write("]").is_err());

    let recorder = decoder.into_sink();
    assert_eq!(recorder.values, 1);
    assert_eq!(
        recorder.errors,
        ["unexpected '@' at position 0 (offset 5) in state START"]
    );
}

struct ErrorLog<'a>(&'a mut Vec<DecodeError>);

impl ValueSink for ErrorLog<'_> {
    fn on_value(&mut self, _value: &Value, _stack: &[Frame]) {}

    fn on_error(&mut self, error: &DecodeError) {
        self.0.push(error.clone());
    }
}

#[test]
fn unexpected_end_reaches_the_sink() {
    let mut errors = Vec::new();
    let mut decoder = Decoder::new(ErrorLog(&mut errors));
    decoder.write("{").unwrap();
    let err = decoder.finish().err().unwrap();
    assert_eq!(errors, [err]);
}

/// Whatever `serde_json` rejects as a single document is rejected here too,
/// either while writing or at the end.
#[rstest]
#[case("[1 2]")]
#[case(r#"{"a" "b"}"#)]
#[case("[\"\\uZZZZ\"]")]
#[case("-01")]
#[case("1.e5")]
#[case("[")]
#[case("{\"a\":1")]
fn rejected_like_serde_json(#[case] src: &str) {
    assert!(serde_json::from_str::<serde_json::Value>(src).is_err());
    assert!(decode(src).is_err(), "{src}");
}
