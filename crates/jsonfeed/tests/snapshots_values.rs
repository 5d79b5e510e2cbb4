#![allow(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use core::{cell::Cell, fmt::Write};

use jsonfeed::{Decoder, DecoderOptions, Emission, Frame, Value, path_of};

/// Renders one line per emission: the write that completed it, the key path
/// and the value.
fn render_emissions(stream: &[&str], emission: Emission) -> String {
    let mut out = String::new();
    let write_index = Cell::new(0);
    let mut decoder = Decoder::with_options(
        |value: &Value, stack: &[Frame]| {
            let keys: Vec<String> = path_of(stack).iter().map(ToString::to_string).collect();
            writeln!(out, "{}: [{}] {value}", write_index.get(), keys.join(", ")).unwrap();
        },
        DecoderOptions {
            emission,
            ..DecoderOptions::default()
        },
    );
    for (i, chunk) in stream.iter().enumerate() {
        write_index.set(i);
        decoder.write(chunk).unwrap();
    }
    let _ = decoder.finish().unwrap();
    out
}

#[test]
fn snapshot_nested_emissions() {
    let stream: [&str; 5] = [
        r#"{"k":[1"#,
        r#",2,{"#,
        r#""x":"y"}],"#,
        r#""s":"he"#,
        r#"llo"}"#,
    ];

    insta::assert_snapshot!(render_emissions(&stream, Emission::All), @r#"
    1: ["k", 0] 1
    1: ["k", 1] 2
    2: ["k", 2, "x"] "y"
    2: ["k", 2] {"x":"y"}
    2: ["k"] [1,2,{"x":"y"}]
    4: ["s"] "hello"
    4: [] {"k":[1,2,{"x":"y"}],"s":"hello"}
    "#);
    insta::assert_snapshot!(render_emissions(&stream, Emission::Roots), @r#"4: [] {"k":[1,2,{"x":"y"}],"s":"hello"}"#);
}

#[test]
fn snapshot_trailing_number_waits_for_finish() {
    let stream = ["[10", "0] 2", "5"];
    insta::assert_snapshot!(render_emissions(&stream, Emission::All), @r#"
    1: [0] 100
    1: [] [100]
    2: [] 25
    "#);
}

#[test]
fn snapshot_demoted_integer_and_escapes() {
    let stream = [r#"{"id":12345678901234567890123,"s":"é😀\n"}"#];
    insta::assert_snapshot!(render_emissions(&stream, Emission::All), @r#"
    0: ["id"] "12345678901234567890123"
    0: ["s"] "é😀\u000A"
    0: [] {"id":"12345678901234567890123","s":"é😀\u000A"}
    "#);
}

#[test]
fn snapshot_error_messages() {
    let cases = [r#"{"a":}"#, r#"{"a": tru}"#, "[\"\u{1}\"]", "[1 2]", "[1,"];
    let mut out = String::new();
    for case in cases {
        let mut decoder = Decoder::new(Vec::<Value>::new());
        let result = decoder.write(case).and_then(|()| decoder.finish().map(drop));
        writeln!(out, "{}", result.unwrap_err()).unwrap();
    }
    insta::assert_snapshot!(out, @r#"
    unexpected RIGHT_BRACE in state VALUE
    unexpected '}' at position 9 (offset 9) in state LITERAL
    unexpected byte 0x01 at position 2 (offset 2) in state STRING
    unexpected NUMBER(2) in state COMMA
    unexpected end of input in tokenizer state START, parser state VALUE
    "#);
}
