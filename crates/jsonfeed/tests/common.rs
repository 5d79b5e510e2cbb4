#![allow(missing_docs)]
#![allow(dead_code)]

use jsonfeed::{Map, Value};

pub const DOCUMENT: &str = r#"
{
    "order": {
        "id": 90071992547409931,
        "customer": "Zoë Ångström",
        "note": "ships \"fragile\"\nline two\té😀",
        "total": -1234.5e-2,
        "express": false,
        "coupon": null
    },
    "items": [
        { "sku": "A-1", "qty": 2, "price": 9.99, "tags": ["€", "日本語", "🦀"] },
        { "sku": "B-22", "qty": 0, "price": 0, "tags": [] },
        { "sku": "C-333", "qty": 1, "price": 1e3, "tags": [{}] }
    ],
    "matrix": [[1, [2, [3]]], [], [[]]],
    "empty": {}
}"#;

/// The same document, cut at seams that land inside tokens: a number, a
/// literal, escapes, surrogate pairs and multi-byte characters.
#[rustfmt::skip]
pub const STREAM: [&[u8]; 16] = [
    br#"{"order":{"id":900719925"#,                    // inside a long integer
    br#"47409931,"customer":"Zo"#,
    b"\xC3",                                           // first byte of 'ë'
    b"\xAB \xC3\x85ngstr\xC3\xB6m\",\"note\":\"ships \\", // ends on a backslash
    br#""fragile\"\nline two\t\u00"#,                  // inside é
    br#"e9\ud83d"#,                                    // between surrogate halves
    br#"\ude00","total":-1234.5e"#,                    // inside an exponent
    br#"-2,"express":fal"#,                            // inside a literal
    br#"se,"coupon":null},"items":[{"sku":"A-1","qty":2,"price":9.99,"tags":[""#,
    b"\xE2\x82",                                       // two bytes of '€'
    b"\xAC\",\"\xE6\x97\xA5\xE6\x9C\xAC\xE8\xAA\x9E\",\"\xF0\x9F",
    b"\xA6\x80\"]},{\"sku\":\"B-22\",\"qty\":0,\"price\":0,\"tags\":[]},",
    br#"{"sku":"C-333","qty":1,"price":1e3,"tags":[{}]}],"matrix":[[1,[2,[3]]],[],[[]]],"#,
    br#""empty":{"#,
    br#"}"#,
    br#"}"#,
];

/// Converts a `serde_json` value into the decoder's representation.
pub fn from_serde(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_serde).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), from_serde(v)))
                .collect::<Map>(),
        ),
    }
}

/// Decodes `chunks` and returns the top-level values.
pub fn decode_roots<C: AsRef<[u8]>>(chunks: &[C]) -> Vec<Value> {
    let mut decoder = jsonfeed::Decoder::new(jsonfeed::Roots::new());
    for chunk in chunks {
        decoder.write(chunk).unwrap();
    }
    decoder.finish().unwrap().into_values()
}
