#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonfeed::{Decoder, DecoderOptions, Emission, Map, Roots, Value};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly defers to libFuzzer, but now and then replaces the input with a
/// fresh header and a sequence of serialized values so that the corpus keeps
/// reaching deep into valid documents.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size <= HEADER || (size >= HEADER && !seed.is_multiple_of(10)) {
        return fuzzer_mutate(data, size, max_size);
    }

    data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
    data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

    let mut len = HEADER;
    let target = size.clamp(HEADER + 1, max_size);
    while len < target {
        len += append_whitespace(&mut data[len..max_size]);
        len += append_value(&mut data[len..max_size], target);
    }
    len
}

fn append_whitespace(buf: &mut [u8]) -> usize {
    with_rng(|rng| {
        let mut written = 0;
        for _ in 0..rng.random_range(1..=4) {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > buf.len() {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(buf: &mut [u8], size: usize) -> usize {
    if buf.is_empty() {
        return 0;
    }
    let value = loop {
        let n = with_rng(|rng| rng.random_range(1..size.max(2) * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..n).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).unwrap_or_default();
    let len = serialized.len().min(buf.len());
    buf[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => serde_json::Value::Null,
            1 => serde_json::Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => serde_json::Value::Number(u.arbitrary::<i64>()?.into()),
            4..=10 => serde_json::Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                serde_json::Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                serde_json::Value::Object(m.into_iter().map(|(k, v)| (k, v.0)).collect())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// What the decoder is expected to produce for a document `serde_json`
/// accepted: integers that an `f64` cannot render back unchanged stay text.
fn expected(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => {
            // With `arbitrary_precision` this is the number's source text.
            let text = n.to_string();
            let f = n.as_f64().unwrap_or(f64::NAN);
            let integer = !text.contains(['.', 'e', 'E']);
            if integer && f.to_string() != text {
                Value::String(text)
            } else {
                Value::Number(f)
            }
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(expected).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), expected(v)))
                .collect::<Map>(),
        ),
    }
}

/// Splits `data` at byte offsets derived from `seed`, ignoring character
/// boundaries.
fn split_chunks(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut state = seed | 1;
    while !rest.is_empty() {
        // xorshift
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let size = (state as usize % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fn decode(data: &[u8]) {
    if data.len() <= HEADER {
        return;
    }

    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let data = &data[HEADER..];

    let options = DecoderOptions {
        emission: if flags & 1 != 0 { Emission::Roots } else { Emission::All },
        string_buffer_capacity: if flags & 2 != 0 { 4 } else { 64 * 1024 },
    };

    let mut decoder = Decoder::with_options(Roots::new(), options);
    let mut result = Ok(());
    for chunk in split_chunks(data, seed) {
        result = decoder.write(chunk);
        if result.is_err() {
            break;
        }
    }
    let roots = result.and_then(|()| decoder.finish());

    if let Ok(reference) = serde_json::from_slice::<serde_json::Value>(data) {
        let roots = roots.expect("decoder rejected a document serde_json accepts");
        assert_eq!(roots.values(), [expected(&reference)]);
    }
}

fuzz_target!(|data: &[u8]| decode(data));
