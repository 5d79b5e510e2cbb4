//! Prints every JSON object in a file (or standard input) as soon as its
//! closing brace has been read.
//!
//! The input is read in small fixed-size chunks, so chunk boundaries fall in
//! the middle of strings, numbers and multi-byte characters. Any number of
//! concatenated or newline-delimited documents may follow one another.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonfeed --example stream_objects -- data.json
//! cat data.ndjson | cargo run -p jsonfeed --example stream_objects -- --roots
//! ```
#![allow(missing_docs)]

use std::{
    error::Error,
    fs::File,
    io::{self, Read},
};

use jsonfeed::{Decoder, DecoderOptions, Emission, Frame, Value, path_of};

const CHUNK_SIZE: usize = 512;

fn main() -> Result<(), Box<dyn Error>> {
    let mut roots_only = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--roots" => roots_only = true,
            _ => path = Some(arg),
        }
    }

    let mut input: Box<dyn Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };

    let mut count = 0usize;
    let mut decoder = Decoder::with_options(
        |value: &Value, stack: &[Frame]| {
            if value.is_object() {
                count += 1;
                let keys: Vec<String> = path_of(stack).iter().map(ToString::to_string).collect();
                println!("/{} {value}", keys.join("/"));
            }
        },
        DecoderOptions {
            emission: if roots_only { Emission::Roots } else { Emission::All },
            ..DecoderOptions::default()
        },
    );

    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        decoder.write(&buf[..n])?;
    }
    decoder.finish()?;

    eprintln!("{count} objects");
    Ok(())
}
