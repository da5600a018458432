//! Chunked stream drivers wiring the per-character encode/decode pipeline
//! to a `Read`/`Write` pair: whitespace filtering on the way in,
//! pretty-printing on the way out.

use std::io::{Read, Write};

use crate::cipher::Cipher;
use crate::decode::decode_one;
use crate::encode::encode_one;
use crate::error::{CipherError, Warning};
use crate::format::LineFormatter;
use crate::CHUNK_SIZE;

/// How many trailing ciphertext bytes the decoder keeps buffered so a
/// sequence's termination is never starved of lookahead. Twice
/// [`crate::MAX_ENCODED_LEN`] covers a fragment preceded by its own
/// hyphenation escape.
const DECODE_LOOKAHEAD: usize = 2 * crate::MAX_ENCODED_LEN;

/// Encode everything read from `input` into `output`, pretty-printed.
/// Returns any non-fatal warnings collected along the way.
pub fn encode_stream<R: Read, W: Write>(
    cipher: &mut Cipher,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<Warning>, CipherError> {
    let significant = read_significant_chars(input)?;
    let mut formatter = LineFormatter::new();
    let mut out = Vec::new();

    let mut chars = significant.iter().copied().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        let frag = encode_one(cipher, c, next)?;
        formatter.push_all(&mut out, &frag);
    }
    formatter.finish(&mut out);
    output.write_all(&out)?;
    Ok(cipher.take_warnings())
}

/// Read all of `input`, dropping whitespace. Case is left untouched: a
/// lowercase byte is not in the subkey alphabet and must surface as
/// [`CipherError::UnencodableChar`], not be silently rewritten.
fn read_significant_chars<R: Read>(input: &mut R) -> Result<Vec<u8>, CipherError> {
    let mut raw = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = input.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
    }
    Ok(raw.into_iter().filter(|b| !b.is_ascii_whitespace()).collect())
}

/// Decode everything read from `input` into `output`, ignoring any
/// whitespace used to pretty-print the ciphertext.
pub fn decode_stream<R: Read, W: Write>(
    cipher: &mut Cipher,
    input: &mut R,
    output: &mut W,
) -> Result<(), CipherError> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut eof = false;

    loop {
        while !eof && buffer.len() < DECODE_LOOKAHEAD {
            let n = input.read(&mut chunk)?;
            if n == 0 {
                eof = true;
                break;
            }
            buffer.extend(chunk[..n].iter().copied().filter(|b| !b.is_ascii_whitespace()));
        }
        if buffer.is_empty() {
            break;
        }
        let (used, out) = decode_one(cipher, &buffer)?;
        buffer.drain(..used);
        if let Some(c) = out {
            output.write_all(&[c])?;
        }
    }
    output.write_all(b"\n")?;
    Ok(())
}
