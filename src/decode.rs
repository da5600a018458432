//! The streaming decoder: segments ciphertext into one encoded sequence at
//! a time, classifying nulls and noise, inferring the line direction, and
//! reconstructing the codeword with correct parity.

use crate::cipher::Cipher;
use crate::error::CipherError;
use crate::geometry;

/// Decode one plaintext character from the front of `buffer`.
///
/// Returns `(consumed, plaintext)`: `consumed` is how many bytes of
/// `buffer` were used (always `> 0` unless `buffer` is empty); `plaintext`
/// is `None` if the consumed bytes were nulls only (no character to
/// output yet — the caller should simply keep reading).
///
/// A sequence that ends because a read character is not colinear with the
/// sequence so far does *not* consume that character: it is left at the
/// front of the buffer for the next call.
pub fn decode_one(cipher: &mut Cipher, buffer: &[u8]) -> Result<(usize, Option<u8>), CipherError> {
    let mut raw: Vec<u8> = Vec::with_capacity(4);
    let mut dir: Option<usize> = None;
    let mut noise = false;
    let mut used = 0usize;

    while used < buffer.len() {
        let c = buffer[used];
        if classify_salt(cipher, c)? {
            used += 1;
            continue;
        }

        match raw.len() {
            0 => {
                raw.push(c);
                used += 1;
            }
            1 => match geometry::get_direction(&cipher.code_mat, c, raw[0]) {
                Some(d) => {
                    dir = Some(d);
                    raw.push(c);
                    noise = false;
                    used += 1;
                }
                None => {
                    dir = geometry::get_column(&cipher.code_mat, raw[0]);
                    break;
                }
            },
            2 | 3 => {
                let d = dir.expect("direction set once a second character is accepted");
                if geometry::has_direction(&cipher.code_mat, c, d) {
                    raw.push(c);
                    noise = false;
                    used += 1;
                } else if geometry::colinear(&cipher.code_mat, *raw.last().unwrap(), c) {
                    break;
                } else if noise {
                    return Err(CipherError::DecoderDoubleNoise);
                } else {
                    noise = true;
                    used += 1;
                }
            }
            4 => {
                let d = dir.expect("direction set once a second character is accepted");
                if geometry::has_direction(&cipher.code_mat, c, d) {
                    return Err(CipherError::DecoderTooManyOnLine);
                }
                if geometry::colinear(&cipher.code_mat, *raw.last().unwrap(), c) {
                    break;
                }
                if noise {
                    return Err(CipherError::DecoderDoubleNoise);
                }
                noise = true;
                used += 1;
            }
            _ => unreachable!("a sequence never accepts more than 4 on-line characters"),
        }
    }

    if raw.is_empty() {
        return Ok((used, None));
    }
    if dir.is_none() {
        dir = geometry::get_column(&cipher.code_mat, raw[0]);
    }
    let dir = dir.expect("a non-empty sequence always resolves a direction");

    cipher.parity = !cipher.parity;
    let mut code: u8 = 0;
    for (i, &pos) in geometry::LINES[dir].iter().enumerate() {
        let cell = cipher.code_mat[pos as usize];
        if raw.contains(&cell) {
            if cipher.parity {
                code |= 16 >> i;
            } else {
                code |= 1 << i;
            }
        }
    }
    let plain = cipher.char_of(code);
    if cipher.options.trace {
        eprintln!(
            "{} {} {} {:05b} {code:2} {}",
            show(&buffer[..used]),
            show(&raw),
            geometry::direction_label(dir),
            code,
            plain as char,
        );
    }
    Ok((used, Some(plain)))
}

/// Render a fragment of code-matrix characters for a trace line.
fn show(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Classify one ciphertext byte: `Ok(true)` if it is a null to be skipped,
/// `Ok(false)` if it should feed the sequence state machine, `Err` if it is
/// not a valid ciphertext byte at all.
fn classify_salt(cipher: &Cipher, c: u8) -> Result<bool, CipherError> {
    if cipher.is_core() {
        return if cipher.code_mat.contains(&c) {
            Ok(false)
        } else {
            Err(CipherError::DecoderInvalidChar(c))
        };
    }
    if cipher.null_mat.contains(&c) {
        return Ok(true);
    }
    if cipher.code_mat.contains(&c) {
        return Ok(false);
    }
    // Defensive: M_C ∪ M_N already covers every unused letter, so this
    // never actually triggers, but a byte that merely looks like an unused
    // key letter is treated as a null rather than rejected outright.
    if (b'A'..=b'Y').contains(&c) || (b'a'..=b'y').contains(&c) {
        return Ok(true);
    }
    Err(CipherError::DecoderInvalidChar(c))
}
