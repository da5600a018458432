//! Key validation and the derived artifacts (code matrix, null matrix,
//! subkey) built from a 51-character key.

use crate::error::CipherError;
use crate::{KEY_LEN, MATRIX_LEN, SUBKEY_LEN};

/// The 51-character keyset a key is a permutation of:
/// `A..Y`, `a..y`, `^`.
pub const KEYSET: &[u8; KEY_LEN] = b"ABCDEFGHIJKLMNOPQRSTUVWXYabcdefghijklmnopqrstuvwxy^";

/// Map a key byte to its slot `0..51` in the keyset, or `None` if it is not
/// a valid key character.
fn key_slot(c: u8) -> Option<usize> {
    match c {
        b'A'..=b'Y' => Some((c - b'A') as usize),
        b'a'..=b'y' => Some((c - b'a') as usize + 25),
        b'^' => Some(50),
        _ => None,
    }
}

/// Validate that `key` is exactly [`KEY_LEN`] bytes, drawn from the keyset,
/// with no repeats.
pub fn validate(key: &[u8]) -> Result<(), CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength {
            expected: KEY_LEN,
            found: key.len(),
        });
    }
    let mut seen = [false; KEY_LEN];
    for &c in key {
        let slot = key_slot(c).ok_or(CipherError::InvalidKeyChar(c))?;
        if seen[slot] {
            return Err(CipherError::RepeatedKeyChar(c));
        }
        seen[slot] = true;
    }
    Ok(())
}

/// Derive the code matrix and null matrix from a validated key: walk the
/// key skipping `^`, depositing 5 characters at a time alternately into
/// `M_C` then `M_N`.
pub fn build_matrices(key: &[u8; KEY_LEN]) -> ([u8; MATRIX_LEN], [u8; MATRIX_LEN]) {
    let mut code_mat = [0u8; MATRIX_LEN];
    let mut null_mat = [0u8; MATRIX_LEN];
    let mut into_code = true;
    let mut idx = 0usize;
    for &c in key.iter() {
        if c == b'^' {
            continue;
        }
        if into_code {
            code_mat[idx] = c;
        } else {
            null_mat[idx] = c;
        }
        idx += 1;
        if idx % 5 == 0 {
            if into_code {
                idx -= 5;
            }
            into_code = !into_code;
        }
    }
    (code_mat, null_mat)
}

/// Derive the 30-character subkey: walk the key from the start, skipping
/// `f..y` and `^`, substituting `a->Z, b->., c->,, d->?, e->-`, keeping the
/// first 30 characters obtained this way.
pub fn build_subkey(key: &[u8; KEY_LEN]) -> [u8; SUBKEY_LEN] {
    let mut subkey = [0u8; SUBKEY_LEN];
    let mut j = 0usize;
    for &c in key.iter() {
        if j == SUBKEY_LEN {
            break;
        }
        if (b'f'..=b'y').contains(&c) || c == b'^' {
            continue;
        }
        let mapped = match c {
            b'a' => b'Z',
            b'b' => b'.',
            b'c' => b',',
            b'd' => b'?',
            b'e' => b'-',
            other => other,
        };
        subkey[j] = mapped;
        j += 1;
    }
    subkey
}
