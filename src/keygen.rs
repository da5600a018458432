//! Password-based key generation: hash the password with SHA-256, then
//! shuffle the fixed 51-character keyset with a PRNG seeded from the hash.

use byteorder::{ByteOrder, LittleEndian};
use sha2::{Digest, Sha256};

use crate::key::KEYSET;
use crate::rng::Pcg32;
use crate::KEY_LEN;

/// Derive a 51-character key from `password`.
///
/// `hash = SHA256(password)`; the PRNG is seeded with the hash's first 8
/// bytes and next 8 bytes, both read as little-endian `u64`s (the high bit
/// of the second half is cleared, matching the reference implementation's
/// signed-to-unsigned seed handling). The fixed keyset is then shuffled
/// in place with that PRNG.
pub fn derive_key(password: &[u8]) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(password);
    let hash = hasher.finalize();

    let initstate = LittleEndian::read_u64(&hash[0..8]);
    let initseq = LittleEndian::read_u64(&hash[8..16]) & 0x7FFF_FFFF_FFFF_FFFF;

    let mut rng = Pcg32::seed(initstate, initseq);
    let mut key = *KEYSET;
    rng.shuffle(&mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    #[test]
    fn derived_key_is_a_permutation_of_the_keyset() {
        let key = derive_key(b"correct horse battery staple");
        let mut sorted = key.to_vec();
        sorted.sort_unstable();
        let mut expected = KEYSET.to_vec();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
        assert!(crate::key::validate(&key).is_ok());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key(b"correct horse battery staple");
        let b = derive_key(b"correct horse battery staple");
        assert_eq!(a, b);
    }

    #[test]
    fn different_passwords_yield_different_keys() {
        let a = derive_key(b"correct horse battery staple");
        let b = derive_key(b"Tr0ub4dor&3");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_still_derives_a_valid_key() {
        let derived = derive_key(b"");
        assert!(key::validate(&derived).is_ok());
    }
}
