//! Handycipher: a pen-and-paper symmetric stream cipher built around a
//! randomized, direction-and-permutation encoding of a 30-symbol alphabet
//! over a 5x5 key matrix.
//!
//! The crate is organized around the pipeline a hand cipherer would run
//! manually: [`key`] turns a 51-character key into the code matrix, null
//! matrix and subkey; [`cipher`] holds the live per-run state; [`encode`]
//! and [`decode`] implement one direction each of the per-character
//! transform; [`stream`] and [`format`] wire that transform to byte
//! streams. [`keygen`] derives a key from a password instead of requiring
//! one verbatim, and [`rng`] is the PCG32 source everything above draws
//! randomness from.

pub mod cipher;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod geometry;
pub mod key;
pub mod keygen;
pub mod rng;
pub mod stream;

pub use cipher::{Cipher, CipherOptions};
pub use error::{CipherError, Warning};
pub use keygen::derive_key;
pub use stream::{decode_stream, encode_stream};

/// Length of a full key: 51 characters, one for every symbol in
/// `{A..Y, a..y, ^}`.
pub const KEY_LEN: usize = 51;
/// Number of cells in the code matrix (and the null matrix): a 5x5 grid.
pub const MATRIX_LEN: usize = 25;
/// Number of symbols in the plaintext alphabet: `A..Z` plus `. , ? -`.
pub const SUBKEY_LEN: usize = 30;
/// Number of cells on one line of the 5x5 torus.
pub const LINE_LEN: usize = 5;
/// Number of lines over the torus: 5 columns, 5 rows, 5 right-diagonals,
/// 5 left-diagonals.
pub const NUM_LINES: usize = 20;
/// Number of knight-jump neighbors every cell has.
pub const KNIGHT_DEGREE: usize = 8;
/// Upper bound on the length of one encoded character's ciphertext
/// fragment (codeword, noise and null salt included).
pub const MAX_ENCODED_LEN: usize = 32;
/// Upper bound on the length of one character's codeword-plus-noise
/// fragment, before null salting.
pub const MAX_NOISE_LEN: usize = 9;
/// Upper bound on the number of permutations of a 4-character codeword
/// (`4!` would suffice; kept at `5!` to cover the unreachable 5-bit case
/// defensively).
pub const MAX_PERMS: usize = 120;
/// Chunk size used by the stream drivers when reading from an arbitrary
/// `Read`.
pub const CHUNK_SIZE: usize = 32 * 1024;
