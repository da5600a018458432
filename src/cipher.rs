//! The cipher's per-run state: the two matrices, the subkey, the PRNG, and
//! the small rolling context (previous code/direction/parity) that couples
//! successive characters together.

use crate::error::{CipherError, Warning};
use crate::key;
use crate::rng::Pcg32;
use crate::{KEY_LEN, MATRIX_LEN, SUBKEY_LEN};

/// Per-call configuration. Both fields were process-wide globals in the
/// reference implementation; here they are plain instance state owned by
/// whoever constructs the [`Cipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CipherOptions {
    /// Disable null salting: ciphertext is only ever drawn from the code
    /// matrix.
    pub core: bool,
    /// Emit a step-by-step trace of the encode/decode pipeline.
    pub trace: bool,
}

/// A live cipher instance: matrices and subkey derived from a validated
/// key, a PRNG, and the rolling context needed to keep successive
/// characters' encodings correctly linked.
pub struct Cipher {
    pub(crate) code_mat: [u8; MATRIX_LEN],
    pub(crate) null_mat: [u8; MATRIX_LEN],
    pub(crate) subkey: [u8; SUBKEY_LEN],
    pub(crate) rng: Pcg32,
    pub(crate) options: CipherOptions,

    pub(crate) prev_code: u8,
    pub(crate) prev_last: u8,
    pub(crate) prev_dir: Option<usize>,
    pub(crate) parity: bool,

    warnings: Vec<Warning>,
}

impl Cipher {
    /// Build a cipher from a validated key, seeding its PRNG from OS
    /// entropy.
    pub fn new(key: &[u8], options: CipherOptions) -> Result<Self, CipherError> {
        let rng = Pcg32::from_entropy().map_err(CipherError::Entropy)?;
        Self::with_rng(key, options, rng)
    }

    /// Build a cipher from a validated key and an explicit PRNG. Exists so
    /// callers needing reproducible traces (tests, `--trace` diagnostics)
    /// can pin the PRNG seed instead of drawing from entropy.
    pub fn with_rng(key: &[u8], options: CipherOptions, rng: Pcg32) -> Result<Self, CipherError> {
        key::validate(key)?;
        let key: [u8; KEY_LEN] = key.try_into().unwrap();
        let (code_mat, null_mat) = key::build_matrices(&key);
        let subkey = key::build_subkey(&key);
        if options.trace {
            trace_init(&key, &code_mat, &null_mat, &subkey);
        }
        Ok(Cipher {
            code_mat,
            null_mat,
            subkey,
            rng,
            options,
            prev_code: 0,
            prev_last: 0,
            prev_dir: None,
            parity: false,
            warnings: Vec::new(),
        })
    }

    /// The code (`1..=30`) of plaintext character `c`, or an error if `c`
    /// is not in the subkey alphabet.
    pub(crate) fn code_of(&self, c: u8) -> Result<u8, CipherError> {
        self.subkey
            .iter()
            .position(|&s| s == c)
            .map(|i| i as u8 + 1)
            .ok_or(CipherError::UnencodableChar(c))
    }

    /// The plaintext character for `code` (`1..=30`).
    pub(crate) fn char_of(&self, code: u8) -> u8 {
        debug_assert!((1..=crate::SUBKEY_LEN as u8).contains(&code), "code out of range");
        self.subkey[(code - 1) as usize]
    }

    /// True iff `code` is a power of two (1, 2, 4, 8 or 16): the 5 codes
    /// that select exactly one character.
    pub(crate) fn is_pow2(code: u8) -> bool {
        matches!(code, 1 | 2 | 4 | 8 | 16)
    }

    /// Record a non-fatal warning encountered during the last encode call.
    pub(crate) fn push_warning(&mut self, w: Warning) {
        self.warnings.push(w);
    }

    /// Drain and return the warnings accumulated so far.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Whether null salting is disabled for this run.
    pub fn is_core(&self) -> bool {
        self.options.core
    }

    /// The code matrix this cipher's ciphertext (in core mode, all of it)
    /// is drawn from.
    pub fn code_matrix(&self) -> &[u8; MATRIX_LEN] {
        &self.code_mat
    }

    /// The null matrix non-core ciphertext is salted from.
    pub fn null_matrix(&self) -> &[u8; MATRIX_LEN] {
        &self.null_mat
    }
}

/// Trace the key, subkey and both matrices to stderr once, at cipher
/// construction -- the Rust analogue of the reference's `trace_cipher`.
fn trace_init(key: &[u8; KEY_LEN], code_mat: &[u8; MATRIX_LEN], null_mat: &[u8; MATRIX_LEN], subkey: &[u8; SUBKEY_LEN]) {
    eprintln!("key: {}", show(key));
    eprintln!("subkey: {}", show(subkey));
    for row in 0..5 {
        let code_row = show(&code_mat[row * 5..row * 5 + 5]);
        let null_row = show(&null_mat[row * 5..row * 5 + 5]);
        eprintln!("{code_row} | {null_row}");
    }
}

fn show(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
