//! Error and warning types shared by every stage of the cipher pipeline.

use std::fmt;
use std::io;

/// Fatal conditions, per the error kinds enumerated for key validation,
/// encoding, decoding and I/O.
#[derive(Debug)]
pub enum CipherError {
    /// The key was not exactly [`crate::KEY_LEN`] bytes long.
    InvalidKeyLength { expected: usize, found: usize },
    /// A key byte fell outside `{A..Y, a..y, ^}`.
    InvalidKeyChar(u8),
    /// A key byte appeared more than once.
    RepeatedKeyChar(u8),
    /// A plaintext byte has no code in the subkey alphabet.
    UnencodableChar(u8),
    /// Both the character and `-` collide with the previous code under the
    /// product-equals-16 rule; no hyphenation escape exists.
    HyphenationFailure(u8),
    /// A decoded sequence ran past 4 non-null characters still on the same
    /// line.
    DecoderTooManyOnLine,
    /// Two consecutive off-line characters appeared in one sequence.
    DecoderDoubleNoise,
    /// A ciphertext byte was neither a code, a null, nor (in non-core mode)
    /// an unused letter.
    DecoderInvalidChar(u8),
    /// The PRNG could not be seeded from OS entropy.
    Entropy(io::Error),
    /// Reading from or writing to a stream failed.
    Io(io::Error),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength { expected, found } => {
                write!(f, "key must be {expected} bytes, found {found}")
            }
            Self::InvalidKeyChar(c) => write!(f, "invalid character in key -- {}", show(*c)),
            Self::RepeatedKeyChar(c) => write!(f, "repeated character in key -- {}", show(*c)),
            Self::UnencodableChar(c) => write!(f, "cannot code character -- {}", show(*c)),
            Self::HyphenationFailure(c) => {
                write!(f, "cannot hyphenate character -- {}", show(*c))
            }
            Self::DecoderTooManyOnLine => write!(f, "invalid sequence -- too many characters"),
            Self::DecoderDoubleNoise => write!(f, "invalid sequence -- bad noise"),
            Self::DecoderInvalidChar(c) => {
                write!(f, "invalid input character -- {}", show(*c))
            }
            Self::Entropy(e) => write!(f, "cannot initialize random source: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CipherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Entropy(e) | Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CipherError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn show(c: u8) -> String {
    if c.is_ascii_graphic() || c == b' ' {
        format!("'{}'", c as char)
    } else {
        format!("{c:#04x}")
    }
}

/// Non-fatal conditions the caller may want to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The null budget for one character was exhausted before all fragment
    /// characters could be salted; the remainder was emitted unsalted.
    NullSaltSaturated,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullSaltSaturated => {
                write!(f, "salt buffer full -- randomizer may lack uniformity")
            }
        }
    }
}
