//! Thin CLI front-end over the `handycipher` library: read a key (from a
//! keyfile or a derived password), then encrypt or decrypt stdin/a file to
//! stdout/a file.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use structopt::StructOpt;

use handycipher::{decode_stream, derive_key, encode_stream, key, Cipher, CipherError, CipherOptions, KEY_LEN};

#[derive(StructOpt)]
#[structopt(name = "handy", about = "A randomized pen-and-paper symmetric stream cipher.")]
struct Opt {
    /// Encrypt the input (the default).
    #[structopt(short = "e", long = "encrypt")]
    encrypt: bool,
    /// Decrypt the input.
    #[structopt(short = "d", long = "decrypt")]
    decrypt: bool,
    /// Read the 51-character key from this file instead of deriving one
    /// from a password.
    #[structopt(short = "k", long = "key", parse(from_os_str))]
    keyfile: Option<PathBuf>,
    /// Write output here instead of stdout.
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    outfile: Option<PathBuf>,
    /// Disable null salting: ciphertext is drawn only from the code matrix.
    #[structopt(long = "core")]
    core: bool,
    /// Emit a step-by-step trace of the encode/decode pipeline to stderr.
    #[structopt(long = "trace")]
    trace: bool,
    /// Input file; omit to read from stdin.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Opt::from_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("handy: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: Opt) -> Result<(), CipherError> {
    if opt.encrypt && opt.decrypt {
        return Err(invalid_input("cannot pass both --encrypt and --decrypt"));
    }
    let encrypting = !opt.decrypt;

    let key = load_key(opt.keyfile.as_deref())?;
    let options = CipherOptions {
        core: opt.core,
        trace: opt.trace,
    };
    let mut cipher = Cipher::new(&key, options)?;

    let mut input: Box<dyn Read> = match &opt.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output: Box<dyn Write> = match &opt.outfile {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    // On failure, clean up a freshly created output file rather than
    // leaving a truncated one behind.
    let result = if encrypting {
        encode_stream(&mut cipher, &mut input, &mut output).map(|warnings| {
            for w in warnings {
                eprintln!("warning: {w}");
            }
        })
    } else {
        decode_stream(&mut cipher, &mut input, &mut output)
    };

    if let Err(e) = result {
        if let Some(path) = &opt.outfile {
            let _ = fs::remove_file(path);
        }
        return Err(e);
    }
    output.flush()?;
    Ok(())
}

/// Load the key stored in `keyfile`, or -- if none was given -- prompt for
/// a password on stderr and derive a key from it.
fn load_key(keyfile: Option<&Path>) -> Result<[u8; KEY_LEN], CipherError> {
    match keyfile {
        Some(path) => {
            let bytes = fs::read(path)?;
            if bytes.len() != KEY_LEN {
                return Err(CipherError::InvalidKeyLength {
                    expected: KEY_LEN,
                    found: bytes.len(),
                });
            }
            let mut key = [0u8; KEY_LEN];
            key.copy_from_slice(&bytes[..KEY_LEN]);
            key::validate(&key)?;
            Ok(key)
        }
        None => {
            let password = read_password("password: ")?;
            if password.is_empty() {
                return Err(invalid_input("password has length zero"));
            }
            Ok(derive_key(password.as_bytes()))
        }
    }
}

/// Read a password line from stdin. There is no TTY-echo-suppression crate
/// in this stack, so this always takes the reference implementation's
/// "dumb" fallback path: echoed input, with a warning.
fn read_password(prompt: &str) -> io::Result<String> {
    eprintln!("warning: reading password from stdin with echo");
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn invalid_input(msg: &str) -> CipherError {
    CipherError::Io(io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()))
}
