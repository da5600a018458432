use criterion::{criterion_group, criterion_main, Criterion};

use handycipher::{encode_stream, Cipher, CipherOptions};

const SAMPLE_TEXT: &[u8] = b"THE QUICK, BROWN FOX JUMPS OVER THE LAZY DOG? YES-IT DOES.";

fn fresh_cipher(core: bool) -> Cipher {
    Cipher::new(handycipher::key::KEYSET, CipherOptions { core, trace: false })
        .expect("the default keyset is always a valid key")
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("encode_stream salted", |b| {
        b.iter(|| {
            let mut cipher = fresh_cipher(false);
            let mut out = Vec::new();
            encode_stream(&mut cipher, &mut &SAMPLE_TEXT[..], &mut out).unwrap();
        })
    });

    c.bench_function("encode_stream core", |b| {
        b.iter(|| {
            let mut cipher = fresh_cipher(true);
            let mut out = Vec::new();
            encode_stream(&mut cipher, &mut &SAMPLE_TEXT[..], &mut out).unwrap();
        })
    });

    c.bench_function("encode + decode round trip", |b| {
        b.iter(|| {
            let mut enc = fresh_cipher(false);
            let mut ciphertext = Vec::new();
            encode_stream(&mut enc, &mut &SAMPLE_TEXT[..], &mut ciphertext).unwrap();

            let mut dec = fresh_cipher(false);
            let mut plaintext = Vec::new();
            handycipher::decode_stream(&mut dec, &mut &ciphertext[..], &mut plaintext).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
