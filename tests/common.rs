//! tests/common.rs
//! Common fixtures shared across test files: known plaintext, a fixed IV, and
//! CBC/PKCS#7 encryption helpers that produce IV-prefixed ciphertext.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockEncryptMut, KeyInit, KeyIvInit};
use spadeace::kdf::KeyDerivation;
use spadeace::key_from_counter;

/// Plaintext every fixture encrypts; comfortably above the validator's
/// printable threshold.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PLAINTEXT: &[u8] = b"Attack at dawn. The quick brown fox jumps over the lazy dog!";

/// Fixed IV prefix (16 bytes, 8-byte ciphers use the first half).
#[allow(dead_code)] // Used across multiple test files
pub const TEST_IV: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
];

/// Counter of the AES-256 key used by the brute-force fixtures.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_COUNTER: u64 = 1_500;

/// Keyspace cap small enough for exhaustion tests to finish quickly.
#[allow(dead_code)] // Used across multiple test files
pub const SMALL_CAP_BITS: u32 = 12;

/// CBC-encrypt `plaintext` under cipher `C` and prepend [`TEST_IV`].
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_cbc<C>(block_size: usize, key: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, &TEST_IV[..block_size])
        .expect("valid key and IV length");
    let mut out = TEST_IV.to_vec();
    out.extend(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext));
    out
}

/// AES-CBC with a 16/24/32-byte key.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_aes(key: &[u8], plaintext: &[u8]) -> Vec<u8> {
    match key.len() {
        16 => encrypt_cbc::<aes::Aes128>(16, key, plaintext),
        24 => encrypt_cbc::<aes::Aes192>(16, key, plaintext),
        32 => encrypt_cbc::<aes::Aes256>(16, key, plaintext),
        other => panic!("unsupported AES key length {other}"),
    }
}

/// AES-256-CBC under the brute-force key for `counter`.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_with_counter(counter: u64, plaintext: &[u8]) -> Vec<u8> {
    encrypt_aes(&key_from_counter(counter, 32), plaintext)
}

/// AES-256-CBC under `password` run through `kdf`.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_with_password(password: &str, kdf: &KeyDerivation, plaintext: &[u8]) -> Vec<u8> {
    let key = kdf.derive(password, 32).expect("derivation succeeds");
    encrypt_aes(&key, plaintext)
}

/// Deterministic pseudo-random bytes.
#[allow(dead_code)] // Used across multiple test files
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}
