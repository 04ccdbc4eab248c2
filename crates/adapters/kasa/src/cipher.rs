//! The XOR autokey cipher every Kasa payload is wrapped in.
//!
//! Each byte is XORed with the previous ciphertext byte, starting from a
//! fixed key. It obfuscates, it does not protect.

const INITIAL_KEY: u8 = 171;

/// Encrypt `plain`.
#[must_use]
pub fn encrypt(plain: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plain
        .iter()
        .map(|byte| {
            key ^= byte;
            key
        })
        .collect()
}

/// Decrypt `cipher`.
#[must_use]
pub fn decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    cipher
        .iter()
        .map(|&byte| {
            let plain = key ^ byte;
            key = byte;
            plain
        })
        .collect()
}
