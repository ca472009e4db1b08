//! Confirmation-code and temporary-password generation.

use rand::Rng;

/// Alphabet for generated secrets: digits, upper/lower letters, and `!`.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!";

pub const CONFIRMATION_CODE_LEN: usize = 6;
pub const TEMPORARY_PASSWORD_LEN: usize = 16;

fn generate(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// A short one-time code delivered out-of-band during reset flows.
pub fn confirmation_code() -> String {
    generate(CONFIRMATION_CODE_LEN)
}

/// A temporary password for newly created or reset accounts.
pub fn temporary_password() -> String {
    generate(TEMPORARY_PASSWORD_LEN)
}
