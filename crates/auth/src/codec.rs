//! Credential codec: deterministic one-way transform of a plaintext
//! credential into the stored/comparable form.
//!
//! # Security
//!
//! This is **not** a cryptographic hash. The stored form is the decimal
//! rendering of a 31-multiplier, wrapping 32-bit digest over the UTF-16 code
//! units of the plaintext — fast, trivially reversible by search, and with
//! the collision profile of any 32-bit hash (`"Aa"` and `"BB"` collide).
//! It is preserved exactly for compatibility with existing stored
//! credentials and token strings. Do not rely on it for secrecy; deployments
//! that need real credential protection should front this service with a
//! proper KDF and feed the derived value in as the "plaintext".

/// Encode a plaintext credential into its stored form.
///
/// Deterministic, pure, total: the same input always yields the same output
/// and no input fails.
pub fn encode(plaintext: &str) -> String {
    let mut digest: i32 = 0;
    for unit in plaintext.encode_utf16() {
        digest = digest.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    digest.to_string()
}
