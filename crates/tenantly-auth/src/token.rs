//! Session token minting

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Raw entropy per token. 32 bytes = 256 bits.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Mint an opaque bearer token from the OS CSPRNG.
///
/// The token is the base64url encoding (no padding) of 32 random bytes,
/// always 43 characters. Nothing about it is derived from time, counters or
/// user ids.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}
