//! SHA-512 crypt hashing for the `rootpw` and `bootloader` lines.
//!
//! Produces glibc-compatible `$6$salt$hash` strings with the default 5000
//! rounds, so the round count is omitted from the output.

use crate::error::{KickstartError, Result};
use rand::Rng;
use sha_crypt::{ROUNDS_DEFAULT, Sha512Params, sha512_crypt_b64};

/// Characters a generated salt is drawn from.
const SALT_ALPHABET: &[u8] = b".abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const SALT_LEN: usize = 16;

/// Hash with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_salt(password, &generate_salt())
}

/// Hash with a caller-supplied salt (used by tests and reproducible builds).
pub fn hash_password_with_salt(password: &str, salt: &str) -> Result<String> {
    let params = Sha512Params::new(ROUNDS_DEFAULT)
        .map_err(|e| KickstartError::credential(format!("{:?}", e)))?;
    let hash = sha512_crypt_b64(password.as_bytes(), salt.as_bytes(), &params)
        .map_err(|e| KickstartError::credential(format!("{:?}", e)))?;
    Ok(format!("$6${}${}", salt, hash))
}

pub fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN)
        .map(|_| char::from(SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())]))
        .collect()
}
