//! Salted one-way password hashing
//!
//! Hashes are PBKDF2-HMAC-SHA256 over a random 32-byte salt, encoded as
//! `pbkdf2-sha256$<iterations>$<salt>$<hash>` with unpadded base64 parts so
//! that the iteration count travels with each hash.

use crate::config::SecretString;
use crate::domain::{CaredeskError, Result};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub const SALT_LENGTH: usize = 32;
pub const HASH_LENGTH: usize = 32;

const SCHEME: &str = "pbkdf2-sha256";

/// Derives and checks password hashes
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
    // Compared against when the user does not exist so that lookups of
    // unknown names cost the same as a wrong password.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        let salt = [0u8; SALT_LENGTH];
        let derived = derive(b"caredesk-dummy", &salt, iterations);
        Self {
            iterations,
            dummy_hash: encode(iterations, &salt, &derived),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &SecretString) -> String {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        let mut derived = derive(password.expose_secret().as_bytes(), &salt, self.iterations);
        let encoded = encode(self.iterations, &salt, &derived);
        derived.zeroize();
        encoded
    }

    /// Check a password against an encoded hash in constant time
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Database`] if the stored hash is not in the
    /// expected format.
    pub fn verify(&self, password: &SecretString, encoded: &str) -> Result<bool> {
        let (iterations, salt, expected) = decode(encoded)?;
        let mut derived = derive(password.expose_secret().as_bytes(), &salt, iterations);
        let matches = derived.len() == expected.len() && bool::from(derived.ct_eq(&expected));
        derived.zeroize();
        Ok(matches)
    }

    /// True if `encoded` was derived with a different iteration count
    ///
    /// The dummy check always runs at the configured count, so hashes left at
    /// an older count would make unknown usernames time differently.
    pub fn needs_rehash(&self, encoded: &str) -> bool {
        !matches!(decode(encoded), Ok((iterations, _, _)) if iterations == self.iterations)
    }

    /// Burn the same work as a real check at the configured iteration count,
    /// for usernames that do not exist
    pub fn verify_dummy(&self, password: &SecretString) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut out = vec![0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    out
}

fn encode(iterations: u32, salt: &[u8], hash: &[u8]) -> String {
    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    )
}

fn decode(encoded: &str) -> Result<(u32, Vec<u8>, Vec<u8>)> {
    let malformed = || CaredeskError::Database("stored password hash is malformed".to_string());

    let mut parts = encoded.split('$');
    if parts.next() != Some(SCHEME) {
        return Err(malformed());
    }
    let iterations = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .filter(|i| *i > 0)
        .ok_or_else(malformed)?;
    let salt = parts
        .next()
        .and_then(|p| STANDARD_NO_PAD.decode(p).ok())
        .ok_or_else(malformed)?;
    let hash = parts
        .next()
        .and_then(|p| STANDARD_NO_PAD.decode(p).ok())
        .ok_or_else(malformed)?;
    if parts.next().is_some() || hash.len() != HASH_LENGTH {
        return Err(malformed());
    }

    Ok((iterations, salt, hash))
}
