use std::num::NonZeroU32;

use ring::{
    pbkdf2,
    rand::{SecureRandom, SystemRandom},
};

use crate::error::AppError;

pub const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(iterations) => iterations,
    None => panic!("PBKDF2 iteration count must be non-zero"),
};
pub const HASH_LEN: usize = 64;
pub const SALT_LEN: usize = 16;
pub const TOKEN_LEN: usize = 64;

// The salt is fed to PBKDF2 as the bytes of its hex string, not the decoded bytes.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA512,
        PBKDF2_ITERATIONS,
        salt.as_bytes(),
        password.as_bytes(),
        &mut out,
    );
    hex::encode(out)
}

/// Source of salts and session tokens.
pub struct CredentialRng {
    rng: SystemRandom,
}

impl CredentialRng {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    pub fn salt(&self) -> Result<String, AppError> {
        self.random_hex(SALT_LEN)
    }

    pub fn token(&self) -> Result<String, AppError> {
        self.random_hex(TOKEN_LEN)
    }

    fn random_hex(&self, len: usize) -> Result<String, AppError> {
        let mut bytes = vec![0u8; len];
        self.rng.fill(&mut bytes).map_err(|_| AppError::Random)?;
        Ok(hex::encode(bytes))
    }
}

impl Default for CredentialRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_vector() {
        let hash = hash_password("pw1", "00112233445566778899aabbccddeeff");
        assert_eq!(
            hash,
            "e884f6cff4ab86191ee06e3144f026c4f0fb350fe9983eaf43382bb8aa02125a\
             d3daa699f01f215f82ab0bab962f737a7c494eea061482eca5cd8fcc379268a7"
        );
    }

    #[test]
    fn iteration_count_is_fixed() {
        assert_eq!(PBKDF2_ITERATIONS.get(), 1000);
    }

    #[test]
    fn hash_depends_on_salt_and_password() {
        let base = hash_password("secret", "aa");
        assert_eq!(base, hash_password("secret", "aa"));
        assert_ne!(base, hash_password("secret", "ab"));
        assert_ne!(base, hash_password("Secret", "aa"));
        assert_eq!(base.len(), HASH_LEN * 2);
    }

    #[test]
    fn random_material_is_hex_of_expected_length() {
        let rng = CredentialRng::new();
        let salt = rng.salt().unwrap();
        let token = rng.token().unwrap();
        assert_eq!(salt.len(), 32);
        assert_eq!(token.len(), 128);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, rng.token().unwrap());
    }
}
