//! Argon2id password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use roteirum_core::ports::{AuthError, PasswordService};

/// Argon2id with a configurable cost.
///
/// Hashes carry their own parameters, so verification accepts hashes made
/// at any cost; only new hashes use the configured one.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Argon2id with `memory_kib` of memory and `iterations` passes.
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Cost from `ARGON2_MEMORY_KIB` and `ARGON2_ITERATIONS`.
    ///
    /// Unset variables keep the library defaults; an unusable pair falls back
    /// to them entirely.
    pub fn from_env() -> Self {
        let memory_kib = env_u32("ARGON2_MEMORY_KIB").unwrap_or(Params::DEFAULT_M_COST);
        let iterations = env_u32("ARGON2_ITERATIONS").unwrap_or(Params::DEFAULT_T_COST);

        Self::with_cost(memory_kib, iterations).unwrap_or_else(|e| {
            tracing::warn!(error = %e, memory_kib, iterations, "Invalid Argon2 cost, using defaults");
            Self::new()
        })
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
