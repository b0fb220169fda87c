//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU bound, so both operations run on Tokio's blocking pool.
//! The request's trace id is carried across so log lines stay correlated.

use argon2::Argon2;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use rand_core::OsRng;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::TraceId;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher.
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &[u8]) -> Result<String, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password, &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(password: &[u8], stored: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => {
            debug!("password mismatch");
            Ok(false)
        }
        Err(err) => {
            warn!(error = %err, "password verification failed");
            Err(PasswordHasherError::hash(err.to_string()))
        }
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(trace_id) => TraceId::sync_scope(trace_id, work),
        None => work(),
    })
    .await
    .map_err(|err| PasswordHasherError::hash(format!("hashing task aborted: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        run_blocking(move || hash_blocking(&password)).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.to_owned();
        run_blocking(move || verify_blocking(&password, &stored)).await
    }
}
