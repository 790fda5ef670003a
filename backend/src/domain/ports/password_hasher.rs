//! Port for one-way password hashing.
use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies passwords.
///
/// Hashes are opaque strings; a mismatch is `Ok(false)`, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a candidate password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError>;
}
