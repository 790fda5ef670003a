//! Port for issuing and decoding signed bearer tokens.
use crate::domain::{Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenCodecError {
        /// Token could not be signed.
        Encode { message: String } => "token encoding failed: {message}",
        /// Token was malformed, tampered with, or expired.
        Invalid { message: String } => "invalid token: {message}",
    }
}

/// Identity carried by a signed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account the token was issued to.
    pub user_id: UserId,
    /// Role granted to the bearer.
    pub role: Role,
}

/// Signs and verifies bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token for the given identity.
    fn issue(&self, claims: TokenClaims) -> Result<String, TokenCodecError>;

    /// Verify a token and return its claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError>;
}
