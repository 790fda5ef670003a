//! HS256 JWT adapter for the token codec port.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenClaims, TokenCodec, TokenCodecError};
use crate::domain::{Role, UserId};

/// Lifetime applied when none is configured.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Signs tokens with a shared secret.
///
/// `exp` is derived from the injected clock; verification checks it against
/// the system time with the library's default leeway.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenCodec {
    /// Build a codec from the signing secret and token lifetime.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: TokenClaims) -> Result<String, TokenCodecError> {
        let now = self.clock.utc();
        let payload = Claims {
            sub: claims.user_id.to_string(),
            role: claims.role.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|err| TokenCodecError::encode(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map_err(|err| TokenCodecError::invalid(err.to_string()))?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map(UserId::from_uuid)
            .map_err(|err| TokenCodecError::invalid(format!("subject: {err}")))?;
        let role = data
            .claims
            .role
            .parse::<Role>()
            .map_err(|err| TokenCodecError::invalid(err.to_string()))?;
        Ok(TokenClaims { user_id, role })
    }
}
