//! Admin session tokens (JWT)

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_expiry: Duration,
}

impl JwtService {
    /// Only the HMAC family is accepted, since keys come from a shared secret.
    pub fn new(secret: &str, algorithm: &str, expiry_minutes: i64) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(algorithm)
            .ok()
            .filter(|a| matches!(a, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
            .ok_or_else(|| JwtError::UnsupportedAlgorithm(algorithm.to_string()))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            access_token_expiry: Duration::minutes(expiry_minutes),
        })
    }

    pub fn access_token_expiry(&self) -> Duration {
        self.access_token_expiry
    }

    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<IssuedToken, JwtError> {
        let expires_at = now + self.access_token_expiry;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and algorithm, then check expiry against `now`
    /// with no leeway. Expiry is checked here rather than by the codec so
    /// the caller's clock is the only notion of time.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::ValidationError(e.to_string()))?;

        if claims.exp <= now.timestamp() {
            return Err(JwtError::TokenExpired);
        }
        Ok(claims)
    }

    /// Extract the token from an `Authorization: Bearer <token>` value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        let (scheme, token) = header.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_before_expiry() {
        let service = JwtService::new(SECRET, "HS256", 30).unwrap();
        let issued = service.issue("admin", issued_at()).unwrap();

        assert_eq!(issued.expires_at, issued_at() + Duration::minutes(30));
        let claims = service
            .validate(&issued.token, issued_at() + Duration::minutes(29))
            .unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_expired_after_expiry() {
        let service = JwtService::new(SECRET, "HS256", 30).unwrap();
        let issued = service.issue("admin", issued_at()).unwrap();

        let result = service.validate(&issued.token, issued_at() + Duration::minutes(31));
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::new(SECRET, "HS256", 30).unwrap();
        let other = JwtService::new("another-secret-another-secret-xx", "HS256", 30).unwrap();
        let issued = other.issue("admin", issued_at()).unwrap();

        let result = service.validate(&issued.token, issued_at());
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let service = JwtService::new(SECRET, "HS256", 30).unwrap();
        let other = JwtService::new(SECRET, "HS512", 30).unwrap();
        let issued = other.issue("admin", issued_at()).unwrap();

        assert!(service.validate(&issued.token, issued_at()).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = JwtService::new(SECRET, "HS256", 30).unwrap();
        let admin = service.issue("admin", issued_at()).unwrap();
        let intruder = service.issue("intruder", issued_at()).unwrap();

        // intruder's claims under admin's signature
        let (intruder_body, _) = intruder.token.rsplit_once('.').unwrap();
        let (_, admin_signature) = admin.token.rsplit_once('.').unwrap();
        let spliced = format!("{}.{}", intruder_body, admin_signature);

        assert!(service.validate(&spliced, issued_at()).is_err());
        assert!(service.validate("not.a.token", issued_at()).is_err());
    }

    #[test]
    fn test_asymmetric_algorithm_refused() {
        assert!(matches!(
            JwtService::new(SECRET, "RS256", 30),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
        assert!(JwtService::new(SECRET, "nonsense", 30).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc.def"), Some("abc.def"));
        assert_eq!(JwtService::extract_from_header("bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
        assert_eq!(JwtService::extract_from_header("Bearer"), None);
    }
}
