//! Password hashing and bearer-token issuance. Pure computation; callers
//! own all persistence.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::entities::user::Role;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub user_type: Role,
    pub email: String,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(format!("password hash error: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_token(user_id: i32, user_type: Role, email: &str) -> Result<String, AppError> {
    let config = get_config();
    let exp = chrono::Utc::now().timestamp() + config.jwt_expires_secs;
    let claims = Claims {
        user_id,
        user_type,
        email: email.to_string(),
        exp: exp as usize,
    };
    sign(&claims, &config.jwt_secret)
}

/// `None` for expired or tampered tokens; never touches the store.
pub fn verify_token(token: &str) -> Option<Claims> {
    let config = get_config();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

fn sign(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::InternalServerError(format!("token encode error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong-pass", &hash));
    }

    #[test]
    fn hashing_tolerates_unicode() {
        let hash = hash_password("pāsswörd-žluťoučký-密码").unwrap();
        assert!(verify_password("pāsswörd-žluťoučký-密码", &hash));
        assert!(!verify_password("pāsswörd-žluťoučký-密碼", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn issued_token_carries_claims() {
        let token = issue_token(42, Role::Mentor, "mentor@example.com").unwrap();
        let claims = verify_token(&token).expect("fresh token verifies");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.user_type, Role::Mentor);
        assert_eq!(claims.email, "mentor@example.com");
    }

    #[test]
    fn expired_token_fails_verification() {
        let claims = Claims {
            user_id: 1,
            user_type: Role::Filmmaker,
            email: "old@example.com".to_string(),
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
        };
        let token = sign(&claims, &get_config().jwt_secret).unwrap();
        assert!(verify_token(&token).is_none());
    }

    #[test]
    fn tampered_token_fails_verification() {
        let claims = Claims {
            user_id: 1,
            user_type: Role::Filmmaker,
            email: "x@example.com".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = sign(&claims, "some-other-secret").unwrap();
        assert!(verify_token(&token).is_none());
    }
}
