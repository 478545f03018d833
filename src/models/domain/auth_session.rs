use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side record of a login. The access token's `jti` is the session id,
/// which lets logout revoke an otherwise stateless JWT.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthSession {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl AuthSession {
    pub fn new(id: String, user_id: String, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            token_hash,
            expires_at,
            created_at: Utc::now(),
            revoked: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}

pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
