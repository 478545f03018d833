use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, Claims, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::{auth_session::hash_token, AuthSession, User},
        dto::{
            request::{LoginForm, RegisterForm},
            response::{AuthResponse, MessageResponse, UserDto},
        },
    },
    repositories::{AuthSessionRepository, UserRepository},
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn AuthSessionRepository>,
    jwt_service: JwtService,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn AuthSessionRepository>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            users,
            sessions,
            jwt_service,
        }
    }

    pub async fn register(&self, form: RegisterForm) -> AppResult<UserDto> {
        let request = form.into_request()?;
        request.validate()?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::AlreadyExists("username exists".to_string()));
        }
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists("email exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .users
            .create(User::new(&request.username, &request.email, &password_hash))
            .await?;

        log::info!("Registered user '{}' ({})", user.username, user.id);
        Ok(user.into())
    }

    pub async fn login(&self, form: LoginForm) -> AppResult<AuthResponse> {
        let (username, password) = form.credentials()?;

        let user = match self.users.find_by_username(&username).await? {
            Some(user) if password_matches(&password, &user) => user,
            _ => {
                log::warn!("Rejected login for username '{}'", username);
                return Err(AppError::BadRequest(
                    "invalid username or password".to_string(),
                ));
            }
        };

        let session_id = Uuid::new_v4().to_string();
        let issued = self.jwt_service.create_token(&user, &session_id)?;
        self.sessions
            .create(AuthSession::new(
                session_id,
                user.id.clone(),
                hash_token(&issued.token),
                issued.expires_at(),
            ))
            .await?;

        log::info!("User '{}' logged in", user.username);
        Ok(AuthResponse {
            token: issued.token,
            user: user.into(),
        })
    }

    pub async fn logout(&self, claims: &Claims) -> AppResult<MessageResponse> {
        self.sessions.revoke(&claims.jti).await?;
        log::info!("User '{}' logged out", claims.username);
        Ok(MessageResponse::new("logout success"))
    }

    /// Turns a bearer token into claims if both the signature and the backing
    /// login session are still valid.
    pub async fn resolve_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.jwt_service.validate_token(token)?;

        let session = self
            .sessions
            .find_by_id(&claims.jti)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Login session not found".to_string()))?;

        if !session.is_valid()
            || session.user_id != claims.sub
            || session.token_hash != hash_token(token)
        {
            return Err(AppError::Unauthorized(
                "Login session is no longer valid".to_string(),
            ));
        }

        Ok(claims)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<UserDto> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;

        Ok(user.into())
    }
}

// An unreadable stored hash counts as a mismatch rather than a server error.
fn password_matches(password: &str, user: &User) -> bool {
    verify_password(password, &user.password_hash).unwrap_or_else(|err| {
        log::warn!("Stored password hash for user '{}' is unreadable: {}", user.id, err);
        false
    })
}
