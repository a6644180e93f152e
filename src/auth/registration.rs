//! Account registration and login.

use std::time::Duration;

use tracing::{debug, info};

use crate::auth::password::{password_length_ok, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::auth::{hash_password, verify_password, TokenCodec};
use crate::db::{normalize_email, NewUser, User, UserRepository};
use crate::{Database, ForumError, Result};

/// Maximum display name length, in characters.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 20;

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Email address; normalized before it is stored.
    pub email: String,
    /// Password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Display name (1-20 characters).
    pub display_name: String,
}

impl RegistrationRequest {
    /// Create a registration request whose confirmation matches the password.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            confirm_password: password.clone(),
            password,
            display_name: display_name.into(),
        }
    }

    /// Override the confirmation field.
    pub fn with_confirm_password(mut self, confirm: impl Into<String>) -> Self {
        self.confirm_password = confirm.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(ForumError::Validation(
                "password confirmation does not match".to_string(),
            ));
        }
        if !password_length_ok(&self.password) {
            return Err(ForumError::Validation(format!(
                "password must be {MIN_PASSWORD_LENGTH}-{MAX_PASSWORD_LENGTH} characters"
            )));
        }
        let name_len = self.display_name.trim().chars().count();
        if name_len == 0 || name_len > MAX_DISPLAY_NAME_LENGTH {
            return Err(ForumError::Validation(format!(
                "display name must be 1-{MAX_DISPLAY_NAME_LENGTH} characters"
            )));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ForumError::Validation("invalid email format".to_string())),
        }
    }
}

/// Register a new account with the `User` role.
///
/// The email is normalized once here; every later lookup uses the stored
/// form. A duplicate email is `Conflict`.
pub async fn register(db: &Database, request: RegistrationRequest) -> Result<User> {
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let new_user = NewUser::new(&request.email, password_hash, request.display_name.trim());

    let mut conn = db.pool().acquire().await?;
    let user = UserRepository::new(&mut conn).create(&new_user).await?;

    info!(user_id = user.id, "user registered");
    Ok(user)
}

/// Check credentials and issue a bearer token valid for `ttl`.
///
/// An unknown email and a wrong password both yield `Unauthorized`.
pub async fn login(
    db: &Database,
    codec: &TokenCodec,
    email: &str,
    password: &str,
    ttl: Duration,
) -> Result<(String, User)> {
    let subject = normalize_email(email);

    let user = {
        let mut conn = db.pool().acquire().await?;
        UserRepository::new(&mut conn).get_by_email(&subject).await?
    };

    let Some(user) = user else {
        debug!("login failed: unknown subject");
        return Err(ForumError::Unauthorized);
    };
    if !verify_password(password, &user.password_hash) {
        debug!(user_id = user.id, "login failed: wrong password");
        return Err(ForumError::Unauthorized);
    }

    let token = codec.issue(&user.email, ttl)?;
    info!(user_id = user.id, "user logged in");
    Ok((token, user))
}
