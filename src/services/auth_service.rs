use crate::{
    models::{Login, NewUser, User},
    services::store::{now, BookStore},
    utils::{AppError, AppResult, AuthError},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::oid::ObjectId;

impl BookStore {
    /// Registers a user; the password is stored as a bcrypt hash.
    pub async fn create_user(&self, input: NewUser) -> AppResult<User> {
        if input.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        if self.repo.find_user_by_email(&input.email).await?.is_some() {
            return Err(AppError::Validation(format!(
                "Email {} is already registered",
                input.email
            )));
        }

        let now = now();
        let user = User {
            id: ObjectId::new(),
            name: input.name,
            email: input.email,
            password: hash(&input.password, DEFAULT_COST)?,
            role: input.role,
            created: now,
            updated: now,
        };
        self.repo.insert_user(&user).await?;

        log::info!("✅ User registered: {} ({})", user.email, user.role.as_str());
        Ok(user)
    }

    /// Exchanges email and password for a bearer token.
    pub async fn login(&self, input: Login) -> AppResult<String> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or_else(|| AuthError::UnknownEmail(input.email.clone()))?;

        if !verify(&input.password, &user.password)? {
            log::warn!("❌ Login failed: {}", input.email);
            return Err(AuthError::IncorrectPassword.into());
        }

        log::info!("🔐 Login successful: {}", user.email);
        self.tokens.issue(&user)
    }
}
