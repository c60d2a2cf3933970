//! User synchronization service
//!
//! Accounts live at the external identity provider; this service keeps the
//! local mirror row in step with the verified token claims so workshops have
//! an owner to reference.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;
use shared::validation::validate_email;

/// User service maintaining the synced account mirror
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Upsert the authenticated user's row from their token claims
    pub async fn sync_user(
        &self,
        user_id: Uuid,
        email: &str,
        name: Option<&str>,
    ) -> AppResult<User> {
        validate_email(email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
        })?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                updated_at = NOW()
            RETURNING id, email, name, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }
}
