//! Workshop management service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Workshop;
use shared::validation::validate_workshop_name;

/// Workshop service for CRUD on inventory locations
#[derive(Clone)]
pub struct WorkshopService {
    db: PgPool,
}

/// Input for creating a workshop
#[derive(Debug, Deserialize)]
pub struct CreateWorkshopInput {
    pub workshop_name: String,
}

/// Input for renaming a workshop
#[derive(Debug, Deserialize)]
pub struct UpdateWorkshopInput {
    pub workshop_name: String,
}

impl WorkshopService {
    /// Create a new WorkshopService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a workshop owned by the user
    pub async fn create_workshop(
        &self,
        user_id: Uuid,
        input: CreateWorkshopInput,
    ) -> AppResult<Workshop> {
        validate_workshop_name(&input.workshop_name).map_err(|msg| AppError::Validation {
            field: "workshop_name".to_string(),
            message: msg.to_string(),
        })?;

        let workshop = sqlx::query_as::<_, Workshop>(
            r#"
            INSERT INTO workshops (workshop_name, user_id)
            VALUES ($1, $2)
            RETURNING id, workshop_name, user_id, created_at, updated_at
            "#,
        )
        .bind(input.workshop_name.trim())
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(workshop)
    }

    /// List the user's workshops, newest first
    pub async fn list_workshops(&self, user_id: Uuid) -> AppResult<Vec<Workshop>> {
        let workshops = sqlx::query_as::<_, Workshop>(
            r#"
            SELECT id, workshop_name, user_id, created_at, updated_at
            FROM workshops
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(workshops)
    }

    /// Get one workshop by id
    pub async fn get_workshop(&self, user_id: Uuid, workshop_id: Uuid) -> AppResult<Workshop> {
        let workshop = sqlx::query_as::<_, Workshop>(
            r#"
            SELECT id, workshop_name, user_id, created_at, updated_at
            FROM workshops
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(workshop_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop".to_string()))?;

        Ok(workshop)
    }

    /// Rename a workshop
    pub async fn update_workshop(
        &self,
        user_id: Uuid,
        workshop_id: Uuid,
        input: UpdateWorkshopInput,
    ) -> AppResult<Workshop> {
        validate_workshop_name(&input.workshop_name).map_err(|msg| AppError::Validation {
            field: "workshop_name".to_string(),
            message: msg.to_string(),
        })?;

        let workshop = sqlx::query_as::<_, Workshop>(
            r#"
            UPDATE workshops
            SET workshop_name = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            RETURNING id, workshop_name, user_id, created_at, updated_at
            "#,
        )
        .bind(input.workshop_name.trim())
        .bind(workshop_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop".to_string()))?;

        Ok(workshop)
    }

    /// Delete a workshop; its products and sales go with it
    pub async fn delete_workshop(&self, user_id: Uuid, workshop_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workshops WHERE id = $1 AND user_id = $2")
            .bind(workshop_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Workshop".to_string()));
        }

        Ok(())
    }
}
