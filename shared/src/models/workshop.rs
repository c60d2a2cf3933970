//! Workshop models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named inventory location owned by a user
///
/// Deleting a workshop cascades to its products and sales.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workshop {
    pub id: Uuid,
    pub workshop_name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
