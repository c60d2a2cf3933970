//! User synchronization handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::UserService;
use crate::AppState;

/// Upsert the authenticated user's mirror row from their token claims
pub async fn sync_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service
        .sync_user(
            current_user.0.user_id,
            &current_user.0.email,
            current_user.0.name.as_deref(),
        )
        .await?;
    Ok(Json(user))
}
