//! User repository.

use crate::models::User;
use sqlx::PgPool;

/// Maximum number of users returned by a listing.
pub const USER_LIST_LIMIT: i64 = 100;

/// Fetch the newest users, capped at [`USER_LIST_LIMIT`].
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, created_at \
         FROM users \
         ORDER BY created_at DESC \
         LIMIT $1",
    )
    .bind(USER_LIST_LIMIT)
    .fetch_all(pool)
    .await
}
