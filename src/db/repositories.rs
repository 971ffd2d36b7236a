//! Repositories: users and posts.

use crate::error::{AppError, AppResult, AuthError};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;

// ---- User ----

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Insert a user. `None` when the email is already registered.
pub async fn user_create(
    pool: &DbPool,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, name, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, password_hash
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

// ---- Posts ----

#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: Uuid,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert a post. An `author_id` with no user row is rejected as an invalid credential.
pub async fn post_create(
    pool: &DbPool,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> AppResult<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO posts (title, content, author_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_foreign_key_violation() {
                tracing::debug!(%author_id, "post rejected: author does not exist");
                return AppError::Auth(AuthError::InvalidCredential);
            }
        }
        AppError::Db(e)
    })?;
    Ok(row.0)
}

/// Update a post owned by `author_id`. Posts of other authors are indistinguishable from missing ones.
pub async fn post_update(
    pool: &DbPool,
    id: Uuid,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> AppResult<()> {
    let r = sqlx::query("UPDATE posts SET title = $1, content = $2 WHERE id = $3 AND author_id = $4")
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(author_id)
        .execute(pool)
        .await?;
    if r.rows_affected() == 0 {
        return Err(AppError::NotFound("post not found".to_string()));
    }
    Ok(())
}

pub async fn post_get(pool: &DbPool, id: Uuid) -> AppResult<Option<PostRow>> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT p.id, p.title, p.content, p.published, p.author_id, u.name AS author_name, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn posts_list(pool: &DbPool) -> AppResult<Vec<PostRow>> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT p.id, p.title, p.content, p.published, p.author_id, u.name AS author_name, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
