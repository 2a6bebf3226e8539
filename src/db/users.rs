use crate::error::AppError;
use crate::models::user::User;
use sqlx::SqliteConnection;

/// Returns `false` when the username is already taken.
pub async fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES (?, ?)
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .execute(conn)
    .await;

    match result {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(ref e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT username, password_hash
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<(), AppError> {
    sqlx::query("DELETE FROM users").execute(conn).await?;

    Ok(())
}
