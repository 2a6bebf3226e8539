use crate::{
    db::Database,
    error::AppError,
    models::user::*,
    session::Session,
};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

pub async fn login(
    db: &mut Database,
    session: &mut Session,
    req: LoginRequest,
) -> Result<User, AppError> {
    // Validate input
    let username = req.username.trim();
    let password = req.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Both fields are required.".to_string()));
    }

    // Verify password
    if !db.validate_credentials(username, password).await? {
        return Err(AppError::Unauthorized(
            "Username and password combination is incorrect.".to_string(),
        ));
    }

    let user = db
        .find_user(username)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve validated user".to_string()))?;

    session.set_user(user.clone());
    tracing::info!(username, "logged in");
    Ok(user)
}

pub async fn register(
    db: &mut Database,
    session: &mut Session,
    req: RegisterRequest,
) -> Result<User, AppError> {
    // Validate input
    let username = req.username.trim();
    let password = req.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password fields cannot be empty.".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters long.",
            MIN_PASSWORD_LEN
        )));
    }

    // Create user; an existing username is a soft negative
    if !db.create_account(username, password).await? {
        return Err(AppError::Conflict("Account already exists.".to_string()));
    }

    let user = db
        .find_user(username)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))?;

    // New accounts are logged in right away
    session.set_user(user.clone());
    Ok(user)
}

pub fn logout(session: &mut Session) {
    session.clear();
}
