//! # 로그인 세션
//!
//! 현재 로그인한 사용자를 담는 값입니다.
//! 전역 싱글턴 대신 콘솔 루프가 `Session`을 소유하고,
//! 현재 사용자가 필요한 `actions` 함수에 `&Session` / `&mut Session`으로 넘겨줍니다.

use crate::error::AppError;
use crate::models::User;

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// 로그인하지 않은 빈 세션
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        tracing::debug!(username = %user.username, "session started");
        self.user = Some(user);
    }

    /// 로그아웃: 세션을 비웁니다.
    pub fn clear(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::debug!(username = %user.username, "session cleared");
        }
    }

    /// 로그인한 사용자를 반환하고, 없으면 `Unauthorized`를 반환합니다.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Please log in first".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_requires_login() {
        let session = Session::new();
        assert!(session.current_user().is_none());
        assert!(matches!(session.require_user(), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn set_and_clear_user() {
        let mut session = Session::new();
        session.set_user(User::named("alice"));
        assert_eq!(session.require_user().unwrap().username, "alice");

        session.clear();
        assert!(session.current_user().is_none());
    }
}
