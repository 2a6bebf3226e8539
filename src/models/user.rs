use serde::{Deserialize, Serialize};

/// `users` 테이블 한 행
///
/// 비밀번호는 평문이 아니라 Argon2id 해시(PHC 문자열)로만 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// 사용자 이름만으로 User를 만듭니다.
    ///
    /// `reviews_for_user`처럼 이름만 필요한 조회에 사용합니다.
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}
