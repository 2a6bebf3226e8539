//! # 비밀번호 해싱 서비스
//!
//! 비밀번호는 평문으로 저장하지 않고 Argon2id 해시(PHC 문자열)로만 저장합니다.
//!
//! PHC 문자열 예시:
//! ```text
//! $argon2id$v=19$m=19456,t=2,p=1$<솔트>$<해시>
//! ```
//! 알고리즘, 파라미터, 솔트가 모두 문자열 안에 들어 있으므로
//! 검증할 때 별도의 설정이 필요 없습니다.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호를 Argon2id로 해싱합니다.
///
/// 호출할 때마다 새 솔트를 만들므로 같은 비밀번호라도 결과 문자열은 매번 다릅니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    // SaltString::generate: OS 난수 생성기(OsRng)로 무작위 솔트를 만듭니다
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// 비밀번호가 저장된 해시와 일치하는지 확인합니다.
///
/// ## 반환값
/// - `Ok(true)`: 일치
/// - `Ok(false)`: 불일치
/// - `Err(AppError::Internal)`: 저장된 해시 문자열이 PHC 형식이 아님
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("pw123456").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw123456", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn hashing_is_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("pw123456", "plaintext").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
