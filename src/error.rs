//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `ConnectionError`: 연결 수명주기(lifecycle) 오류. 프로그래밍 오류이며 시작을 중단시킵니다.
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `user_message()`: 에러를 사용자에게 보여줄 문장으로 변환
//!
//! "중복 사용자", "중복 강의", "없는 리뷰 삭제" 같은 **소프트 네거티브**는
//! 에러가 아닙니다. DB 계층은 이를 `false`나 no-op으로 알려주고,
//! 사용자 메시지가 필요한 경우에만 `actions` 계층이 `Conflict`로 바꿉니다.

use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 데이터베이스 연결 수명주기 오류
///
/// 이미 연결된 상태에서 다시 연결하거나, 연결 전/해제 후에 작업을 시도한 경우입니다.
/// 사용자가 복구할 수 있는 오류가 아니므로 `main`은 이 오류로 시작을 중단합니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("The connection is already opened")]
    AlreadyOpen,

    #[error("The connection is not open")]
    NotOpen,
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// DB 계층은 `Connection`과 `Database`만 만들고,
/// 나머지 variant는 입력 검증과 세션 확인을 하는 `actions` 계층에서 만듭니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 연결 수명주기 오류
    /// #[from]: ConnectionError → AppError::Connection 자동 변환
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// 저장소 오류 (쿼리/제약조건 위반/I/O)
    /// 이 에러가 호출자에게 도달하기 전에 현재 트랜잭션은 항상 롤백됩니다.
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 AppError::Database가 됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 잘못된 입력
    /// {0}은 첫 번째 필드(String)를 참조하는 포맷 문법입니다.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 로그인 실패 또는 로그인하지 않은 상태
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 이미 존재하는 계정/강의 (소프트 네거티브를 사용자 메시지로 바꾼 것)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 요청한 강의를 찾을 수 없음
    #[error("Resource not found")]
    NotFound,

    /// 내부 오류 (예: 비밀번호 해싱 실패)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 콘솔 입출력 오류
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 사용자에게 보여줄 메시지를 만듭니다.
    ///
    /// 입력 검증/인증/충돌 에러는 메시지를 그대로 보여주고,
    /// 내부 에러(Database, Connection, IO, Internal)는 실제 내용을 로그에만 기록한 뒤
    /// 일반적인 메시지만 반환합니다.
    pub fn user_message(&self) -> String {
        // match: 패턴 매칭. enum의 각 variant에 대해 다른 처리를 합니다.
        // ref: 값을 이동(move)하지 않고 참조만 빌려옵니다.
        match self {
            AppError::BadRequest(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Conflict(ref msg) => msg.clone(),
            AppError::NotFound => "Course not found.".to_string(),
            AppError::Connection(ref e) => {
                tracing::error!("Connection error: {}", e);
                "Database is not available. Please contact support.".to_string()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred. Please try again.".to_string()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                "An IO error occurred".to_string()
            }
        }
    }

    /// 이 에러가 사용자 입력 때문에 생긴 것인지 여부
    ///
    /// 콘솔은 이 값이 `false`인 에러 메시지 앞에 `Error: `를 붙여서 출력합니다.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_)
                | AppError::Unauthorized(_)
                | AppError::Conflict(_)
                | AppError::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_keep_their_message() {
        let err = AppError::Conflict("Course already exists.".to_string());
        assert!(err.is_user_facing());
        assert_eq!(err.user_message(), "Course already exists.");
    }

    #[test]
    fn storage_errors_are_rendered_generically() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_user_facing());
        assert_eq!(err.user_message(), "A database error occurred. Please try again.");
    }

    #[test]
    fn connection_error_converts_into_app_error() {
        let err: AppError = ConnectionError::NotOpen.into();
        assert!(matches!(err, AppError::Connection(ConnectionError::NotOpen)));
        assert_eq!(err.to_string(), "Connection error: The connection is not open");
    }
}
