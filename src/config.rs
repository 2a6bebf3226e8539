//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (기본값: `sqlite:course_reviews.db`)
//! - `LOG_FILTER`: `RUST_LOG`가 없을 때 사용할 기본 로그 필터

// std::env: Rust 표준 라이브러리의 환경변수 모듈
use std::env;

/// `DATABASE_URL`이 없을 때 사용하는 기본 데이터베이스 파일
pub const DEFAULT_DATABASE_URL: &str = "sqlite:course_reviews.db";

/// `LOG_FILTER`가 없을 때 사용하는 기본 로그 필터
pub const DEFAULT_LOG_FILTER: &str = "course_reviews=info";

// #[derive(...)]: 자동으로 트레이트 구현을 생성하는 **derive 매크로**
// - Debug: {:?} 포맷으로 출력 가능 (디버깅용 문자열 표현)
// - Clone: .clone() 메서드로 값을 복제 가능
#[derive(Debug, Clone)]
/// 애플리케이션 전체 설정을 담는 구조체
///
/// 시작 시 환경변수에서 한 번 읽어온 후 `main`이 소유합니다.
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/course_reviews.db", "sqlite::memory:")
    pub database_url: String,
    /// tracing 기본 필터 (예: "course_reviews=debug")
    pub log_filter: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 환경변수가 하나도 없어도 동작합니다.
    /// 데스크톱 도구처럼 설정 없이 바로 실행되는 것이 기본 동작입니다.
    pub fn from_env() -> Self {
        Self {
            // unwrap_or_else(|_| ...): Result가 Err일 때 실행할 클로저(익명 함수)를 지정합니다.
            // |_|: 클로저의 매개변수. `_`는 "이 값은 사용하지 않겠다"는 의미입니다.
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            log_filter: env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
