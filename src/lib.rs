//! # course-reviews
//!
//! 대학 강의 리뷰 서비스의 라이브러리 크레이트입니다.
//! 바이너리(`main.rs`)와 통합 테스트(`tests/`)가 모두 이 크레이트를 통해 모듈을 사용합니다.
//!
//! 계층 구조:
//! - `db`: SQLite 저장소. 연결 수명주기, 스키마, 트랜잭션 단위 쓰기
//! - `services`: 비밀번호 해싱, 평균 평점 계산
//! - `actions`: 화면 하나의 동작 단위 (입력 검증 + 세션 확인 + DB 호출)
//! - `console`: 명령줄 화면

pub mod actions;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use db::Database;
pub use error::AppError;
