//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `course`: 강의(Course)와 검색/추가 요청 구조체
//! - `review`: 리뷰(Review)와 제출 요청, 화면용 묶음 구조체
//! - `user`: 사용자(User)와 로그인/가입 요청 구조체
//!
//! 모든 엔티티는 평범한 값(plain data)이며, 계층 사이에서 복제(Clone)되어 전달됩니다.

// pub mod: 하위 모듈을 공개(public)로 선언합니다.
pub mod course;
pub mod review;
pub mod user;

// pub use: 하위 모듈의 항목을 현재 모듈에서 재공개합니다.
// 이렇게 하면 사용하는 쪽에서 `models::Course`처럼 짧게 쓸 수 있습니다.
pub use course::*;
pub use review::*;
pub use user::*;
