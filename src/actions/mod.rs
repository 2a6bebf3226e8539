//! # 액션(Actions) 모듈
//!
//! 화면(콘솔)에서 들어온 요청을 처리하는 함수들입니다.
//! 각 함수는 `Database`와 `Session`을 인자로 받아:
//! 1. 입력을 검증하고
//! 2. 로그인 상태를 확인하고
//! 3. DB 메서드를 호출한 뒤
//! 4. 소프트 네거티브(`false`)를 사용자에게 보여줄 `AppError::Conflict` 등으로 바꿉니다.
//!
//! 화면 출력은 하지 않습니다. 결과를 값으로 돌려주고, 출력은 `console`이 담당합니다.
//!
//! - `auth`: 로그인, 회원가입, 로그아웃
//! - `courses`: 강의 목록, 검색, 추가
//! - `reviews`: 강의 리뷰 보기, 리뷰 제출/삭제, 내 리뷰

pub mod auth;
pub mod courses;
pub mod reviews;
