//! # 서비스 모듈
//!
//! DB나 화면에 의존하지 않는 순수 함수들을 모아둔 모듈입니다.
//! - `password`: Argon2id 비밀번호 해싱/검증
//! - `rating`: 평균 평점 계산과 표시 형식

pub mod password;
pub mod rating;
