//! # 데이터베이스 스키마
//!
//! `create_schema`가 실행하는 테이블 생성 SQL입니다.
//! 모든 테이블은 `STRICT`이므로, 타입이 맞지 않는 값을 바인딩하면
//! SQLite의 타입 변환(type affinity) 없이 바로 에러가 납니다.

/// Users, Courses and Reviews, created only if missing.
///
/// - `reviews.rating` is constrained to 1..5
/// - `UNIQUE(course_id, author_username)` keeps one review per user per course
/// - both review foreign keys cascade on delete
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS courses (
    course_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    mnemonic TEXT NOT NULL,
    number INTEGER NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS reviews (
    review_id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_id INTEGER NOT NULL,
    author_username TEXT NOT NULL,
    rating REAL NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment TEXT,
    timestamp TEXT NOT NULL,
    FOREIGN KEY (course_id) REFERENCES courses(course_id) ON DELETE CASCADE,
    FOREIGN KEY (author_username) REFERENCES users(username) ON DELETE CASCADE,
    UNIQUE (course_id, author_username)
) STRICT;
"#;
