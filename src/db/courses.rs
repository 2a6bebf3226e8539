//! # 강의 데이터베이스 쿼리 모듈
//!
//! `courses` 테이블에 대한 쿼리 함수들입니다.
//! 모든 함수는 `&mut SqliteConnection`을 받으므로, 트랜잭션 안에서는
//! `&mut *tx`를, 트랜잭션 밖에서는 연결 자체를 넘기면 됩니다.
//!
//! 조건 검색은 `search` 모듈이 담당합니다.

use crate::error::AppError;
use crate::models::Course;
use sqlx::SqliteConnection;

/// 모든 강의를 추가된 순서(course_id 오름차순)로 조회합니다.
pub async fn list_courses(conn: &mut SqliteConnection) -> Result<Vec<Course>, AppError> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT course_id, mnemonic, number, title FROM courses ORDER BY course_id",
    )
    .fetch_all(conn)
    .await?;

    Ok(courses)
}

/// ID로 강의 하나를 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 None, 1행이면 Some(Course)을 반환합니다.
pub async fn get_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<Option<Course>, AppError> {
    let course = sqlx::query_as::<_, Course>(
        "SELECT course_id, mnemonic, number, title FROM courses WHERE course_id = ?",
    )
    .bind(course_id)
    .fetch_optional(conn)
    .await?;

    Ok(course)
}

/// (과목, 번호, 제목)이 정확히 같은 강의가 이미 있는지 확인합니다.
///
/// 대소문자까지 그대로 비교합니다. 과목 코드는 추가하기 전에 대문자로 정규화되므로
/// "cs"와 "CS"가 다른 강의로 들어가는 일은 `actions` 계층에서 막힙니다.
pub async fn exists(
    conn: &mut SqliteConnection,
    mnemonic: &str,
    number: i64,
    title: &str,
) -> Result<bool, AppError> {
    // query_as::<_, (i64,)>: 결과를 i64 하나짜리 튜플로 매핑합니다
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM courses WHERE mnemonic = ? AND number = ? AND title = ?",
    )
    .bind(mnemonic)
    .bind(number)
    .bind(title)
    .fetch_optional(conn)
    .await?;

    Ok(row.is_some())
}

/// 새 강의를 추가하고 DB가 부여한 course_id를 반환합니다.
pub async fn insert_course(
    conn: &mut SqliteConnection,
    mnemonic: &str,
    number: i64,
    title: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO courses (mnemonic, number, title) VALUES (?, ?, ?)")
        .bind(mnemonic)
        .bind(number)
        .bind(title)
        .execute(conn)
        .await?;

    // last_insert_rowid(): AUTOINCREMENT로 방금 부여된 ID
    Ok(result.last_insert_rowid())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<(), AppError> {
    sqlx::query("DELETE FROM courses").execute(conn).await?;

    Ok(())
}
