//! # 리뷰 데이터베이스 쿼리 모듈
//!
//! 리뷰의 저장(교체), 삭제, 조회를 담당하는 SQL 쿼리 함수들입니다.
//!
//! ## 한 사용자 한 강의 한 리뷰
//! `reviews` 테이블의 `UNIQUE(course_id, author_username)` 제약 위에서
//! `INSERT OR REPLACE`를 사용합니다. 같은 키의 행이 있으면 SQLite가 그 행을
//! **삭제한 뒤 새로 삽입**하므로, 교체된 리뷰는 새 `review_id`를 받습니다.

use crate::error::AppError;
use crate::models::{NewReview, Review};
use sqlx::SqliteConnection;

/// 리뷰 timestamp 형식 ("2024-11-30 14:05:09")
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 서버 로컬 시간으로 현재 시각 문자열을 만듭니다.
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 리뷰 하나를 저장합니다. 같은 (강의, 작성자) 리뷰가 있으면 통째로 교체됩니다.
///
/// 평점이 1~5 범위를 벗어나거나 강의/사용자가 없으면
/// CHECK 또는 FOREIGN KEY 제약 위반으로 `AppError::Database`가 반환됩니다.
pub async fn replace_review(
    conn: &mut SqliteConnection,
    review: &NewReview,
    timestamp: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO reviews (course_id, author_username, rating, comment, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(review.course_id)
    .bind(&review.author_username)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(timestamp)
    .execute(conn)
    .await?;

    Ok(())
}

/// (강의, 작성자)에 해당하는 리뷰를 삭제합니다.
///
/// ## 반환값
/// - `true`: 리뷰가 삭제됨
/// - `false`: 해당 리뷰가 없어 아무것도 하지 않음 (에러가 아님)
pub async fn delete_review(
    conn: &mut SqliteConnection,
    course_id: i64,
    author_username: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE course_id = ? AND author_username = ?")
        .bind(course_id)
        .bind(author_username)
        .execute(conn)
        .await?;

    // rows_affected(): 이 쿼리로 영향받은 행 수를 반환
    Ok(result.rows_affected() > 0)
}

/// 특정 강의의 모든 리뷰를 저장된 순서로 조회합니다.
///
/// `comment` 컬럼은 NULL일 수 있으므로 `COALESCE`로 빈 문자열로 바꿔서 읽습니다.
pub async fn list_for_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT review_id, course_id, author_username, rating,
               COALESCE(comment, '') AS comment, timestamp
        FROM reviews
        WHERE course_id = ?
        ORDER BY review_id
        "#,
    )
    .bind(course_id)
    .fetch_all(conn)
    .await?;

    Ok(reviews)
}

/// 특정 사용자가 작성한 모든 리뷰를 저장된 순서로 조회합니다.
pub async fn list_for_user(
    conn: &mut SqliteConnection,
    author_username: &str,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT review_id, course_id, author_username, rating,
               COALESCE(comment, '') AS comment, timestamp
        FROM reviews
        WHERE author_username = ?
        ORDER BY review_id
        "#,
    )
    .bind(author_username)
    .fetch_all(conn)
    .await?;

    Ok(reviews)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<(), AppError> {
    sqlx::query("DELETE FROM reviews").execute(conn).await?;

    Ok(())
}
