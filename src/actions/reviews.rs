//! # 리뷰 액션
//!
//! 강의 리뷰 화면과 내 리뷰 화면의 동작들입니다.
//! 모든 동작은 로그인한 사용자를 기준으로 하며, 다른 사람의 리뷰는 수정/삭제할 수 없습니다.

use std::collections::HashMap;

use crate::{
    db::Database,
    error::AppError,
    models::{Course, CourseReviews, MyReview, NewReview, SubmitReviewRequest},
    services::rating,
    session::Session,
};

/// 강의 하나의 리뷰 목록, 평균 평점, 그리고 내 리뷰를 조회합니다.
pub async fn course_reviews(
    db: &mut Database,
    session: &Session,
    course_id: i64,
) -> Result<CourseReviews, AppError> {
    let user = session.require_user()?;

    let course = db.get_course(course_id).await?.ok_or(AppError::NotFound)?;
    let reviews = db.reviews_for_course(&course).await?;

    // 내가 이 강의에 남긴 리뷰가 있으면 화면은 "수정" 모드가 됩니다
    let own_review = reviews
        .iter()
        .find(|review| review.author_username == user.username)
        .cloned();

    Ok(CourseReviews {
        average_rating: rating::average_rating(&reviews),
        course,
        reviews,
        own_review,
    })
}

/// 리뷰를 제출합니다. 이미 리뷰가 있으면 새 내용으로 교체됩니다.
///
/// 평점은 1~5 중 하나를 반드시 골라야 하며, 코멘트는 비어 있어도 됩니다.
pub async fn submit(
    db: &mut Database,
    session: &Session,
    req: SubmitReviewRequest,
) -> Result<(), AppError> {
    let user = session.require_user()?;

    // 평점 미선택 또는 범위 밖
    let rating = match req.rating {
        Some(rating) if (1..=5).contains(&rating) => rating,
        _ => return Err(AppError::BadRequest("Please select a rating".to_string())),
    };

    let course = db
        .get_course(req.course_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let review = NewReview {
        course_id: course.course_id,
        author_username: user.username.clone(),
        rating: rating as f64,
        comment: req.comment.trim().to_string(),
    };
    db.upsert_reviews(&[review]).await?;

    tracing::info!(course_id = course.course_id, username = %user.username, rating, "review submitted");
    Ok(())
}

/// 이 강의에 남긴 내 리뷰를 삭제합니다.
///
/// ## 반환값
/// - `true`: 삭제됨
/// - `false`: 삭제할 리뷰가 없었음 (에러가 아님)
pub async fn delete_own(
    db: &mut Database,
    session: &Session,
    course_id: i64,
) -> Result<bool, AppError> {
    let user = session.require_user()?;
    db.delete_review(course_id, &user.username).await
}

/// 내가 작성한 모든 리뷰를 리뷰 대상 강의와 함께 반환합니다.
///
/// 강의를 찾을 수 없는 리뷰는 건너뜁니다.
pub async fn my_reviews(db: &mut Database, session: &Session) -> Result<Vec<MyReview>, AppError> {
    let user = session.require_user()?;
    let reviews = db.reviews_for_user(user).await?;

    // 같은 강의를 여러 번 조회하지 않도록 course_id → Course 캐시를 둡니다
    let mut courses: HashMap<i64, Option<Course>> = HashMap::new();
    let mut rows = Vec::with_capacity(reviews.len());

    for review in reviews {
        if !courses.contains_key(&review.course_id) {
            let course = db.get_course(review.course_id).await?;
            courses.insert(review.course_id, course);
        }

        match courses.get(&review.course_id) {
            Some(Some(course)) => rows.push(MyReview {
                course: course.clone(),
                review,
            }),
            _ => tracing::warn!(
                course_id = review.course_id,
                review_id = review.review_id,
                "skipping review for missing course"
            ),
        }
    }

    Ok(rows)
}
