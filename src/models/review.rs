//! # 리뷰(Review) 모델 정의
//!
//! 한 사용자는 한 강의에 리뷰를 최대 하나만 가질 수 있습니다.
//! (`reviews` 테이블의 `UNIQUE(course_id, author_username)` 제약)

use serde::{Deserialize, Serialize};

use super::Course;

/// 리뷰 엔티티: DB의 `reviews` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// DB가 부여하는 정수 ID
    /// 같은 강의에 리뷰를 다시 제출하면 행이 교체되므로 새 ID를 받습니다.
    pub review_id: i64,
    /// 리뷰 대상 강의 (외래키)
    pub course_id: i64,
    /// 작성자 (외래키)
    pub author_username: String,
    /// 평점 (1.0 ~ 5.0, DB CHECK 제약)
    pub rating: f64,
    /// 코멘트: 비어 있을 수 있음
    pub comment: String,
    /// 작성 시각 (서버 로컬 시간, "YYYY-MM-DD HH:MM:SS")
    pub timestamp: String,
}

/// 저장할 리뷰: `review_id`와 `timestamp`는 DB 계층이 채웁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub course_id: i64,
    pub author_username: String,
    pub rating: f64,
    pub comment: String,
}

/// 리뷰 제출 폼
///
/// 평점은 1~5 중 하나를 골라야 하므로 정수로 받습니다.
/// None은 "아무것도 선택하지 않음"입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReviewRequest {
    pub course_id: i64,
    pub rating: Option<i64>,
    pub comment: String,
}

/// 강의 리뷰 화면에 필요한 모든 데이터
#[derive(Debug, Clone, Serialize)]
pub struct CourseReviews {
    pub course: Course,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    /// 현재 사용자가 이 강의에 남긴 리뷰 (있으면 "수정" 모드)
    pub own_review: Option<Review>,
}

/// 내 리뷰 화면의 한 줄 (리뷰 + 리뷰 대상 강의)
#[derive(Debug, Clone, Serialize)]
pub struct MyReview {
    pub course: Course,
    pub review: Review,
}
