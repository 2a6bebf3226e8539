//! # 평점 서비스
//!
//! 리뷰 목록에서 평균 평점을 계산하고, 화면에 보여줄 문자열로 바꿉니다.
//! 리뷰가 없는 강의의 평균은 0이 아니라 `None`이며, 화면에는 `NO_REVIEWS`로 표시됩니다.
//! 강의 목록은 소수 한 자리, 강의 리뷰 화면은 소수 두 자리로 보여줍니다.

use crate::models::Review;

/// 강의 목록 화면의 평균 평점 소수 자릿수
pub const LIST_PRECISION: usize = 1;

/// 강의 리뷰 화면의 평균 평점 소수 자릿수
pub const DETAIL_PRECISION: usize = 2;

/// 리뷰가 하나도 없을 때 보여주는 문구
pub const NO_REVIEWS: &str = "No reviews";

/// 모든 평점의 산술 평균. 리뷰가 없으면 None입니다.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    let total: f64 = reviews.iter().map(|review| review.rating).sum();
    Some(total / reviews.len() as f64)
}

/// 평균 평점을 지정한 소수 자릿수로 표시합니다. None이면 `NO_REVIEWS`입니다.
pub fn format_average(average: Option<f64>, precision: usize) -> String {
    match average {
        Some(value) => format!("{:.*}", precision, value),
        None => NO_REVIEWS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: f64) -> Review {
        Review {
            review_id: 0,
            course_id: 1,
            author_username: "alice".to_string(),
            rating,
            comment: String::new(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn empty_list_has_no_average() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(format_average(None, LIST_PRECISION), "No reviews");
    }

    #[test]
    fn average_is_the_arithmetic_mean() {
        let reviews = vec![review(4.0), review(5.0), review(2.0)];
        let average = average_rating(&reviews);

        assert_eq!(average, Some(11.0 / 3.0));
        assert_eq!(format_average(average, LIST_PRECISION), "3.7");
        assert_eq!(format_average(average, DETAIL_PRECISION), "3.67");
    }

    #[test]
    fn single_review_is_its_own_average() {
        let average = average_rating(&[review(3.0)]);
        assert_eq!(format_average(average, DETAIL_PRECISION), "3.00");
    }
}
