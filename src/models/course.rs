//! # 강의(Course) 모델 정의
//!
//! - `Course`: DB의 `courses` 테이블 한 행
//! - `SearchRequest`: 강의 검색 폼의 세 입력칸 (과목/번호/제목)
//! - `AddCourseRequest`: 강의 추가 폼의 세 입력칸
//! - `CourseSummary`: 강의 목록 화면 한 줄 (강의 + 평균 평점)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 강의 엔티티
///
/// 생성된 뒤에는 바뀌지 않으며, 애플리케이션이 삭제하지도 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    /// DB가 부여하는 정수 ID (AUTOINCREMENT)
    pub course_id: i64,
    /// 과목 코드 (2~4자의 영문 대문자, 예: "CS")
    pub mnemonic: String,
    /// 4자리 강의 번호 (예: 3140)
    pub number: i64,
    /// 강의 제목 (1~50자)
    pub title: String,
}

// Display: "CS 3140: Software Development Essentials" 형식으로 출력합니다.
// 강의 리뷰 화면과 내 리뷰 화면이 모두 이 라벨을 사용합니다.
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.mnemonic, self.number, self.title)
    }
}

/// 강의 검색 요청: 비어 있는 칸은 조건에서 제외됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub subject: String,
    pub number: String,
    pub title: String,
}

/// 강의 추가 요청: 세 칸 모두 필수입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCourseRequest {
    pub subject: String,
    pub number: String,
    pub title: String,
}

/// 강의 목록의 한 줄
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub course: Course,
    /// 리뷰가 없으면 None
    pub average_rating: Option<f64>,
}
