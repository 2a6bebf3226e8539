//! # 강의 액션
//!
//! 강의 검색 화면의 동작들입니다: 전체 목록, 조건 검색, 강의 추가.
//! 목록과 검색 결과에는 강의마다 평균 평점이 함께 붙습니다 (`CourseSummary`).

use crate::{
    db::Database,
    error::AppError,
    models::{AddCourseRequest, Course, CourseSummary, SearchRequest},
    services::rating,
    session::Session,
};

/// 제목 최대 길이 (글자 수)
pub const MAX_TITLE_LEN: usize = 50;

/// 모든 강의를 평균 평점과 함께 반환합니다.
pub async fn list(db: &mut Database, session: &Session) -> Result<Vec<CourseSummary>, AppError> {
    session.require_user()?;

    let courses = db.list_courses().await?;
    summarize(db, courses).await
}

/// 검색 폼 조건에 맞는 강의를 평균 평점과 함께 반환합니다.
///
/// 결과가 비어 있는 것은 에러가 아닙니다 (콘솔이 "No courses found."를 보여줍니다).
pub async fn search(
    db: &mut Database,
    session: &Session,
    req: SearchRequest,
) -> Result<Vec<CourseSummary>, AppError> {
    session.require_user()?;

    let courses = db
        .search_courses(&req.subject, &req.number, &req.title)
        .await?;
    summarize(db, courses).await
}

/// 새 강의를 추가합니다.
///
/// ## 검증 규칙
/// - 과목: 공백 제거 후 대문자로 바꿔서 2~4자의 영문자
/// - 번호: 정확히 4자리 숫자
/// - 제목: 공백 제거 후 1~50자
///
/// 같은 강의가 이미 있으면 `AppError::Conflict`를 반환합니다.
pub async fn add(
    db: &mut Database,
    session: &Session,
    req: AddCourseRequest,
) -> Result<(), AppError> {
    session.require_user()?;

    let subject = normalize_subject(&req.subject)?;
    let number = parse_course_number(&req.number)?;
    let title = validate_title(&req.title)?;

    if !db.add_course(&subject, number, title).await? {
        return Err(AppError::Conflict("Course already exists.".to_string()));
    }
    Ok(())
}

async fn summarize(
    db: &mut Database,
    courses: Vec<Course>,
) -> Result<Vec<CourseSummary>, AppError> {
    let mut summaries = Vec::with_capacity(courses.len());
    for course in courses {
        let reviews = db.reviews_for_course(&course).await?;
        summaries.push(CourseSummary {
            average_rating: rating::average_rating(&reviews),
            course,
        });
    }
    Ok(summaries)
}

fn normalize_subject(subject: &str) -> Result<String, AppError> {
    let subject = subject.trim().to_uppercase();
    let len = subject.chars().count();
    if !(2..=4).contains(&len) || !subject.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AppError::BadRequest("Subject must be 2-4 letters.".to_string()));
    }
    Ok(subject)
}

fn parse_course_number(number: &str) -> Result<i64, AppError> {
    let number = number.trim();
    if number.len() != 4 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Number must be exactly 4 digits.".to_string(),
        ));
    }
    number
        .parse()
        .map_err(|_| AppError::BadRequest("Number must be exactly 4 digits.".to_string()))
}

fn validate_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Title must be 1-{} characters.",
            MAX_TITLE_LEN
        )));
    }
    Ok(title)
}
