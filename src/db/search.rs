//! # 강의 조건 검색 모듈
//!
//! 강의 검색 화면의 세 입력칸(과목, 번호, 제목) 중 **채워진 칸만** 조건으로 사용하는
//! 동적 검색을 구현합니다.
//!
//! ## 검색 규칙
//! - 과목(Subject): 대소문자 무시, **정확히 일치** (`cs` == `CS`)
//! - 번호(Number): 정수로 파싱한 뒤 **정확히 일치**
//! - 제목(Title): 대소문자 무시, **부분 문자열** 일치
//! - 조건들은 AND로 결합되며, 조건이 하나도 없으면 모든 강의를 반환합니다.
//!
//! ## 쿼리 구성 방식
//! 문자열을 이어 붙여 SQL을 만드는 대신, 조건 종류를 `SearchTerm` 열거형으로 표현하고
//! `sqlx::QueryBuilder`로 렌더링합니다. 사용자 입력은 항상 `push_bind`로만 들어가므로
//! SQL 문자열 자체에는 `?` 자리표시자만 남습니다 (SQL 인젝션 방지).

use crate::error::AppError;
use crate::models::Course;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// 검색 조건 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// 과목 코드: 대소문자 무시 정확 일치
    Subject(String),
    /// 강의 번호: 정확 일치
    Number(i64),
    /// 제목: 대소문자 무시 부분 일치
    Title(String),
}

/// AND로 결합된 검색 조건 목록
///
/// 비어 있으면 "모든 강의"를 의미합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    terms: Vec<SearchTerm>,
}

impl CourseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 조건을 하나 추가한 새 쿼리를 반환합니다 (빌더 패턴).
    pub fn with(mut self, term: SearchTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// 검색 폼의 세 입력칸에서 쿼리를 만듭니다.
    ///
    /// 각 칸은 앞뒤 공백을 제거한 뒤, 비어 있으면 조건에서 제외됩니다.
    ///
    /// # 에러
    /// 번호 칸이 채워져 있는데 정수가 아니면 `AppError::BadRequest`를 반환합니다.
    pub fn from_fields(subject: &str, number: &str, title: &str) -> Result<Self, AppError> {
        let mut query = Self::new();

        let subject = subject.trim();
        if !subject.is_empty() {
            query = query.with(SearchTerm::Subject(subject.to_string()));
        }

        let number = number.trim();
        if !number.is_empty() {
            // .parse::<i64>(): 문자열 → 정수 변환. 실패하면 Err를 반환합니다.
            let parsed = number
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("Number must be a whole number.".to_string()))?;
            query = query.with(SearchTerm::Number(parsed));
        }

        let title = title.trim();
        if !title.is_empty() {
            query = query.with(SearchTerm::Title(title.to_string()));
        }

        Ok(query)
    }

    pub fn terms(&self) -> &[SearchTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 조건들을 바인딩 파라미터가 포함된 SELECT 쿼리로 렌더링합니다.
    ///
    /// ```sql
    /// SELECT course_id, mnemonic, number, title FROM courses WHERE 1=1
    ///   AND LOWER(mnemonic) = LOWER(?)        -- Subject
    ///   AND number = ?                        -- Number
    ///   AND LOWER(title) LIKE LOWER(?) ESCAPE '\'   -- Title
    /// ORDER BY course_id
    /// ```
    ///
    /// `WHERE 1=1`은 항상 참인 조건으로, 뒤에 붙는 조건들을 모두 `AND ...` 형태로
    /// 똑같이 이어 붙일 수 있게 해줍니다.
    pub fn to_builder(&self) -> QueryBuilder<'_, Sqlite> {
        let mut builder = QueryBuilder::new(
            "SELECT course_id, mnemonic, number, title FROM courses WHERE 1=1",
        );

        for term in &self.terms {
            match term {
                SearchTerm::Subject(subject) => {
                    builder.push(" AND LOWER(mnemonic) = LOWER(");
                    builder.push_bind(subject.as_str());
                    builder.push(")");
                }
                SearchTerm::Number(number) => {
                    builder.push(" AND number = ");
                    builder.push_bind(*number);
                }
                SearchTerm::Title(title) => {
                    builder.push(" AND LOWER(title) LIKE LOWER(");
                    builder.push_bind(like_pattern(title));
                    builder.push(") ESCAPE '\\'");
                }
            }
        }

        builder.push(" ORDER BY course_id");
        builder
    }
}

/// 부분 일치용 LIKE 패턴을 만듭니다: `%입력%`
///
/// 입력에 들어 있는 `%`, `_`, `\`는 와일드카드가 아니라 글자 그대로 찾도록 이스케이프합니다.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 쿼리 조건에 맞는 강의를 추가된 순서대로 조회합니다.
pub async fn search_courses(
    conn: &mut SqliteConnection,
    query: &CourseQuery,
) -> Result<Vec<Course>, AppError> {
    let mut builder = query.to_builder();
    let courses = builder.build_query_as::<Course>().fetch_all(conn).await?;

    tracing::debug!(terms = query.terms().len(), found = courses.len(), "course search");
    Ok(courses)
}
