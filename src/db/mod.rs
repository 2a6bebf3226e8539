//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 저장소로 가는 유일한 관문인 `Database`를 정의합니다.
//! `actions` 계층은 이 구조체의 메서드만 호출하며, SQL을 직접 다루지 않습니다.
//!
//! ## 연결과 트랜잭션 모델
//! - 프로세스 전체에서 **단 하나의 연결**(`SqliteConnection`)을 사용합니다. 풀은 없습니다.
//! - 연결은 `connect`로 열고 `disconnect`로 닫습니다. 그 사이의 모든 작업이 이 연결을 공유합니다.
//! - 모든 쓰기 작업은 `txn::begin`/`txn::finish`로 감싸집니다.
//!   성공하면 커밋, 실패하면 롤백 후 에러를 그대로 전파합니다.
//! - 메서드가 `&mut self`를 받으므로 한 번에 하나의 작업만 연결을 사용할 수 있습니다.
//!
//! ## 소프트 네거티브
//! 중복 사용자, 중복 강의, 없는 리뷰 삭제는 에러가 아니라 `false`로 알려줍니다.
//! 호출자는 "정당하게 아무 일도 하지 않음"(`Ok(false)`)과 "실패"(`Err`)를 구분해야 합니다.
//!
//! 각 하위 모듈:
//! - `courses`: 강의 조회/추가 쿼리
//! - `reviews`: 리뷰 교체/삭제/조회 쿼리
//! - `schema`: 테이블 생성 DDL
//! - `search`: 강의 조건 검색 쿼리 빌더
//! - `txn`: 트랜잭션 커밋/롤백 헬퍼
//! - `users`: 사용자 계정 쿼리

pub mod courses;
pub mod reviews;
pub mod schema;
pub mod search;
pub mod txn;
pub mod users;

pub use search::{CourseQuery, SearchTerm};

use crate::error::{AppError, ConnectionError};
use crate::models::{Course, NewReview, Review, User};
use crate::services::password;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::str::FromStr;

/// 단일 SQLite 연결을 소유하는 영속성 계층
///
/// `new`는 URL만 기록하고, 실제 연결은 `connect`에서 엽니다.
pub struct Database {
    url: String,
    // Option: 연결 전/해제 후에는 None
    conn: Option<SqliteConnection>,
}

impl Database {
    /// 데이터베이스 URL로 Database를 만듭니다 (예: "sqlite:course_reviews.db").
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// 연결을 엽니다. 파일이 없으면 새로 만들고, 외래키 검사를 켭니다.
    ///
    /// # 에러
    /// - 이미 연결되어 있으면 `ConnectionError::AlreadyOpen`
    /// - URL이 잘못되었거나 파일을 열 수 없으면 `AppError::Database`
    pub async fn connect(&mut self) -> Result<(), AppError> {
        if self.conn.is_some() {
            return Err(ConnectionError::AlreadyOpen.into());
        }

        // SqliteConnectOptions: URL 문자열을 파싱해서 연결 옵션을 만듭니다.
        // - create_if_missing(true): DB 파일이 없으면 생성
        // - foreign_keys(true): PRAGMA foreign_keys = ON (CASCADE 삭제에 필요)
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&options).await?;

        tracing::info!(url = %self.url, "database connected");
        self.conn = Some(conn);
        Ok(())
    }

    /// 연결을 닫습니다.
    ///
    /// # 에러
    /// 연결되어 있지 않으면(두 번째 호출 포함) `ConnectionError::NotOpen`
    pub async fn disconnect(&mut self) -> Result<(), AppError> {
        // .take(): Option에서 값을 꺼내고 그 자리에 None을 남깁니다.
        let conn = self.conn.take().ok_or(ConnectionError::NotOpen)?;
        conn.close().await?;

        tracing::info!(url = %self.url, "database disconnected");
        Ok(())
    }

    /// 열린 연결을 빌려옵니다. 연결 전/해제 후라면 `ConnectionError::NotOpen`입니다.
    fn conn(&mut self) -> Result<&mut SqliteConnection, ConnectionError> {
        self.conn.as_mut().ok_or(ConnectionError::NotOpen)
    }

    /// Users, Courses, Reviews 테이블을 (없을 때만) 생성합니다.
    pub async fn create_schema(&mut self) -> Result<(), AppError> {
        let mut tx = txn::begin(self.conn()?).await?;
        // raw_sql: 여러 문장으로 된 SQL을 그대로 실행합니다 (바인딩 없음).
        let result = sqlx::raw_sql(schema::SQLITE_INIT)
            .execute(&mut *tx)
            .await
            .map(|_| ())
            .map_err(AppError::from);
        txn::finish(tx, result).await
    }

    /// 모든 행을 삭제합니다. 외래키를 고려해 자식 → 부모 순서(Reviews → Courses → Users)로 지웁니다.
    pub async fn clear_all(&mut self) -> Result<(), AppError> {
        let mut tx = txn::begin(self.conn()?).await?;
        let result = async {
            reviews::delete_all(&mut tx).await?;
            courses::delete_all(&mut tx).await?;
            users::delete_all(&mut tx).await
        }
        .await;
        txn::finish(tx, result).await
    }

    /// (사용자 이름, 비밀번호) 조합이 맞는지 확인합니다.
    ///
    /// 사용자가 없거나 비밀번호가 틀리면 `Ok(false)`입니다. 에러는 저장소 오류뿐입니다.
    /// 읽기 전용이므로 트랜잭션을 열지 않습니다.
    pub async fn validate_credentials(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        let user = users::find_by_username(self.conn()?, username).await?;

        // let Some(...) = ... else { return }: 패턴 매칭 + 조기 반환
        let Some(user) = user else {
            return Ok(false);
        };
        password::verify_password(password, &user.password_hash)
    }

    /// 새 계정을 만듭니다. 이미 있는 사용자 이름이면 `Ok(false)`를 반환합니다.
    pub async fn create_account(&mut self, username: &str, password: &str) -> Result<bool, AppError> {
        // 해싱은 트랜잭션을 열기 전에 합니다 (DB와 무관한 작업)
        let password_hash = password::hash_password(password)?;

        let mut tx = txn::begin(self.conn()?).await?;
        let result = users::insert_user(&mut tx, username, &password_hash).await;
        let created = txn::finish(tx, result).await?;

        if created {
            tracing::info!(username, "account created");
        } else {
            tracing::debug!(username, "account already exists");
        }
        Ok(created)
    }

    /// 사용자 이름으로 사용자를 조회합니다.
    pub async fn find_user(&mut self, username: &str) -> Result<Option<User>, AppError> {
        users::find_by_username(self.conn()?, username).await
    }

    /// 검색 폼의 세 칸으로 강의를 검색합니다. 빈 칸은 조건에서 빠집니다.
    ///
    /// 규칙은 `search` 모듈 문서를 참고하세요.
    pub async fn search_courses(
        &mut self,
        subject: &str,
        number: &str,
        title: &str,
    ) -> Result<Vec<Course>, AppError> {
        let query = CourseQuery::from_fields(subject, number, title)?;
        self.query_courses(&query).await
    }

    /// 이미 만들어진 `CourseQuery`로 강의를 검색합니다.
    pub async fn query_courses(&mut self, query: &CourseQuery) -> Result<Vec<Course>, AppError> {
        search::search_courses(self.conn()?, query).await
    }

    /// 강의를 추가합니다. 같은 (과목, 번호, 제목)이 이미 있으면 `Ok(false)`입니다.
    pub async fn add_course(
        &mut self,
        subject: &str,
        number: i64,
        title: &str,
    ) -> Result<bool, AppError> {
        let mut tx = txn::begin(self.conn()?).await?;
        let result = async {
            if courses::exists(&mut tx, subject, number, title).await? {
                return Ok(false);
            }
            let course_id = courses::insert_course(&mut tx, subject, number, title).await?;
            tracing::info!(course_id, subject, number, title, "course added");
            Ok::<bool, AppError>(true)
        }
        .await;
        txn::finish(tx, result).await
    }

    pub async fn list_courses(&mut self) -> Result<Vec<Course>, AppError> {
        courses::list_courses(self.conn()?).await
    }

    pub async fn get_course(&mut self, course_id: i64) -> Result<Option<Course>, AppError> {
        courses::get_course(self.conn()?, course_id).await
    }

    /// 리뷰들을 저장합니다. 같은 (강의, 작성자) 리뷰는 교체되고 새 `review_id`를 받습니다.
    ///
    /// 모든 리뷰는 같은 timestamp(현재 서버 로컬 시각)를 받으며,
    /// 전체가 하나의 트랜잭션입니다. 하나라도 실패하면 아무것도 저장되지 않습니다.
    pub async fn upsert_reviews(&mut self, new_reviews: &[NewReview]) -> Result<(), AppError> {
        let timestamp = reviews::current_timestamp();

        let mut tx = txn::begin(self.conn()?).await?;
        let result = async {
            for review in new_reviews {
                reviews::replace_review(&mut tx, review, &timestamp).await?;
            }
            Ok::<(), AppError>(())
        }
        .await;
        txn::finish(tx, result).await?;

        tracing::debug!(count = new_reviews.len(), %timestamp, "reviews upserted");
        Ok(())
    }

    /// (강의, 작성자) 리뷰를 삭제합니다.
    ///
    /// 리뷰가 없으면 아무것도 하지 않고 `Ok(false)`를 반환합니다 (에러가 아님).
    pub async fn delete_review(
        &mut self,
        course_id: i64,
        author_username: &str,
    ) -> Result<bool, AppError> {
        let mut tx = txn::begin(self.conn()?).await?;
        let result = reviews::delete_review(&mut tx, course_id, author_username).await;
        let deleted = txn::finish(tx, result).await?;

        tracing::debug!(course_id, author_username, deleted, "review delete");
        Ok(deleted)
    }

    pub async fn reviews_for_course(&mut self, course: &Course) -> Result<Vec<Review>, AppError> {
        reviews::list_for_course(self.conn()?, course.course_id).await
    }

    pub async fn reviews_for_user(&mut self, user: &User) -> Result<Vec<Review>, AppError> {
        reviews::list_for_user(self.conn()?, &user.username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> Database {
        let mut db = Database::new("sqlite::memory:");
        db.connect().await.unwrap();
        db.create_schema().await.unwrap();
        assert!(db.create_account("alice", "password1").await.unwrap());
        assert!(db.add_course("CS", 3140, "Software Development Essentials").await.unwrap());
        db
    }

    #[tokio::test]
    async fn foreign_keys_cascade_to_reviews() {
        let mut db = seeded().await;
        let course = db.list_courses().await.unwrap().remove(0);
        db.upsert_reviews(&[NewReview {
            course_id: course.course_id,
            author_username: "alice".to_string(),
            rating: 5.0,
            comment: String::new(),
        }])
        .await
        .unwrap();

        sqlx::query("DELETE FROM courses WHERE course_id = ?")
            .bind(course.course_id)
            .execute(db.conn().unwrap())
            .await
            .unwrap();

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(db.conn().unwrap())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_their_reviews() {
        let mut db = seeded().await;
        let course = db.list_courses().await.unwrap().remove(0);
        db.upsert_reviews(&[NewReview {
            course_id: course.course_id,
            author_username: "alice".to_string(),
            rating: 4.0,
            comment: "good".to_string(),
        }])
        .await
        .unwrap();

        sqlx::query("DELETE FROM users WHERE username = ?")
            .bind("alice")
            .execute(db.conn().unwrap())
            .await
            .unwrap();

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(db.conn().unwrap())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        // 강의는 그대로 남습니다
        assert_eq!(db.list_courses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn review_for_unknown_user_violates_foreign_key() {
        let mut db = seeded().await;
        let course = db.list_courses().await.unwrap().remove(0);

        let err = db
            .upsert_reviews(&[NewReview {
                course_id: course.course_id,
                author_username: "nobody".to_string(),
                rating: 3.0,
                comment: String::new(),
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(db.reviews_for_course(&course).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plaintext() {
        let mut db = seeded().await;
        let user = db.find_user("alice").await.unwrap().unwrap();

        assert_ne!(user.password_hash, "password1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn create_schema_is_idempotent() {
        let mut db = seeded().await;
        db.create_schema().await.unwrap();
        assert_eq!(db.list_courses().await.unwrap().len(), 1);
    }
}
