//! # 콘솔 화면
//!
//! 한 줄에 명령 하나를 읽어서 `actions`를 호출하고 결과를 출력합니다.
//! 로그인 화면, 강의 검색 화면, 강의 리뷰 화면, 내 리뷰 화면의 동작이 모두 명령으로 제공됩니다.
//!
//! 명령은 한 번에 하나씩 끝까지 실행된 뒤 다음 줄을 읽습니다.
//! 사용자 입력 오류는 메시지만 보여주고 계속 진행하며,
//! 연결 수명주기 오류(`AppError::Connection`)만 루프를 끝냅니다.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    actions::{auth, courses, reviews},
    db::Database,
    error::AppError,
    models::{
        AddCourseRequest, CourseReviews, CourseSummary, LoginRequest, MyReview, RegisterRequest,
        SearchRequest, SubmitReviewRequest,
    },
    services::rating,
    session::Session,
};

pub const HELP: &str = "\
Commands:
  register <username> <password>
  login <username> <password>
  logout
  courses
  search <subject>|<number>|<title>      (leave a field empty to skip it)
  add-course <subject>|<number>|<title>
  reviews <course_id>
  review <course_id> <rating 1-5> [comment]
  delete-review <course_id>
  my-reviews
  help
  quit";

/// 파싱된 명령 한 줄
#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Quit,
    Register(RegisterRequest),
    Login(LoginRequest),
    Logout,
    Courses,
    Search(SearchRequest),
    AddCourse(AddCourseRequest),
    Reviews(i64),
    Review(SubmitReviewRequest),
    DeleteReview(i64),
    MyReviews,
}

impl Command {
    /// 한 줄을 명령으로 파싱합니다. 빈 줄이면 `Ok(None)`입니다.
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        // 첫 단어가 명령, 나머지가 인자
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        let command = match name {
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "register" => {
                let (username, password) = credentials(rest, "register <username> <password>")?;
                Command::Register(RegisterRequest { username, password })
            }
            "login" => {
                let (username, password) = credentials(rest, "login <username> <password>")?;
                Command::Login(LoginRequest { username, password })
            }
            "logout" => Command::Logout,
            "courses" => Command::Courses,
            "search" => {
                let [subject, number, title] = form_fields(rest);
                Command::Search(SearchRequest {
                    subject,
                    number,
                    title,
                })
            }
            "add-course" => {
                let [subject, number, title] = form_fields(rest);
                Command::AddCourse(AddCourseRequest {
                    subject,
                    number,
                    title,
                })
            }
            "reviews" => Command::Reviews(course_id(rest)?),
            "review" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let course_id = course_id(parts.next().unwrap_or(""))?;
                // 숫자가 아닌 평점은 "선택하지 않음"과 같게 취급합니다
                let rating = parts.next().and_then(|r| r.trim().parse().ok());
                let comment = parts.next().unwrap_or("").to_string();
                Command::Review(SubmitReviewRequest {
                    course_id,
                    rating,
                    comment,
                })
            }
            "delete-review" => Command::DeleteReview(course_id(rest)?),
            "my-reviews" => Command::MyReviews,
            other => {
                return Err(AppError::BadRequest(format!(
                    "Unknown command: {}. Type `help` for a list of commands.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn credentials(rest: &str, usage: &str) -> Result<(String, String), AppError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(password), None) => Ok((username.to_string(), password.to_string())),
        _ => Err(AppError::BadRequest(format!("Usage: {}", usage))),
    }
}

/// `a|b|c` 형식의 폼 입력을 세 칸으로 나눕니다. 없는 칸은 빈 문자열입니다.
fn form_fields(rest: &str) -> [String; 3] {
    let mut fields = rest.splitn(3, '|').map(|field| field.trim().to_string());
    [
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    ]
}

fn course_id(text: &str) -> Result<i64, AppError> {
    text.trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Course ID must be a number.".to_string()))
}

/// 명령 하나를 처리한 뒤 계속할지 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 콘솔 세션: DB 연결을 빌리고, 로그인 세션을 소유합니다.
pub struct Console<'a, W: Write> {
    db: &'a mut Database,
    session: Session,
    out: W,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(db: &'a mut Database, out: W) -> Self {
        Self {
            db,
            session: Session::new(),
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 출력 대상을 돌려받습니다 (테스트에서 출력 내용을 확인할 때 사용).
    pub fn into_output(self) -> W {
        self.out
    }

    /// 입력이 끝나거나 `quit`이 나올 때까지 명령을 처리합니다.
    pub async fn run<R>(&mut self, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "Course Reviews. Type `help` for a list of commands.")?;
        let mut lines = input.lines();

        self.prompt()?;
        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err @ AppError::Connection(_)) => return Err(err),
                Err(err) => self.report(&err)?,
            }
            self.prompt()?;
        }

        Ok(())
    }

    /// 한 줄을 파싱하고 실행합니다.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, AppError> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Flow::Continue);
        };

        match command {
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Register(req) => {
                let user = auth::register(self.db, &mut self.session, req).await?;
                writeln!(self.out, "Account created successfully! Logged in as {}.", user.username)?;
            }
            Command::Login(req) => {
                let user = auth::login(self.db, &mut self.session, req).await?;
                writeln!(self.out, "Welcome back, {}!", user.username)?;
            }
            Command::Logout => {
                auth::logout(&mut self.session);
                writeln!(self.out, "Logged out.")?;
            }
            Command::Courses => {
                let summaries = courses::list(self.db, &self.session).await?;
                self.print_courses(&summaries)?;
            }
            Command::Search(req) => {
                let summaries = courses::search(self.db, &self.session, req).await?;
                self.print_courses(&summaries)?;
            }
            Command::AddCourse(req) => {
                courses::add(self.db, &self.session, req).await?;
                writeln!(self.out, "Course added.")?;
            }
            Command::Reviews(course_id) => {
                let view = reviews::course_reviews(self.db, &self.session, course_id).await?;
                self.print_course_reviews(&view)?;
            }
            Command::Review(req) => {
                reviews::submit(self.db, &self.session, req).await?;
                writeln!(self.out, "Review saved.")?;
            }
            Command::DeleteReview(course_id) => {
                if reviews::delete_own(self.db, &self.session, course_id).await? {
                    writeln!(self.out, "Review deleted.")?;
                } else {
                    writeln!(self.out, "You have not reviewed this course.")?;
                }
            }
            Command::MyReviews => {
                let rows = reviews::my_reviews(self.db, &self.session).await?;
                self.print_my_reviews(&rows)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> Result<(), AppError> {
        match self.session.current_user() {
            Some(user) => write!(self.out, "{}> ", user.username)?,
            None => write!(self.out, "> ")?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, err: &AppError) -> Result<(), AppError> {
        // user_message()가 내부 에러를 로그로 남깁니다
        let message = err.user_message();
        if err.is_user_facing() {
            writeln!(self.out, "{}", message)?;
        } else {
            writeln!(self.out, "Error: {}", message)?;
        }
        Ok(())
    }

    fn print_courses(&mut self, summaries: &[CourseSummary]) -> Result<(), AppError> {
        if summaries.is_empty() {
            writeln!(self.out, "No courses found.")?;
            return Ok(());
        }

        for summary in summaries {
            writeln!(
                self.out,
                "[{}] {}  ({})",
                summary.course.course_id,
                summary.course,
                rating::format_average(summary.average_rating, rating::LIST_PRECISION)
            )?;
        }
        Ok(())
    }

    fn print_course_reviews(&mut self, view: &CourseReviews) -> Result<(), AppError> {
        writeln!(self.out, "{}", view.course)?;
        match view.average_rating {
            Some(average) => writeln!(
                self.out,
                "Average Rating: {}",
                rating::format_average(Some(average), rating::DETAIL_PRECISION)
            )?,
            None => writeln!(self.out, "No reviews yet")?,
        }

        for review in &view.reviews {
            writeln!(
                self.out,
                "- Rating: {:.1}  {}  {}",
                review.rating, review.timestamp, review.comment
            )?;
        }

        match &view.own_review {
            Some(own) => writeln!(
                self.out,
                "Your review: {:.1} {}  (use `review {} <rating> [comment]` to update)",
                own.rating, own.comment, view.course.course_id
            )?,
            None => writeln!(
                self.out,
                "You have not reviewed this course yet. Use `review {} <rating> [comment]`.",
                view.course.course_id
            )?,
        }
        Ok(())
    }

    fn print_my_reviews(&mut self, rows: &[MyReview]) -> Result<(), AppError> {
        writeln!(self.out, "You have reviewed {} courses", rows.len())?;
        for row in rows {
            writeln!(
                self.out,
                "- {}  Rating: {:.1}  {}",
                row.course, row.review.rating, row.review.timestamp
            )?;
        }
        Ok(())
    }
}
