use course_reviews::{
    actions::{auth, courses, reviews},
    error::AppError,
    models::{AddCourseRequest, LoginRequest, RegisterRequest, SearchRequest, SubmitReviewRequest},
    session::Session,
    Database,
};

async fn open_memory() -> Database {
    let mut db = Database::new("sqlite::memory:");
    db.connect().await.expect("connect to in-memory database");
    db.create_schema().await.expect("create schema");
    db
}

async fn logged_in(db: &mut Database, username: &str) -> Session {
    let mut session = Session::new();
    auth::register(
        db,
        &mut session,
        RegisterRequest {
            username: username.to_string(),
            password: "password1".to_string(),
        },
    )
    .await
    .expect("register");
    session
}

fn add_request(subject: &str, number: &str, title: &str) -> AddCourseRequest {
    AddCourseRequest {
        subject: subject.to_string(),
        number: number.to_string(),
        title: title.to_string(),
    }
}

fn submit_request(course_id: i64, rating: Option<i64>, comment: &str) -> SubmitReviewRequest {
    SubmitReviewRequest {
        course_id,
        rating,
        comment: comment.to_string(),
    }
}

#[tokio::test]
async fn register_logs_the_new_user_in() {
    let mut db = open_memory().await;
    let session = logged_in(&mut db, "alice").await;
    assert_eq!(session.require_user().unwrap().username, "alice");
}

#[tokio::test]
async fn register_validates_input() {
    let mut db = open_memory().await;
    let mut session = Session::new();

    let err = auth::register(
        &mut db,
        &mut session,
        RegisterRequest {
            username: " ".to_string(),
            password: "password1".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.user_message(), "Username and password fields cannot be empty.");

    let err = auth::register(
        &mut db,
        &mut session,
        RegisterRequest {
            username: "alice".to_string(),
            password: "short".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.user_message(), "Password must be at least 8 characters long.");
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn register_existing_username_is_conflict() {
    let mut db = open_memory().await;
    logged_in(&mut db, "alice").await;

    let mut session = Session::new();
    let err = auth::register(
        &mut db,
        &mut session,
        RegisterRequest {
            username: "alice".to_string(),
            password: "different1".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn login_and_logout() {
    let mut db = open_memory().await;
    logged_in(&mut db, "alice").await;
    let mut session = Session::new();

    let err = auth::login(
        &mut db,
        &mut session,
        LoginRequest {
            username: "alice".to_string(),
            password: "wrongpass".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Username and password combination is incorrect.");

    let err = auth::login(
        &mut db,
        &mut session,
        LoginRequest {
            username: "alice".to_string(),
            password: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.user_message(), "Both fields are required.");

    let user = auth::login(
        &mut db,
        &mut session,
        LoginRequest {
            username: "alice".to_string(),
            password: "password1".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(session.current_user(), Some(&user));

    auth::logout(&mut session);
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn course_actions_require_login() {
    let mut db = open_memory().await;
    let session = Session::new();

    let err = courses::list(&mut db, &session).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = reviews::my_reviews(&mut db, &session).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn add_course_normalizes_and_rejects_duplicates() {
    let mut db = open_memory().await;
    let session = logged_in(&mut db, "alice").await;

    courses::add(&mut db, &session, add_request(" cs ", "3140", " Software Development Essentials "))
        .await
        .unwrap();

    let listed = courses::list(&mut db, &session).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].course.to_string(), "CS 3140: Software Development Essentials");
    assert_eq!(listed[0].average_rating, None);

    let err = courses::add(&mut db, &session, add_request("CS", "3140", "Software Development Essentials"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = courses::add(&mut db, &session, add_request("CS", "31400", "Too Long Number"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn search_summaries_carry_average_rating() {
    let mut db = open_memory().await;
    let alice = logged_in(&mut db, "alice").await;
    let bob = logged_in(&mut db, "bob").await;

    courses::add(&mut db, &alice, add_request("CS", "3140", "Software Development Essentials"))
        .await
        .unwrap();
    courses::add(&mut db, &alice, add_request("CS", "2100", "Data Structures"))
        .await
        .unwrap();
    let course_id = courses::list(&mut db, &alice).await.unwrap()[0].course.course_id;

    reviews::submit(&mut db, &alice, submit_request(course_id, Some(5), "")).await.unwrap();
    reviews::submit(&mut db, &bob, submit_request(course_id, Some(2), "")).await.unwrap();

    let found = courses::search(
        &mut db,
        &alice,
        SearchRequest {
            subject: "cs".to_string(),
            ..SearchRequest::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].average_rating, Some(3.5));
    assert_eq!(found[1].average_rating, None);

    let none = courses::search(
        &mut db,
        &alice,
        SearchRequest {
            title: "quantum".to_string(),
            ..SearchRequest::default()
        },
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn submit_requires_a_rating_between_one_and_five() {
    let mut db = open_memory().await;
    let session = logged_in(&mut db, "alice").await;
    courses::add(&mut db, &session, add_request("CS", "3140", "Software Development Essentials"))
        .await
        .unwrap();
    let course_id = courses::list(&mut db, &session).await.unwrap()[0].course.course_id;

    for rating in [None, Some(0), Some(6)] {
        let err = reviews::submit(&mut db, &session, submit_request(course_id, rating, "x"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Please select a rating");
    }

    let err = reviews::submit(&mut db, &session, submit_request(course_id + 100, Some(3), ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn course_reviews_show_own_review_and_resubmit_replaces_it() {
    let mut db = open_memory().await;
    let alice = logged_in(&mut db, "alice").await;
    let bob = logged_in(&mut db, "bob").await;
    courses::add(&mut db, &alice, add_request("CS", "3140", "Software Development Essentials"))
        .await
        .unwrap();
    let course_id = courses::list(&mut db, &alice).await.unwrap()[0].course.course_id;

    reviews::submit(&mut db, &bob, submit_request(course_id, Some(3), "ok")).await.unwrap();

    let view = reviews::course_reviews(&mut db, &alice, course_id).await.unwrap();
    assert_eq!(view.reviews.len(), 1);
    assert!(view.own_review.is_none());

    reviews::submit(&mut db, &alice, submit_request(course_id, Some(4), "  good  ")).await.unwrap();
    reviews::submit(&mut db, &alice, submit_request(course_id, Some(2), "changed mind"))
        .await
        .unwrap();

    let view = reviews::course_reviews(&mut db, &alice, course_id).await.unwrap();
    assert_eq!(view.reviews.len(), 2);
    let own = view.own_review.expect("alice has a review");
    assert_eq!(own.rating, 2.0);
    assert_eq!(own.comment, "changed mind");
    assert_eq!(view.average_rating, Some(2.5));

    let err = reviews::course_reviews(&mut db, &alice, course_id + 100).await.unwrap_err();
    assert_eq!(err.user_message(), "Course not found.");
}

#[tokio::test]
async fn my_reviews_lists_reviewed_courses_and_delete_own_removes_them() {
    let mut db = open_memory().await;
    let session = logged_in(&mut db, "alice").await;
    courses::add(&mut db, &session, add_request("CS", "3140", "Software Development Essentials"))
        .await
        .unwrap();
    courses::add(&mut db, &session, add_request("STS", "4500", "Engineering Practice"))
        .await
        .unwrap();
    let listed = courses::list(&mut db, &session).await.unwrap();

    for summary in &listed {
        reviews::submit(&mut db, &session, submit_request(summary.course.course_id, Some(4), ""))
            .await
            .unwrap();
    }

    let mine = reviews::my_reviews(&mut db, &session).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].course.mnemonic, "CS");
    assert_eq!(mine[1].course.mnemonic, "STS");

    let first = listed[0].course.course_id;
    assert!(reviews::delete_own(&mut db, &session, first).await.unwrap());
    assert!(!reviews::delete_own(&mut db, &session, first).await.unwrap());

    let mine = reviews::my_reviews(&mut db, &session).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].course.mnemonic, "STS");
}
