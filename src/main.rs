//! # 강의 리뷰 콘솔 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 + 스키마 생성
//! 4. 콘솔 명령 루프 실행
//! 5. 종료 시 연결 해제

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use course_reviews::{config::Config, console::Console, Database};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 있으면 그것을, 없으면 LOG_FILTER 설정값을 사용합니다.
    // 로그는 stderr로 보내서 stdout의 콘솔 화면과 섞이지 않게 합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // ── 3단계: 데이터베이스 연결 ──
    // 연결이나 스키마 생성에 실패하면 `?`로 시작을 중단합니다.
    let mut db = Database::new(&config.database_url);
    db.connect().await?;
    db.create_schema().await?;
    tracing::info!(url = %db.url(), "database ready");

    // ── 4단계: 콘솔 루프 ──
    // 루프가 에러로 끝나도 연결은 먼저 닫고 나서 에러를 반환합니다.
    let outcome = {
        let mut console = Console::new(&mut db, std::io::stdout());
        console.run(BufReader::new(tokio::io::stdin())).await
    };

    // ── 5단계: 정리 ──
    db.disconnect().await?;
    outcome?;

    tracing::info!("bye");
    Ok(())
}
