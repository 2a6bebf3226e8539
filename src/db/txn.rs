//! # 트랜잭션 범위(scope) 헬퍼
//!
//! 모든 쓰기 작업은 같은 모양을 가집니다:
//!
//! ```text
//! begin → 쿼리 실행 → Ok면 commit / Err면 rollback 후 원래 에러 반환
//! ```
//!
//! 이 모양을 메서드마다 반복하지 않도록 `begin`과 `finish` 두 함수로 묶었습니다.
//! `finish`를 호출하지 않고 `Transaction`이 drop되어도 sqlx가 롤백하므로,
//! 중간에 `?`로 빠져나가는 경로에서도 커밋되지 않은 변경은 남지 않습니다.

use crate::error::AppError;
use sqlx::{Connection, Sqlite, SqliteConnection, Transaction};

/// 단일 연결 위에서 트랜잭션을 시작합니다.
///
/// 반환된 `Transaction`은 연결을 가변으로 빌리고 있으므로(`&mut`),
/// 트랜잭션이 끝날 때까지 다른 작업이 같은 연결을 쓸 수 없습니다.
/// 중첩 트랜잭션이나 세이브포인트는 사용하지 않습니다.
pub async fn begin(conn: &mut SqliteConnection) -> Result<Transaction<'_, Sqlite>, AppError> {
    Ok(conn.begin().await?)
}

/// 작업 결과에 따라 트랜잭션을 커밋하거나 롤백합니다.
///
/// - `Ok(value)`: 커밋하고 값을 반환합니다. 커밋 자체가 실패하면 그 에러를 반환합니다.
/// - `Err(err)`: 롤백한 뒤 **원래 에러**를 반환합니다.
///   롤백 실패는 경고 로그만 남깁니다 (원래 에러가 더 중요하기 때문).
pub async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
