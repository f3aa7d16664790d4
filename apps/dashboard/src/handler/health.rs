//! # ヘルスチェックハンドラ
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（データベースの接続状態を確認）

use std::{collections::HashMap, sync::Arc, time::Duration};

use acme_infra::db;
use acme_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;

/// 個別チェックのタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Dashboard のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: PgPool,
}

/// Dashboard の Readiness Check エンドポイント
///
/// データベースに `SELECT 1` を発行する。成功 → 200、失敗またはタイムアウト → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database(&state.pool).await);

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(CHECK_TIMEOUT, db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error.message = %e, "データベースの疎通確認に失敗しました");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("データベースの疎通確認がタイムアウトしました");
            CheckStatus::Error
        }
    }
}
