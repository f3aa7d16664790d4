//! # Dashboard サーバー
//!
//! 請求書一覧と、ログインフォームの資格情報を認可するエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |----------|------|------|
//! | `GET` | `/query` | 金額 666 の請求書と顧客名の一覧 |
//! | `POST` | `/api/auth/callback/credentials` | 資格情報の認可 |
//! | `GET` | `/api/auth/signin` | サインインページへのリダイレクト |
//! | `GET` | `/health` | Liveness Check |
//! | `GET` | `/health/ready` | Readiness Check |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `POSTGRES_URL` | **Yes** | PostgreSQL 接続 URL（TLS 必須） |
//! | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `APP_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `AUTH_SIGN_IN_PAGE` | No | サインインページ（デフォルト: `/login`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! テーブルは外部で管理されているため、起動時にマイグレーションは実行しない。
//!
//! ## 起動方法
//!
//! ```bash
//! POSTGRES_URL=postgres://... cargo run -p acme-dashboard
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use acme_infra::{
    PasswordChecker,
    SchemePasswordChecker,
    db,
    repository::{
        InvoiceRepository,
        PostgresInvoiceRepository,
        PostgresUserRepository,
        UserRepository,
    },
};
use acme_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, TracingConfig, make_request_span},
};
use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use config::AppConfig;
use handler::{
    AuthState,
    InvoiceState,
    ReadinessState,
    credentials_callback,
    health_check,
    list_invoices,
    readiness_check,
    sign_in,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use usecase::{CredentialAuthorizerImpl, InvoiceUseCaseImpl};

/// Dashboard サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("dashboard");
    acme_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "dashboard").entered();

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Dashboard サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let invoice_repo: Arc<dyn InvoiceRepository> =
        Arc::new(PostgresInvoiceRepository::new(pool));
    let password_checker: Arc<dyn PasswordChecker> = Arc::new(SchemePasswordChecker::new());

    let auth_state = Arc::new(AuthState {
        authorizer: Arc::new(CredentialAuthorizerImpl::new(user_repo, password_checker)),
        pages:      config.auth_pages.clone(),
    });
    let invoice_state = Arc::new(InvoiceState {
        usecase: Arc::new(InvoiceUseCaseImpl::new(invoice_repo)),
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/query", get(list_invoices))
                .with_state(invoice_state),
        )
        .route("/api/auth/callback/credentials", post(credentials_callback))
        .route("/api/auth/signin", get(sign_in))
        .with_state(auth_state)
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Dashboard サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
