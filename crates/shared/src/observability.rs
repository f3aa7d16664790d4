//! # Observability 基盤
//!
//! トレーシング初期化、ログ出力形式の切り替え、リクエストスパンの生成を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `LOG_FORMAT` | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | ログレベルフィルタ（デフォルト: `info,acme=debug`） |

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する（subscriber 初期化前のため tracing は使えない）。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（呼び出し元の `app` スパンに載せる）
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// `tracing_error::ErrorLayer` も登録し、`InfraError` の SpanTrace を有効にする。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,acme=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

#[cfg(feature = "observability")]
pub use request_span::{MakeRequestUuidV7, REQUEST_ID_HEADER, make_request_span};

#[cfg(feature = "observability")]
mod request_span {
    use http::{HeaderValue, Request};
    use tower_http::request_id::{MakeRequestId, RequestId};

    /// リクエスト ID のヘッダー名
    pub const REQUEST_ID_HEADER: &str = "x-request-id";

    /// UUID v7 のリクエスト ID を生成する
    ///
    /// `SetRequestIdLayer` に渡す。クライアントが `x-request-id` を付けていれば
    /// そちらが優先される。
    #[derive(Debug, Clone, Copy, Default)]
    pub struct MakeRequestUuidV7;

    impl MakeRequestId for MakeRequestUuidV7 {
        fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
            let value = HeaderValue::from_str(&uuid::Uuid::now_v7().to_string()).ok()?;
            Some(RequestId::new(value))
        }
    }

    /// TraceLayer 用のリクエストスパンを生成する
    ///
    /// ボディやクエリ文字列は含めない（資格情報がスパンに載らないようにする）。
    pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            http.method = %request.method(),
            http.path = %request.uri().path(),
            request_id = %request_id,
        )
    }
}
