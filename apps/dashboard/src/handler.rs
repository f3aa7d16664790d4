//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `invoice`: 請求書一覧（`GET /query`）
//! - `auth`: 資格情報の認可とサインインページへのリダイレクト

pub mod auth;
pub mod health;
pub mod invoice;

pub use auth::{AuthState, credentials_callback, sign_in};
pub use health::{ReadinessState, health_check, readiness_check};
pub use invoice::{InvoiceState, list_invoices};
