//! # Acme Dashboard インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、パスワードハッシュの検証を担当する。
//!
//! ## 依存関係
//!
//! ```text
//! dashboard → infra → domain
//!     ↘               ↗
//!       ─────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール管理（TLS 必須）
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - bcrypt / Argon2id によるパスワード検証
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{
    Argon2PasswordChecker,
    BcryptPasswordChecker,
    PasswordChecker,
    SchemePasswordChecker,
};
