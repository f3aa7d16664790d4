//! # Acme Dashboard ドメイン層
//!
//! ダッシュボードが扱うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: メールアドレスやパスワードハッシュを Newtype でラップし、
//!   生成時に検証する
//! - **インフラ非依存**: データベースや HTTP の詳細を持ち込まない
//!
//! ## モジュール構成
//!
//! - [`credentials`] - ログイン入力（メールアドレス + パスワード）の検証
//! - [`error`] - ドメイン層エラー定義
//! - [`invoice`] - 請求書一覧の射影
//! - [`password`] - パスワード関連の値オブジェクト
//! - [`user`] - ユーザーエンティティ

pub mod credentials;
pub mod error;
pub mod invoice;
pub mod password;
pub mod user;

pub use error::DomainError;
