//! # リポジトリ
//!
//! データベースからの読み出しを担当する。どちらのリポジトリも書き込みは行わない。
//!
//! - [`UserRepository`] - メールアドレスによるユーザー検索
//! - [`InvoiceRepository`] - 請求書と顧客の結合クエリ

pub mod invoice_repository;
pub mod user_repository;

pub use invoice_repository::{InvoiceRepository, PostgresInvoiceRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
