//! # ユースケース層
//!
//! Dashboard のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラはトレイト越しにユースケースを呼ぶ
//! - **依存性注入**: リポジトリとパスワードチェッカーは `main` で組み立てて注入する

pub mod auth;
pub mod invoice;

use acme_domain::{invoice::InvoiceSummary, user::User};
use async_trait::async_trait;
pub use auth::CredentialAuthorizerImpl;
pub use invoice::InvoiceUseCaseImpl;

use crate::error::{AuthorizeError, InvoiceError};

/// 資格情報の認可
#[async_trait]
pub trait CredentialAuthorizer: Send + Sync {
    /// 型の緩い入力を検証し、一致するユーザーを返す
    ///
    /// ## 戻り値
    ///
    /// - `Ok(Some(user))`: 認証成功。保存済みのレコードをそのまま返す
    /// - `Ok(None)`: 入力不正・ユーザー不存在・パスワード不一致（区別しない）
    /// - `Err(AuthorizeError)`: データ取得の失敗
    async fn authorize(&self, input: &serde_json::Value) -> Result<Option<User>, AuthorizeError>;
}

/// 請求書一覧ユースケース
#[async_trait]
pub trait InvoiceUseCase: Send + Sync {
    /// 固定条件で請求書一覧を取得する
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, InvoiceError>;
}

#[async_trait]
impl CredentialAuthorizer for CredentialAuthorizerImpl {
    async fn authorize(&self, input: &serde_json::Value) -> Result<Option<User>, AuthorizeError> {
        self.authorize(input).await
    }
}

#[async_trait]
impl InvoiceUseCase for InvoiceUseCaseImpl {
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
        self.list_invoices().await
    }
}
