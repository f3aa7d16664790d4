//! # Dashboard エラー定義
//!
//! ユースケースが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! - [`InvoiceError`] → 500 `{ "error": string }`（既存クライアント互換の形式）
//! - [`AuthorizeError`] → 500 Problem Details
//! - [`LoginError`] → 401 / 500 Problem Details

use acme_infra::InfraError;
use acme_shared::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 請求書一覧の取得失敗
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// メッセージはデータベースエラーのものをそのまま保持する
    #[error("{0}")]
    Database(#[from] InfraError),
}

/// `{ "error": string }` 形式のレスポンスボディ
#[derive(Debug, Serialize)]
struct InvoiceErrorBody {
    error: String,
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        match &self {
            InvoiceError::Database(e) => {
                tracing::error!(
                    error.kind = "database",
                    error.message = %e,
                    "請求書の取得に失敗しました"
                );
            }
        }

        let body = InvoiceErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// 資格情報の認可中に発生したエラー
///
/// 入力不正・ユーザー不存在・パスワード不一致はエラーではなく `Ok(None)` で表す。
/// ここに来るのはデータ取得の失敗だけ。
#[derive(Debug, Error)]
pub enum AuthorizeError {
    #[error("Failed to fetch user.")]
    UserFetch(#[source] InfraError),
}

/// ログインエンドポイントのエラー
#[derive(Debug, Error)]
pub enum LoginError {
    /// 入力不正・ユーザー不存在・パスワード不一致
    #[error("認証に失敗しました")]
    Rejected,

    #[error(transparent)]
    Authorize(#[from] AuthorizeError),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::Rejected => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::authentication_failed()),
            )
                .into_response(),
            LoginError::Authorize(e) => {
                tracing::error!(
                    error.kind = "authorize",
                    error.message = %e,
                    "資格情報の認可に失敗しました"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal_error()),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invoice_errorはメッセージをerrorフィールドで返す() {
        let source = sqlx::Error::PoolTimedOut;
        let expected = source.to_string();

        let response = InvoiceError::from(InfraError::from(source)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!({ "error": expected }));
    }

    #[tokio::test]
    async fn test_rejectedは401の認証失敗レスポンス() {
        let response = LoginError::Rejected.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(
            json["type"],
            "https://acme.example.com/errors/authentication-failed"
        );
    }

    #[tokio::test]
    async fn test_authorizeエラーは内部情報を含まない500() {
        let err = AuthorizeError::UserFetch(InfraError::from(sqlx::Error::PoolTimedOut));

        let response = LoginError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::to_value(ErrorResponse::internal_error()).unwrap());
    }
}
