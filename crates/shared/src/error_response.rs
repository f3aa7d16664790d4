//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 認証エンドポイントなどで使う共通のエラーレスポンス構造体。
//!
//! 請求書一覧 API は既存クライアントとの互換のため `{ "error": string }` 形式を返し、
//! この型は使わない。

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://acme.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"authentication-failed"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 401 認証失敗
    ///
    /// 失敗理由（入力不正・ユーザー不存在・パスワード不一致）に関わらず同じ内容を返す。
    pub fn authentication_failed() -> Self {
        Self::new(
            "authentication-failed",
            "Authentication Failed",
            401,
            "メールアドレスまたはパスワードが正しくありません",
        )
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}
