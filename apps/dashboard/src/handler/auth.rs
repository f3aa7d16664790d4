//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/auth/callback/credentials` - 資格情報の認可
//! - `GET /api/auth/signin` - サインインページへのリダイレクト
//!
//! ボディは `application/x-www-form-urlencoded`（サインインフォームの送信形式）か
//! JSON を受け付け、型の緩い値のまま検証をユースケースに任せる。
//! どちらとしても読めないボディは入力不正と同じ扱いにする。

use std::sync::Arc;

use acme_domain::user::User;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
    response::Redirect,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{config::AuthPages, error::LoginError, usecase::CredentialAuthorizer};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub authorizer: Arc<dyn CredentialAuthorizer>,
    pub pages:      AuthPages,
}

/// 認可済みユーザーのレスポンス
///
/// パスワードハッシュは含めない。
#[derive(Debug, Serialize)]
pub struct AuthorizedUserResponse {
    pub id:    Uuid,
    pub name:  String,
    pub email: String,
}

impl From<&User> for AuthorizedUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id:    *user.id().as_uuid(),
            name:  user.name().to_string(),
            email: user.email().as_str().to_string(),
        }
    }
}

/// POST /api/auth/callback/credentials
///
/// 入力不正・ユーザー不存在・パスワード不一致はいずれも同じ 401 を返す。
#[tracing::instrument(skip_all)]
pub async fn credentials_callback(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AuthorizedUserResponse>, LoginError> {
    let input = if is_form_encoded(&headers) {
        form_to_value(&body)
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    match state.authorizer.authorize(&input).await? {
        Some(user) => Ok(Json(AuthorizedUserResponse::from(&user))),
        None => Err(LoginError::Rejected),
    }
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// フォームの各フィールドを文字列値のオブジェクトにする
///
/// 同名のフィールドが複数ある場合は最初の値を使う。
fn form_to_value(body: &[u8]) -> Value {
    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        fields
            .entry(key.into_owned())
            .or_insert_with(|| Value::String(value.into_owned()));
    }
    Value::Object(fields)
}

/// GET /api/auth/signin
///
/// 設定されたサインインページへ 303 でリダイレクトする。
pub async fn sign_in(State(state): State<Arc<AuthState>>) -> Redirect {
    Redirect::to(&state.pages.sign_in)
}
