//! # ログイン資格情報
//!
//! ログインフォームから送られた未検証の入力を、検証済みの [`Credentials`] に変換する。
//!
//! ## 検証ルール
//!
//! - `email`: 文字列であり、メールアドレスとして正しい形式であること（[`Email::new`] で検証）
//! - `password`: 文字列であり、6 文字以上であること（UTF-16 コード単位で数える）
//!
//! それ以外のフィールドは無視する。検証はデータベースアクセスより前に行い、
//! 不正な入力がデータ層に届かないようにする。

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{DomainError, password::PlainPassword, user::Email};

/// パスワードの最小長（UTF-16 コード単位）
const MIN_PASSWORD_UTF16_LEN: usize = 6;

/// 未検証の入力（JSON からのデシリアライズ用）
#[derive(Deserialize, Validate)]
struct CredentialsInput {
    email:    String,
    #[validate(custom(function = "validate_password_length"))]
    password: String,
}

/// サロゲートペアは 2 単位として数える
fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.encode_utf16().count() < MIN_PASSWORD_UTF16_LEN {
        return Err(ValidationError::new("length"));
    }
    Ok(())
}

/// 検証済みのログイン資格情報
///
/// 1 回の認可処理の間だけ存在し、永続化もログ出力もしない。
#[derive(Debug, Clone)]
pub struct Credentials {
    email:    Email,
    password: PlainPassword,
}

impl Credentials {
    /// 型の緩い入力を検証し、資格情報に変換する
    ///
    /// # エラー
    ///
    /// 形が不正な場合は `DomainError::Validation` を返す。
    /// エラーメッセージに入力値は含めない。
    pub fn parse(input: &serde_json::Value) -> Result<Self, DomainError> {
        let malformed = || DomainError::Validation("資格情報の形式が不正です".to_string());

        // 配列は serde の struct デシリアライズで受理されてしまうため先に弾く
        if !input.is_object() {
            return Err(malformed());
        }
        let raw = CredentialsInput::deserialize(input).map_err(|_| malformed())?;

        raw.validate().map_err(|e| {
            let fields = e
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            DomainError::Validation(format!("資格情報の検証に失敗しました: {fields}"))
        })?;

        Ok(Self {
            email:    Email::new(raw.email)?,
            password: PlainPassword::new(raw.password),
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &PlainPassword {
        &self.password
    }
}
