//! # ユーザー
//!
//! ログイン対象となるユーザーエンティティを定義する。
//!
//! ユーザーの作成・更新はこのシステムの外側で行われる。
//! ここでは `users` テーブルから読み出したレコードを表現するのみ。
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use acme_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId},
//! };
//!
//! let user = User::from_db(
//!     UserId::new(),
//!     "User".to_string(),
//!     Email::new("user@nextmail.com")?,
//!     PasswordHash::new("$2b$10$..."),
//! );
//! assert_eq!(user.email().as_str(), "user@nextmail.com");
//! # Ok(())
//! # }
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID（一意識別子）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時に形式を検証する。大文字・小文字は区別し、入力値をそのまま保持する
/// （保存済みの値との比較は完全一致）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # エラー
    ///
    /// `local@domain` 形式として不正な場合は `DomainError::Validation` を返す。
    /// ドメインは `label.tld` 形式で、TLD は 2 文字以上の英字であること。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if !value.validate_email() || !has_login_form_shape(&value) {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ログインフォームが受け付ける形かを判定する
///
/// - ローカル部: 英数字と `_'+-.`。先頭と末尾に `.` を置かず、`..` を含まない。
///   末尾に `'` を置かない
/// - ドメイン: 英数字で始まり英数字と `-` からなるラベルを `.` で 1 つ以上連ね、
///   2 文字以上の英字の TLD で終わる
fn has_login_form_shape(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "_'+-.".contains(c);

    !local.is_empty()
        && local.chars().all(allowed)
        && !local.starts_with('.')
        && !local.ends_with(['.', '\''])
        && !local.contains("..")
}

fn is_valid_domain(domain: &str) -> bool {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let valid_label = |label: &str| {
        label.starts_with(|c: char| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    labels.split('.').all(valid_label)
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// `password` は常にハッシュ値を保持する。平文が入ることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:       UserId,
    name:     String,
    email:    Email,
    password: PasswordHash,
}

impl User {
    /// データベースから読み出した値でユーザーを復元する
    pub fn from_db(id: UserId, name: String, email: Email, password: PasswordHash) -> Self {
        Self {
            id,
            name,
            email,
            password,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// 保存済みのパスワードハッシュ
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password
    }
}
