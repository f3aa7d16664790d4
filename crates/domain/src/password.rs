//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | ログイン時の入力値（永続化しない） |
//! | [`PasswordHash`] | パスワードハッシュ | `users.password` に保存された値 |
//! | [`HashScheme`] | ハッシュ方式 | 保存済みハッシュのアルゴリズム判別 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |

/// 平文パスワード（ログイン時の入力値）
///
/// Debug 出力では値をマスクする。ログに平文が出ることはない。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 保存済みハッシュのアルゴリズム
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// `$2a$` / `$2b$` / `$2x$` / `$2y$` で始まる bcrypt ハッシュ
    Bcrypt,
    /// `$argon2id$` などで始まる PHC 形式の Argon2 ハッシュ
    Argon2,
    /// 判別できない形式
    Unknown,
}

/// パスワードハッシュ（永続化用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 先頭の識別子からハッシュ方式を判別する
    pub fn scheme(&self) -> HashScheme {
        const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

        if BCRYPT_PREFIXES.iter().any(|p| self.0.starts_with(p)) {
            HashScheme::Bcrypt
        } else if self.0.starts_with("$argon2") {
            HashScheme::Argon2
        } else {
            HashScheme::Unknown
        }
    }
}

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    /// パスワードが一致した
    Match,
    /// パスワードが一致しなかった
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}
