//! # パスワード検証
//!
//! 保存済みハッシュと平文パスワードを照合する。
//!
//! `users.password` の既存データは bcrypt で保存されている。このサービスは
//! ハッシュを書き込まないが、ユーザーを管理する側が新規作成分を Argon2id で
//! 保存する場合に備えて両方を検証できるようにしてある。
//! [`SchemePasswordChecker`] がハッシュ先頭の識別子を見て検証器を選ぶ。

use acme_domain::password::{HashScheme, PasswordHash, PasswordVerifyResult, PlainPassword};
use argon2::{
    Argon2,
    Params,
    PasswordVerifier as _,
    password_hash::PasswordHash as Argon2PasswordHash,
};

use crate::InfraError;

/// パスワード検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - ハッシュの形式が不正な場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id によるパスワード検証
///
/// パラメータ（RFC 9106 推奨）:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordChecker {
    argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
    pub fn new() -> Self {
        // 定数パラメータは常に範囲内のため失敗しない
        let params = Params::new(65536, 1, 1, None).unwrap_or_default();

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordChecker for Argon2PasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}

/// bcrypt によるパスワード検証
#[derive(Debug, Default)]
pub struct BcryptPasswordChecker;

impl PasswordChecker for BcryptPasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let matched = bcrypt::verify(password.as_str(), hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        Ok(PasswordVerifyResult::from(matched))
    }
}

/// ハッシュ方式に応じて検証器を切り替える
#[derive(Default)]
pub struct SchemePasswordChecker {
    argon2: Argon2PasswordChecker,
    bcrypt: BcryptPasswordChecker,
}

impl SchemePasswordChecker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordChecker for SchemePasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        match hash.scheme() {
            HashScheme::Bcrypt => self.bcrypt.verify(password, hash),
            HashScheme::Argon2 => self.argon2.verify(password, hash),
            HashScheme::Unknown => Err(InfraError::unexpected("未対応のハッシュ形式")),
        }
    }
}
