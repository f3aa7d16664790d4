//! # 資格情報の認可ユースケース
//!
//! ログインフォームの入力を検証し、メールアドレスでユーザーを引き、
//! 保存済みハッシュとパスワードを照合する。
//!
//! ```text
//! Validating ──→ LookingUp ──→ Verifying ──→ Resolved
//!     │              │              │
//!     └──────────────┴──────────────┴──→ Rejected
//! ```
//!
//! 拒否の理由は呼び出し側に返さない。理由はデバッグログにタグとしてのみ残し、
//! メールアドレスやパスワードはログに出さない。
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! 「ユーザー不存在」と「パスワード不一致」の処理時間を揃える。

use std::sync::Arc;

use acme_domain::{
    credentials::Credentials,
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{Email, User},
};
use acme_infra::{InfraError, PasswordChecker, repository::UserRepository};

use crate::error::AuthorizeError;

/// ダミー検証用のハッシュ（有効な bcrypt 形式、コスト 10）
const DUMMY_PASSWORD_HASH: &str =
    "$2b$10$.....................................................";

/// ユーザー検索の結果
#[derive(Debug)]
pub enum UserLookup {
    Found(User),
    NotFound,
    Error(InfraError),
}

/// 拒否理由（ログ出力専用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RejectReason {
    InvalidInput,
    UnknownEmail,
    PasswordMismatch,
}

impl RejectReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::UnknownEmail => "unknown_email",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

/// 資格情報の認可ユースケースの実装
pub struct CredentialAuthorizerImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
}

impl CredentialAuthorizerImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_checker: Arc<dyn PasswordChecker>,
    ) -> Self {
        Self {
            user_repository,
            password_checker,
        }
    }

    /// 資格情報を認可する
    ///
    /// 入力の検証に失敗した場合はデータベースに問い合わせない。
    /// データ取得の失敗だけは拒否に畳み込まず、エラーとして返す。
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn authorize(
        &self,
        input: &serde_json::Value,
    ) -> Result<Option<User>, AuthorizeError> {
        let Ok(credentials) = Credentials::parse(input) else {
            return Ok(reject(RejectReason::InvalidInput));
        };

        let user = match self.fetch_user(credentials.email()).await {
            UserLookup::Found(user) => user,
            UserLookup::NotFound => {
                self.dummy_verification(credentials.password());
                return Ok(reject(RejectReason::UnknownEmail));
            }
            UserLookup::Error(e) => return Err(AuthorizeError::UserFetch(e)),
        };

        if self.verify(credentials.password(), &user).is_mismatch() {
            return Ok(reject(RejectReason::PasswordMismatch));
        }

        tracing::debug!(user_id = %user.id(), "資格情報を認可しました");
        Ok(Some(user))
    }

    /// メールアドレスでユーザーを検索する
    async fn fetch_user(&self, email: &Email) -> UserLookup {
        match self.user_repository.find_by_email(email).await {
            Ok(Some(user)) => UserLookup::Found(user),
            Ok(None) => UserLookup::NotFound,
            Err(e) => {
                tracing::error!(error.message = %e, "Failed to fetch user");
                UserLookup::Error(e)
            }
        }
    }

    /// パスワードを照合する
    ///
    /// 保存済みハッシュが解釈できない場合は不一致として扱う。
    fn verify(&self, password: &PlainPassword, user: &User) -> PasswordVerifyResult {
        match self.password_checker.verify(password, user.password_hash()) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id(),
                    error.message = %e,
                    "保存済みハッシュを検証できませんでした"
                );
                PasswordVerifyResult::Mismatch
            }
        }
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    fn dummy_verification(&self, password: &PlainPassword) {
        let dummy_hash = PasswordHash::new(DUMMY_PASSWORD_HASH);
        // 結果は使わない
        let _ = self.password_checker.verify(password, &dummy_hash);
    }
}

fn reject(reason: RejectReason) -> Option<User> {
    tracing::debug!(reason = reason.as_str(), "資格情報を拒否しました");
    None
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use acme_domain::user::UserId;
    use acme_infra::{BcryptPasswordChecker, SchemePasswordChecker, mock::MockUserRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    // テスト用スタブ

    /// `"hashed:" + 平文` を正しいハッシュとみなすチェッカー
    #[derive(Default)]
    struct StubPasswordChecker {
        calls:   AtomicUsize,
        failing: bool,
    }

    impl StubPasswordChecker {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PasswordChecker for StubPasswordChecker {
        fn verify(
            &self,
            password: &PlainPassword,
            hash: &PasswordHash,
        ) -> Result<PasswordVerifyResult, InfraError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(InfraError::unexpected("不正なハッシュ形式"));
            }
            let expected = format!("hashed:{}", password.as_str());
            Ok(PasswordVerifyResult::from(hash.as_str() == expected))
        }
    }

    fn stored_user() -> User {
        User::from_db(
            UserId::new(),
            "User".to_string(),
            Email::new("user@nextmail.com").unwrap(),
            PasswordHash::new("hashed:123456"),
        )
    }

    struct Fixture {
        repo:    MockUserRepository,
        checker: Arc<StubPasswordChecker>,
        sut:     CredentialAuthorizerImpl,
    }

    fn fixture_with(repo: MockUserRepository, checker: StubPasswordChecker) -> Fixture {
        let checker = Arc::new(checker);
        let sut = CredentialAuthorizerImpl::new(Arc::new(repo.clone()), checker.clone());
        Fixture { repo, checker, sut }
    }

    fn fixture(user: Option<User>) -> Fixture {
        let repo = MockUserRepository::new();
        if let Some(user) = user {
            repo.add_user(user);
        }
        fixture_with(repo, StubPasswordChecker::default())
    }

    #[tokio::test]
    async fn test_authorize_正しいパスワードで保存済みレコードをそのまま返す() {
        // Given
        let user = stored_user();
        let f = fixture(Some(user.clone()));

        // When
        let result = f
            .sut
            .authorize(&json!({ "email": "user@nextmail.com", "password": "123456" }))
            .await
            .unwrap();

        // Then
        assert_eq!(result, Some(user));
        assert_eq!(f.repo.call_count(), 1);
    }

    #[rstest]
    #[case::メール形式不正(json!({ "email": "not-an-email", "password": "123456" }))]
    #[case::パスワード5文字(json!({ "email": "user@nextmail.com", "password": "12345" }))]
    #[case::フィールド欠落(json!({}))]
    #[case::null(Value::Null)]
    #[tokio::test]
    async fn test_authorize_入力不正はデータベースに問い合わせず拒否(#[case] input: Value) {
        // Given
        let f = fixture(Some(stored_user()));

        // When
        let result = f.sut.authorize(&input).await.unwrap();

        // Then
        assert_eq!(result, None);
        assert_eq!(f.repo.call_count(), 0);
        assert_eq!(f.checker.call_count(), 0);
    }

    #[tokio::test]
    async fn test_authorize_存在しないメールアドレスは拒否() {
        let f = fixture(Some(stored_user()));

        let result = f
            .sut
            .authorize(&json!({ "email": "other@nextmail.com", "password": "123456" }))
            .await
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(f.repo.call_count(), 1);
    }

    #[tokio::test]
    async fn test_authorize_存在しないメールアドレスでもダミー検証を実行する() {
        let f = fixture(None);

        f.sut
            .authorize(&json!({ "email": "user@nextmail.com", "password": "123456" }))
            .await
            .unwrap();

        assert_eq!(f.checker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_authorize_パスワード不一致はユーザー不存在と同じ結果() {
        let f = fixture(Some(stored_user()));

        let wrong_password = f
            .sut
            .authorize(&json!({ "email": "user@nextmail.com", "password": "654321" }))
            .await
            .unwrap();
        let unknown_email = f
            .sut
            .authorize(&json!({ "email": "other@nextmail.com", "password": "123456" }))
            .await
            .unwrap();

        assert_eq!(wrong_password, None);
        assert_eq!(wrong_password, unknown_email);
    }

    #[tokio::test]
    async fn test_authorize_ハッシュ検証エラーは不一致として拒否() {
        let repo = MockUserRepository::new();
        repo.add_user(stored_user());
        let f = fixture_with(repo, StubPasswordChecker::failing());

        let result = f
            .sut
            .authorize(&json!({ "email": "user@nextmail.com", "password": "123456" }))
            .await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_authorize_データ取得の失敗はエラーとして伝播する() {
        let f = fixture_with(MockUserRepository::failing(), StubPasswordChecker::default());

        let result = f
            .sut
            .authorize(&json!({ "email": "user@nextmail.com", "password": "123456" }))
            .await;

        assert!(matches!(result, Err(AuthorizeError::UserFetch(_))));
        assert_eq!(f.checker.call_count(), 0);
    }

    #[test]
    fn test_ダミーハッシュはbcrypt形式() {
        let hash = PasswordHash::new(DUMMY_PASSWORD_HASH);

        assert_eq!(hash.scheme(), acme_domain::password::HashScheme::Bcrypt);
        assert_eq!(hash.as_str().len(), 60);
    }

    #[rstest]
    #[case::bcrypt直接(Arc::new(BcryptPasswordChecker) as Arc<dyn PasswordChecker>)]
    #[case::方式切り替え(Arc::new(SchemePasswordChecker::new()) as Arc<dyn PasswordChecker>)]
    fn test_ダミーハッシュは実際の検証器で不一致として最後まで検証される(
        #[case] checker: Arc<dyn PasswordChecker>,
    ) {
        // 形式エラーにならず、ハッシュ計算まで到達すること
        let result = checker.verify(
            &PlainPassword::new("123456"),
            &PasswordHash::new(DUMMY_PASSWORD_HASH),
        );

        assert!(matches!(result, Ok(PasswordVerifyResult::Mismatch)));
    }
}
