//! # UserRepository
//!
//! `users` テーブルからユーザーを読み出すリポジトリ。
//!
//! `SELECT *` で取得し、エンティティに必要な列（`id`, `name`, `email`, `password`）
//! のみをマッピングする。その他のプロフィール列は無視する。

use acme_domain::{
    password::PasswordHash,
    user::{Email, User, UserId},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;
}

/// `users` テーブルの行
#[derive(sqlx::FromRow)]
struct UserRow {
    id:       Uuid,
    name:     String,
    email:    String,
    password: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(
            UserId::from_uuid(row.id),
            row.name,
            Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            PasswordHash::new(row.password),
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }
}
