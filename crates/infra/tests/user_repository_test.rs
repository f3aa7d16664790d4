//! UserRepository 統合テスト
//!
//! PostgreSQL を使用するため通常の `cargo test` では無視される。
//! sqlx::test マクロがテストごとに一時データベースを作成する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p acme-infra --test user_repository_test -- --ignored
//! ```

use acme_domain::user::Email;
use acme_infra::repository::{PostgresUserRepository, UserRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

const STORED_HASH: &str = "$2b$10$CwTycUXWue0Thq9StjUM0uJ8DPLKXt1FYlwYpQW2G3cAwjKoh2WZe";

async fn insert_user(pool: &PgPool, email: &str) -> Uuid {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, 'User', $2, $3)")
        .bind(id)
        .bind(email)
        .bind(STORED_HASH)
        .execute(pool)
        .await
        .expect("ユーザー作成に失敗");
    id
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_メールアドレスでユーザーを取得できる(pool: PgPool) {
    let id = insert_user(&pool, "user@nextmail.com").await;
    let sut = PostgresUserRepository::new(pool);

    let user = sut
        .find_by_email(&Email::new("user@nextmail.com").unwrap())
        .await
        .unwrap()
        .expect("ユーザーが見つかること");

    assert_eq!(user.id().as_uuid(), &id);
    assert_eq!(user.name(), "User");
    assert_eq!(user.password_hash().as_str(), STORED_HASH);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_存在しないメールアドレスはnoneを返す(pool: PgPool) {
    insert_user(&pool, "user@nextmail.com").await;
    let sut = PostgresUserRepository::new(pool);

    let result = sut
        .find_by_email(&Email::new("unknown@nextmail.com").unwrap())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_メールアドレスは大文字小文字を区別する(pool: PgPool) {
    insert_user(&pool, "user@nextmail.com").await;
    let sut = PostgresUserRepository::new(pool);

    let result = sut
        .find_by_email(&Email::new("User@NextMail.com").unwrap())
        .await
        .unwrap();

    assert!(result.is_none());
}
