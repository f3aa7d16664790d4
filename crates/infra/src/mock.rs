//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! acme-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは呼び出し回数を記録する。入力検証で弾かれたリクエストが
//! データベースに到達していないことの確認に使う。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use acme_domain::{
    invoice::InvoiceSummary,
    user::{Email, User},
};
use async_trait::async_trait;

use crate::{
    error::InfraError,
    repository::{InvoiceRepository, UserRepository},
};

/// データベース障害を模擬するエラー
fn connection_failure() -> InfraError {
    InfraError::from(sqlx::Error::PoolTimedOut)
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:   Arc<Mutex<Vec<User>>>,
    calls:   Arc<AtomicUsize>,
    failing: bool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常にデータベースエラーを返すモック
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    /// `find_by_email` の呼び出し回数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(connection_failure());
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }
}

// ===== MockInvoiceRepository =====

#[derive(Clone, Default)]
pub struct MockInvoiceRepository {
    invoices: Arc<Mutex<Vec<InvoiceSummary>>>,
    calls:    Arc<AtomicUsize>,
    failing:  bool,
}

impl MockInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常にデータベースエラーを返すモック
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_invoice(&self, invoice: InvoiceSummary) {
        self.invoices.lock().unwrap().push(invoice);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InvoiceRepository for MockInvoiceRepository {
    async fn find_by_amount(&self, amount: i32) -> Result<Vec<InvoiceSummary>, InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(connection_failure());
        }

        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.amount == amount)
            .cloned()
            .collect())
    }
}
