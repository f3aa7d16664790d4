//! # InvoiceRepository
//!
//! 請求書（`invoices`）と顧客（`customers`）を結合し、一覧用の射影を返す。

use acme_domain::invoice::InvoiceSummary;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::InfraError;

/// 請求書リポジトリトレイト
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// 指定した金額の請求書を顧客名付きで取得する
    ///
    /// 該当なしの場合は空の Vec を返す（エラーではない）。
    async fn find_by_amount(&self, amount: i32) -> Result<Vec<InvoiceSummary>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct InvoiceSummaryRow {
    amount: i32,
    name:   String,
}

/// PostgreSQL 実装の InvoiceRepository
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_by_amount(&self, amount: i32) -> Result<Vec<InvoiceSummary>, InfraError> {
        let rows = sqlx::query_as::<_, InvoiceSummaryRow>(
            r#"
            SELECT invoices.amount, customers.name
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE invoices.amount = $1
            "#,
        )
        .bind(amount)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| InvoiceSummary {
                amount: row.amount,
                name:   row.name,
            })
            .collect())
    }
}
