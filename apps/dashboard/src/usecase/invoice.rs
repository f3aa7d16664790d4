//! # 請求書一覧ユースケース

use std::sync::Arc;

use acme_domain::invoice::{InvoiceSummary, LISTED_INVOICE_AMOUNT};
use acme_infra::repository::InvoiceRepository;

use crate::error::InvoiceError;

/// 請求書一覧ユースケースの実装
pub struct InvoiceUseCaseImpl {
    invoice_repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceUseCaseImpl {
    pub fn new(invoice_repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoice_repository }
    }

    /// 金額が [`LISTED_INVOICE_AMOUNT`] の請求書を顧客名付きで取得する
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
        let invoices = self
            .invoice_repository
            .find_by_amount(LISTED_INVOICE_AMOUNT)
            .await?;
        Ok(invoices)
    }
}
