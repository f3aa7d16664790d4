//! # 請求書一覧ハンドラ
//!
//! `GET /query` - 金額 666 の請求書を顧客名付きで返す。
//!
//! 失敗時は 500 と `{ "error": string }` を返す（[`InvoiceError`] を参照）。

use std::sync::Arc;

use acme_domain::invoice::InvoiceSummary;
use axum::{Json, extract::State};

use crate::{error::InvoiceError, usecase::InvoiceUseCase};

/// 請求書一覧ハンドラの共有状態
pub struct InvoiceState {
    pub usecase: Arc<dyn InvoiceUseCase>,
}

/// GET /query
#[tracing::instrument(skip_all)]
pub async fn list_invoices(
    State(state): State<Arc<InvoiceState>>,
) -> Result<Json<Vec<InvoiceSummary>>, InvoiceError> {
    let invoices = state.usecase.list_invoices().await?;
    Ok(Json(invoices))
}
