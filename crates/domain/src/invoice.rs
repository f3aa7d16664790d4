//! # 請求書
//!
//! 請求書一覧 API が返す射影を定義する。
//!
//! 請求書と顧客は外部で管理されており、ここでは読み出し専用の行として扱う。

use serde::{Deserialize, Serialize};

/// 一覧の抽出条件となる請求金額
pub const LISTED_INVOICE_AMOUNT: i32 = 666;

/// 請求書一覧の 1 行
///
/// `invoices.amount` と、顧客テーブルから結合した `customers.name` を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub amount: i32,
    pub name:   String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_invoice_summaryのserializeでamountとnameだけを出力する() {
        let row = InvoiceSummary {
            amount: 666,
            name:   "Evil Rabbit".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json, serde_json::json!({ "amount": 666, "name": "Evil Rabbit" }));
    }
}
