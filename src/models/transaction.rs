use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 入库单主表 (store_productintransaction)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StockInTransaction {
    pub id: i64,
    pub supplier_invoice_number: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub inward_stock_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub is_delivered: bool,
    pub remarks: Option<String>,
}

/// 入库单明细表 (store_productintransactiondetail)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StockInDetail {
    pub detail_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i64,
    pub washing_quantity: Option<i64>,
    pub total: BigDecimal,
    pub delivery_date: Option<NaiveDate>,
}

/// 入库单及其全部明细, 出库表单加载的数据形状
#[derive(Debug, Clone, Serialize)]
pub struct TransactionWithDetails {
    pub supplier_invoice_number: String,
    pub customer_name: Option<String>,
    pub inward_stock_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub transaction_details: Vec<StockInDetail>,
}

/// 新建入库单请求体 (前端入库表单提交的 JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct NewStockInTransaction {
    pub supplier_invoice_number: String,
    pub customer: Option<i64>,
    pub inward_stock_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub transaction_details: Vec<NewStockInDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStockInDetail {
    pub product: i64,
    pub quantity: i64,
    pub washing_quantity: Option<i64>,
    pub total: BigDecimal,
    pub delivery_date: Option<NaiveDate>,
}

/// 新建出库单请求体 (store_productouttransaction)
#[derive(Debug, Clone, Deserialize)]
pub struct NewStockOutTransaction {
    pub transfer_invoice_number: String,
    pub branch: Option<i64>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub branch_in_charge: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    pub transaction_details: Vec<NewStockOutDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStockOutDetail {
    pub product: i64,
    pub qty_requested: i64,
}
