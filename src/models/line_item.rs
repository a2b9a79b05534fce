use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 库存明细行 (InventoryLineItem)
/// 入库单明细与商品/分类/品牌/客户上下文的联查结果, 分组汇总的输入
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct InventoryLineItem {
    pub transaction_id: i64,
    pub detail_id: i64,
    /// 供应商发票号, 即分组键 (可为空 - 空值自成一组)
    pub invoice_number: Option<String>,
    pub product_id: i64,
    pub product_code: String,
    pub name: String,
    pub barcode: Option<String>,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
    pub customer_name: Option<String>,
    pub product_image: Option<String>,
    pub inward_stock_date: Option<NaiveDate>,
    /// 交货日期, 解析失败/缺失时为 None
    pub delivery_date: Option<NaiveDate>,
    pub quantity: i64,
    pub washing_quantity: Option<i64>,
}
