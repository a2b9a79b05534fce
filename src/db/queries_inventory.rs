use crate::models::InventoryLineItem;
use chrono::NaiveDate;
use sqlx::PgPool;

/// 查询未交货的库存明细 (分组汇总的输入)
/// 按明细ID排序, 保证分组首次出现顺序可复现
pub async fn list_undelivered_items(
    pool: &PgPool,
) -> Result<Vec<InventoryLineItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryLineItem>(
        r#"
        SELECT t.id as transaction_id,
               d.id as detail_id,
               t.supplier_invoice_number as invoice_number,
               p.id as product_id,
               p.product_code,
               p.name,
               p.barcode,
               c.name as category_name,
               b.name as brand_name,
               cu.name as customer_name,
               p.image as product_image,
               t.inward_stock_date,
               d.delivery_date,
               d.quantity,
               d.washing_quantity
        FROM store_productintransactiondetail d
        INNER JOIN store_productintransaction t ON t.id = d.transaction_id
        INNER JOIN store_product p ON p.id = d.product_id
        LEFT JOIN store_category c ON c.id = p.category_id
        LEFT JOIN store_brand b ON b.id = p.brand_id
        LEFT JOIN store_customer cu ON cu.id = t.customer_id
        WHERE t.is_delivered = false
        ORDER BY d.id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// 查询已超过交货日期的未交货明细 (exceeded_delivery 过滤)
pub async fn list_exceeded_delivery_items(
    pool: &PgPool,
    today: NaiveDate,
) -> Result<Vec<InventoryLineItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryLineItem>(
        r#"
        SELECT t.id as transaction_id,
               d.id as detail_id,
               t.supplier_invoice_number as invoice_number,
               p.id as product_id,
               p.product_code,
               p.name,
               p.barcode,
               c.name as category_name,
               b.name as brand_name,
               cu.name as customer_name,
               p.image as product_image,
               t.inward_stock_date,
               d.delivery_date,
               d.quantity,
               d.washing_quantity
        FROM store_productintransactiondetail d
        INNER JOIN store_productintransaction t ON t.id = d.transaction_id
        INNER JOIN store_product p ON p.id = d.product_id
        LEFT JOIN store_category c ON c.id = p.category_id
        LEFT JOIN store_brand b ON b.id = p.brand_id
        LEFT JOIN store_customer cu ON cu.id = t.customer_id
        WHERE t.is_delivered = false
          AND d.delivery_date < $1
        ORDER BY d.id
        "#,
    )
    .bind(today)
    .fetch_all(pool)
    .await
}
