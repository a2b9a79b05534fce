use crate::models::{NewStockInTransaction, NewStockOutTransaction, StockInDetail, StockInTransaction};
use bigdecimal::BigDecimal;
use sqlx::PgPool;

/// 按发票号查询未交货的入库单主表
pub async fn get_pending_transaction(
    pool: &PgPool,
    supplier_invoice_number: &str,
) -> Result<Option<StockInTransaction>, sqlx::Error> {
    sqlx::query_as::<_, StockInTransaction>(
        r#"
        SELECT t.id,
               t.supplier_invoice_number,
               t.customer_id,
               cu.name as customer_name,
               t.inward_stock_date,
               t.delivery_date,
               t.is_delivered,
               t.remarks
        FROM store_productintransaction t
        LEFT JOIN store_customer cu ON cu.id = t.customer_id
        WHERE t.supplier_invoice_number = $1
          AND t.is_delivered = false
        "#,
    )
    .bind(supplier_invoice_number)
    .fetch_optional(pool)
    .await
}

/// 查询入库单明细列表
pub async fn list_transaction_details(
    pool: &PgPool,
    transaction_id: i64,
) -> Result<Vec<StockInDetail>, sqlx::Error> {
    sqlx::query_as::<_, StockInDetail>(
        r#"
        SELECT d.id as detail_id,
               d.product_id,
               p.name as product_name,
               p.image as product_image,
               d.quantity,
               d.washing_quantity,
               d.total,
               d.delivery_date
        FROM store_productintransactiondetail d
        INNER JOIN store_product p ON p.id = d.product_id
        WHERE d.transaction_id = $1
        ORDER BY d.id
        "#,
    )
    .bind(transaction_id)
    .fetch_all(pool)
    .await
}

/// 查询全部未交货的发票号
pub async fn list_pending_invoice_numbers(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT supplier_invoice_number
        FROM store_productintransaction
        WHERE is_delivered = false
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// 写入入库单: 主表 + 明细批量插入 + 总库存累加, 单个数据库事务内完成
pub async fn insert_stock_in(
    pool: &PgPool,
    req: &NewStockInTransaction,
) -> Result<i64, sqlx::Error> {
    let start_time = std::time::Instant::now();
    let mut tx = pool.begin().await?;

    let transaction_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO store_productintransaction
            (supplier_invoice_number, customer_id, inward_stock_date, delivery_date, is_delivered, remarks)
        VALUES ($1, $2, $3, $4, false, $5)
        RETURNING id
        "#,
    )
    .bind(&req.supplier_invoice_number)
    .bind(req.customer)
    .bind(req.inward_stock_date)
    .bind(req.delivery_date)
    .bind(&req.remarks)
    .fetch_one(&mut *tx)
    .await?;

    // 明细分块批量插入 (每1000条)
    for chunk in req.transaction_details.chunks(1000) {
        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO store_productintransactiondetail (
                transaction_id, product_id, quantity, washing_quantity, total, delivery_date
            ) ",
        );

        query_builder.push_values(chunk, |mut b, detail| {
            b.push_bind(transaction_id)
                .push_bind(detail.product)
                .push_bind(detail.quantity)
                .push_bind(detail.washing_quantity)
                .push_bind(detail.total.clone())
                .push_bind(detail.delivery_date);
        });

        query_builder.build().execute(&mut *tx).await?;
    }

    // 总库存累加
    for detail in &req.transaction_details {
        sqlx::query(
            r#"
            INSERT INTO store_totalstock (product_id, total_quantity)
            VALUES ($1, $2)
            ON CONFLICT (product_id)
            DO UPDATE SET total_quantity = store_totalstock.total_quantity + EXCLUDED.total_quantity
            "#,
        )
        .bind(detail.product)
        .bind(detail.quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        "入库单 {} 写入完成, {} 条明细, 耗时: {:?}",
        transaction_id,
        req.transaction_details.len(),
        start_time.elapsed()
    );
    Ok(transaction_id)
}

/// 按发票号标记入库单已交货, 返回影响行数
pub async fn mark_delivered(
    pool: &PgPool,
    supplier_invoice_number: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE store_productintransaction
        SET is_delivered = true
        WHERE supplier_invoice_number = $1
        "#,
    )
    .bind(supplier_invoice_number)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// 写入出库单: 主表 + 明细批量插入
pub async fn insert_stock_out(
    pool: &PgPool,
    req: &NewStockOutTransaction,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let transaction_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO store_productouttransaction
            (transfer_invoice_number, branch_id, date, branch_in_charge, remarks)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&req.transfer_invoice_number)
    .bind(req.branch)
    .bind(req.date)
    .bind(&req.branch_in_charge)
    .bind(&req.remarks)
    .fetch_one(&mut *tx)
    .await?;

    for chunk in req.transaction_details.chunks(1000) {
        let mut query_builder = sqlx::QueryBuilder::new(
            "INSERT INTO store_productouttransactiondetail (transaction_id, product_id, qty_requested) ",
        );

        query_builder.push_values(chunk, |mut b, detail| {
            b.push_bind(transaction_id)
                .push_bind(detail.product)
                .push_bind(detail.qty_requested);
        });

        query_builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(transaction_id)
}

/// 按商品编码查询总库存
pub async fn get_total_stock(
    pool: &PgPool,
    product_code: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT ts.total_quantity
        FROM store_totalstock ts
        INNER JOIN store_product p ON p.id = ts.product_id
        WHERE p.product_code = $1
        "#,
    )
    .bind(product_code)
    .fetch_optional(pool)
    .await
}

/// 统计入库单数量 (delivered 为 None 时统计全部)
pub async fn count_transactions(
    pool: &PgPool,
    delivered: Option<bool>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT count(*)
        FROM store_productintransaction
        WHERE ($1::boolean IS NULL OR is_delivered = $1)
        "#,
    )
    .bind(delivered)
    .fetch_one(pool)
    .await
}

/// 已交货明细的总营收
pub async fn delivered_revenue(pool: &PgPool) -> Result<BigDecimal, sqlx::Error> {
    sqlx::query_scalar::<_, BigDecimal>(
        r#"
        SELECT coalesce(sum(d.total), 0)
        FROM store_productintransactiondetail d
        INNER JOIN store_productintransaction t ON t.id = d.transaction_id
        WHERE t.is_delivered = true
        "#,
    )
    .fetch_one(pool)
    .await
}
