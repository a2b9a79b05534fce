use sqlx::PgPool;

use crate::db::queries;
use crate::models::{
    DashboardSummary, NewStockInTransaction, NewStockOutTransaction, TransactionWithDetails,
};

/// 出入库单服务
pub struct TransactionService {
    pool: PgPool,
}

impl TransactionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 新建入库单 (主表 + 明细 + 总库存累加)
    pub async fn create_stock_in(
        &self,
        req: &NewStockInTransaction,
    ) -> Result<i64, Box<dyn std::error::Error>> {
        tracing::info!(
            "新建入库单 {}: {} 条明细",
            req.supplier_invoice_number,
            req.transaction_details.len()
        );
        let transaction_id = queries::insert_stock_in(&self.pool, req).await?;
        Ok(transaction_id)
    }

    /// 按发票号查询入库单及其明细, 不存在或已交货时返回 None
    pub async fn transaction_by_invoice(
        &self,
        supplier_invoice_number: &str,
    ) -> Result<Option<TransactionWithDetails>, Box<dyn std::error::Error>> {
        let transaction =
            queries::get_pending_transaction(&self.pool, supplier_invoice_number).await?;
        let Some(transaction) = transaction else {
            tracing::warn!("入库单 {} 不存在或已交货", supplier_invoice_number);
            return Ok(None);
        };

        let details = queries::list_transaction_details(&self.pool, transaction.id).await?;
        Ok(Some(TransactionWithDetails {
            supplier_invoice_number: transaction.supplier_invoice_number,
            customer_name: transaction.customer_name,
            inward_stock_date: transaction.inward_stock_date,
            delivery_date: transaction.delivery_date,
            remarks: transaction.remarks,
            transaction_details: details,
        }))
    }

    /// 全部未交货的发票号
    pub async fn pending_invoice_numbers(
        &self,
    ) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(queries::list_pending_invoice_numbers(&self.pool).await?)
    }

    /// 标记已交货; 返回是否命中入库单
    /// 写入后由调用方重新拉取视图, 派生数据随之重建
    pub async fn mark_delivered(
        &self,
        supplier_invoice_number: &str,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let affected = queries::mark_delivered(&self.pool, supplier_invoice_number).await?;
        if affected > 0 {
            tracing::info!("入库单 {} 已标记交货", supplier_invoice_number);
        }
        Ok(affected > 0)
    }

    /// 新建出库单
    pub async fn create_stock_out(
        &self,
        req: &NewStockOutTransaction,
    ) -> Result<i64, Box<dyn std::error::Error>> {
        let total_requested: i64 = req
            .transaction_details
            .iter()
            .map(|d| d.qty_requested)
            .sum();
        let transaction_id = queries::insert_stock_out(&self.pool, req).await?;
        tracing::info!(
            "出库单 {} 写入完成, 请求数量合计 {}",
            req.transfer_invoice_number,
            total_requested
        );
        Ok(transaction_id)
    }

    /// 按商品编码查询总库存
    pub async fn total_stock(
        &self,
        product_code: &str,
    ) -> Result<Option<i64>, Box<dyn std::error::Error>> {
        Ok(queries::get_total_stock(&self.pool, product_code).await?)
    }

    /// 管理后台汇总: 三类单量并发统计 + 已交货营收
    pub async fn dashboard_summary(
        &self,
    ) -> Result<DashboardSummary, Box<dyn std::error::Error>> {
        let (total_orders, pending_orders, completed_orders, total_revenue) = futures::try_join!(
            queries::count_transactions(&self.pool, None),
            queries::count_transactions(&self.pool, Some(false)),
            queries::count_transactions(&self.pool, Some(true)),
            queries::delivered_revenue(&self.pool),
        )?;

        Ok(DashboardSummary {
            total_orders,
            pending_orders,
            completed_orders,
            total_revenue,
        })
    }
}
