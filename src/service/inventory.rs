use bigdecimal::BigDecimal;
use chrono::Local;
use sqlx::PgPool;

use crate::db::queries_inventory;
use crate::models::{GroupedInventory, InvoiceGroupView};

/// 库存视图服务
/// 流程: 拉取当前明细 -> 按发票号分组汇总 -> 按交货日期分级
pub struct InventoryService {
    pool: PgPool,
    /// 汇总金额的固定单价 (来源配置 UNIT_RATE)
    unit_rate: BigDecimal,
}

impl InventoryService {
    pub fn new(pool: PgPool, unit_rate: i64) -> Self {
        Self {
            pool,
            unit_rate: BigDecimal::from(unit_rate),
        }
    }

    /// 刷新分组库存视图
    /// 派生数据每次整体重建, 不做增量修改; 当前日期在此边界读取一次,
    /// 分组与分级本身不访问时钟
    pub async fn grouped_inventory(
        &self,
        exceeded_only: bool,
    ) -> Result<Vec<InvoiceGroupView>, Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();

        let items = if exceeded_only {
            queries_inventory::list_exceeded_delivery_items(&self.pool, today).await?
        } else {
            queries_inventory::list_undelivered_items(&self.pool).await?
        };

        tracing::info!("库存刷新: 查询到 {} 条明细 (exceeded_only={})", items.len(), exceeded_only);

        let grouped = GroupedInventory::from_items(items, &self.unit_rate);
        tracing::info!(
            "分组完成: {} 张发票, {} 条明细",
            grouped.len(),
            grouped.item_count()
        );

        Ok(grouped.into_views(today))
    }
}
