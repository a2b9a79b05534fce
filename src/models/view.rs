use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::InventoryLineItem;

/// 分组键: 供应商发票号 (None 即缺失发票号, 自成一组)
pub type InvoiceKey = Option<String>;

/// 发票分组 - 同一发票号下的明细行及累计汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceGroup {
    pub invoice_number: InvoiceKey,
    /// 明细行, 保持输入顺序
    pub items: Vec<InventoryLineItem>,
    pub total_quantity: i64,
    pub total_amount: BigDecimal,
}

impl InvoiceGroup {
    pub fn new(invoice_number: InvoiceKey) -> Self {
        Self {
            invoice_number,
            items: Vec::new(),
            total_quantity: 0,
            total_amount: BigDecimal::zero(),
        }
    }
}

/// 分组库存 - 按发票号首次出现顺序保序的分组映射
/// 每次刷新由明细列表整体重建, 不做增量修改, 不持久化
#[derive(Debug, Clone)]
pub struct GroupedInventory {
    groups: IndexMap<InvoiceKey, InvoiceGroup>,
}

impl GroupedInventory {
    /// 从明细列表构建分组, 单次左到右遍历
    /// 每行累加数量与金额 (金额 = 数量 * unit_rate), 重复行不去重
    pub fn from_items(items: Vec<InventoryLineItem>, unit_rate: &BigDecimal) -> Self {
        let mut groups: IndexMap<InvoiceKey, InvoiceGroup> = IndexMap::new();

        for item in items {
            let group = groups
                .entry(item.invoice_number.clone())
                .or_insert_with(|| InvoiceGroup::new(item.invoice_number.clone()));

            group.total_quantity += item.quantity;
            group.total_amount += BigDecimal::from(item.quantity) * unit_rate;
            group.items.push(item);
        }

        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 全部分组的明细行总数
    pub fn item_count(&self) -> usize {
        self.groups.values().map(|g| g.items.len()).sum()
    }

    pub fn get(&self, key: &InvoiceKey) -> Option<&InvoiceGroup> {
        self.groups.get(key)
    }

    /// 按首次出现顺序迭代分组
    pub fn groups(&self) -> impl Iterator<Item = &InvoiceGroup> {
        self.groups.values()
    }

    /// 按首次出现顺序取出分组列表
    pub fn into_groups(self) -> Vec<InvoiceGroup> {
        self.groups.into_values().collect()
    }

    /// 投影为渲染视图: 每行明细附加相对 now 的交货窗口标记
    /// 标记在投影时计算, 不缓存
    pub fn into_views(self, now: NaiveDate) -> Vec<InvoiceGroupView> {
        self.groups
            .into_values()
            .map(|group| InvoiceGroupView {
                invoice_number: group.invoice_number,
                total_quantity: group.total_quantity,
                total_amount: group.total_amount,
                items: group
                    .items
                    .into_iter()
                    .map(|item| ClassifiedLineItem {
                        delivery_window: DeliveryWindow::classify(item.delivery_date, now),
                        item,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 交货窗口 - 按距交货日期的剩余天数分级, 前端据此选择行样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryWindow {
    /// 交货日期已过
    Overdue,
    /// 今明两天内到期
    Urgent,
    Normal,
    /// 交货日期缺失或无法解析
    Invalid,
}

impl DeliveryWindow {
    /// 相对显式传入的 now 分级 (剩余天数 <0 逾期, <2 紧急, 其余正常)
    pub fn classify(delivery_date: Option<NaiveDate>, now: NaiveDate) -> Self {
        let Some(date) = delivery_date else {
            return DeliveryWindow::Invalid;
        };

        let days_remaining = date.signed_duration_since(now).num_days();
        if days_remaining < 0 {
            DeliveryWindow::Overdue
        } else if days_remaining < 2 {
            DeliveryWindow::Urgent
        } else {
            DeliveryWindow::Normal
        }
    }
}

/// 发票分组渲染视图
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceGroupView {
    pub invoice_number: InvoiceKey,
    pub total_quantity: i64,
    pub total_amount: BigDecimal,
    pub items: Vec<ClassifiedLineItem>,
}

/// 附带交货窗口标记的明细行
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedLineItem {
    #[serde(flatten)]
    pub item: InventoryLineItem,
    pub delivery_window: DeliveryWindow,
}

/// 管理后台汇总
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// 创建测试用的库存明细行
    fn make_item(detail_id: i64, invoice: Option<&str>, quantity: i64) -> InventoryLineItem {
        InventoryLineItem {
            transaction_id: 100 + detail_id,
            detail_id,
            invoice_number: invoice.map(|s| s.to_string()),
            product_id: 1,
            product_code: format!("P{:04}", detail_id),
            name: "Bed Sheet".to_string(),
            barcode: Some("4006381333931".to_string()),
            category_name: Some("Linen".to_string()),
            brand_name: None,
            customer_name: Some("Al Waab Branch".to_string()),
            product_image: None,
            inward_stock_date: Some(d("2024-01-02")),
            delivery_date: Some(d("2024-01-20")),
            quantity,
            washing_quantity: Some(quantity),
        }
    }

    fn rate(n: i64) -> BigDecimal {
        BigDecimal::from(n)
    }

    // ==========================================
    // 分组汇总
    // ==========================================

    #[test]
    fn groups_preserve_first_seen_order_and_totals() {
        let items = vec![
            make_item(1, Some("A"), 3),
            make_item(2, Some("B"), 5),
            make_item(3, Some("A"), 2),
        ];

        let groups = GroupedInventory::from_items(items, &rate(10)).into_groups();

        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].invoice_number.as_deref(), Some("A"));
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].total_quantity, 5);
        assert_eq!(groups[0].total_amount, BigDecimal::from(50));
        // 组内保持输入顺序
        assert_eq!(groups[0].items[0].detail_id, 1);
        assert_eq!(groups[0].items[1].detail_id, 3);

        assert_eq!(groups[1].invoice_number.as_deref(), Some("B"));
        assert_eq!(groups[1].items.len(), 1);
        assert_eq!(groups[1].total_quantity, 5);
        assert_eq!(groups[1].total_amount, BigDecimal::from(50));
    }

    #[test]
    fn every_item_lands_in_exactly_one_group() {
        let items = vec![
            make_item(1, Some("A"), 1),
            make_item(2, Some("B"), 2),
            make_item(3, None, 3),
            make_item(4, Some("A"), 4),
            make_item(5, Some("C"), 5),
        ];
        let input_len = items.len();

        let grouped = GroupedInventory::from_items(items, &rate(10));

        assert_eq!(grouped.item_count(), input_len);
        for group in grouped.groups() {
            for item in &group.items {
                assert_eq!(item.invoice_number, group.invoice_number);
            }
        }
    }

    #[test]
    fn totals_match_item_sums() {
        let items = vec![
            make_item(1, Some("A"), 7),
            make_item(2, Some("A"), 0),
            make_item(3, Some("A"), 11),
            make_item(4, Some("B"), 4),
        ];

        let grouped = GroupedInventory::from_items(items, &rate(10));

        for group in grouped.groups() {
            let qty_sum: i64 = group.items.iter().map(|i| i.quantity).sum();
            assert_eq!(group.total_quantity, qty_sum);
            assert_eq!(
                group.total_amount,
                BigDecimal::from(group.total_quantity) * rate(10)
            );
        }
    }

    #[test]
    fn unit_rate_is_applied_per_unit() {
        let items = vec![make_item(1, Some("A"), 3)];
        let grouped = GroupedInventory::from_items(items, &rate(25));

        let group = grouped.get(&Some("A".to_string())).unwrap();
        assert_eq!(group.total_amount, BigDecimal::from(75));
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        let grouped = GroupedInventory::from_items(Vec::new(), &rate(10));
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
        assert!(grouped.into_groups().is_empty());
    }

    #[test]
    fn missing_and_empty_invoice_numbers_form_distinct_groups() {
        let items = vec![
            make_item(1, None, 1),
            make_item(2, Some(""), 2),
            make_item(3, None, 3),
        ];

        let grouped = GroupedInventory::from_items(items, &rate(10));

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get(&None).unwrap().total_quantity, 4);
        assert_eq!(
            grouped.get(&Some(String::new())).unwrap().total_quantity,
            2
        );
    }

    #[test]
    fn duplicate_rows_are_all_counted() {
        // 同一明细出现两次也不去重
        let item = make_item(1, Some("A"), 3);
        let items = vec![item.clone(), item];

        let grouped = GroupedInventory::from_items(items, &rate(10));

        let group = grouped.get(&Some("A".to_string())).unwrap();
        assert_eq!(group.items.len(), 2);
        assert_eq!(group.total_quantity, 6);
        assert_eq!(group.total_amount, BigDecimal::from(60));
    }

    #[test]
    fn regrouping_same_input_is_structurally_equal() {
        let items = vec![
            make_item(1, Some("A"), 3),
            make_item(2, Some("B"), 5),
            make_item(3, Some("A"), 2),
            make_item(4, None, 1),
        ];

        let first = GroupedInventory::from_items(items.clone(), &rate(10)).into_groups();
        let second = GroupedInventory::from_items(items, &rate(10)).into_groups();

        assert_eq!(first, second);
    }

    // ==========================================
    // 交货窗口分级
    // ==========================================

    #[test]
    fn classify_boundaries() {
        let now = d("2024-01-10");

        assert_eq!(
            DeliveryWindow::classify(Some(d("2024-01-09")), now),
            DeliveryWindow::Overdue
        );
        assert_eq!(
            DeliveryWindow::classify(Some(d("2024-01-10")), now),
            DeliveryWindow::Urgent
        );
        assert_eq!(
            DeliveryWindow::classify(Some(d("2024-01-11")), now),
            DeliveryWindow::Urgent
        );
        assert_eq!(
            DeliveryWindow::classify(Some(d("2024-01-12")), now),
            DeliveryWindow::Normal
        );
    }

    #[test]
    fn classify_far_dates() {
        let now = d("2024-01-10");

        assert_eq!(
            DeliveryWindow::classify(Some(d("2023-11-01")), now),
            DeliveryWindow::Overdue
        );
        assert_eq!(
            DeliveryWindow::classify(Some(d("2024-06-01")), now),
            DeliveryWindow::Normal
        );
    }

    #[test]
    fn classify_missing_date_is_invalid() {
        assert_eq!(
            DeliveryWindow::classify(None, d("2024-01-10")),
            DeliveryWindow::Invalid
        );
    }

    #[test]
    fn views_tag_each_row_against_now() {
        let now = d("2024-01-10");
        let mut overdue = make_item(1, Some("A"), 1);
        overdue.delivery_date = Some(d("2024-01-05"));
        let mut due_today = make_item(2, Some("A"), 2);
        due_today.delivery_date = Some(d("2024-01-10"));
        let mut unknown = make_item(3, Some("B"), 3);
        unknown.delivery_date = None;

        let views = GroupedInventory::from_items(vec![overdue, due_today, unknown], &rate(10))
            .into_views(now);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].items[0].delivery_window, DeliveryWindow::Overdue);
        assert_eq!(views[0].items[1].delivery_window, DeliveryWindow::Urgent);
        assert_eq!(views[1].items[0].delivery_window, DeliveryWindow::Invalid);
        // 汇总不受分级影响
        assert_eq!(views[0].total_quantity, 3);
        assert_eq!(views[0].total_amount, BigDecimal::from(30));
    }
}
