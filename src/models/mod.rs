pub mod line_item;
pub mod transaction;
pub mod view;

pub use line_item::InventoryLineItem;
pub use transaction::{
    NewStockInDetail, NewStockInTransaction, NewStockOutDetail, NewStockOutTransaction,
    StockInDetail, StockInTransaction, TransactionWithDetails,
};
pub use view::{
    ClassifiedLineItem, DashboardSummary, DeliveryWindow, GroupedInventory, InvoiceGroup,
    InvoiceGroupView, InvoiceKey,
};
