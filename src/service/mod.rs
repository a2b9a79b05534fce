pub mod inventory;
pub mod transaction;

pub use inventory::InventoryService;
pub use transaction::TransactionService;
