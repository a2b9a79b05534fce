use crate::models::{InvoiceGroupView, NewStockInTransaction, NewStockOutTransaction};
use crate::service::{InventoryService, TransactionService};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 库存列表查询参数
#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub exceeded_delivery: bool,
}

/// 库存列表响应体
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub success: bool,
    pub message: String,
    pub groups: Option<Vec<InvoiceGroupView>>,
}

/// 写入类接口响应体
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: Option<i64>,
}

/// 原后端风格的错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceNumbersResponse {
    pub supplier_invoice_numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TotalStockResponse {
    pub total_stock: i64,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 分组库存列表 (exceeded_delivery=true 时只看超期明细)
pub async fn get_inventory(
    State(service): State<Arc<InventoryService>>,
    Query(query): Query<InventoryQuery>,
) -> Response {
    match service.grouped_inventory(query.exceeded_delivery).await {
        Ok(groups) => {
            let response = InventoryResponse {
                success: true,
                message: format!("{} invoice groups", groups.len()),
                groups: Some(groups),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = InventoryResponse {
                success: false,
                message: format!("Error: {}", e),
                groups: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 管理后台汇总
pub async fn dashboard(State(service): State<Arc<TransactionService>>) -> Response {
    match service.dashboard_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 全部未交货的发票号
pub async fn list_pending_invoices(State(service): State<Arc<TransactionService>>) -> Response {
    match service.pending_invoice_numbers().await {
        Ok(numbers) => {
            let response = InvoiceNumbersResponse {
                supplier_invoice_numbers: numbers,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 按发票号查询入库单及明细
pub async fn get_transaction(
    State(service): State<Arc<TransactionService>>,
    Path(supplier_invoice_number): Path<String>,
) -> Response {
    match service.transaction_by_invoice(&supplier_invoice_number).await {
        Ok(Some(transaction)) => (StatusCode::OK, Json(transaction)).into_response(),
        Ok(None) => {
            let response = ErrorResponse {
                error: "Transaction not found or already delivered".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 新建入库单
pub async fn create_stock_in(
    State(service): State<Arc<TransactionService>>,
    Json(req): Json<NewStockInTransaction>,
) -> Response {
    match service.create_stock_in(&req).await {
        Ok(transaction_id) => {
            let response = CreateTransactionResponse {
                success: true,
                message: format!(
                    "Transaction {} saved with {} details",
                    req.supplier_invoice_number,
                    req.transaction_details.len()
                ),
                transaction_id: Some(transaction_id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = CreateTransactionResponse {
                success: false,
                message: format!("Error: {}", e),
                transaction_id: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 按发票号标记已交货
pub async fn update_delivery(
    State(service): State<Arc<TransactionService>>,
    Path(supplier_invoice_number): Path<String>,
) -> Response {
    match service.mark_delivered(&supplier_invoice_number).await {
        Ok(true) => {
            let response = MessageResponse {
                message: "Delivery status updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(false) => {
            let response = ErrorResponse {
                error: "Transaction not found".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 新建出库单
pub async fn create_stock_out(
    State(service): State<Arc<TransactionService>>,
    Json(req): Json<NewStockOutTransaction>,
) -> Response {
    match service.create_stock_out(&req).await {
        Ok(transaction_id) => {
            let response = CreateTransactionResponse {
                success: true,
                message: format!(
                    "Out transaction {} saved with {} details",
                    req.transfer_invoice_number,
                    req.transaction_details.len()
                ),
                transaction_id: Some(transaction_id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = CreateTransactionResponse {
                success: false,
                message: format!("Error: {}", e),
                transaction_id: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 按商品编码查询总库存
pub async fn get_total_stock(
    State(service): State<Arc<TransactionService>>,
    Path(product_code): Path<String>,
) -> Response {
    match service.total_stock(&product_code).await {
        Ok(Some(total_stock)) => {
            (StatusCode::OK, Json(TotalStockResponse { total_stock })).into_response()
        }
        Ok(None) => {
            let response = ErrorResponse {
                error: "Product not found or stock not available".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(response)).into_response()
        }
        Err(e) => {
            let response = ErrorResponse {
                error: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
