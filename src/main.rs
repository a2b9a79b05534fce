use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use store_inventory_rust::{api, create_pool, AppConfig, InventoryService, TransactionService};
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database pool created");

    // 创建库存视图与出入库单服务
    let inventory_service = Arc::new(InventoryService::new(
        pool.clone(),
        config.inventory.unit_rate,
    ));
    let transaction_service = Arc::new(TransactionService::new(pool));

    // 构建路由
    // 库存视图路由
    let inventory_routes = Router::new()
        .route("/store/inventory", get(api::get_inventory))
        .with_state(inventory_service);

    // 出入库单路由
    let transaction_routes = Router::new()
        .route("/store/dashboard", get(api::dashboard))
        .route("/store/transactions", get(api::list_pending_invoices))
        .route(
            "/store/transactions/:supplier_invoice_number",
            get(api::get_transaction),
        )
        .route(
            "/store/product-in-transactions",
            post(api::create_stock_in),
        )
        .route(
            "/store/product-in-transactions/update-delivery/:supplier_invoice_number",
            patch(api::update_delivery),
        )
        .route(
            "/store/product-out-transactions",
            post(api::create_stock_out),
        )
        .route(
            "/store/products/:product_code/total_stock",
            get(api::get_total_stock),
        )
        .with_state(transaction_service);

    // 合并路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(inventory_routes)
        .merge(transaction_routes)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET   /store/dashboard                  - Admin summary");
    info!("  GET   /store/inventory                  - Grouped inventory view");
    info!("  GET   /store/transactions               - Pending invoice numbers");
    info!("  GET   /store/transactions/:invoice      - Transaction with details");
    info!("  POST  /store/product-in-transactions    - Create stock-in transaction");
    info!("  PATCH /store/product-in-transactions/update-delivery/:invoice");
    info!("  POST  /store/product-out-transactions   - Create stock-out transaction");
    info!("  GET   /store/products/:code/total_stock - Total stock lookup");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
