use crate::error::AppError;
use crate::model::order::{ActiveOrder, OrderRequest, OrderSide};

/// One open position leg as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangePosition {
    pub side: OrderSide,
    pub price: f64,
    pub size: f64,
}

/// Order and position operations the trading loop needs from an exchange.
///
/// The live implementation signs bitFlyer REST calls; tests substitute a
/// scripted double.
pub trait ExchangeApi {
    /// All open position legs for the traded product.
    async fn open_positions(&self) -> Result<Vec<ExchangePosition>, AppError>;

    /// The most recent `count` child orders, any state.
    async fn recent_orders(&self, count: u32) -> Result<Vec<ActiveOrder>, AppError>;

    /// Cancel every working order on the product.
    async fn cancel_all_orders(&self) -> Result<(), AppError>;

    /// Submit a new child order, returning the exchange acceptance id.
    async fn submit_order(&self, request: &OrderRequest) -> Result<String, AppError>;
}
