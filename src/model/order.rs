use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_bitflyer_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }

    pub fn opposite(&self) -> OrderSide {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }

    pub fn from_bitflyer_str(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(OrderSide::Buy),
            "SELL" => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_bitflyer_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_bitflyer_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    GoodTilCanceled,
    ImmediateOrCancel,
}

impl TimeInForce {
    pub fn as_bitflyer_str(&self) -> &'static str {
        match self {
            TimeInForce::GoodTilCanceled => "GTC",
            TimeInForce::ImmediateOrCancel => "IOC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Active,
    Completed,
    Canceled,
    Expired,
    Rejected,
}

impl OrderState {
    pub fn from_bitflyer_str(s: &str) -> Self {
        match s {
            "ACTIVE" => OrderState::Active,
            "COMPLETED" => OrderState::Completed,
            "CANCELED" => OrderState::Canceled,
            "EXPIRED" => OrderState::Expired,
            _ => OrderState::Rejected,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, OrderState::Active)
    }
}

/// An order the exchange still considers working.
#[derive(Debug, Clone)]
pub struct ActiveOrder {
    pub side: OrderSide,
    pub size: f64,
    pub state: OrderState,
}

/// Parameters for a new child order.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub size: f64,
    pub price: Option<f64>,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    pub fn limit_ioc(side: OrderSide, size: f64, price: f64) -> Self {
        Self {
            side,
            size,
            price: Some(price),
            order_type: OrderType::Limit,
            time_in_force: TimeInForce::ImmediateOrCancel,
        }
    }

    pub fn market_gtc(side: OrderSide, size: f64) -> Self {
        Self {
            side,
            size,
            price: None,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::GoodTilCanceled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_state_active_filter() {
        assert!(OrderState::from_bitflyer_str("ACTIVE").is_active());
        assert!(!OrderState::from_bitflyer_str("COMPLETED").is_active());
        assert!(!OrderState::from_bitflyer_str("CANCELED").is_active());
        assert!(!OrderState::from_bitflyer_str("garbage").is_active());
    }

    #[test]
    fn request_constructors_set_execution_params() {
        let open = OrderRequest::limit_ioc(OrderSide::Buy, 0.5, 4_200_000.0);
        assert_eq!(open.order_type, OrderType::Limit);
        assert_eq!(open.time_in_force, TimeInForce::ImmediateOrCancel);
        assert_eq!(open.price, Some(4_200_000.0));

        let cut = OrderRequest::market_gtc(OrderSide::Sell, 0.5);
        assert_eq!(cut.order_type, OrderType::Market);
        assert_eq!(cut.time_in_force, TimeInForce::GoodTilCanceled);
        assert_eq!(cut.price, None);
    }
}
