//! Account and position mirrors of brokerage state.

/// Account equity as reported by the broker, read fresh each cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSnapshot {
    pub equity: f64,
}

/// Read-only mirror of a brokerage position, valid within one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldPosition {
    pub symbol: String,
    pub quantity: i64,
    pub avg_entry_price: f64,
}

/// Order direction for market orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_wire_names() {
        assert_eq!(OrderSide::Buy.as_str(), "buy");
        assert_eq!(OrderSide::Sell.as_str(), "sell");
    }
}
