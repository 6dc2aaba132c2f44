//! Order types.

use crate::cart::{FulfillmentMode, LineItem, OrderTotals};
use crate::checkout::CustomerInfo;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, RestaurantId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kitchen and fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted, kitchen is cooking.
    #[default]
    Preparing,
    /// Ready for pickup or for the driver.
    Ready,
    /// With the driver.
    OutForDelivery,
    /// Delivered or picked up.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Still being worked on.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line of a placed order, frozen at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub display_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl OrderLine {
    /// Snapshot a cart line.
    pub fn from_line_item(item: &LineItem) -> Result<Self, CommerceError> {
        Ok(Self {
            product_id: item.product_id.clone(),
            display_name: item.display_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total()?,
        })
    }

    /// "2x Pizza Margherita".
    pub fn summary(&self) -> String {
        format!("{}x {}", self.quantity, self.display_name)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number ("#12345").
    pub order_number: String,
    /// Restaurant preparing the order.
    pub restaurant_id: Option<RestaurantId>,
    pub customer: CustomerInfo,
    pub mode: FulfillmentMode,
    pub line_items: Vec<OrderLine>,
    /// Promo code that was active at checkout.
    pub promo_code: Option<String>,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Move to the next status.
    ///
    /// Pickup orders go straight from `Ready` to `Completed`.
    pub fn advance(&mut self) -> Result<OrderStatus, CommerceError> {
        let next = match (self.status, self.mode) {
            (OrderStatus::Preparing, _) => OrderStatus::Ready,
            (OrderStatus::Ready, FulfillmentMode::Delivery) => OrderStatus::OutForDelivery,
            (OrderStatus::Ready, FulfillmentMode::Pickup) => OrderStatus::Completed,
            (OrderStatus::OutForDelivery, _) => OrderStatus::Completed,
            (status, _) => {
                return Err(CommerceError::InvalidOrderTransition {
                    from: status.as_str().to_string(),
                    to: "none".to_string(),
                })
            }
        };
        self.transition(next);
        Ok(next)
    }

    /// Cancel an order that has not completed.
    pub fn cancel(&mut self) -> Result<(), CommerceError> {
        if self.status.is_terminal() {
            return Err(CommerceError::InvalidOrderTransition {
                from: self.status.as_str().to_string(),
                to: OrderStatus::Cancelled.as_str().to_string(),
            });
        }
        self.transition(OrderStatus::Cancelled);
        Ok(())
    }

    fn transition(&mut self, next: OrderStatus) {
        tracing::info!(
            order = %self.order_number,
            from = self.status.as_str(),
            to = next.as_str(),
            "order status changed"
        );
        self.status = next;
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }

    /// One summary string per line.
    pub fn item_summary(&self) -> Vec<String> {
        self.line_items.iter().map(OrderLine::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn order(mode: FulfillmentMode) -> Order {
        Order {
            id: OrderId::new("order-1"),
            order_number: "#12345".to_string(),
            restaurant_id: None,
            customer: CustomerInfo::new("Anna", "Schmidt", "anna@example.com", "0176"),
            mode,
            line_items: vec![OrderLine {
                product_id: ProductId::new("tiramisu"),
                display_name: "Tiramisu".to_string(),
                unit_price: Money::new(650, Currency::EUR),
                quantity: 2,
                line_total: Money::new(1300, Currency::EUR),
            }],
            promo_code: None,
            totals: OrderTotals::zero(Currency::EUR),
            status: OrderStatus::Preparing,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn test_delivery_lifecycle() {
        let mut order = order(FulfillmentMode::Delivery);
        assert_eq!(order.advance().unwrap(), OrderStatus::Ready);
        assert_eq!(order.advance().unwrap(), OrderStatus::OutForDelivery);
        assert_eq!(order.advance().unwrap(), OrderStatus::Completed);
        assert!(order.advance().is_err());
    }

    #[test]
    fn test_pickup_skips_delivery() {
        let mut order = order(FulfillmentMode::Pickup);
        order.advance().unwrap();
        assert_eq!(order.advance().unwrap(), OrderStatus::Completed);
    }

    #[test]
    fn test_cancel() {
        let mut order = order(FulfillmentMode::Delivery);
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(matches!(
            order.cancel(),
            Err(CommerceError::InvalidOrderTransition { .. })
        ));
        assert!(order.advance().is_err());
    }

    #[test]
    fn test_item_summary() {
        let order = order(FulfillmentMode::Pickup);
        assert_eq!(order.item_summary(), vec!["2x Tiramisu"]);
        assert_eq!(order.item_count(), 2);
    }
}
