//! Checkout: turning a cart into a placed order.

mod customer;
mod order;

pub use customer::CustomerInfo;
pub use order::{Order, OrderLine, OrderStatus};

use crate::cart::{Cart, FulfillmentMode};
use crate::catalog::Restaurant;
use crate::error::CommerceError;
use crate::ids::OrderId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// First order number handed out.
pub const FIRST_ORDER_NUMBER: u64 = 12345;

/// Sequential human-readable order numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNumberSequence {
    next: u64,
}

impl OrderNumberSequence {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Number the next call to [`next_number`](Self::next_number) returns.
    pub fn peek(&self) -> String {
        format!("#{}", self.next)
    }

    /// Take the next number ("#12345").
    pub fn next_number(&mut self) -> String {
        let number = self.peek();
        self.next = self.next.saturating_add(1);
        number
    }
}

impl Default for OrderNumberSequence {
    fn default() -> Self {
        Self::starting_at(FIRST_ORDER_NUMBER)
    }
}

/// Places orders from carts.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    numbers: OrderNumberSequence,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(numbers: OrderNumberSequence) -> Self {
        Self { numbers }
    }

    pub fn sequence(&self) -> &OrderNumberSequence {
        &self.numbers
    }

    /// Place an order for the cart's contents.
    ///
    /// The order number is only consumed when the order is accepted. The
    /// restaurant's minimum order applies to delivery orders.
    pub fn place_order(
        &mut self,
        cart: &Cart,
        mode: FulfillmentMode,
        customer: CustomerInfo,
        restaurant: Option<&Restaurant>,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        customer.validate(mode)?;

        let totals = cart.compute_totals(mode)?;
        if mode == FulfillmentMode::Delivery {
            if let Some(minimum) = restaurant.and_then(|r| r.minimum_order) {
                totals.subtotal.ensure_same_currency(&minimum)?;
                if totals.subtotal < minimum {
                    return Err(CommerceError::BelowMinimumOrder {
                        subtotal: totals.subtotal.display(),
                        minimum: minimum.display(),
                    });
                }
            }
        }

        let line_items = cart
            .items()
            .iter()
            .map(OrderLine::from_line_item)
            .collect::<Result<Vec<_>, _>>()?;

        let order = Order {
            id: OrderId::generate(),
            order_number: self.numbers.next_number(),
            restaurant_id: restaurant
                .map(|r| r.id.clone())
                .or_else(|| cart.restaurant_id.clone()),
            customer,
            mode,
            line_items,
            promo_code: cart.active_promo().map(|p| p.code.clone()),
            totals,
            status: OrderStatus::Preparing,
            placed_at: Utc::now(),
        };

        tracing::info!(
            order = %order.order_number,
            mode = mode.as_str(),
            items = order.item_count(),
            total = %order.totals.total,
            "order placed"
        );

        Ok(order)
    }
}
