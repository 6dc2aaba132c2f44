//! Cart and line item types.

use crate::cart::{DeliveryFees, DiscountRule, FulfillmentMode, OrderTotals, PromoCode, PromoTable};
use crate::catalog::MenuItem;
use crate::error::CommerceError;
use crate::ids::{CartId, ProductId, RestaurantId};
use crate::money::{Currency, Money, PreciseMoney};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// A shopping cart.
///
/// Holds at most one line per product and at most one active promo code.
/// Totals are never stored; [`Cart::compute_totals`] derives them on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Restaurant the cart is ordering from.
    pub restaurant_id: Option<RestaurantId>,
    items: Vec<LineItem>,
    promo: Option<PromoCode>,
    currency: Currency,
    fees: DeliveryFees,
}

impl Cart {
    /// Create an empty cart with the default fees.
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::generate(),
            restaurant_id: None,
            items: Vec::new(),
            promo: None,
            currency,
            fees: DeliveryFees::new(Money::new(
                DeliveryFees::default().delivery.amount_cents,
                currency,
            )),
        }
    }

    /// Use different fulfillment fees.
    pub fn with_fees(mut self, fees: DeliveryFees) -> Self {
        self.fees = fees;
        self
    }

    /// Associate the cart with a restaurant.
    pub fn for_restaurant(mut self, restaurant_id: RestaurantId) -> Self {
        self.restaurant_id = Some(restaurant_id);
        self
    }

    /// Add one unit of a menu item.
    ///
    /// Returns the new quantity of that line.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<i64, CommerceError> {
        self.add_product(item.id.clone(), &item.name, item.price)
    }

    /// Add one unit of a product: increments an existing line or inserts a new one.
    pub fn add_product(
        &mut self,
        product_id: ProductId,
        display_name: &str,
        unit_price: Money,
    ) -> Result<i64, CommerceError> {
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidAmount(unit_price.to_decimal()));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_quantity = existing.quantity + 1;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            tracing::debug!(
                cart = %self.id,
                product = %product_id,
                quantity = new_quantity,
                "incremented line item"
            );
            return Ok(new_quantity);
        }

        tracing::debug!(cart = %self.id, product = %product_id, "added line item");
        self.items.push(LineItem {
            product_id,
            display_name: display_name.to_string(),
            unit_price,
            quantity: 1,
        });
        Ok(1)
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// Returns `Ok(false)` when the product is not in the cart, whatever the
    /// requested quantity.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(false);
        };
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        item.quantity = quantity;
        tracing::debug!(cart = %self.id, product = %product_id, quantity, "set quantity");
        Ok(true)
    }

    /// Decrease a line by one, removing it at zero.
    pub fn decrement(&mut self, product_id: &ProductId) -> bool {
        match self.quantity_of(product_id) {
            0 => false,
            current => self.set_quantity(product_id, current - 1).unwrap_or(false),
        }
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(cart = %self.id, product = %product_id, "removed line item");
        }
        removed
    }

    /// Activate a promo code from the table.
    ///
    /// An unknown code leaves the active promo and the items untouched.
    pub fn apply_promo_code(
        &mut self,
        table: &PromoTable,
        code: &str,
    ) -> Result<&PromoCode, CommerceError> {
        let Some(promo) = table.lookup(code) else {
            tracing::warn!(cart = %self.id, code = code.trim(), "rejected promo code");
            return Err(CommerceError::InvalidPromoCode(code.trim().to_string()));
        };
        if let DiscountRule::FixedAmount(amount) = promo.rule {
            if amount.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: amount.currency.code().to_string(),
                });
            }
        }

        tracing::info!(cart = %self.id, code = %promo.code, "applied promo code");
        let active: &PromoCode = self.promo.insert(promo.clone());
        Ok(active)
    }

    /// Drop the active promo, returning it.
    pub fn remove_promo(&mut self) -> Option<PromoCode> {
        self.promo.take()
    }

    /// The active promo, if any.
    pub fn active_promo(&self) -> Option<&PromoCode> {
        self.promo.as_ref()
    }

    /// Remove all items and the promo.
    pub fn clear(&mut self) {
        self.items.clear();
        self.promo = None;
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by product id.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Quantity of a product, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.get_item(product_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Fulfillment fees used for totals.
    pub fn fees(&self) -> &DeliveryFees {
        &self.fees
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut subtotal = Money::zero(self.currency);
        for item in &self.items {
            subtotal = subtotal.checked_add(&item.line_total()?)?;
        }
        Ok(subtotal)
    }

    /// Derive subtotal, discount, fee and total for a fulfillment mode.
    ///
    /// The discount is computed exactly and each field is rounded to cents
    /// only at the end.
    pub fn compute_totals(&self, mode: FulfillmentMode) -> Result<OrderTotals, CommerceError> {
        let subtotal = self.subtotal()?;
        let delivery_fee = self.fees.fee_for(mode);
        subtotal.ensure_same_currency(&delivery_fee)?;

        let discount = match &self.promo {
            Some(promo) => promo.rule.discount_for(&subtotal)?,
            None => PreciseMoney::zero(self.currency),
        };
        let total = PreciseMoney::from(subtotal)
            .plus(PreciseMoney::from(delivery_fee))
            .minus(discount);

        Ok(OrderTotals {
            subtotal,
            discount: discount.round()?,
            delivery_fee,
            total: total.round()?,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub display_name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity, at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// unit_price * quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
