//! Shopping cart module.
//!
//! Contains the cart aggregator, promo codes, and pricing.

mod cart;
mod pricing;
mod promo;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{DeliveryFees, FulfillmentMode, OrderTotals, Pricing, PricingConfig};
pub use promo::{normalize_code, DiscountRule, PromoCode, PromoConfig, PromoTable};
