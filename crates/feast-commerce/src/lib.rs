//! Restaurant ordering domain types and logic for Feast.
//!
//! This crate provides the types behind a food ordering and table booking app:
//!
//! - **Catalog**: Restaurants, menu categories, menu items
//! - **Search**: Restaurant filters and sort options
//! - **Cart**: Cart aggregator with promo codes and exact pricing
//! - **Checkout**: Customer details, order placement, order status
//! - **Reservation**: Time slots, booking rules, reservation book
//! - **Dashboard**: Daily figures and best sellers
//!
//! # Example
//!
//! ```rust
//! use feast_commerce::prelude::*;
//!
//! let margherita = MenuItem::new(
//!     ProductId::new("margherita"),
//!     "Pizza Margherita",
//!     12.50,
//!     Currency::EUR,
//! )?;
//! let carbonara = MenuItem::new(
//!     ProductId::new("carbonara"),
//!     "Spaghetti Carbonara",
//!     13.90,
//!     Currency::EUR,
//! )?;
//!
//! let pricing = Pricing::default();
//! let mut cart = pricing.new_cart();
//! cart.add_item(&margherita)?;
//! cart.add_item(&margherita)?;
//! cart.add_item(&carbonara)?;
//!
//! let totals = cart.compute_totals(FulfillmentMode::Delivery)?;
//! assert_eq!(totals.total.display(), "€42.80");
//!
//! cart.apply_promo_code(&pricing.promos, "WELCOME10")?;
//! let totals = cart.compute_totals(FulfillmentMode::Delivery)?;
//! assert_eq!(totals.discount.display(), "€3.89");
//! assert_eq!(totals.total.display(), "€38.91");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod reservation;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, PreciseMoney};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, PreciseMoney};

    // Catalog
    pub use crate::catalog::{Catalog, DeliveryTime, MenuCategory, MenuItem, Restaurant};

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};

    // Cart
    pub use crate::cart::{
        Cart, DeliveryFees, DiscountRule, FulfillmentMode, LineItem, OrderTotals, Pricing,
        PricingConfig, PromoCode, PromoTable, MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{
        Checkout, CustomerInfo, Order, OrderLine, OrderNumberSequence, OrderStatus,
    };

    // Reservation
    pub use crate::reservation::{
        time_slots, Reservation, ReservationBook, ReservationContact, ReservationRequest,
        ReservationStatus,
    };

    // Dashboard
    pub use crate::dashboard::{DashboardSummary, ItemSales, MenuPerformance};
}
