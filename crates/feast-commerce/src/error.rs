//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in ordering and reservation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Restaurant not found.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Promo code is not in the promo table.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Negative or non-finite price.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Delivery subtotal below the restaurant minimum.
    #[error("Order subtotal {subtotal} is below the minimum order of {minimum}")]
    BelowMinimumOrder { subtotal: String, minimum: String },

    /// Invalid order status transition.
    #[error("Invalid order transition from {from} to {to}")]
    InvalidOrderTransition { from: String, to: String },

    /// Reservation request failed validation.
    #[error("Invalid reservation: {0}")]
    InvalidReservation(String),

    /// Invalid reservation status transition.
    #[error("Invalid reservation transition from {from} to {to}")]
    InvalidReservationTransition { from: String, to: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}
