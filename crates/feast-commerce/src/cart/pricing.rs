//! Order pricing: fulfillment fees, pricing configuration, and totals.

use crate::cart::{Cart, PromoConfig, PromoTable};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentMode {
    #[default]
    Delivery,
    Pickup,
}

impl FulfillmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentMode::Delivery => "delivery",
            FulfillmentMode::Pickup => "pickup",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FulfillmentMode::Delivery => "Delivery",
            FulfillmentMode::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for FulfillmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FulfillmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(FulfillmentMode::Delivery),
            "pickup" | "pick-up" | "collection" => Ok(FulfillmentMode::Pickup),
            other => Err(format!("unknown fulfillment mode: {}", other)),
        }
    }
}

/// Flat fee per fulfillment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFees {
    pub delivery: Money,
    pub pickup: Money,
}

impl DeliveryFees {
    /// Fees with the given delivery charge and free pickup.
    pub fn new(delivery: Money) -> Self {
        Self {
            delivery,
            pickup: Money::zero(delivery.currency),
        }
    }

    /// Fee for a fulfillment mode.
    pub fn fee_for(&self, mode: FulfillmentMode) -> Money {
        match mode {
            FulfillmentMode::Delivery => self.delivery,
            FulfillmentMode::Pickup => self.pickup,
        }
    }
}

impl Default for DeliveryFees {
    /// €3.90 delivery, free pickup.
    fn default() -> Self {
        Self::new(Money::new(390, Currency::EUR))
    }
}

/// Derived totals for a cart, rounded to cents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Promo discount, at most the subtotal.
    pub discount: Money,
    /// Fulfillment fee.
    pub delivery_fee: Money,
    /// subtotal + delivery_fee - discount.
    pub total: Money,
}

impl OrderTotals {
    /// All-zero totals.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            discount: Money::zero(currency),
            delivery_fee: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.amount_cents > 0
    }

    /// Discount as a percentage of the subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.discount.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }
}

/// Pricing rules in effect: currency, fees, and accepted promo codes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pricing {
    pub fees: DeliveryFees,
    pub promos: PromoTable,
}

impl Pricing {
    /// Create pricing rules.
    pub fn new(fees: DeliveryFees, promos: PromoTable) -> Self {
        Self { fees, promos }
    }

    /// Currency of the fees (and therefore of carts priced here).
    pub fn currency(&self) -> Currency {
        self.fees.delivery.currency
    }

    /// A new empty cart priced with these fees.
    pub fn new_cart(&self) -> Cart {
        Cart::new(self.currency()).with_fees(self.fees)
    }
}

/// Pricing section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    /// Currency code.
    #[serde(default)]
    pub currency: Currency,
    /// Delivery fee as a decimal.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,
    /// Pickup fee as a decimal.
    #[serde(default)]
    pub pickup_fee: f64,
    /// Accepted promo codes; defaults to `WELCOME10`.
    #[serde(default = "default_promos")]
    pub promos: Vec<PromoConfig>,
}

fn default_delivery_fee() -> f64 {
    3.90
}

fn default_promos() -> Vec<PromoConfig> {
    vec![PromoConfig {
        code: "WELCOME10".to_string(),
        percent: Some(10.0),
        amount: None,
        description: Some("10% off your order".to_string()),
    }]
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            delivery_fee: default_delivery_fee(),
            pickup_fee: 0.0,
            promos: default_promos(),
        }
    }
}

impl PricingConfig {
    /// Validate and build the runtime pricing rules.
    pub fn build(&self) -> Result<Pricing, CommerceError> {
        let fees = DeliveryFees {
            delivery: Money::price(self.delivery_fee, self.currency)?,
            pickup: Money::price(self.pickup_fee, self.currency)?,
        };
        let mut promos = PromoTable::empty();
        for promo in &self.promos {
            promos.insert(promo.build(self.currency)?);
        }
        Ok(Pricing::new(fees, promos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_for_mode() {
        let fees = DeliveryFees::default();
        assert_eq!(fees.fee_for(FulfillmentMode::Delivery).amount_cents, 390);
        assert!(fees.fee_for(FulfillmentMode::Pickup).is_zero());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Delivery".parse(), Ok(FulfillmentMode::Delivery));
        assert_eq!("pickup".parse(), Ok(FulfillmentMode::Pickup));
        assert!("drone".parse::<FulfillmentMode>().is_err());
    }

    #[test]
    fn test_default_config_builds_launch_pricing() {
        let pricing = PricingConfig::default().build().unwrap();
        assert_eq!(pricing.fees, DeliveryFees::default());
        assert!(pricing.promos.lookup("welcome10").is_some());
        assert_eq!(pricing, Pricing::default());
    }

    #[test]
    fn test_config_from_toml() {
        let config: PricingConfig = toml::from_str(
            r#"
            currency = "USD"
            delivery_fee = 4.5

            [[promos]]
            code = "FIVEOFF"
            amount = 5.0
            "#,
        )
        .unwrap();
        let pricing = config.build().unwrap();
        assert_eq!(pricing.currency(), Currency::USD);
        assert_eq!(pricing.fees.delivery.amount_cents, 450);
        assert!(pricing.promos.lookup("WELCOME10").is_none());
        assert!(pricing.promos.lookup("fiveoff").is_some());
    }

    #[test]
    fn test_config_rejects_negative_fee() {
        let config = PricingConfig {
            delivery_fee: -1.0,
            ..PricingConfig::default()
        };
        assert!(matches!(config.build(), Err(CommerceError::InvalidAmount(_))));
    }

    #[test]
    fn test_discount_percentage() {
        let totals = OrderTotals {
            subtotal: Money::new(10000, Currency::EUR),
            discount: Money::new(1000, Currency::EUR),
            delivery_fee: Money::zero(Currency::EUR),
            total: Money::new(9000, Currency::EUR),
        };
        assert!(totals.has_discount());
        assert!((totals.discount_percentage() - 10.0).abs() < 0.01);
    }
}
