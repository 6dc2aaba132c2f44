//! Promo codes and discount rules.

use crate::error::CommerceError;
use crate::money::{Currency, Money, PreciseMoney};
use serde::{Deserialize, Serialize};

/// How a promo code reduces the subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountRule {
    /// Percentage off the subtotal, in basis points (1000 = 10%).
    Percentage { basis_points: u32 },
    /// Fixed amount off the subtotal.
    FixedAmount(Money),
}

impl DiscountRule {
    /// Percentage rule from a percent value (e.g., `10.0`).
    pub fn percent(percent: f64) -> Result<Self, CommerceError> {
        if !percent.is_finite() || percent < 0.0 || percent > u32::MAX as f64 / 100.0 {
            return Err(CommerceError::InvalidAmount(percent));
        }
        Ok(DiscountRule::Percentage {
            basis_points: (percent * 100.0).round() as u32,
        })
    }

    /// Fixed amount rule from a decimal value.
    pub fn fixed(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        Ok(DiscountRule::FixedAmount(Money::price(amount, currency)?))
    }

    /// Exact discount for a subtotal, never more than the subtotal itself.
    pub fn discount_for(&self, subtotal: &Money) -> Result<PreciseMoney, CommerceError> {
        let raw = match self {
            DiscountRule::Percentage { basis_points } => {
                PreciseMoney::basis_points_of(subtotal, *basis_points)
            }
            DiscountRule::FixedAmount(amount) => {
                subtotal.ensure_same_currency(amount)?;
                PreciseMoney::from(*amount)
            }
        };
        let cap = PreciseMoney::from(*subtotal).max(PreciseMoney::zero(subtotal.currency));
        Ok(raw.min(cap))
    }

    /// Human-readable summary ("10% off", "€5.00 off").
    pub fn description(&self) -> String {
        match self {
            DiscountRule::Percentage { basis_points } => {
                if basis_points % 100 == 0 {
                    format!("{}% off", basis_points / 100)
                } else {
                    format!("{:.2}% off", *basis_points as f64 / 100.0)
                }
            }
            DiscountRule::FixedAmount(amount) => format!("{} off", amount.display()),
        }
    }
}

/// A promo code with its rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCode {
    /// Canonical (uppercase) code.
    pub code: String,
    /// Display text.
    pub description: String,
    /// Discount rule.
    pub rule: DiscountRule,
}

impl PromoCode {
    /// Create a promo code; the code is stored normalized.
    pub fn new(code: &str, rule: DiscountRule) -> Self {
        Self {
            code: normalize_code(code),
            description: rule.description(),
            rule,
        }
    }

    /// Override the display text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Normalize user input for lookup: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// The static table of accepted promo codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoTable {
    codes: Vec<PromoCode>,
}

impl PromoTable {
    /// An empty table; every lookup fails.
    pub fn empty() -> Self {
        Self { codes: Vec::new() }
    }

    /// Add or replace a code.
    pub fn with_code(mut self, promo: PromoCode) -> Self {
        self.insert(promo);
        self
    }

    /// Add or replace a code.
    pub fn insert(&mut self, promo: PromoCode) {
        self.codes.retain(|p| p.code != promo.code);
        self.codes.push(promo);
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, code: &str) -> Option<&PromoCode> {
        let code = normalize_code(code);
        if code.is_empty() {
            return None;
        }
        self.codes.iter().find(|p| p.code == code)
    }

    /// All codes.
    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for PromoTable {
    /// The launch promo: `WELCOME10`, 10% off.
    fn default() -> Self {
        Self::empty().with_code(
            PromoCode::new("WELCOME10", DiscountRule::Percentage { basis_points: 1000 })
                .with_description("10% off your order"),
        )
    }
}

/// Promo code entry as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoConfig {
    pub code: String,
    /// Percentage off; exclusive with `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    /// Fixed amount off; exclusive with `percent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PromoConfig {
    /// Build the promo code in the given currency.
    pub fn build(&self, currency: Currency) -> Result<PromoCode, CommerceError> {
        if normalize_code(&self.code).is_empty() {
            return Err(CommerceError::Config("promo code cannot be empty".to_string()));
        }
        let rule = match (self.percent, self.amount) {
            (Some(percent), None) => DiscountRule::percent(percent)?,
            (None, Some(amount)) => DiscountRule::fixed(amount, currency)?,
            _ => {
                return Err(CommerceError::Config(format!(
                    "promo {} needs exactly one of percent or amount",
                    self.code
                )))
            }
        };
        let promo = PromoCode::new(&self.code, rule);
        Ok(match &self.description {
            Some(description) => promo.with_description(description.clone()),
            None => promo,
        })
    }
}
