//! Prices and totals.
//!
//! [`Money`] holds whole cents. Percentage discounts are computed in
//! [`PreciseMoney`] and rounded once at the end, so a 10% discount on
//! €32.95 is €3.30 rather than an accumulation of per-line roundings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

const CENTS_PER_UNIT: i64 = 100;

/// Currencies a catalog may be priced in. All use two decimal places.
///
/// The ordering only exists so that [`Money`] can derive `Ord`; compare
/// amounts of one currency only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::CHF => "CHF",
        }
    }

    /// Prefix used when rendering amounts; CHF carries a trailing space.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
            Self::CHF => "CHF ",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Nearest cent to a decimal amount. No validation; see [`Money::price`].
    ///
    /// ```
    /// use feast_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_decimal(12.50, Currency::EUR).amount_cents, 1250);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::EUR).amount_cents, 30);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * CENTS_PER_UNIT as f64).round() as i64, currency)
    }

    /// A menu or fee price: finite, non-negative and representable in cents.
    pub fn price(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidAmount(amount));
        }
        if amount * CENTS_PER_UNIT as f64 >= i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self::from_decimal(amount, currency))
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Symbol, then units and two-digit cents: `€42.80`, `-€3.89`.
    pub fn display(&self) -> String {
        let cents = self.amount_cents.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        format!(
            "{}{}{}.{:02}",
            if self.is_negative() { "-" } else { "" },
            self.currency.symbol(),
            cents / per_unit,
            cents % per_unit
        )
    }

    /// Error unless both values share a currency.
    pub fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            })
        }
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let cents = self
            .amount_cents
            .checked_add(other.amount_cents)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self::new(cents, self.currency))
    }

    /// Unit price times quantity; `None` on overflow.
    pub fn try_multiply(&self, quantity: i64) -> Option<Money> {
        let cents = self.amount_cents.checked_mul(quantity)?;
        Some(Self::new(cents, self.currency))
    }

    /// Total of `amounts`, starting from zero in `currency`.
    pub fn try_sum<'a>(
        amounts: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        amounts
            .into_iter()
            .try_fold(Self::zero(currency), |sum, amount| sum.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Ten-thousandths of a cent.
///
/// A basis point of a cent amount is exactly one unit here, so percentage
/// rules never lose precision before [`PreciseMoney::round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreciseMoney {
    units: i128,
    currency: Currency,
}

impl PreciseMoney {
    pub const SCALE: i128 = 10_000;

    pub fn zero(currency: Currency) -> Self {
        Self { units: 0, currency }
    }

    pub fn basis_points_of(amount: &Money, basis_points: u32) -> Self {
        Self {
            units: i128::from(amount.amount_cents) * i128::from(basis_points),
            currency: amount.currency,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn plus(self, other: PreciseMoney) -> Self {
        Self {
            units: self.units + other.units,
            ..self
        }
    }

    pub fn minus(self, other: PreciseMoney) -> Self {
        Self {
            units: self.units - other.units,
            ..self
        }
    }

    /// Whole cents, halves rounded away from zero.
    pub fn round(&self) -> Result<Money, CommerceError> {
        let half = Self::SCALE / 2;
        let nudged = if self.units < 0 {
            self.units - half
        } else {
            self.units + half
        };
        let cents = i64::try_from(nudged / Self::SCALE).map_err(|_| CommerceError::Overflow)?;
        Ok(Money::new(cents, self.currency))
    }
}

impl From<Money> for PreciseMoney {
    fn from(money: Money) -> Self {
        Self {
            units: i128::from(money.amount_cents) * Self::SCALE,
            currency: money.currency,
        }
    }
}
