//! Restaurant types.

use crate::catalog::{MenuCategory, MenuItem};
use crate::error::CommerceError;
use crate::ids::{ProductId, RestaurantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Estimated delivery window in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl DeliveryTime {
    /// Create a window, swapping the bounds if given in the wrong order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min_minutes: a.min(b),
            max_minutes: a.max(b),
        }
    }

    /// Display as "25-35 min".
    pub fn display(&self) -> String {
        format!("{}-{} min", self.min_minutes, self.max_minutes)
    }
}

/// A restaurant with its menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: String,
    /// Average rating, 0.0 - 5.0.
    pub rating: f64,
    pub delivery_time: DeliveryTime,
    pub location: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Price level, 1 ("€") to 4 ("€€€€").
    pub price_level: u8,
    /// Delivery fee advertised in listings.
    pub delivery_fee: Money,
    /// Minimum subtotal for delivery orders.
    pub minimum_order: Option<Money>,
    pub menu: Vec<MenuCategory>,
}

impl Restaurant {
    /// Price level rendered as currency symbols.
    pub fn price_range(&self) -> String {
        self.delivery_fee
            .currency
            .symbol()
            .trim()
            .repeat(self.price_level as usize)
    }

    /// Find a menu item by product id.
    pub fn menu_item(&self, product_id: &ProductId) -> Option<&MenuItem> {
        self.menu_items().find(|item| &item.id == product_id)
    }

    /// Like [`Restaurant::menu_item`], but an unknown id is an error.
    pub fn require_item(&self, product_id: &ProductId) -> Result<&MenuItem, CommerceError> {
        self.menu_item(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))
    }

    /// All menu items across categories, in menu order.
    pub fn menu_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.menu.iter().flat_map(|category| category.items.iter())
    }

    /// Items flagged as popular.
    pub fn popular_items(&self) -> Vec<&MenuItem> {
        self.menu_items().filter(|item| item.popular).collect()
    }

    /// Initials used for reservation numbers ("Bella Vista" -> "BV").
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Uppercase first letters of each word, "X" if there are none.
pub(crate) fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "X".to_string()
    } else {
        letters
    }
}
