//! Menu items and menu categories.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A dish or drink that can be put in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Product identifier, unique within a restaurant.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Marked as popular on the menu.
    pub popular: bool,
}

impl MenuItem {
    /// Create a menu item, validating name and price.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommerceError::Config(
                "menu item name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            name: name.trim().to_string(),
            description: None,
            price: Money::price(price, currency)?,
            popular: false,
        })
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as popular.
    pub fn popular(mut self) -> Self {
        self.popular = true;
        self
    }
}

/// A named section of a menu (e.g., "Pizza", "Dessert").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuCategory {
    /// Category name.
    pub name: String,
    /// Items in display order.
    pub items: Vec<MenuItem>,
}

impl MenuCategory {
    /// Create an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_creation() {
        let item = MenuItem::new("pizza-margherita", " Pizza Margherita ", 12.50, Currency::EUR)
            .unwrap()
            .popular();
        assert_eq!(item.name, "Pizza Margherita");
        assert_eq!(item.price.amount_cents, 1250);
        assert!(item.popular);
    }

    #[test]
    fn test_menu_item_validation() {
        assert!(matches!(
            MenuItem::new("x", "", 1.0, Currency::EUR),
            Err(CommerceError::Config(_))
        ));
        assert!(matches!(
            MenuItem::new("x", "Water", -2.0, Currency::EUR),
            Err(CommerceError::InvalidAmount(_))
        ));
    }
}
