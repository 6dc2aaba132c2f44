//! Catalog module.
//!
//! Restaurants, their menus, and loading them from a TOML catalog file:
//!
//! ```toml
//! currency = "EUR"
//!
//! [[restaurants]]
//! id = "bella-vista"
//! name = "Bella Vista"
//! cuisine = "Italienisch"
//! rating = 4.8
//! delivery_time = [25, 35]
//! location = "München Zentrum"
//! price_level = 3
//! delivery_fee = 2.99
//! minimum_order = 15.0
//!
//! [[restaurants.menu]]
//! name = "Pizza"
//!
//! [[restaurants.menu.items]]
//! id = "pizza-margherita"
//! name = "Pizza Margherita"
//! price = 12.50
//! popular = true
//! ```

mod menu;
mod restaurant;

pub use menu::{MenuCategory, MenuItem};
pub use restaurant::{DeliveryTime, Restaurant};
pub(crate) use restaurant::initials;

use crate::error::CommerceError;
use crate::ids::RestaurantId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All restaurants known to the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
}

impl Catalog {
    /// Create a catalog from restaurants.
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    /// Find a restaurant by id.
    pub fn restaurant(&self, id: &RestaurantId) -> Result<&Restaurant, CommerceError> {
        self.restaurants
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| CommerceError::RestaurantNotFound(id.to_string()))
    }

    /// Distinct cuisines in catalog order.
    pub fn cuisines(&self) -> Vec<&str> {
        let mut cuisines: Vec<&str> = Vec::new();
        for restaurant in &self.restaurants {
            if !cuisines.contains(&restaurant.cuisine.as_str()) {
                cuisines.push(&restaurant.cuisine);
            }
        }
        cuisines
    }

    /// Parse a catalog from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = toml::from_str(content)?;
        file.into_catalog()
    }

    /// Parse a catalog from JSON with the same layout as the TOML form.
    pub fn from_json_str(content: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        file.into_catalog()
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("failed to read catalog {}: {}", path.display(), e))
        })?;
        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::debug!(
            path = %path.display(),
            restaurants = catalog.restaurants.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}

/// On-disk catalog layout with decimal prices.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    restaurants: Vec<RestaurantRecord>,
}

#[derive(Debug, Deserialize)]
struct RestaurantRecord {
    id: String,
    name: String,
    cuisine: String,
    #[serde(default)]
    rating: f64,
    delivery_time: (u32, u32),
    #[serde(default)]
    location: String,
    address: Option<String>,
    phone: Option<String>,
    #[serde(default = "default_price_level")]
    price_level: u8,
    #[serde(default)]
    delivery_fee: f64,
    minimum_order: Option<f64>,
    #[serde(default)]
    menu: Vec<MenuCategoryRecord>,
}

fn default_price_level() -> u8 {
    2
}

#[derive(Debug, Deserialize)]
struct MenuCategoryRecord {
    name: String,
    #[serde(default)]
    items: Vec<MenuItemRecord>,
}

#[derive(Debug, Deserialize)]
struct MenuItemRecord {
    id: String,
    name: String,
    description: Option<String>,
    price: f64,
    #[serde(default)]
    popular: bool,
}

impl CatalogFile {
    fn into_catalog(self) -> Result<Catalog, CommerceError> {
        let currency = self.currency;
        let mut restaurants = Vec::with_capacity(self.restaurants.len());

        for record in self.restaurants {
            if !(1..=4).contains(&record.price_level) {
                return Err(CommerceError::Config(format!(
                    "restaurant {}: price_level must be between 1 and 4",
                    record.id
                )));
            }
            if !(0.0..=5.0).contains(&record.rating) {
                return Err(CommerceError::Config(format!(
                    "restaurant {}: rating must be between 0 and 5",
                    record.id
                )));
            }
            if restaurants.iter().any(|r: &Restaurant| r.id.as_str() == record.id) {
                return Err(CommerceError::Config(format!(
                    "duplicate restaurant id {}",
                    record.id
                )));
            }

            let mut menu = Vec::with_capacity(record.menu.len());
            for category in record.menu {
                let mut items = Vec::with_capacity(category.items.len());
                for item in category.items {
                    let mut menu_item = MenuItem::new(item.id, item.name, item.price, currency)?;
                    menu_item.description = item.description;
                    menu_item.popular = item.popular;
                    items.push(menu_item);
                }
                menu.push(MenuCategory {
                    name: category.name,
                    items,
                });
            }

            let minimum_order = record
                .minimum_order
                .map(|amount| Money::price(amount, currency))
                .transpose()?;

            restaurants.push(Restaurant {
                id: RestaurantId::new(record.id),
                name: record.name,
                cuisine: record.cuisine,
                rating: record.rating,
                delivery_time: DeliveryTime::new(record.delivery_time.0, record.delivery_time.1),
                location: record.location,
                address: record.address,
                phone: record.phone,
                price_level: record.price_level,
                delivery_fee: Money::price(record.delivery_fee, currency)?,
                minimum_order,
                menu,
            });
        }

        Ok(Catalog::new(restaurants))
    }
}
