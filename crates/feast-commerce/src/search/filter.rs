//! Restaurant search filters.

use crate::catalog::Restaurant;
use serde::{Deserialize, Serialize};

/// A single search filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of name or cuisine.
    Text(String),
    /// Any of the given cuisines.
    Cuisines(Vec<String>),
    /// Inclusive price level range.
    PriceLevel { min: u8, max: u8 },
    /// Minimum average rating.
    Rating { min: f64 },
}

impl Filter {
    /// Create a text filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a cuisine filter.
    pub fn cuisines<I, S>(cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Cuisines(cuisines.into_iter().map(Into::into).collect())
    }

    /// Create a price level filter; bounds are clamped to 1-4.
    pub fn price_level(min: u8, max: u8) -> Self {
        let min = min.clamp(1, 4);
        let max = max.clamp(1, 4);
        Filter::PriceLevel {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Whether a restaurant passes this filter.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            Filter::Text(query) => {
                let query = query.trim().to_lowercase();
                query.is_empty()
                    || restaurant.name.to_lowercase().contains(&query)
                    || restaurant.cuisine.to_lowercase().contains(&query)
            }
            Filter::Cuisines(cuisines) => {
                cuisines.is_empty()
                    || cuisines
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(&restaurant.cuisine))
            }
            Filter::PriceLevel { min, max } => {
                restaurant.price_level >= *min && restaurant.price_level <= *max
            }
            Filter::Rating { min } => restaurant.rating >= *min,
        }
    }
}
