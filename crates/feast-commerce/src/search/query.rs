//! Search query builder.

use crate::catalog::{Catalog, Restaurant};
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for restaurant listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Highest rated first.
    #[default]
    Rating,
    /// Fastest delivery first.
    DeliveryTime,
    /// Cheapest delivery first.
    DeliveryFee,
    /// Name A-Z.
    Name,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Rating => "rating",
            SortOption::DeliveryTime => "delivery_time",
            SortOption::DeliveryFee => "delivery_fee",
            SortOption::Name => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Rating => "Highest Rated",
            SortOption::DeliveryTime => "Fastest Delivery",
            SortOption::DeliveryFee => "Lowest Delivery Fee",
            SortOption::Name => "Name: A-Z",
        }
    }

    fn compare(&self, a: &Restaurant, b: &Restaurant) -> Ordering {
        match self {
            SortOption::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
            SortOption::DeliveryTime => a
                .delivery_time
                .min_minutes
                .cmp(&b.delivery_time.min_minutes),
            SortOption::DeliveryFee => a
                .delivery_fee
                .amount_cents
                .cmp(&b.delivery_fee.amount_cents),
            SortOption::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "rating" => Ok(SortOption::Rating),
            "delivery_time" | "time" => Ok(SortOption::DeliveryTime),
            "delivery_fee" | "fee" => Ok(SortOption::DeliveryFee),
            "name" => Ok(SortOption::Name),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// A restaurant search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Filters, all of which must match.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Create an empty query (matches everything, sorted by rating).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text query; empty text is ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.filters.push(Filter::Text(q));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Limit the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a restaurant passes every filter.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.filters.iter().all(|f| f.matches(restaurant))
    }

    /// Run the query; ties keep catalog order.
    pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Restaurant> {
        let mut results: Vec<&Restaurant> = catalog
            .restaurants
            .iter()
            .filter(|r| self.matches(r))
            .collect();
        results.sort_by(|a, b| self.sort.compare(a, b));
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        tracing::debug!(
            filters = self.filters.len(),
            sort = self.sort.as_str(),
            results = results.len(),
            "restaurant search"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeliveryTime;
    use crate::ids::RestaurantId;
    use crate::money::{Currency, Money};

    fn restaurant(name: &str, cuisine: &str, rating: f64, time: u32, fee: i64, level: u8) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            rating,
            delivery_time: DeliveryTime::new(time, time + 10),
            location: String::new(),
            address: None,
            phone: None,
            price_level: level,
            delivery_fee: Money::new(fee, Currency::EUR),
            minimum_order: None,
            menu: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            restaurant("Bella Vista", "Italienisch", 4.8, 25, 299, 3),
            restaurant("Sakura Sushi", "Japanisch", 4.9, 30, 399, 4),
            restaurant("Burger Palace", "Amerikanisch", 4.6, 20, 199, 2),
        ])
    }

    fn names(results: &[&Restaurant]) -> Vec<String> {
        results.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_default_sort_by_rating() {
        let catalog = catalog();
        let results = SearchQuery::new().run(&catalog);
        assert_eq!(
            names(&results),
            vec!["Sakura Sushi", "Bella Vista", "Burger Palace"]
        );
    }

    #[test]
    fn test_sort_by_delivery_time_and_fee() {
        let catalog = catalog();
        let by_time = SearchQuery::new()
            .with_sort(SortOption::DeliveryTime)
            .run(&catalog);
        assert_eq!(by_time[0].name, "Burger Palace");

        let by_fee = SearchQuery::new()
            .with_sort(SortOption::DeliveryFee)
            .run(&catalog);
        assert_eq!(
            names(&by_fee),
            vec!["Burger Palace", "Bella Vista", "Sakura Sushi"]
        );
    }

    #[test]
    fn test_combined_filters() {
        let catalog = catalog();
        let results = SearchQuery::new()
            .with_filter(Filter::price_level(2, 3))
            .with_filter(Filter::Rating { min: 4.7 })
            .run(&catalog);
        assert_eq!(names(&results), vec!["Bella Vista"]);

        let results = SearchQuery::new().with_query("sushi").run(&catalog);
        assert_eq!(names(&results), vec!["Sakura Sushi"]);
    }

    #[test]
    fn test_limit() {
        let catalog = catalog();
        assert_eq!(SearchQuery::new().with_limit(1).run(&catalog).len(), 1);
    }

    #[test]
    fn test_sort_option_from_str() {
        assert_eq!("delivery-time".parse::<SortOption>(), Ok(SortOption::DeliveryTime));
        assert_eq!("fee".parse::<SortOption>(), Ok(SortOption::DeliveryFee));
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
