//! Operator dashboard figures derived from orders and reservations.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::reservation::{Reservation, ReservationStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Headline numbers for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    /// Orders placed on the day, cancelled ones included.
    pub orders_today: usize,
    /// Sum of totals of the day's non-cancelled orders.
    pub revenue: Money,
    pub average_order_value: Money,
    /// Orders still preparing, ready, or out for delivery.
    pub open_orders: usize,
    pub reservations_today: usize,
    pub guests_today: u32,
    pub pending_reservations: usize,
}

impl DashboardSummary {
    pub fn build(
        orders: &[Order],
        reservations: &[Reservation],
        today: NaiveDate,
    ) -> Result<Self, CommerceError> {
        let currency = orders
            .first()
            .map(|o| o.totals.total.currency)
            .unwrap_or_default();

        let todays: Vec<&Order> = orders
            .iter()
            .filter(|o| o.placed_at.date_naive() == today)
            .collect();
        let billable: Vec<&Order> = todays
            .iter()
            .copied()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .collect();

        let revenue = Money::try_sum(billable.iter().map(|o| &o.totals.total), currency)?;
        let average_order_value = average(revenue, billable.len());

        let tables_today: Vec<&Reservation> = reservations
            .iter()
            .filter(|r| r.date == today && r.is_active())
            .collect();

        Ok(Self {
            date: today,
            orders_today: todays.len(),
            revenue,
            average_order_value,
            open_orders: orders.iter().filter(|o| o.status.is_open()).count(),
            reservations_today: tables_today.len(),
            guests_today: tables_today.iter().map(|r| u32::from(r.party_size)).sum(),
            pending_reservations: reservations
                .iter()
                .filter(|r| r.status == ReservationStatus::Pending)
                .count(),
        })
    }
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::zero(total.currency);
    }
    let count = count as i64;
    let half = count / 2;
    let cents = if total.amount_cents >= 0 {
        (total.amount_cents + half) / count
    } else {
        (total.amount_cents - half) / count
    };
    Money::new(cents, total.currency)
}

/// Sales of one menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSales {
    pub product_id: ProductId,
    pub display_name: String,
    pub units: i64,
    pub revenue: Money,
}

/// Units sold per menu item, best sellers first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuPerformance {
    pub items: Vec<ItemSales>,
}

impl MenuPerformance {
    /// Tally the line items of all non-cancelled orders.
    pub fn from_orders(orders: &[Order]) -> Result<Self, CommerceError> {
        let mut by_product: HashMap<&ProductId, ItemSales> = HashMap::new();

        for line in orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .flat_map(|o| o.line_items.iter())
        {
            let entry = by_product
                .entry(&line.product_id)
                .or_insert_with(|| ItemSales {
                    product_id: line.product_id.clone(),
                    display_name: line.display_name.clone(),
                    units: 0,
                    revenue: Money::zero(line.line_total.currency),
                });
            entry.units = entry
                .units
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            entry.revenue = entry.revenue.checked_add(&line.line_total)?;
        }

        let mut items: Vec<ItemSales> = by_product.into_values().collect();
        items.sort_by(|a, b| {
            b.units
                .cmp(&a.units)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        Ok(Self { items })
    }

    /// The `n` best sellers.
    pub fn top(&self, n: usize) -> &[ItemSales] {
        &self.items[..n.min(self.items.len())]
    }

    pub fn currency(&self) -> Currency {
        self.items
            .first()
            .map(|i| i.revenue.currency)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{FulfillmentMode, OrderTotals};
    use crate::checkout::{CustomerInfo, OrderLine};
    use crate::ids::{OrderId, ReservationId, RestaurantId};
    use crate::reservation::ReservationContact;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn eur(cents: i64) -> Money {
        Money::new(cents, Currency::EUR)
    }

    fn line(id: &str, name: &str, price: i64, quantity: i64) -> OrderLine {
        OrderLine {
            product_id: ProductId::new(id),
            display_name: name.to_string(),
            unit_price: eur(price),
            quantity,
            line_total: eur(price * quantity),
        }
    }

    fn order(day: u32, total: i64, status: OrderStatus, lines: Vec<OrderLine>) -> Order {
        Order {
            id: OrderId::generate(),
            order_number: "#12345".to_string(),
            restaurant_id: None,
            customer: CustomerInfo::default(),
            mode: FulfillmentMode::Pickup,
            line_items: lines,
            promo_code: None,
            totals: OrderTotals {
                subtotal: eur(total),
                discount: eur(0),
                delivery_fee: eur(0),
                total: eur(total),
            },
            status,
            placed_at: Utc.with_ymd_and_hms(2024, 6, day, 18, 0, 0).unwrap(),
        }
    }

    fn reservation(day: u32, guests: u8, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::generate(),
            number: "BV-2024-001".to_string(),
            restaurant_id: RestaurantId::new("bella-vista"),
            restaurant_name: "Bella Vista".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            party_size: guests,
            contact: ReservationContact::default(),
            notes: None,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary() {
        let orders = vec![
            order(14, 4280, OrderStatus::Preparing, vec![]),
            order(14, 3891, OrderStatus::Completed, vec![]),
            order(14, 2000, OrderStatus::Cancelled, vec![]),
            order(13, 1000, OrderStatus::Ready, vec![]),
        ];
        let reservations = vec![
            reservation(14, 4, ReservationStatus::Confirmed),
            reservation(14, 2, ReservationStatus::Pending),
            reservation(14, 6, ReservationStatus::Cancelled),
            reservation(15, 3, ReservationStatus::Pending),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        let summary = DashboardSummary::build(&orders, &reservations, today).unwrap();
        assert_eq!(summary.orders_today, 3);
        assert_eq!(summary.revenue, eur(8171));
        assert_eq!(summary.average_order_value, eur(4086));
        assert_eq!(summary.open_orders, 2);
        assert_eq!(summary.reservations_today, 2);
        assert_eq!(summary.guests_today, 6);
        assert_eq!(summary.pending_reservations, 2);
    }

    #[test]
    fn test_empty_summary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let summary = DashboardSummary::build(&[], &[], today).unwrap();
        assert_eq!(summary.orders_today, 0);
        assert!(summary.revenue.is_zero());
        assert!(summary.average_order_value.is_zero());
    }

    #[test]
    fn test_menu_performance() {
        let orders = vec![
            order(
                14,
                0,
                OrderStatus::Completed,
                vec![
                    line("margherita", "Pizza Margherita", 1250, 2),
                    line("tiramisu", "Tiramisu", 650, 1),
                ],
            ),
            order(
                14,
                0,
                OrderStatus::Preparing,
                vec![
                    line("tiramisu", "Tiramisu", 650, 3),
                    line("carbonara", "Spaghetti Carbonara", 1390, 2),
                ],
            ),
            order(
                14,
                0,
                OrderStatus::Cancelled,
                vec![line("carbonara", "Spaghetti Carbonara", 1390, 5)],
            ),
        ];

        let performance = MenuPerformance::from_orders(&orders).unwrap();
        let names: Vec<_> = performance
            .items
            .iter()
            .map(|i| (i.display_name.as_str(), i.units))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Tiramisu", 4),
                ("Pizza Margherita", 2),
                ("Spaghetti Carbonara", 2)
            ]
        );
        assert_eq!(performance.items[0].revenue, eur(2600));
        assert_eq!(performance.top(1).len(), 1);
        assert_eq!(performance.top(10).len(), 3);
    }
}
