/// End-to-end ordering and booking flows over a TOML catalog.
use chrono::{NaiveDate, NaiveTime};
use feast_commerce::prelude::*;

const CATALOG: &str = r#"
currency = "EUR"

[[restaurants]]
id = "bella-vista"
name = "Bella Vista"
cuisine = "Italienisch"
rating = 4.8
delivery_time = [25, 35]
location = "München Zentrum"
price_level = 3
delivery_fee = 2.99
minimum_order = 30.0

[[restaurants.menu]]
name = "Pizza"

[[restaurants.menu.items]]
id = "pizza-margherita"
name = "Pizza Margherita"
price = 12.50
popular = true

[[restaurants.menu]]
name = "Pasta"

[[restaurants.menu.items]]
id = "spaghetti-carbonara"
name = "Spaghetti Carbonara"
price = 13.90

[[restaurants]]
id = "sakura-sushi"
name = "Sakura Sushi"
cuisine = "Japanisch"
rating = 4.6
delivery_time = [30, 45]
location = "Schwabing"
price_level = 4
delivery_fee = 3.49

[[restaurants.menu]]
name = "Sushi"

[[restaurants.menu.items]]
id = "salmon-nigiri"
name = "Lachs Nigiri"
price = 6.90
"#;

fn catalog() -> Catalog {
    Catalog::from_toml_str(CATALOG).unwrap()
}

fn customer() -> CustomerInfo {
    CustomerInfo::new("Max", "Mustermann", "max@example.com", "+49 89 123456")
        .with_address("Marienplatz 1", "80331", "München")
}

#[test]
fn test_cart_to_order() {
    let catalog = catalog();
    let restaurant = catalog
        .restaurant(&RestaurantId::new("bella-vista"))
        .unwrap();
    let pizza = restaurant
        .menu_item(&ProductId::new("pizza-margherita"))
        .unwrap();
    let pasta = restaurant
        .menu_item(&ProductId::new("spaghetti-carbonara"))
        .unwrap();

    let pricing = Pricing::default();
    let mut cart = pricing.new_cart().for_restaurant(restaurant.id.clone());
    cart.add_item(pizza).unwrap();
    cart.add_item(pizza).unwrap();
    cart.add_item(pasta).unwrap();

    let totals = cart.compute_totals(FulfillmentMode::Delivery).unwrap();
    assert_eq!(totals.subtotal.amount_cents, 3890);
    assert_eq!(totals.discount.amount_cents, 0);
    assert_eq!(totals.total.amount_cents, 4280);

    cart.apply_promo_code(&pricing.promos, "WELCOME10").unwrap();
    let totals = cart.compute_totals(FulfillmentMode::Delivery).unwrap();
    assert_eq!(totals.discount.amount_cents, 389);
    assert_eq!(totals.total.amount_cents, 3891);

    let mut checkout = Checkout::new();
    let mut order = checkout
        .place_order(&cart, FulfillmentMode::Delivery, customer(), Some(restaurant))
        .unwrap();
    assert_eq!(order.order_number, "#12345");
    assert_eq!(order.restaurant_id, Some(RestaurantId::new("bella-vista")));
    assert_eq!(order.totals, totals);
    assert_eq!(
        order.item_summary(),
        vec!["2x Pizza Margherita", "1x Spaghetti Carbonara"]
    );

    order.advance().unwrap();
    order.advance().unwrap();
    assert_eq!(order.status, OrderStatus::OutForDelivery);

    let performance = MenuPerformance::from_orders(std::slice::from_ref(&order)).unwrap();
    assert_eq!(performance.items[0].display_name, "Pizza Margherita");
    assert_eq!(performance.items[0].units, 2);
}

#[test]
fn test_minimum_order_applies_to_delivery_only() {
    let catalog = catalog();
    let restaurant = catalog
        .restaurant(&RestaurantId::new("bella-vista"))
        .unwrap();
    let pizza = restaurant
        .menu_item(&ProductId::new("pizza-margherita"))
        .unwrap();

    let mut cart = Pricing::default().new_cart();
    cart.add_item(pizza).unwrap();

    let mut checkout = Checkout::new();
    let result = checkout.place_order(&cart, FulfillmentMode::Delivery, customer(), Some(restaurant));
    assert!(matches!(
        result,
        Err(CommerceError::BelowMinimumOrder { .. })
    ));

    let order = checkout
        .place_order(&cart, FulfillmentMode::Pickup, customer(), Some(restaurant))
        .unwrap();
    assert_eq!(order.order_number, "#12345");
    assert_eq!(order.totals.total.amount_cents, 1250);
}

#[test]
fn test_search_then_reserve() {
    let catalog = catalog();
    let results = SearchQuery::new()
        .with_query("sushi")
        .with_sort(SortOption::Rating)
        .run(&catalog);
    assert_eq!(results.len(), 1);
    let sakura = results[0];

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let request = ReservationRequest::new(
        sakura.id.clone(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        4,
        ReservationContact::new("Lena Huber", "lena@example.com", "0151 2345678"),
    );

    let mut book = ReservationBook::new();
    let id = {
        let reservation = book.book(request, &sakura.name, today).unwrap();
        assert_eq!(reservation.number, "SS-2024-001");
        reservation.id.clone()
    };
    book.confirm(&id).unwrap();

    let summary = DashboardSummary::build(&[], book.all(), today).unwrap();
    assert_eq!(summary.reservations_today, 1);
    assert_eq!(summary.guests_today, 4);
    assert_eq!(summary.pending_reservations, 0);
}
