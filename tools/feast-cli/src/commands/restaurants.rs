//! List the restaurants in the catalog.

use anyhow::Result;
use feast_commerce::catalog::Restaurant;
use feast_commerce::search::SearchQuery;

use super::RestaurantsArgs;
use crate::context::Context;
use crate::output::format_rating;

/// Run the restaurants command.
pub async fn run(args: RestaurantsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let restaurants = SearchQuery::new().with_sort(args.sort).run(&catalog);

    if ctx.output.is_json() {
        ctx.output.json(&restaurants);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Restaurants ({}, {})",
        restaurants.len(),
        args.sort.display_name()
    ));
    print_table(&restaurants, ctx);

    Ok(())
}

/// Print one row per restaurant.
pub fn print_table(restaurants: &[&Restaurant], ctx: &Context) {
    let widths = [18, 22, 14, 7, 5, 10, 8];
    ctx.output.table_row(
        &["ID", "NAME", "CUISINE", "RATING", "PRICE", "DELIVERY", "FEE"],
        &widths,
    );
    for restaurant in restaurants {
        ctx.output.table_row(
            &[
                restaurant.id.as_str(),
                &restaurant.name,
                &restaurant.cuisine,
                &format_rating(restaurant.rating),
                &restaurant.price_range(),
                &restaurant.delivery_time.display(),
                &restaurant.delivery_fee.display(),
            ],
            &widths,
        );
    }
}
