//! Show a restaurant's menu.

use anyhow::Result;

use super::MenuArgs;
use crate::context::{find_restaurant, Context};
use crate::output::format_rating;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let restaurant = find_restaurant(&catalog, &args.restaurant)?;

    if ctx.output.is_json() {
        if args.popular {
            ctx.output.json(&restaurant.popular_items());
        } else {
            ctx.output.json(&restaurant.menu);
        }
        return Ok(());
    }

    ctx.output.header(&restaurant.name);
    ctx.output.kv("Cuisine", &restaurant.cuisine);
    ctx.output.kv("Rating", &format_rating(restaurant.rating));
    ctx.output.kv("Location", &restaurant.location);
    ctx.output.kv("Delivery", &restaurant.delivery_time.display());
    if let Some(minimum) = restaurant.minimum_order {
        ctx.output.kv("Minimum order", &minimum.display());
    }

    let widths = [22, 26, 8];
    for category in &restaurant.menu {
        let items: Vec<_> = category
            .items
            .iter()
            .filter(|item| !args.popular || item.popular)
            .collect();
        if items.is_empty() {
            continue;
        }

        ctx.output.header(&category.name);
        for item in items {
            let name = if item.popular {
                format!("{} *", item.name)
            } else {
                item.name.clone()
            };
            ctx.output
                .table_row(&[item.id.as_str(), &name, &item.price.display()], &widths);
            if let Some(description) = &item.description {
                ctx.output.debug(description);
            }
        }
    }

    Ok(())
}
