//! Price a cart without placing an order.

use anyhow::{anyhow, Context as _, Result};
use feast_commerce::cart::{Cart, OrderTotals, Pricing, PromoTable};
use feast_commerce::catalog::{Catalog, Restaurant};
use feast_commerce::ids::ProductId;
use serde::Serialize;

use super::{parse_item_spec, QuoteArgs};
use crate::context::{find_restaurant, Context};

/// Cart contents and totals, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct Quote<'a> {
    pub restaurant: &'a str,
    pub mode: &'static str,
    pub items: Vec<String>,
    pub promo: Option<&'a str>,
    /// Why the requested `--promo` was not applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_error: Option<&'a str>,
    pub totals: OrderTotals,
}

/// A filled cart plus the outcome of the `--promo` option.
pub struct CartDraft<'a> {
    pub cart: Cart,
    pub restaurant: &'a Restaurant,
    pub promo_error: Option<String>,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let pricing = ctx.pricing()?;
    let draft = build_cart(&args, &catalog, &pricing, ctx)?;
    let totals = draft.cart.compute_totals(args.mode)?;

    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            restaurant: draft.restaurant.id.as_str(),
            mode: args.mode.as_str(),
            items: item_lines(&draft.cart),
            promo: draft.cart.active_promo().map(|p| p.code.as_str()),
            promo_error: draft.promo_error.as_deref(),
            totals,
        });
        return Ok(());
    }

    print_cart(
        &draft.cart,
        draft.restaurant,
        &totals,
        args.mode.display_name(),
        ctx,
    );
    Ok(())
}

/// Fill a cart from the `--item` options and apply the promo code.
///
/// An unknown promo code does not fail the quote; it is kept in
/// [`CartDraft::promo_error`] and the cart is priced without it.
pub fn build_cart<'a>(
    args: &QuoteArgs,
    catalog: &'a Catalog,
    pricing: &Pricing,
    ctx: &Context,
) -> Result<CartDraft<'a>> {
    let restaurant = find_restaurant(catalog, &args.restaurant)?;
    let mut cart = pricing.new_cart().for_restaurant(restaurant.id.clone());
    add_items(&mut cart, restaurant, &args.items)?;
    for item in cart.items() {
        ctx.output
            .debug(&format!("{} x{}", item.display_name, item.quantity));
    }

    let promo_error = args
        .promo
        .as_deref()
        .and_then(|code| apply_promo(&mut cart, &pricing.promos, code));
    match (&promo_error, cart.active_promo()) {
        (Some(reason), _) => ctx.output.warn(reason),
        (None, Some(promo)) => ctx.output.success(&format!(
            "Promo code {} applied: {}",
            promo.code, promo.description
        )),
        (None, None) => {}
    }

    Ok(CartDraft {
        cart,
        restaurant,
        promo_error,
    })
}

/// Add every `product[=qty]` spec; repeated products accumulate.
pub fn add_items(cart: &mut Cart, restaurant: &Restaurant, specs: &[String]) -> Result<()> {
    for spec in specs {
        let (id, quantity) = parse_item_spec(spec)?;
        let product_id = ProductId::new(id);
        let item = restaurant
            .require_item(&product_id)
            .with_context(|| format!("Not on the menu of {}", restaurant.name))?;

        let wanted = cart
            .quantity_of(&product_id)
            .checked_add(quantity)
            .ok_or_else(|| anyhow!("Quantity too large for item '{}'", spec))?;
        cart.add_item(item)?;
        cart.set_quantity(&product_id, wanted)?;
    }
    Ok(())
}

/// Apply `code`, returning the rejection message if it is not accepted.
pub fn apply_promo(cart: &mut Cart, promos: &PromoTable, code: &str) -> Option<String> {
    cart.apply_promo_code(promos, code)
        .err()
        .map(|e| e.to_string())
}

/// "2x Pizza Margherita" per line.
pub fn item_lines(cart: &Cart) -> Vec<String> {
    cart.items()
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.display_name))
        .collect()
}

/// Print the cart lines followed by the totals.
pub fn print_cart(
    cart: &Cart,
    restaurant: &Restaurant,
    totals: &OrderTotals,
    fee_label: &str,
    ctx: &Context,
) {
    ctx.output.header(&format!("Your order from {}", restaurant.name));
    let widths = [4, 26, 10];
    for item in cart.items() {
        let line_total = item
            .line_total()
            .map(|m| m.display())
            .unwrap_or_else(|_| "-".to_string());
        ctx.output.table_row(
            &[&format!("{}x", item.quantity), &item.display_name, &line_total],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.totals(totals, fee_label);
}
