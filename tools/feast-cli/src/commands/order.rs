//! Place an order.

use std::time::Duration;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use feast_commerce::checkout::{Checkout, CustomerInfo};

use super::OrderArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let pricing = ctx.pricing()?;
    let mode = args.quote.mode;

    let draft = super::quote::build_cart(&args.quote, &catalog, &pricing, ctx)?;
    ensure_promo_accepted(draft.promo_error.as_deref())?;
    let (cart, restaurant) = (draft.cart, draft.restaurant);
    let customer = customer_from_args(&args);
    customer.validate(mode)?;

    let totals = cart.compute_totals(mode)?;
    if !ctx.output.is_json() {
        super::quote::print_cart(&cart, restaurant, &totals, mode.display_name(), ctx);
        ctx.output.info("");
        ctx.output.kv("Name", &customer.full_name());
        if let Some(address) = customer.one_line_address() {
            ctx.output.kv("Deliver to", &address);
        }
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", totals.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let delay = ctx.config.checkout.submit_delay_ms;
    if delay > 0 {
        let spinner = ctx.output.spinner("Placing order...");
        tokio::time::sleep(Duration::from_millis(delay)).await;
        spinner.finish_and_clear();
    }

    let mut checkout = Checkout::new();
    let order = checkout.place_order(&cart, mode, customer, Some(restaurant))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!("Order {} placed", order.order_number));
    ctx.output.kv("Status", &status_badge(order.status.as_str()));
    ctx.output.kv("Total", &order.totals.total.display());
    ctx.output
        .kv("Estimated time", &restaurant.delivery_time.display());

    Ok(())
}

/// Customer details from the command line.
pub fn customer_from_args(args: &OrderArgs) -> CustomerInfo {
    let mut customer = CustomerInfo::new(
        args.first_name.clone(),
        args.last_name.clone(),
        args.email.clone(),
        args.phone.clone(),
    );
    customer.address = args.address.clone();
    customer.zip_code = args.zip.clone();
    customer.city = args.city.clone();
    customer.notes = args.notes.clone();
    customer
}

/// A rejected `--promo` stops the order instead of charging the full price.
pub fn ensure_promo_accepted(promo_error: Option<&str>) -> Result<()> {
    match promo_error {
        Some(reason) => bail!("{reason}. Order not placed; drop --promo to order without it"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_promo_blocks_order() {
        let err = ensure_promo_accepted(Some("Invalid promo code: BOGUS")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BOGUS"));
        assert!(message.contains("Order not placed"));
        assert!(ensure_promo_accepted(None).is_ok());
    }
}
