//! Search restaurants.

use anyhow::Result;
use feast_commerce::search::{Filter, SearchQuery};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&args);
    ctx.output.debug(&format!("{} filter(s)", query.filters.len()));

    let results = query.run(&catalog);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    if results.is_empty() {
        ctx.output.warn("No restaurants match your search");
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} result(s), {}",
        results.len(),
        args.sort.display_name()
    ));
    super::restaurants::print_table(&results, ctx);

    Ok(())
}

/// Translate command-line options into a query.
pub fn build_query(args: &SearchArgs) -> SearchQuery {
    let mut query = SearchQuery::new().with_sort(args.sort);

    if let Some(text) = &args.query {
        query = query.with_query(text.clone());
    }
    if !args.cuisines.is_empty() {
        query = query.with_filter(Filter::cuisines(args.cuisines.iter().cloned()));
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        query = query.with_filter(Filter::price_level(
            args.min_price.unwrap_or(1),
            args.max_price.unwrap_or(4),
        ));
    }
    if let Some(min) = args.min_rating {
        query = query.with_filter(Filter::Rating { min });
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }

    query
}
