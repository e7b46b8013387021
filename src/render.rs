//! Render
//!
//! Terminal tables for a catalog page and a cart.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Page,
    products::{Product, StockLevel},
};

/// Errors that can occur when writing a table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output stream could not be written to.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Write one page of products as a table, followed by a page footer.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_page(mut out: impl io::Write, page: &Page<'_, '_>) -> Result<(), RenderError> {
    if page.is_empty() {
        writeln!(out, "\nNo products found.")?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["ID", "Name", "Category", "Price", "Rating", "Stock", "Tags"]);

        for product in page.iter() {
            builder.push_record(product_row(product));
        }

        writeln!(out, "\n{}", finish_table(builder, 3..5))?;
    }

    writeln!(
        out,
        " Page {} of {} ({} matches)\n",
        page.number(),
        page.total_pages().max(1),
        page.total_matches()
    )?;

    Ok(())
}

/// Write the cart's lines as a table, followed by the item count and total.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "\nYour cart is empty.\n")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Variant", "Qty", "Unit Price", "Line Total"]);

    for (idx, line) in cart.lines().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name().to_string(),
            line.variant().to_string(),
            line.quantity().to_string(),
            line.unit_price().to_string(),
            line.line_total().to_string(),
        ]);
    }

    writeln!(out, "\n{}", finish_table(builder, 3..6))?;
    writeln!(out, " Items: {}", cart.item_count())?;
    writeln!(out, " Total: {}\n", cart.total())?;

    Ok(())
}

/// Write the category list, one per line.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_categories(mut out: impl io::Write, categories: &[String]) -> Result<(), RenderError> {
    for category in categories {
        writeln!(out, "{category}")?;
    }

    Ok(())
}

fn product_row(product: &Product<'_>) -> [String; 7] {
    let stock = match product.stock_level() {
        StockLevel::Low => format!("{} (low)", product.stock),
        StockLevel::Medium | StockLevel::High => product.stock.to_string(),
    };

    [
        product.id.to_string(),
        product.name.clone(),
        product.category.clone(),
        product.price.to_string(),
        format!("{:.1}", product.rating),
        stock,
        product.tags.to_string(),
    ]
}

fn finish_table(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    table.to_string()
}
