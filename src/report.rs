//! Report
//!
//! Terminal rendering of the catalog, cart and wishlist. Everything here only
//! reads store state.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    pricing::{CartSnapshot, format_rupees},
    products::Product,
    storage::BlobStore,
    store::CartStore,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write a table of catalog products, marking wishlisted ones.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_products<'a, S: BlobStore>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'a Product>,
    store: &CartStore<S>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();
    builder.push_record(["", "ID", "Product", "Category", "Location", "Condition", "Price"]);

    let mut rows = 0_usize;

    for product in products {
        let marker = if store.is_wishlisted(&product.id) { "♥" } else { "" };
        let name = if product.is_available {
            product.name.clone()
        } else {
            format!("{} (sold)", product.name)
        };

        builder.push_record([
            marker.to_string(),
            product.id.to_string(),
            name,
            product.category.clone(),
            product.location.clone(),
            product.condition.clone(),
            format_rupees(product.price),
        ]);

        rows += 1;
    }

    if rows == 0 {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the cart lines followed by the totals summary.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_cart<S: BlobStore>(
    mut out: impl io::Write,
    store: &CartStore<S>,
) -> Result<(), ReportError> {
    if store.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Location", "Price", "Qty", "Line Total"]);

    for line in store.lines() {
        builder.push_record([
            line.product_id.to_string(),
            line.name.clone(),
            line.location.clone(),
            format_rupees(line.price),
            line.quantity.to_string(),
            format_rupees(line.line_total()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;

    write_summary(out, &store.snapshot())
}

/// Write the subtotal, tax and total lines of a snapshot.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_summary(mut out: impl io::Write, snapshot: &CartSnapshot) -> Result<(), ReportError> {
    let rows = [
        ("Items:", snapshot.item_count.to_string()),
        ("Subtotal:", format_rupees(snapshot.subtotal)),
        ("Tax (5%):", format_rupees(snapshot.tax)),
        ("Total:", format_rupees(snapshot.total)),
    ];

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or_default();

    for (label, value) in rows {
        writeln!(out, " {label:<10} {value:>value_width$}")?;
    }

    Ok(())
}

/// Write the wishlist entries.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_wishlist<S: BlobStore>(
    mut out: impl io::Write,
    store: &CartStore<S>,
) -> Result<(), ReportError> {
    if store.wishlist().is_empty() {
        writeln!(out, "Your wishlist is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Location", "Price", "In Cart"]);

    for entry in store.wishlist() {
        let in_cart = store
            .line(&entry.id)
            .map(|line| line.quantity.to_string())
            .unwrap_or_default();

        builder.push_record([
            entry.id.to_string(),
            entry.name.clone(),
            entry.location.clone(),
            format_rupees(entry.price),
            in_cart,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " {} saved item(s)", store.wishlist_count())?;

    Ok(())
}
