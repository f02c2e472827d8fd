//! `loopcart cart` subcommands

use std::io;

use clap::{Args, Subcommand};

use crate::{
    catalog::Catalog, products::ProductId, report, storage::BlobStore, store::CartStore,
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    pub(crate) command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CartSubcommand {
    /// Show cart lines and totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the quantity of a product already in the cart (0 removes it)
    Set {
        /// Product id
        id: ProductId,

        /// New quantity
        quantity: u32,
    },

    /// Remove everything from the cart
    Clear,
}

pub(crate) fn run<S: BlobStore>(
    command: CartCommand,
    catalog: &Catalog,
    store: &mut CartStore<S>,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        CartSubcommand::Show => report::write_cart(out, store)?,
        CartSubcommand::Add { id } => {
            let line = store.add_to_cart_by_id(catalog, &id)?;
            writeln!(out, "{} added to cart! (quantity {})", line.name, line.quantity)?;
        }
        CartSubcommand::Remove { id } => {
            if store.remove_from_cart(&id) {
                writeln!(out, "Item removed from cart")?;
            } else {
                writeln!(out, "{id} is not in your cart")?;
            }
        }
        CartSubcommand::Set { id, quantity } => {
            let in_cart = store.line(&id).is_some();

            match store.set_quantity(&id, quantity) {
                Some(line) => writeln!(out, "{} quantity set to {}", line.name, line.quantity)?,
                None if in_cart => writeln!(out, "Item removed from cart")?,
                None => writeln!(out, "{id} is not in your cart")?,
            }
        }
        CartSubcommand::Clear => {
            if store.clear_cart() == 0 {
                writeln!(out, "Cart is already empty!")?;
            } else {
                writeln!(out, "Cart cleared successfully!")?;
            }
        }
    }

    Ok(())
}
