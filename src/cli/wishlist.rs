//! `loopcart wishlist` subcommands

use std::io;

use clap::{Args, Subcommand};

use crate::{
    catalog::Catalog, products::ProductId, report, storage::BlobStore, store::CartStore,
    wishlist::WishlistToggle,
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    pub(crate) command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum WishlistSubcommand {
    /// Show saved items
    Show,

    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product id
        id: ProductId,
    },

    /// Add a saved item to the cart as it was saved
    Move {
        /// Product id
        id: ProductId,
    },
}

pub(crate) fn run<S: BlobStore>(
    command: WishlistCommand,
    catalog: &Catalog,
    store: &mut CartStore<S>,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        WishlistSubcommand::Show => report::write_wishlist(out, store)?,
        WishlistSubcommand::Toggle { id } => match store.toggle_wishlist_by_id(catalog, &id)? {
            WishlistToggle::Added => writeln!(out, "Added to wishlist!")?,
            WishlistToggle::Removed => writeln!(out, "Removed from wishlist")?,
        },
        WishlistSubcommand::Move { id } => match store.merge_wishlist_into_cart(&id) {
            Some(line) => writeln!(out, "Added {} to cart!", line.name)?,
            None => writeln!(out, "{id} is not on your wishlist")?,
        },
    }

    Ok(())
}
