//! `loopcart` CLI
//!
//! The composition root: configuration is resolved, the catalog and a
//! file-backed [`CartStore`] are opened once, and a single subcommand runs
//! against them.

use std::io;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    pricing::format_rupees,
    report::{self, ReportError},
    storage::{BlobStore, FileBlobStore},
    store::{CartStore, CartStoreError},
};

mod cart;
mod config;
pub mod logging;
mod products;
mod wishlist;

pub use config::Config;

/// Errors reported by a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A cart operation was refused.
    #[error(transparent)]
    Store(#[from] CartStoreError),

    /// Rendering a table failed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Writing a message failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// `loopcart` command line
#[derive(Debug, Parser)]
#[command(name = "loopcart", about = "LoopCart storefront cart and wishlist", long_about = None)]
pub struct Cli {
    /// Global settings
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Products(products::ProductsArgs),

    /// Show or change the cart
    Cart(cart::CartCommand),

    /// Show or change the wishlist
    Wishlist(wishlist::WishlistCommand),

    /// Show the checkout total
    Checkout,
}

impl Cli {
    /// Open the configured catalog and store, then run the subcommand.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] if the command is refused or output cannot be
    /// written.
    pub fn run(self, out: impl io::Write) -> Result<(), CliError> {
        let catalog = Catalog::load_or_sample(self.config.catalog.as_deref());
        let mut store = CartStore::open(FileBlobStore::new(&self.config.data_dir));

        self.command.run(&catalog, &mut store, out)
    }
}

impl Commands {
    fn run<S: BlobStore>(
        self,
        catalog: &Catalog,
        store: &mut CartStore<S>,
        out: impl io::Write,
    ) -> Result<(), CliError> {
        match self {
            Commands::Products(args) => products::run(&args, catalog, store, out),
            Commands::Cart(command) => cart::run(command, catalog, store, out),
            Commands::Wishlist(command) => wishlist::run(command, catalog, store, out),
            Commands::Checkout => checkout(store, out),
        }
    }
}

fn checkout<S: BlobStore>(store: &CartStore<S>, mut out: impl io::Write) -> Result<(), CliError> {
    let snapshot = store.checkout()?;

    report::write_summary(&mut out, &snapshot)?;
    writeln!(
        out,
        "Proceeding to checkout with total: {}",
        format_rupees(snapshot.total)
    )?;

    Ok(())
}
