//! `loopcart products`

use std::io;

use clap::Args;

use crate::{
    catalog::{Catalog, CatalogFilter},
    report,
    storage::BlobStore,
    store::CartStore,
};

use super::CliError;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only this category
    #[arg(long)]
    category: Option<String>,

    /// Only this seller location
    #[arg(long)]
    location: Option<String>,

    /// Only products priced at or below this many rupees
    #[arg(long)]
    max_price: Option<u64>,

    /// Hide sold listings
    #[arg(long)]
    available: bool,
}

impl From<&ProductsArgs> for CatalogFilter {
    fn from(args: &ProductsArgs) -> Self {
        Self {
            category: args.category.clone(),
            location: args.location.clone(),
            max_price: args.max_price,
            available_only: args.available,
        }
    }
}

pub(crate) fn run<S: BlobStore>(
    args: &ProductsArgs,
    catalog: &Catalog,
    store: &CartStore<S>,
    out: impl io::Write,
) -> Result<(), CliError> {
    let filter = CatalogFilter::from(args);

    report::write_products(out, catalog.filter(&filter), store)?;

    Ok(())
}
