//! Session Example
//!
//! Walks through one storefront session against the sample catalog: save a
//! couple of items, add to the cart, move a saved item over, then reload the
//! store from disk and print the cart and wishlist.

use std::io::{self, Write};

use anyhow::Result;

use loopcart::prelude::*;

/// Session Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::sample();

    {
        let mut store = CartStore::open(FileBlobStore::new(dir.path()));

        store.toggle_wishlist_by_id(&catalog, &ProductId::from("1"))?;
        store.toggle_wishlist_by_id(&catalog, &ProductId::from("3"))?;

        store.add_to_cart_by_id(&catalog, &ProductId::from("2"))?;
        store.add_to_cart_by_id(&catalog, &ProductId::from("2"))?;

        store.merge_wishlist_into_cart(&ProductId::from("1"));
    }

    let store = CartStore::open(FileBlobStore::new(dir.path()));

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_products(&mut handle, catalog.iter(), &store)?;
    writeln!(handle)?;
    write_cart(&mut handle, &store)?;
    writeln!(handle)?;
    write_wishlist(&mut handle, &store)?;

    let snapshot = store.checkout()?;

    println!("\nCheckout total: {}", format_rupees(snapshot.total));

    Ok(())
}
