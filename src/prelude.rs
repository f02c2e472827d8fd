//! `loopcart` prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::CartLine,
    catalog::{Catalog, CatalogError, CatalogFilter},
    pricing::{CartSnapshot, TAX_RATE, format_rupees, tax_for},
    products::{Product, ProductId},
    report::{ReportError, write_cart, write_products, write_summary, write_wishlist},
    storage::{
        BlobStore, CART_SLOT, FileBlobStore, MemoryBlobStore, SlotError, StorageError,
        WISHLIST_SLOT,
    },
    store::{CartStore, CartStoreError},
    wishlist::{WishlistEntry, WishlistToggle},
};
