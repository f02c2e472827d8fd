//! `loopcart`
//!
//! Cart, wishlist and pricing engine for a second-hand storefront.
//!
//! A [`store::CartStore`] owns the cart lines and the wishlist, computes totals
//! with 5% tax and writes every change through to a [`storage::BlobStore`].
//! Products come from a [`catalog::Catalog`], which falls back to built-in
//! sample listings whenever the configured catalog cannot be read.

pub mod cart;
pub mod catalog;
pub mod cli;
pub mod pricing;
pub mod products;
pub mod report;
pub mod storage;
pub mod store;
pub mod wishlist;

pub mod prelude;
