//! # Domain Services
//!
//! Pure policy functions that don't naturally belong to a single entity.
//!
//! ## Services
//!
//! - [`category_policy`]: packaging defaults for art, book, and fashion items

pub mod category_policy;

pub use category_policy::{
    PackagingDefaults, art_shipping, book_shipping, defaults_for, fashion_shipping,
};
