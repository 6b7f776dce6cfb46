//! Bakery prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartCodecError, CartEntry, UnresolvedNamePolicy, codec},
    catalog::{Catalog, CatalogError, CatalogProvider},
    items::{CatalogItem, ImageRef},
    prices::{Price, PriceError},
    session::{Command, Flow, Screen, Session, SessionError},
};
