//! Cart text form
//!
//! Carts travel as `{"items": {"<item name>": <quantity>, ...}}`. Only names and
//! quantities survive the trip; prices and images come back from the catalog the
//! text is resolved against.

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::{Cart, CartEntry},
    catalog::CatalogProvider,
    items::CatalogItem,
};

/// Errors that can occur while reading or writing the text form of a cart.
#[derive(Debug, Error)]
pub enum CartCodecError {
    /// The text is not a valid cart document.
    #[error("Failed to parse cart: {0}")]
    Parse(#[from] serde_json::Error),

    /// A line has a quantity of zero.
    #[error("Item {0} has a quantity of zero")]
    InvalidQuantity(String),

    /// A name is not in the catalog and the policy is [`UnresolvedNamePolicy::Fail`].
    #[error("Item {0} is not in the catalog")]
    UnresolvedName(String),

    /// Adding the named line would overflow the cart total.
    #[error("Item {0} pushes the cart total past its limit")]
    TotalOverflow(String),

    /// The cart could not be written out.
    #[error("Failed to write cart: {0}")]
    Encode(#[source] serde_json::Error),
}

/// What to do with a name that is not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedNamePolicy {
    /// Stand in a zero priced placeholder item with that name.
    #[default]
    SynthesizePlaceholder,

    /// Reject the whole cart.
    Fail,

    /// Drop the line.
    Skip,
}

#[derive(Debug, Deserialize)]
struct CartDocument {
    #[serde(default)]
    items: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize)]
struct CartDocumentRef<'a> {
    items: BTreeMap<&'a str, u32>,
}

/// Serialize a cart to its text form.
///
/// Names are written in sorted order so equal carts always produce equal text.
///
/// # Errors
///
/// Returns [`CartCodecError::Encode`] if the document can not be written.
pub fn serialize(cart: &Cart) -> Result<String, CartCodecError> {
    let document = CartDocumentRef {
        items: cart
            .entries()
            .map(|entry| (entry.item().name(), entry.quantity()))
            .collect(),
    };

    serde_json::to_string(&document).map_err(CartCodecError::Encode)
}

/// Parse the text form of a cart and resolve each name against `catalog`.
///
/// Lines come back in name order. No total is computed; see [`Cart::from_lines`].
/// Unknown fields are ignored and a missing `items` field reads as an empty cart.
///
/// # Errors
///
/// - [`CartCodecError::Parse`]: the text is not a valid cart document.
/// - [`CartCodecError::InvalidQuantity`]: a line has a quantity of zero.
/// - [`CartCodecError::UnresolvedName`]: a name is not in the catalog under
///   [`UnresolvedNamePolicy::Fail`].
pub fn deserialize<P>(
    text: &str,
    catalog: &P,
    policy: UnresolvedNamePolicy,
) -> Result<Vec<CartEntry>, CartCodecError>
where
    P: CatalogProvider + ?Sized,
{
    let document: CartDocument = serde_json::from_str(text)?;
    let mut lines = Vec::with_capacity(document.items.len());

    for (name, quantity) in document.items {
        if quantity == 0 {
            return Err(CartCodecError::InvalidQuantity(name));
        }

        let item = match (catalog.find(&name), policy) {
            (Some(item), _) => item.clone(),
            (None, UnresolvedNamePolicy::SynthesizePlaceholder) => {
                warn!(item = %name, "item not in catalog, synthesizing placeholder");
                CatalogItem::placeholder(name)
            }
            (None, UnresolvedNamePolicy::Skip) => {
                warn!(item = %name, "item not in catalog, skipping line");
                continue;
            }
            (None, UnresolvedNamePolicy::Fail) => {
                return Err(CartCodecError::UnresolvedName(name));
            }
        };

        lines.push(CartEntry::new(item, quantity));
    }

    Ok(lines)
}
