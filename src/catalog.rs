//! Catalog
//!
//! The fixed, read-only list of items a storefront sells. A catalog is built once
//! (from the built-in bakery list or a YAML fixture) and never mutated afterwards.

use std::path::Path;

use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    items::{CatalogItem, ImageRef},
    prices::{Price, PriceError},
};

pub mod fixtures;

/// Catalog construction and loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid price amount
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two items share a name
    #[error("Duplicate item name: {0}")]
    DuplicateName(String),

    /// The catalog has no items
    #[error("Catalog has no items; currency unknown")]
    Empty,
}

/// Supplies the ordered list of items available for purchase.
pub trait CatalogProvider {
    /// Returns every item, in display order.
    fn list(&self) -> &[CatalogItem];

    /// Returns the currency all item prices are expressed in.
    fn currency(&self) -> &'static Currency;

    /// Finds an item by exact name.
    fn find(&self, name: &str) -> Option<&CatalogItem> {
        self.list().iter().find(|item| item.name() == name)
    }
}

/// An ordered catalog with unique item names.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a new catalog from the given items.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if two items share a name.
    pub fn new(
        items: impl Into<Vec<CatalogItem>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let items = items.into();
        let mut index = FxHashMap::default();

        for (position, item) in items.iter().enumerate() {
            if index.insert(item.name().to_string(), position).is_some() {
                return Err(CatalogError::DuplicateName(item.name().to_string()));
            }
        }

        debug!(items = items.len(), currency = currency.iso_alpha_code, "catalog built");

        Ok(Self {
            items,
            index,
            currency,
        })
    }

    /// The built-in bakery catalog.
    pub fn bakery() -> Self {
        let items = [
            ("Baguette", 40, "baguette"),
            ("Croissant", 50, "croissant"),
            ("Cherry Pie", 150, "cherry_pie"),
            ("Syrniki", 80, "syrniki"),
            ("Napoleon Cake", 350, "napoleon_cake"),
        ]
        .map(|(name, price, image)| {
            CatalogItem::new(name, Price::from_units(price), ImageRef::new(image))
        });

        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.name().to_string(), position))
            .collect();

        Self {
            items: items.into(),
            index,
            currency: iso::RUB,
        }
    }

    /// Load a catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the items are invalid.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;

        debug!(path = %path.as_ref().display(), "loading catalog fixture");

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from a YAML fixture string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price is invalid, the items use
    /// more than one currency, two items share a name, or there are no items.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: fixtures::CatalogFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }

    /// Returns the item at the given position.
    pub fn get(&self, position: usize) -> Option<&CatalogItem> {
        self.items.get(position)
    }

    /// Iterate over the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    /// Get the number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl CatalogProvider for Catalog {
    fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn find(&self, name: &str) -> Option<&CatalogItem> {
        self.index
            .get(name)
            .and_then(|position| self.items.get(*position))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bakery_catalog_lists_items_in_order() {
        let catalog = Catalog::bakery();

        let names: Vec<&str> = catalog.iter().map(CatalogItem::name).collect();

        assert_eq!(
            names,
            ["Baguette", "Croissant", "Cherry Pie", "Syrniki", "Napoleon Cake"]
        );
        assert_eq!(catalog.currency(), iso::RUB);
    }

    #[test]
    fn find_uses_exact_name() {
        let catalog = Catalog::bakery();

        assert_eq!(
            catalog.find("Croissant").map(CatalogItem::unit_price),
            Some(Price::from_units(50))
        );
        assert!(catalog.find("croissant").is_none());
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let items = [
            CatalogItem::new("Baguette", Price::from_units(40), ImageRef::new("a")),
            CatalogItem::new("Baguette", Price::from_units(45), ImageRef::new("b")),
        ];

        let result = Catalog::new(items, iso::RUB);

        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Baguette"));
    }

    #[test]
    fn get_by_position() -> TestResult {
        let catalog = Catalog::bakery();

        let item = catalog.get(4).ok_or("missing item")?;

        assert_eq!(item.name(), "Napoleon Cake");
        assert!(catalog.get(5).is_none());

        Ok(())
    }

    #[test]
    fn provided_find_scans_the_list() -> TestResult {
        struct Fixed(Vec<CatalogItem>);

        impl CatalogProvider for Fixed {
            fn list(&self) -> &[CatalogItem] {
                &self.0
            }

            fn currency(&self) -> &'static Currency {
                iso::USD
            }
        }

        let provider = Fixed(vec![CatalogItem::new(
            "Bagel",
            Price::from_units(2),
            ImageRef::new("bagel"),
        )]);

        let item = provider.find("Bagel").ok_or("missing item")?;

        assert_eq!(item.unit_price(), Price::from_units(2));
        assert!(provider.find("Donut").is_none());

        Ok(())
    }
}
