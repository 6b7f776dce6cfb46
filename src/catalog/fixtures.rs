//! Catalog Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, RUB, USD};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogError},
    items::{CatalogItem, ImageRef},
    prices::Price,
};

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Items in display order
    pub items: Vec<ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Item name
    pub name: String,

    /// Item price (e.g., "40.00 RUB")
    pub price: String,

    /// Image reference; defaults to the item name
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut currency: Option<&'static Currency> = None;
        let mut items = Vec::with_capacity(fixture.items.len());

        for item in fixture.items {
            let (price, item_currency) = parse_price(&item.price)?;

            // All items must share the first item's currency
            match currency {
                Some(existing) if existing != item_currency => {
                    return Err(CatalogError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        item_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(item_currency),
            }

            let image = ImageRef::new(item.image.unwrap_or_else(|| item.name.clone()));

            items.push(CatalogItem::new(item.name, price, image));
        }

        Catalog::new(items, currency.ok_or(CatalogError::Empty)?)
    }
}

/// Parse price string (e.g., "40.00 RUB") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "RUB" => RUB,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((Price::new(amount)?, currency))
}
