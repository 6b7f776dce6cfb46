//! Cart
//!
//! The cart ledger: an ordered set of lines keyed by item name, plus a running
//! total that always equals the sum of `quantity × unit price` over every line.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    catalog::CatalogProvider,
    items::CatalogItem,
    prices::Price,
};

pub mod codec;

pub use codec::{CartCodecError, UnresolvedNamePolicy};

/// A single cart line. The quantity is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    item: CatalogItem,
    quantity: u32,
}

impl CartEntry {
    pub(crate) fn new(item: CatalogItem, quantity: u32) -> Self {
        debug_assert!(quantity > 0, "cart entries can not be empty");

        Self { item, quantity }
    }

    /// Returns the item on this line.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Returns the line quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns `quantity × unit price`.
    ///
    /// Lines are only ever built when their price fits in a [`Decimal`], so the
    /// product is always representable.
    pub fn line_total(&self) -> Decimal {
        line_price(self.item.unit_price(), self.quantity).unwrap_or(Decimal::MAX)
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    entries: SmallVec<[CartEntry; 8]>,
    total: Decimal,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            entries: SmallVec::new(),
            total: Decimal::ZERO,
            currency,
        }
    }

    /// Rebuild a cart, and its total, from previously deserialized lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartCodecError::TotalOverflow`] if a line would push the total past
    /// what a [`Decimal`] can hold.
    pub fn from_lines(
        lines: impl IntoIterator<Item = CartEntry>,
        currency: &'static Currency,
    ) -> Result<Self, CartCodecError> {
        let mut cart = Cart::new(currency);

        for line in lines {
            cart.increment(&line.item, line.quantity)
                .map_err(|_overflow| CartCodecError::TotalOverflow(line.item.name().to_string()))?;
        }

        Ok(cart)
    }

    /// Parse the text form of a cart and rebuild it against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartCodecError`] if the text is malformed, a quantity is zero, a
    /// name can not be resolved under [`UnresolvedNamePolicy::Fail`], or the total
    /// would overflow.
    pub fn restore<P>(
        text: &str,
        catalog: &P,
        policy: UnresolvedNamePolicy,
    ) -> Result<Self, CartCodecError>
    where
        P: CatalogProvider + ?Sized,
    {
        let lines = codec::deserialize(text, catalog, policy)?;

        Cart::from_lines(lines, catalog.currency())
    }

    /// Add one unit of `item` to the cart.
    ///
    /// An add that would overflow the line quantity or the total is ignored and
    /// logged, leaving the cart unchanged.
    pub fn add(&mut self, item: &CatalogItem) {
        if let Err(overflow) = self.increment(item, 1) {
            warn!(item = item.name(), %overflow, "add ignored");
        }
    }

    /// Remove one unit of `item` from the cart.
    ///
    /// The line is dropped once its quantity reaches zero. Removing an item that is not
    /// in the cart leaves both the lines and the total untouched.
    pub fn remove(&mut self, item: &CatalogItem) {
        let Some(position) = self.position(item.name()) else {
            debug!(item = item.name(), "remove of item not in cart ignored");
            return;
        };

        let Some(entry) = self.entries.get_mut(position) else {
            return;
        };

        // Every unit on the line was counted into the total, so this stays >= 0
        self.total -= *entry.item.unit_price();

        if entry.quantity > 1 {
            entry.quantity -= 1;

            debug!(item = item.name(), quantity = entry.quantity, "removed item from cart");
        } else {
            self.entries.remove(position);

            debug!(item = item.name(), "removed last unit, line dropped");
        }
    }

    /// Empty the cart.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.total = Decimal::ZERO;

        debug!("cart reset");
    }

    /// Serialize the cart to its text form. See [`codec::serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`CartCodecError::Encode`] if the document can not be written.
    pub fn serialize(&self) -> Result<String, CartCodecError> {
        codec::serialize(self)
    }

    /// Iterate over the cart lines in the order they were first added.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Returns the quantity of the named item, or zero if it is not in the cart.
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.item.name() == name)
            .map_or(0, CartEntry::quantity)
    }

    /// Returns the running total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the running total as money in the cart currency.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total, self.currency)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the number of units across every line.
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.item.name() == name)
    }

    // Lines are keyed by name: a same-named item joins the existing line and is
    // priced at that line's unit price. On overflow nothing is changed.
    fn increment(&mut self, item: &CatalogItem, by: u32) -> Result<(), Overflow> {
        if by == 0 {
            return Ok(());
        }

        let Some(position) = self.position(item.name()) else {
            self.total = line_price(item.unit_price(), by)
                .and_then(|amount| self.total.checked_add(amount))
                .ok_or(Overflow::Total)?;
            self.entries.push(CartEntry::new(item.clone(), by));

            debug!(item = item.name(), quantity = by, "added new line to cart");
            return Ok(());
        };

        let Some(entry) = self.entries.get_mut(position) else {
            return Ok(());
        };

        let quantity = entry.quantity.checked_add(by).ok_or(Overflow::Quantity)?;

        let total = line_price(entry.item.unit_price(), by)
            .and_then(|amount| self.total.checked_add(amount))
            .ok_or(Overflow::Total)?;

        if entry.item.unit_price() != item.unit_price() {
            warn!(
                item = item.name(),
                line_price = %entry.item.unit_price(),
                item_price = %item.unit_price(),
                "same-named item priced differently; keeping the line price"
            );
        }

        entry.quantity = quantity;
        self.total = total;

        debug!(item = item.name(), quantity, "added item to cart");

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overflow {
    Quantity,
    Total,
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overflow::Quantity => f.write_str("line quantity limit reached"),
            Overflow::Total => f.write_str("cart total limit reached"),
        }
    }
}

fn line_price(price: Price, quantity: u32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}
