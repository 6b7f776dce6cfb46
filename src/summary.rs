//! Summary
//!
//! Table rendering for the catalog menu and the order summary.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    cart::{Cart, CartEntry},
    catalog::{Catalog, CatalogProvider},
};

/// Writes the numbered catalog menu.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_menu(mut out: impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Price"]);

    for (position, item) in catalog.iter().enumerate() {
        builder.push_record([
            (position + 1).to_string(),
            item.name().to_string(),
            item.unit_price().to_money(catalog.currency()).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "{table}")
}

/// Writes the order summary: one row per cart line followed by the total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_order_summary(mut out: impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

    for entry in cart.entries() {
        builder.push_record(line_cells(entry, cart.currency()));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Total: {}", cart.total_money())
}

fn line_cells(entry: &CartEntry, currency: &'static Currency) -> [String; 4] {
    let item = entry.item();

    let name = if item.is_placeholder() {
        format!("{} (unavailable)", item.name())
    } else {
        item.name().to_string()
    };

    [
        name,
        entry.quantity().to_string(),
        item.unit_price().to_money(currency).to_string(),
        Money::from_decimal(entry.line_total(), currency).to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::UnresolvedNamePolicy,
        items::{CatalogItem, ImageRef},
        prices::Price,
    };

    #[test]
    fn menu_lists_every_item_with_its_position() -> TestResult {
        let catalog = Catalog::bakery();
        let mut out = Vec::new();

        write_menu(&mut out, &catalog)?;

        let output = String::from_utf8(out)?;

        for (position, item) in catalog.iter().enumerate() {
            let row = output
                .lines()
                .find(|line| line.contains(item.name()))
                .ok_or("missing menu row")?;

            assert!(row.contains(&(position + 1).to_string()), "row: {row}");
        }

        Ok(())
    }

    #[test]
    fn summary_of_empty_cart() -> TestResult {
        let cart = Cart::new(iso::RUB);
        let mut out = Vec::new();

        write_order_summary(&mut out, &cart)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn summary_lists_lines_and_total() -> TestResult {
        let catalog = Catalog::bakery();
        let mut cart = Cart::new(catalog.currency());
        let syrniki = catalog.find("Syrniki").ok_or("missing item")?;

        cart.add(syrniki);
        cart.add(syrniki);

        let mut out = Vec::new();

        write_order_summary(&mut out, &cart)?;

        let output = String::from_utf8(out)?;
        let row = output
            .lines()
            .find(|line| line.contains("Syrniki"))
            .ok_or("missing summary row")?;

        assert!(row.contains(" 2 "), "row: {row}");
        assert!(
            output.contains(&format!("Total: {}", cart.total_money())),
            "output: {output}"
        );

        Ok(())
    }

    #[test]
    fn summary_does_not_mark_real_item_named_placeholder() -> TestResult {
        let catalog = Catalog::from_yaml_str("items:\n  - name: placeholder\n    price: 5 RUB\n")?;
        let mut cart = Cart::new(catalog.currency());

        cart.add(catalog.find("placeholder").ok_or("missing item")?);

        let mut out = Vec::new();

        write_order_summary(&mut out, &cart)?;

        assert!(!String::from_utf8(out)?.contains("(unavailable)"));

        Ok(())
    }

    #[test]
    fn summary_marks_placeholder_items() -> TestResult {
        let catalog = Catalog::new(
            [CatalogItem::new(
                "Baguette",
                Price::from_units(40),
                ImageRef::new("baguette"),
            )],
            iso::RUB,
        )?;

        let cart = Cart::restore(
            r#"{"items":{"Ghost":1}}"#,
            &catalog,
            UnresolvedNamePolicy::SynthesizePlaceholder,
        )?;

        let mut out = Vec::new();

        write_order_summary(&mut out, &cart)?;

        assert!(String::from_utf8(out)?.contains("Ghost (unavailable)"));

        Ok(())
    }
}
