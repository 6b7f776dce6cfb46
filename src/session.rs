//! Session
//!
//! The terminal storefront. A [`Session`] owns the catalog, the cart and the
//! current screen; input lines are parsed into [`Command`]s and the cart is only
//! ever changed through its `add`, `remove` and `reset` operations.

use std::{
    io::{self, BufRead},
    iter, str,
};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, UnresolvedNamePolicy},
    catalog::{Catalog, CatalogProvider},
    items::CatalogItem,
    summary::{write_menu, write_order_summary},
};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The screen the storefront is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Welcome page.
    #[default]
    Start,

    /// Catalog and cart editing.
    Order,

    /// Order confirmation.
    Summary,

    /// About page.
    About,
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,

    /// End the session.
    Quit,
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// A storefront command, one per input line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the catalog
    Menu,

    /// Add one unit of an item (name or menu number)
    Add {
        /// Item name or menu number
        #[arg(allow_hyphen_values = true)]
        item: String,
    },

    /// Remove one unit of an item (name or menu number)
    Remove {
        /// Item name or menu number
        #[arg(allow_hyphen_values = true)]
        item: String,
    },

    /// Show the order summary
    Cart,

    /// Confirm the order, then return to the start page
    Checkout,

    /// Return to the start page
    #[command(alias = "back")]
    Home,

    /// Empty the cart
    Reset,

    /// Print the cart as JSON
    Export,

    /// Replace the cart with one exported earlier
    Import {
        /// Cart JSON
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// About the bakery
    About,

    /// Leave the storefront
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parse a single input line.
    ///
    /// The first word names the command. Everything after it, with the outer
    /// whitespace trimmed, is passed through verbatim as the argument.
    ///
    /// # Errors
    ///
    /// Returns a clap error for unknown commands, missing arguments and `help`.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        let line = line.trim();

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim_start())),
            None => (line, None),
        };

        CommandLine::try_parse_from(iter::once(name).chain(rest)).map(|parsed| parsed.command)
    }
}

/// An interactive storefront session.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    screen: Screen,
    policy: UnresolvedNamePolicy,
}

impl Session {
    /// Start a session with an empty cart.
    pub fn new(catalog: Catalog, policy: UnresolvedNamePolicy) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            cart,
            screen: Screen::Start,
            policy,
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the cart, for display.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run a command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn execute(
        &mut self,
        command: Command,
        mut out: impl io::Write,
    ) -> Result<Flow, SessionError> {
        debug!(?command, screen = ?self.screen, "executing command");

        match command {
            Command::Menu => {
                self.screen = Screen::Order;
                write_menu(&mut out, &self.catalog)?;
            }
            Command::Add { item } => self.add(&item, out)?,
            Command::Remove { item } => self.remove(&item, out)?,
            Command::Cart => {
                self.screen = Screen::Summary;
                write_order_summary(&mut out, &self.cart)?;
            }
            Command::Checkout => {
                write_order_summary(&mut out, &self.cart)?;
                writeln!(out, "Payment is not implemented yet.")?;

                info!(
                    lines = self.cart.len(),
                    total = %self.cart.total(),
                    "checkout reached payment stub"
                );

                self.screen = Screen::Start;
                writeln!(out, "Back at the start page.")?;
            }
            Command::Home => {
                self.screen = Screen::Start;
                writeln!(out, "Back at the start page.")?;
            }
            Command::Reset => {
                self.cart.reset();
                writeln!(out, "Cart emptied.")?;
            }
            Command::Export => match self.cart.serialize() {
                Ok(text) => writeln!(out, "{text}")?,
                Err(err) => {
                    warn!(error = %err, "cart export failed");
                    writeln!(out, "Could not export cart: {err}")?;
                }
            },
            Command::Import { text } => self.import(&text, out)?,
            Command::About => {
                self.screen = Screen::About;
                writeln!(
                    out,
                    "A neighbourhood bakery. Fresh bread, pastries and cakes every morning."
                )?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Read commands from `input` until it ends or the user quits.
    ///
    /// Lines that do not parse, or are not valid UTF-8, are reported to `out` and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `input` or writing `out` fails.
    pub fn run(
        &mut self,
        mut input: impl BufRead,
        mut out: impl io::Write,
    ) -> Result<(), SessionError> {
        writeln!(out, "Welcome! Type `menu` to start an order or `help` for commands.")?;

        let mut buf = Vec::new();

        loop {
            buf.clear();

            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let Ok(line) = str::from_utf8(&buf) else {
                warn!(bytes = buf.len(), "input line is not valid UTF-8");
                writeln!(out, "Input is not valid UTF-8; line skipped.")?;
                continue;
            };

            if line.trim().is_empty() {
                continue;
            }

            let flow = match Command::parse_line(line) {
                Ok(command) => self.execute(command, &mut out)?,
                Err(err) => {
                    write!(out, "{}", err.render())?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(out, "Goodbye!")?;

        Ok(())
    }

    fn add(&mut self, query: &str, mut out: impl io::Write) -> io::Result<()> {
        self.screen = Screen::Order;

        let Some(item) = resolve(&self.catalog, query) else {
            return writeln!(out, "No item named {query} on the menu.");
        };

        self.cart.add(item);

        writeln!(
            out,
            "Added {}. Total: {}",
            item.name(),
            self.cart.total_money()
        )
    }

    fn remove(&mut self, query: &str, mut out: impl io::Write) -> io::Result<()> {
        self.screen = Screen::Order;

        let Some(item) = resolve(&self.catalog, query) else {
            return writeln!(out, "No item named {query} on the menu.");
        };

        if self.cart.quantity_of(item.name()) == 0 {
            return writeln!(out, "{} is not in your cart.", item.name());
        }

        self.cart.remove(item);

        writeln!(
            out,
            "Removed {}. Total: {}",
            item.name(),
            self.cart.total_money()
        )
    }

    fn import(&mut self, text: &str, mut out: impl io::Write) -> io::Result<()> {
        match Cart::restore(text, &self.catalog, self.policy) {
            Ok(cart) => {
                self.cart = cart;

                writeln!(
                    out,
                    "Imported {} item(s). Total: {}",
                    self.cart.item_count(),
                    self.cart.total_money()
                )
            }
            Err(err) => {
                warn!(error = %err, "cart import failed");

                writeln!(out, "Could not import cart: {err}")
            }
        }
    }
}

/// Finds an item by exact name, falling back to its 1-based menu number.
fn resolve<'c>(catalog: &'c Catalog, query: &str) -> Option<&'c CatalogItem> {
    catalog.find(query).or_else(|| {
        query
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|position| catalog.get(position))
    })
}
