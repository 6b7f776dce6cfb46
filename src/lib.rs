//! Bakery
//!
//! A small bakery storefront: a fixed catalog, a cart ledger with an exact running
//! total and a lossy text form, and a terminal session that drives them.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod logging;
pub mod prelude;
pub mod prices;
pub mod session;
pub mod summary;
