//! `#[derive(Tabular)]`: field accessors and constants from `#[table(...)]` annotations.

mod attrs;
mod derive;

pub use derive::tabular_derive_impl;
