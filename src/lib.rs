//! # weft
//!
//! A parser toolkit for the weft configuration format.
//!
//! The crate currently holds the source-position core shared by the parser
//! and the diagnostics printer; see [`weft::srcpos`].

pub mod weft;
