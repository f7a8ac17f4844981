//! Interactive store front end.
//!
//! A thin collaborator over the domain crates: it renders products, reads
//! product numbers and amounts, and turns domain errors into messages.

pub mod catalog;
pub mod config;
pub mod menu;

pub use config::CliConfig;
pub use menu::{Menu, MenuChoice};
