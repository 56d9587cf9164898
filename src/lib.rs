//! Campaign creation wizard: the draft state store, section validation and
//! the client for the merchant campaigns API.

pub mod api;
pub mod app;
pub mod campaign;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod utils;
