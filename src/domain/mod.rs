//! Domain aggregates exposed by the console service layer.

pub mod appointment;
pub mod client;
pub mod pet;
pub mod product;
pub mod service;
pub mod types;
pub mod user;
