//! DTO modules that bridge services with templates and the JSON API.
//!
//! `*Query` types are deserialized straight from page query strings; filter
//! fields are optional text so a blank filter never fails extraction.

pub mod api;
pub mod appointments;
pub mod clients;
pub mod clinic_services;
pub mod pets;
pub mod products;
pub mod staff;
