//! TourWithMe - site content store with an admin gate.
//!
//! The store (`store`) owns all site content and mirrors every change to a
//! key-value `Storage`. Consumers reach it through an explicitly passed
//! `context::Context`; `router` decides which pages a session may render.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod logger;
pub mod router;
pub mod serve;
pub mod store;
