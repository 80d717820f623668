//! MIS console - terminal client for the waterworks management information system.
//!
//! This library module exports the client, wizard, and view types for the
//! integration tests; the `mis-console` binary in src/main.rs is the product.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod stats;
pub mod ui;
pub mod wizard;
