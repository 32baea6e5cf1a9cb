//! shake-server: milkshake ordering API
//!
//! Patrons configure drinks and place pickup orders priced with tiered
//! loyalty discounts and VAT; managers curate the menu and shop config and
//! read audit logs and reports.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod pricing;
pub mod services;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
