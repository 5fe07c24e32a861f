//! hittop: website analytics in the terminal. Library surface for the binary and tests.

pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod credentials;
pub mod dashboard;
pub mod demo;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod profiles;
pub mod scheduler;
pub mod types;
pub mod ui;
