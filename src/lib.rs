// src/lib.rs

pub mod app;
pub mod config;
pub mod constants;
pub mod effects;
pub mod errors;
pub mod event;
pub mod input;
pub mod logging;
pub mod models;
pub mod simulator;
pub mod store;
pub mod tui;
pub mod ui;

pub use app::{App, Screen};
pub use errors::{NeuralError, NeuralResult};
