//! HTTP request handlers

pub mod health;
pub mod history;
pub mod pipeline;
pub mod reports;
pub mod ui;
