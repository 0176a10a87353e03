//! Personal finance tracking API: token-authenticated users record incoming
//! and outgoing monetary entries and query aggregate statistics over them.

pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;
