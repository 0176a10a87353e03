pub mod auth_service;
pub mod entry_service;
pub mod statistics_service;
