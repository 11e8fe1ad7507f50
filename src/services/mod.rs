pub mod health_monitor;
pub mod media;
pub mod token_service;
