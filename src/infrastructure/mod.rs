//! Infrastructure layer - HTTP transport, logging and application services

pub mod llm;
pub mod logging;
pub mod services;
