//! Infrastructure services

mod insights_service;

pub use insights_service::{InsightsReply, InsightsService};
