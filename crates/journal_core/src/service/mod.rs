//! Lifecycle use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls around the pure lifecycle functions.
//! - Keep trigger/runner layers decoupled from storage details.

pub mod advance_service;
pub mod campaign_service;
pub mod daily_job;
pub mod journal_service;
