//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details.
//! - Host the derived analytics (category scores, badges, daily gate) that
//!   are recomputed on demand and never cached in memory.

pub mod badge_engine;
pub mod challenge;
pub mod progress;
pub mod quiz_service;
pub mod task_service;
