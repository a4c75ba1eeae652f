//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate progression rules and repository calls into use-case
//!   level APIs.
//! - Keep transport layers (HTTP, CLI) decoupled from storage details.

pub mod progress_service;
pub mod todo_service;
