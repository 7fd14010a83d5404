//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep console/HTTP front-ends decoupled from storage details.

pub mod employee_service;
