//! # Parent Copilot Backend
//!
//! REST service for the parenting-assistant app: document CRUD over a
//! file-backed store, a periodic reminder sweep, and AI advisory calls
//! with fixed fallback content when the model is unavailable.

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod routes;
pub mod scheduler;
pub mod storage;
