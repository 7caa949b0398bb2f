//! # STS Rust Backend
//!
//! Scheduling engine for a school timetable administration system.
//!
//! This crate manages a weekly recurring timetable: class periods tying a
//! class, a teacher and a subject to a day of week and a `[start, end)`
//! time-of-day range. Every mutation is checked for teacher and class
//! double-bookings before it is committed. The backend exposes a REST API
//! via Axum for the administrative frontend.
//!
//! ## Features
//!
//! - **Time Model**: naive time-of-day values with seconds precision and
//!   half-open interval overlap testing
//! - **Conflict Detection**: teacher-scope and class-scope collision checks
//!   with operator-readable conflict reports
//! - **Mutation Orchestration**: validated, conflict-checked, atomic
//!   create/update/delete of timetable entries
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and directory records shared across layers
//! - [`models`]: The time model and timetable entry types
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`scheduler`]: Conflict detection and the mutation orchestrator
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod db;
pub mod models;
pub mod scheduler;

#[cfg(feature = "http-server")]
pub mod http;
