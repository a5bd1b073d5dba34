//! Course eligibility service.
//!
//! The [`admissions`] module holds the core pipeline: a typed course
//! catalog, an accumulating intake validator, the eligibility evaluator,
//! and the tiered recommendation engine, wrapped by a repository-backed
//! service facade and an axum router.

pub mod admissions;
pub mod config;
pub mod error;
pub mod telemetry;
