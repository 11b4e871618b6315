//! Health journey aggregation and grounded query engine.
//!
//! Loads one member's week-indexed record, derives dashboard views from it
//! (metric snapshots, per-week detail, intervention-annotated series) and
//! answers questions strictly from the recorded care-team conversations.

pub mod aggregate;
pub mod api;
pub mod assistant;
pub mod config;
pub mod correlate;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;
pub mod store;
pub mod timeline;
