//! Request-status analysis for mutual-aid request intake.
//!
//! Households submit tag-based requests (groceries, furniture, tutoring, ...)
//! and volunteers record outcomes as status tags. This crate turns those raw
//! tags into per-item delivered/timeout/invalid/missed/open classifications,
//! detects fulfillments across point-in-time snapshots, and renders the
//! results for reporting.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
