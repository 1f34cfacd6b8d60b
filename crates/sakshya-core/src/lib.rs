//! Core types and rule tables for the Sakshya confrontation engine.
//!
//! This crate has no HTTP or model-vendor dependencies. The
//! extractor, classifier and translator are expressed as traits in
//! [`services`]; adapters (`sakshya-gemini`) implement them and the server
//! wires everything together through [`pipeline::analyze`].

pub mod cache;
pub mod comparison;
pub mod error;
pub mod event;
pub mod filter;
pub mod heuristics;
pub mod ingest;
pub mod language;
pub mod pipeline;
pub mod report;
pub mod services;

pub use error::{Error, Result};
