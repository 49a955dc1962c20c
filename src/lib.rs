//! ESG Copilot - Domain store and AI orchestration core
//!
//! This crate implements the entity graph and invariants behind an SME ESG
//! self-assessment (VSME), plus the orchestration layer that builds
//! context-aware requests to a generative AI service and degrades to
//! documented fallbacks when the service is unavailable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
