//! # cf-core
//!
//! Core types and error types for CodeFlow.
//!
//! This crate provides the foundational types shared across all CodeFlow crates:
//! - Entity structs for the marketplace read models (profiles, listings)
//! - Enumerations mirrored from the hosted database (roles, pricing models, ...)
//! - The authenticated identity and session produced by `cf-auth`
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
