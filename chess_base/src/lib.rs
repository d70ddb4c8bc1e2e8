//! # Base types for fourchess
//!
//! This is an auxiliary crate for `fourchess`, which contains the core types and the board
//! geometry. It was split from the main crate to keep the plain data separate from the rules.
//!
//! Normally you don't want to use this crate directly. Use `fourchess` instead.

pub mod geometry;
pub mod types;
