//! Emission resolution and calculation engine
//!
//! Resolves time-versioned, per-gas emission factors and GWP values into
//! emission contexts, classifies hybrid vehicles, and computes
//! theoretical/real emissions and their delta. Every public operation is
//! a pure function of its explicit inputs plus read-only catalog data.

pub mod model;
pub mod repository;
pub mod service;
