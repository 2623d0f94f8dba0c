//! Pure simulation logic for Liminal.
//!
//! This crate contains all game math that is independent of the ECS engine,
//! renderer, or audio backend. Functions take plain data and return results,
//! making them unit-testable and portable between the game engine and the
//! headless simtest harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cellrng`] | Deterministic per-cell PRNG (Mulberry32, coordinate-seeded) |
//! | [`collision`] | Radius-expanded AABB tests and axis-separated movement sweep |
//! | [`config`] | Quality tiers and movement tuning |
//! | [`constants`] | Gameplay tuning constants (speeds, drain rates, enemy stats) |
//! | [`geometry`] | Vec3 and Aabb primitives |
//! | [`stats`] | Sanity/stamina resource model and proximity signal |

pub mod cellrng;
pub mod collision;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod stats;
