//! # Base types for warchess
//!
//! This is an auxiliary crate for `warchess`, which contains the plain board and piece types
//! shared by the engine. It carries no game logic.
//!
//! Normally you don't want to use this crate directly. Use `warchess` instead.

pub mod geometry;
pub mod types;
