//! # Base types for gridchess
//!
//! This is an auxiliary crate for `gridchess`, which contains the plain value types shared by
//! the whole engine: board coordinates, colors, piece kinds, castling rights and their parse
//! errors.
//!
//! Normally you don't want to use this crate directly. Use `gridchess` instead.

pub mod geometry;
pub mod types;
