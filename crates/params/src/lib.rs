//! Constant values for the latsig signature crates
//!
//! This crate holds the fixed numeric parameters shared by the arithmetic
//! layer (`latsig-algorithms`) and the signature scheme (`latsig-sign`).
//! It has no dependencies and no runtime behaviour.

#![no_std]

pub mod pqc;
pub mod utils;
