// src/core/mod.rs
pub mod config;
pub mod keys;
pub mod vault;
