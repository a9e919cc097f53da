//! Configuration and domain types shared by both handlers

pub mod config;
pub mod models;
