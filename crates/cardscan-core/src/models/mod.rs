//! Data models for scanned cards and configuration.

pub mod config;
pub mod contact;
