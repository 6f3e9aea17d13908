//! Quay Adapter Modules
//!
//! Quay API との統合

pub mod client;

pub use client::QuayLogRepository;
