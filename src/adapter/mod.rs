//! Adapter Layer
//!
//! 外部システム（Quay, Azure Blob Storage, 環境変数）との統合

pub mod azure;
pub mod config;
mod error;
pub mod quay;
