//! Azure Adapter Modules
//!
//! Azure Blob Storage との統合

pub mod auth;
pub mod blob_client;

pub use auth::SharedKeyCredential;
pub use blob_client::AzureBlobRepository;
