//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **FetchLogsUseCase**: 集計ログの取得
//! - **StoreLogsUseCase**: 集計ログの保存

pub mod fetch_logs;
pub mod store_logs;
