//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - 標準出力・標準エラーと終了コード
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **report**: 失敗の報告と終了コード
//! - **workflow**: ワークフロー全体のオーケストレーション

pub mod cli;
pub mod report;
pub mod workflow;

pub use cli::Args;
pub use workflow::{ArchiveWorkflow, Endpoints};
