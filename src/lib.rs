//! # query-store-quay-logs
//!
//! 前日分の Quay 集計ログを取得し、Azure Blob Storage に `YYYY-MM-DD.json` として保存するツール
//!
//! 集計ログは個々のリクエストのユーザー名や IP を含まないため、公開しても問題ない。
//!
//! - **Domain層**: 処理対象日、ペイロード、エラー分類、Repository trait
//! - **Application層**: 取得・保存のユースケース
//! - **Adapter層**: Quay API、Azure Blob Storage、環境変数
//! - **Driver層**: CLI、ワークフロー、終了コード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
