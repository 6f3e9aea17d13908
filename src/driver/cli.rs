//! CLI Argument Parsing
//!
//! CLIの引数解析（引数は取らない。`--help` と `--version` のみ）

use clap::Parser;

/// 前日分の Quay 集計ログを Azure Blob Storage に保存するCLI
///
/// 設定はすべて環境変数から読み込む。
#[derive(Parser, Debug, Clone)]
#[command(name = "query-store-quay-logs", version)]
#[command(
    about = "Store yesterday's aggregated Quay logs in Azure Blob Storage",
    long_about = None
)]
pub struct Args {}
