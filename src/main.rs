//! query-store-quay-logs
//!
//! 前日分の Quay 集計ログを Azure Blob Storage に保存する日次バッチ

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use clap::Parser;
use log::debug;
use std::process::ExitCode;

use query_store_quay_logs::adapter::config::Config;
use query_store_quay_logs::domain::entities::run_date::RunDate;
use query_store_quay_logs::domain::errors::PipelineError;
use query_store_quay_logs::driver::report::report_failure;
use query_store_quay_logs::driver::{Args, ArchiveWorkflow, Endpoints};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let _args = Args::parse();

    // Kubernetes などが拾えるよう、進捗は stdout、エラーは stderr に出す
    println!("Starting up Query and Store Quay Logs");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run() -> Result<(), PipelineError> {
    // 通信の前に全ての設定を確認する
    let config = Config::from_env()?;
    debug!("Loaded configuration: {:?}", config);

    let run_date = RunDate::yesterday()?;
    let workflow = ArchiveWorkflow::from_config(&config, &Endpoints::default())?;

    workflow.execute(&run_date, &mut std::io::stdout()).await?;
    Ok(())
}
