//! Workflow Orchestration
//!
//! 取得 → 検証 → 保存 の一連の流れ

use log::{info, warn};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::adapter::azure::{AzureBlobRepository, SharedKeyCredential};
use crate::adapter::config::Config;
use crate::adapter::quay::client::QUAY_API_BASE;
use crate::adapter::quay::QuayLogRepository;
use crate::application::dto::upload_options::UploadOptions;
use crate::application::use_cases::fetch_logs::FetchLogsUseCase;
use crate::application::use_cases::store_logs::StoreLogsUseCase;
use crate::domain::entities::run_date::RunDate;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::log_repository::LogRepository;
use crate::domain::repositories::object_repository::{ObjectRepository, StoredObject};

/// 接続先
///
/// 本番では既定値（quay.io とアカウントの公開エンドポイント）を使う。
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub quay_api: String,
    /// `None` の場合は `https://{account}.blob.core.windows.net`
    pub blob_service: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            quay_api: QUAY_API_BASE.to_string(),
            blob_service: None,
        }
    }
}

/// Log Archive Workflow
pub struct ArchiveWorkflow<L: LogRepository, S: ObjectRepository> {
    fetch_use_case: FetchLogsUseCase<L>,
    store_use_case: StoreLogsUseCase<S>,
    object_repository: Arc<S>,
}

impl<L: LogRepository, S: ObjectRepository> ArchiveWorkflow<L, S> {
    pub fn new(log_repository: Arc<L>, object_repository: Arc<S>) -> Self {
        Self {
            fetch_use_case: FetchLogsUseCase::new(log_repository),
            store_use_case: StoreLogsUseCase::new(object_repository.clone()),
            object_repository,
        }
    }

    /// Execute the archive workflow
    ///
    /// 進捗は `out`（本番では標準出力）に1行ずつ書く。
    /// 取得に失敗した場合は保存を一切行わない。
    pub async fn execute<W: Write>(
        &self,
        run_date: &RunDate,
        out: &mut W,
    ) -> Result<StoredObject, PipelineError> {
        info!("Processing aggregated logs for {}", run_date.date());

        let payload = self.fetch_use_case.execute(run_date).await?;
        progress(
            out,
            format_args!(
                "Received aggregated logs from Quay for {}",
                run_date.query_date()
            ),
        );

        progress(out, format_args!("Preparing to store logs in Azure Blob Store"));
        progress(
            out,
            format_args!(
                "Uploading {} to {}",
                run_date.object_key(),
                self.object_repository.container_url()
            ),
        );

        let stored = self.store_use_case.execute(run_date, &payload).await?;
        progress(out, format_args!("Completed uploading file"));

        Ok(stored)
    }
}

/// 進捗を1行書く。書き込めなくても処理は続ける
fn progress<W: Write>(out: &mut W, line: fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line) {
        warn!("Failed to write progress line: {}", e);
    }
}

impl ArchiveWorkflow<QuayLogRepository, AzureBlobRepository> {
    /// Create a workflow wired to Quay and Azure Blob Storage
    ///
    /// # Errors
    ///
    /// ストレージのアクセスキーが不正な場合にエラーを返す（通信前）
    pub fn from_config(config: &Config, endpoints: &Endpoints) -> Result<Self, PipelineError> {
        let log_repo = Arc::new(QuayLogRepository::with_base_url(
            endpoints.quay_api.clone(),
            config.quay_repository.clone(),
            config.quay_token.clone(),
        ));

        let credential =
            SharedKeyCredential::new(config.storage_account.clone(), &config.storage_access_key)?;
        let object_repo = Arc::new(match &endpoints.blob_service {
            Some(endpoint) => AzureBlobRepository::with_endpoint(
                endpoint.clone(),
                credential,
                config.container.clone(),
                UploadOptions::default(),
            ),
            None => AzureBlobRepository::new(
                credential,
                config.container.clone(),
                UploadOptions::default(),
            ),
        });

        Ok(Self::new(log_repo, object_repo))
    }
}
