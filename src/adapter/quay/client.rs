//! Quay API Client
//!
//! 集計ログエンドポイント（`/api/v1/repository/{repo}/aggregatelogs`）の呼び出し

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;

use crate::adapter::error::transport_error;
use crate::domain::entities::log_payload::LogPayload;
use crate::domain::entities::run_date::RunDate;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::log_repository::LogRepository;

/// 公開版 Quay の API ベース URL
pub const QUAY_API_BASE: &str = "https://quay.io";

/// Quay に送るユーザーエージェント
pub const QUAY_USER_AGENT: &str = concat!("query-store-quay-logs/", env!("CARGO_PKG_VERSION"));

/// Quay の集計ログを取得するリポジトリ
pub struct QuayLogRepository {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    token: String,
}

impl QuayLogRepository {
    /// ベース URL（通常は [`QUAY_API_BASE`]）に接続するリポジトリを作成
    pub fn with_base_url(base_url: String, repository: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            repository,
            token,
        }
    }

    /// 取得 URL を組み立てる
    ///
    /// 開始日と終了日が同じ場合、Quay がその日1日分に広げて返す。
    pub fn aggregate_logs_url(&self, run_date: &RunDate) -> String {
        let date = run_date.escaped_query_date();
        format!(
            "{}/api/v1/repository/{}/aggregatelogs?starttime={}&endtime={}",
            self.base_url, self.repository, date, date
        )
    }
}

#[async_trait]
impl LogRepository for QuayLogRepository {
    async fn fetch_aggregated_logs(
        &self,
        run_date: &RunDate,
    ) -> Result<LogPayload, PipelineError> {
        let url = self.aggregate_logs_url(run_date);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(USER_AGENT, QUAY_USER_AGENT)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("GET {}", url))
            .map_err(|e| transport_error(&e))?;

        // 200 以外はほぼ認証エラー。ボディは読まずに破棄する
        if resp.status() != StatusCode::OK {
            return Err(PipelineError::Status {
                status: resp.status().to_string(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("reading response body of GET {}", url))
            .map_err(|e| transport_error(&e))?;
        info!("Quay returned {} bytes", body.len());

        Ok(LogPayload::new(body))
    }
}
