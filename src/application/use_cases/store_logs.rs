//! # Store Logs Use Case
//!
//! 集計ログ保存ユースケース

use log::info;
use std::sync::Arc;

use crate::domain::entities::log_payload::LogPayload;
use crate::domain::entities::run_date::RunDate;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::object_repository::{ObjectRepository, StoredObject};

/// 集計ログ保存ユースケース
///
/// 取得したペイロードを処理対象日のキー（`YYYY-MM-DD.json`）で保存する
pub struct StoreLogsUseCase<S: ObjectRepository> {
    object_repository: Arc<S>,
}

impl<S: ObjectRepository> StoreLogsUseCase<S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `object_repository` - オブジェクトリポジトリ
    pub fn new(object_repository: Arc<S>) -> Self {
        Self { object_repository }
    }

    /// ペイロードを保存する
    ///
    /// # Arguments
    ///
    /// * `run_date` - 処理対象日（キーの元）
    /// * `payload` - 取得した集計ログ（変更せずに保存する）
    ///
    /// # Errors
    ///
    /// 保存に失敗した場合にエラーを返す（リトライしない）
    pub async fn execute(
        &self,
        run_date: &RunDate,
        payload: &LogPayload,
    ) -> Result<StoredObject, PipelineError> {
        let key = run_date.object_key();
        let stored = self.object_repository.put_object(&key, payload).await?;
        info!(
            "Stored {} ({} bytes, {} blocks)",
            stored.key, stored.size, stored.block_count
        );
        Ok(stored)
    }
}
