//! # Log Repository Trait
//!
//! 集計ログの取得を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::log_payload::LogPayload;
use crate::domain::entities::run_date::RunDate;
use crate::domain::errors::PipelineError;

/// ログリポジトリ
///
/// 指定日の集計ログを取得するリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// 指定日の集計ログを取得する
    ///
    /// # Arguments
    ///
    /// * `run_date` - 取得対象日（開始日と終了日の両方に使う）
    ///
    /// # Returns
    ///
    /// レスポンスボディそのもの
    ///
    /// # Errors
    ///
    /// 通信に失敗した場合、または 200 以外のステータスが返った場合にエラーを返す
    async fn fetch_aggregated_logs(
        &self,
        run_date: &RunDate,
    ) -> Result<LogPayload, PipelineError>;
}
