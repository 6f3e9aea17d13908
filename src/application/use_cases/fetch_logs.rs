//! # Fetch Logs Use Case
//!
//! 集計ログ取得ユースケース

use log::info;
use std::sync::Arc;

use crate::domain::entities::log_payload::LogPayload;
use crate::domain::entities::run_date::RunDate;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::log_repository::LogRepository;

/// 集計ログ取得ユースケース
///
/// 処理対象日1日分の集計ログを取得する
pub struct FetchLogsUseCase<R: LogRepository> {
    log_repository: Arc<R>,
}

impl<R: LogRepository> FetchLogsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `log_repository` - ログリポジトリ
    pub fn new(log_repository: Arc<R>) -> Self {
        Self { log_repository }
    }

    /// 集計ログを取得する
    ///
    /// # Errors
    ///
    /// 取得に失敗した場合にエラーを返す（リトライしない）
    pub async fn execute(&self, run_date: &RunDate) -> Result<LogPayload, PipelineError> {
        let payload = self.log_repository.fetch_aggregated_logs(run_date).await?;
        info!(
            "Fetched {} bytes of aggregated logs for {}",
            payload.len(),
            run_date.query_date()
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockLogRepository {
        response: Option<&'static [u8]>,
        requested: Mutex<Vec<RunDate>>,
    }

    impl MockLogRepository {
        fn new(response: Option<&'static [u8]>) -> Self {
            Self {
                response,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LogRepository for MockLogRepository {
        async fn fetch_aggregated_logs(
            &self,
            run_date: &RunDate,
        ) -> Result<LogPayload, PipelineError> {
            self.requested.lock().unwrap().push(*run_date);
            match self.response {
                Some(body) => Ok(LogPayload::new(body)),
                None => Err(PipelineError::Status {
                    status: "401 Unauthorized".to_string(),
                }),
            }
        }
    }

    fn run_date() -> RunDate {
        RunDate::yesterday_from(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_logs_success() {
        let repo = Arc::new(MockLogRepository::new(Some(b"{\"logs\":[]}")));
        let use_case = FetchLogsUseCase::new(repo.clone());

        let payload = use_case.execute(&run_date()).await.unwrap();

        assert_eq!(payload.as_bytes(), b"{\"logs\":[]}");
        assert_eq!(*repo.requested.lock().unwrap(), vec![run_date()]);
    }

    #[tokio::test]
    async fn test_fetch_logs_failure_is_not_retried() {
        let repo = Arc::new(MockLogRepository::new(None));
        let use_case = FetchLogsUseCase::new(repo.clone());

        let result = use_case.execute(&run_date()).await;

        assert!(matches!(result, Err(PipelineError::Status { .. })));
        assert_eq!(repo.requested.lock().unwrap().len(), 1);
    }
}
