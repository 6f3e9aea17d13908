//! Run Reporter
//!
//! 失敗を標準エラーに出力し、終了コードに変換する

use log::debug;
use std::process::ExitCode;

use crate::domain::errors::PipelineError;

/// 標準エラーに出力する1行
pub fn failure_line(err: &PipelineError) -> String {
    format!("ERROR {}", err)
}

/// 失敗を報告して終了コードを返す
pub fn report_failure(err: &PipelineError) -> ExitCode {
    eprintln!("{}", failure_line(err));
    debug!("{:?}", err);
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_line_missing_variable() {
        let err = PipelineError::MissingVariable("AZURE_CONTAINER".to_string());
        assert_eq!(failure_line(&err), "ERROR Missing \"AZURE_CONTAINER\"");
    }

    #[test]
    fn test_failure_line_status() {
        let err = PipelineError::Status {
            status: "403 Forbidden".to_string(),
        };
        assert_eq!(
            failure_line(&err),
            "ERROR querying Quay. Received a response code of: 403 Forbidden"
        );
    }

    #[test]
    fn test_failure_line_upload() {
        let err = PipelineError::Upload {
            key: "2021-03-14.json".to_string(),
            reason: "put_blob: HTTP 403 Forbidden - ".to_string(),
        };
        assert!(failure_line(&err).starts_with("ERROR copying logs: upload of 2021-03-14.json"));
    }
}
