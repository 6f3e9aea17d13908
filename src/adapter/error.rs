//! Adapter Error Conversion
//!
//! アダプター内部の anyhow エラー連鎖を PipelineError に変換する

use anyhow::Error;

use crate::domain::errors::PipelineError;

/// 原因の連鎖ごと Transport にする
pub(crate) fn transport_error(err: &Error) -> PipelineError {
    PipelineError::Transport {
        detail: format!("{:#}", err),
    }
}

/// 通信エラー（reqwest）は Transport、それ以外は Upload にする
pub(crate) fn upload_error(key: &str, err: Error) -> PipelineError {
    if err.downcast_ref::<reqwest::Error>().is_some() {
        return transport_error(&err);
    }
    PipelineError::Upload {
        key: key.to_string(),
        reason: format!("{:#}", err),
    }
}
