//! # Pipeline Errors
//!
//! 実行中に発生するエラーの分類。どのエラーも実行全体を終了させる。

use chrono::NaiveDate;
use thiserror::Error;

/// 取得・保存パイプラインのエラー
///
/// `Display` は `ERROR ` に続く1行のメッセージをそのまま表す。
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 必須の環境変数が未設定または空
    #[error("Missing {0:?}")]
    MissingVariable(String),

    /// 環境変数の値が不正
    #[error("Invalid {name:?}: {reason}")]
    InvalidVariable { name: String, reason: String },

    /// 前日の日付を表現できない
    #[error("no calendar day precedes {0}")]
    DateOutOfRange(NaiveDate),

    /// リクエストを完了できなかった（DNS、接続、TLS、ボディ読み込み）
    ///
    /// `detail` は原因の連鎖を含む（`GET {url}: ...: Connection refused` など）。
    #[error("copying logs: {detail}")]
    Transport { detail: String },

    /// Quay が 200 以外を返した
    #[error("querying Quay. Received a response code of: {status}")]
    Status { status: String },

    /// ストレージがアップロードを拒否した
    #[error("copying logs: upload of {key} failed: {reason}")]
    Upload { key: String, reason: String },
}

impl PipelineError {
    /// プロセスの終了コード
    ///
    /// 最初のエラーで必ず終了するため、失敗は常に 1 になる。
    pub fn exit_code(&self) -> u8 {
        1
    }
}
