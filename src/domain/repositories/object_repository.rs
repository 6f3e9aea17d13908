//! # Object Repository Trait
//!
//! オブジェクトストレージへの保存を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::log_payload::LogPayload;
use crate::domain::errors::PipelineError;

/// 保存結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// オブジェクトキー
    pub key: String,
    /// 書き込んだバイト数
    pub size: usize,
    /// 送信したブロック数（単一リクエストの場合は 0）
    pub block_count: usize,
}

/// オブジェクトリポジトリ
///
/// ペイロードをキー付きのオブジェクトとして保存するリポジトリ。
/// 同じキーへの保存は既存のオブジェクトを上書きする。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// 保存先コンテナの URL（表示用）
    fn container_url(&self) -> String;

    /// ペイロードを保存する
    ///
    /// # Errors
    ///
    /// 認証・通信・権限などで保存に失敗した場合にエラーを返す
    async fn put_object(
        &self,
        key: &str,
        payload: &LogPayload,
    ) -> Result<StoredObject, PipelineError>;
}
