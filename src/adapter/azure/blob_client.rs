//! Azure Blob Storage Client
//!
//! Blob REST API（Put Blob / Put Block / Put Block List）によるアップロード
//!
//! ブロックサイズ以下のペイロードは Put Blob 1回で送る。それより大きい
//! ペイロードはブロックに分割して Put Block を並列に送り、最後に
//! Put Block List でペイロード順にコミットする。

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use chrono::Utc;
use futures::stream::{self, TryStreamExt};
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use uuid::Uuid;

use super::auth::{SharedKeyCredential, SignableRequest};
use crate::adapter::error::upload_error;
use crate::application::dto::upload_options::UploadOptions;
use crate::domain::entities::log_payload::LogPayload;
use crate::domain::errors::PipelineError;
use crate::domain::repositories::object_repository::{ObjectRepository, StoredObject};

/// Azure REST API version used for all requests.
pub const AZURE_API_VERSION: &str = "2023-11-03";

/// 保存するオブジェクトの Content-Type
const BLOB_CONTENT_TYPE: &str = "application/json";

/// Blob 名のエンコード（`/` はパス区切りとして残す）
const BLOB_PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Azure Blob Storage の1コンテナに保存するリポジトリ
pub struct AzureBlobRepository {
    client: reqwest::Client,
    /// `https://{account}.blob.core.windows.net`
    endpoint: String,
    container: String,
    credential: SharedKeyCredential,
    options: UploadOptions,
}

/// 1回の PUT リクエスト
struct PutRequest<'a> {
    key: &'a str,
    operation: &'static str,
    query: Vec<(String, String)>,
    extra_ms_headers: Vec<(String, String)>,
    content_type: &'static str,
    body: Bytes,
}

impl AzureBlobRepository {
    /// アカウントの公開エンドポイントに接続するリポジトリを作成
    pub fn new(
        credential: SharedKeyCredential,
        container: String,
        options: UploadOptions,
    ) -> Self {
        let endpoint = format!("https://{}.blob.core.windows.net", credential.account());
        Self::with_endpoint(endpoint, credential, container, options)
    }

    /// 任意のエンドポイントに接続するリポジトリを作成
    pub fn with_endpoint(
        endpoint: String,
        credential: SharedKeyCredential,
        container: String,
        options: UploadOptions,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            container,
            credential,
            options,
        }
    }

    fn blob_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            self.container,
            utf8_percent_encode(key, BLOB_PATH_ENCODE_SET)
        )
    }

    /// Block IDs must be base64 and the same length for every block of a blob.
    fn block_id(upload_id: &Uuid, index: usize) -> String {
        BASE64_STANDARD.encode(format!("{}:{:05}", upload_id, index))
    }

    fn rfc1123_date() -> String {
        Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// 署名付きの PUT を送り、2xx 以外をエラーにする
    async fn send_put(&self, request: PutRequest<'_>) -> Result<()> {
        let mut url = self.blob_url(request.key);
        if !request.query.is_empty() {
            let query = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, NON_ALPHANUMERIC)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{}?{}", url, query);
        }

        let mut ms_headers = vec![
            ("x-ms-date".to_string(), Self::rfc1123_date()),
            ("x-ms-version".to_string(), AZURE_API_VERSION.to_string()),
        ];
        ms_headers.extend(request.extra_ms_headers);

        let resource_path = format!("/{}/{}", self.container, request.key);
        let authorization = self.credential.authorization(&SignableRequest {
            method: "PUT",
            content_length: request.body.len(),
            content_type: request.content_type,
            ms_headers: &ms_headers,
            resource_path: &resource_path,
            query: &request.query,
        });

        let mut req = self
            .client
            .put(&url)
            .header("Authorization", authorization)
            .header("Content-Type", request.content_type)
            .body(request.body);
        for (name, value) in &ms_headers {
            req = req.header(name.as_str(), value.as_str());
        }

        debug!("PUT {} ({})", url, request.operation);
        let resp = req
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("{} {}", request.operation, url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "{} {}: HTTP {} - {}",
                request.operation,
                request.key,
                status,
                body
            ));
        }

        Ok(())
    }

    /// Put Blob: ペイロード全体を1回で書き込む
    async fn put_blob(&self, key: &str, body: Bytes) -> Result<()> {
        self.send_put(PutRequest {
            key,
            operation: "put_blob",
            query: Vec::new(),
            extra_ms_headers: vec![("x-ms-blob-type".to_string(), "BlockBlob".to_string())],
            content_type: BLOB_CONTENT_TYPE,
            body,
        })
        .await
    }

    /// Put Block: ブロックを1つステージする
    async fn put_block(&self, key: &str, block_id: &str, body: Bytes) -> Result<()> {
        self.send_put(PutRequest {
            key,
            operation: "put_block",
            query: vec![
                ("comp".to_string(), "block".to_string()),
                ("blockid".to_string(), block_id.to_string()),
            ],
            extra_ms_headers: Vec::new(),
            content_type: "application/octet-stream",
            body,
        })
        .await
    }

    /// Put Block List: ステージしたブロックを指定順でコミットする
    async fn put_block_list(&self, key: &str, block_ids: &[String]) -> Result<()> {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<BlockList>\n");
        for id in block_ids {
            xml.push_str(&format!("  <Latest>{}</Latest>\n", id));
        }
        xml.push_str("</BlockList>");

        self.send_put(PutRequest {
            key,
            operation: "put_block_list",
            query: vec![("comp".to_string(), "blocklist".to_string())],
            extra_ms_headers: vec![(
                "x-ms-blob-content-type".to_string(),
                BLOB_CONTENT_TYPE.to_string(),
            )],
            content_type: "application/xml",
            body: Bytes::from(xml),
        })
        .await
    }

    /// ペイロードを書き込み、コミットしたブロック数（Put Blob の場合は 0）を返す
    async fn upload(&self, key: &str, payload: &LogPayload) -> Result<usize> {
        if self.options.fits_single_request(payload.len()) {
            self.put_blob(key, payload.clone().into_bytes()).await?;
            return Ok(0);
        }

        let upload_id = Uuid::new_v4();
        let blocks: Vec<(String, Bytes)> = payload
            .chunks(self.options.block_size)
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| (Self::block_id(&upload_id, index), chunk))
            .collect();

        info!(
            "Staging {} blocks for {} (parallelism {})",
            blocks.len(),
            key,
            self.options.parallelism
        );

        stream::iter(blocks.iter().map(Ok::<_, anyhow::Error>))
            .try_for_each_concurrent(self.options.parallelism, |(block_id, chunk)| {
                self.put_block(key, block_id, chunk.clone())
            })
            .await
            .with_context(|| format!("staging {} blocks", blocks.len()))?;

        let block_ids: Vec<String> = blocks.into_iter().map(|(id, _)| id).collect();
        self.put_block_list(key, &block_ids).await?;

        Ok(block_ids.len())
    }
}

#[async_trait]
impl ObjectRepository for AzureBlobRepository {
    fn container_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.container)
    }

    async fn put_object(
        &self,
        key: &str,
        payload: &LogPayload,
    ) -> Result<StoredObject, PipelineError> {
        let block_count = self
            .upload(key, payload)
            .await
            .map_err(|e| upload_error(key, e))?;

        Ok(StoredObject {
            key: key.to_string(),
            size: payload.len(),
            block_count,
        })
    }
}
