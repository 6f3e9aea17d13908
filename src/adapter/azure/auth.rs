//! Azure Shared Key Authentication
//!
//! ストレージアカウントキーによるリクエスト署名

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::adapter::config::AZURE_STORAGE_ACCESS_KEY;
use crate::domain::errors::PipelineError;

type HmacSha256 = Hmac<Sha256>;

/// Shared Key 認証情報
///
/// 復号したアカウントキーで初期化した HMAC を保持する。
#[derive(Clone)]
pub struct SharedKeyCredential {
    account: String,
    mac: HmacSha256,
}

/// 署名対象のリクエスト要素
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    pub method: &'a str,
    pub content_length: usize,
    pub content_type: &'a str,
    /// `x-ms-*` ヘッダー（`x-ms-date` と `x-ms-version` を含む）
    pub ms_headers: &'a [(String, String)],
    /// `/{container}/{blob}`（エンコード前）
    pub resource_path: &'a str,
    /// クエリパラメータ（デコード済みの値）
    pub query: &'a [(String, String)],
}

impl SharedKeyCredential {
    /// アカウント名と base64 のアクセスキーから作成する
    ///
    /// # Errors
    ///
    /// アクセスキーが base64 として不正な場合にエラーを返す
    pub fn new(account: String, access_key: &str) -> Result<Self, PipelineError> {
        let key_bytes =
            BASE64_STANDARD
                .decode(access_key.trim())
                .map_err(|e| PipelineError::InvalidVariable {
                    name: AZURE_STORAGE_ACCESS_KEY.to_string(),
                    reason: format!("not valid base64: {}", e),
                })?;

        let mac = HmacSha256::new_from_slice(&key_bytes).map_err(|e| {
            PipelineError::InvalidVariable {
                name: AZURE_STORAGE_ACCESS_KEY.to_string(),
                reason: format!("unusable as HMAC key: {}", e),
            }
        })?;

        Ok(Self { account, mac })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// `Authorization` ヘッダーの値（`SharedKey {account}:{signature}`）を返す
    pub fn authorization(&self, request: &SignableRequest<'_>) -> String {
        let mut mac = self.mac.clone();
        mac.update(self.string_to_sign(request).as_bytes());
        let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        format!("SharedKey {}:{}", self.account, signature)
    }

    /// 署名する文字列を組み立てる
    ///
    /// ```text
    /// VERB
    /// Content-Encoding
    /// Content-Language
    /// Content-Length (0 の場合は空)
    /// Content-MD5
    /// Content-Type
    /// Date
    /// If-Modified-Since
    /// If-Match
    /// If-None-Match
    /// If-Unmodified-Since
    /// Range
    /// CanonicalizedHeaders
    /// CanonicalizedResource
    /// ```
    pub fn string_to_sign(&self, request: &SignableRequest<'_>) -> String {
        let content_length = match request.content_length {
            0 => String::new(),
            len => len.to_string(),
        };

        let mut ms_headers: Vec<(String, &str)> = request
            .ms_headers
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.trim()))
            .filter(|(k, _)| k.starts_with("x-ms-"))
            .collect();
        ms_headers.sort_by(|a, b| a.0.cmp(&b.0));

        let canonicalized_headers = ms_headers
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        let mut canonicalized_resource = format!("/{}{}", self.account, request.resource_path);
        let mut query: Vec<(String, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.as_str()))
            .collect();
        query.sort_by(|a, b| a.0.cmp(&b.0));
        for (k, v) in query {
            canonicalized_resource.push_str(&format!("\n{}:{}", k, v));
        }

        format!(
            "{}\n\n\n{}\n\n{}\n\n\n\n\n\n\n{}\n{}",
            request.method,
            content_length,
            request.content_type,
            canonicalized_headers,
            canonicalized_resource
        )
    }
}
