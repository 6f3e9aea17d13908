//! # Upload Options DTO
//!
//! アップロード方式の設定のData Transfer Object

/// 1ブロックのサイズ（4 MiB）
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// 同時に送信するブロックの最大数
pub const DEFAULT_PARALLELISM: usize = 16;

/// アップロード設定
///
/// ブロック単位のアップロードに使う分割サイズと並列数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// ブロックサイズ（バイト）。これ以下のペイロードは1回のリクエストで送る
    pub block_size: usize,
    /// 同時に送信するブロックの最大数
    pub parallelism: usize,
}

impl UploadOptions {
    /// 新しいアップロード設定を作成します。
    ///
    /// 0 を指定した値は 1 に切り上げます。
    ///
    /// # 例
    ///
    /// ```
    /// use query_store_quay_logs::application::dto::upload_options::UploadOptions;
    ///
    /// let options = UploadOptions::new(1024, 4);
    /// assert_eq!(options.block_size, 1024);
    /// assert_eq!(options.parallelism, 4);
    ///
    /// let clamped = UploadOptions::new(0, 0);
    /// assert_eq!(clamped.block_size, 1);
    /// assert_eq!(clamped.parallelism, 1);
    /// ```
    pub fn new(block_size: usize, parallelism: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            parallelism: parallelism.max(1),
        }
    }

    /// ペイロードを分割せずに送れるかどうか
    pub fn fits_single_request(&self, len: usize) -> bool {
        len <= self.block_size
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE, DEFAULT_PARALLELISM)
    }
}
