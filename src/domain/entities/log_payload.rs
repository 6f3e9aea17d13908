//! # Log Payload Entity
//!
//! Quay から受け取った集計ログの生データ

use bytes::Bytes;

/// 集計ログのペイロード
///
/// 中身は解析も検証もしない。受け取ったバイト列をそのままアップロードする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPayload(Bytes);

impl LogPayload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `size` バイトごとのブロックに分割する（コピーなし）
    ///
    /// 空のペイロードは空のリストを返す。
    pub fn chunks(&self, size: usize) -> Vec<Bytes> {
        let size = size.max(1);
        (0..self.0.len())
            .step_by(size)
            .map(|start| self.0.slice(start..(start + size).min(self.0.len())))
            .collect()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_kept_verbatim() {
        let payload = LogPayload::new(&b"{\"logs\":[]}"[..]);
        assert_eq!(payload.as_bytes(), b"{\"logs\":[]}");
        assert_eq!(payload.len(), 11);
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_chunks_split_in_order() {
        let payload = LogPayload::new(b"abcdefghij".to_vec());
        let chunks = payload.chunks(4);

        assert_eq!(chunks.len(), 3);
        assert_eq!(&chunks[0][..], b"abcd");
        assert_eq!(&chunks[1][..], b"efgh");
        assert_eq!(&chunks[2][..], b"ij");
    }

    #[test]
    fn test_chunks_exact_multiple() {
        let payload = LogPayload::new(b"abcdefgh".to_vec());
        let chunks = payload.chunks(4);
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[1][..], b"efgh");
    }

    #[test]
    fn test_chunks_of_empty_payload() {
        let payload = LogPayload::new(Vec::new());
        assert!(payload.is_empty());
        assert!(payload.chunks(4).is_empty());
    }
}
