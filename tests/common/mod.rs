//! テスト用の記録 HTTP サーバー
//!
//! 受け取ったリクエストを全て記録し、固定のステータスとボディを返す。

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};

/// 記録されたリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.uri.query()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == name).then(|| {
                percent_encoding::percent_decode_str(v)
                    .decode_utf8_lossy()
                    .into_owned()
            })
        })
    }
}

#[derive(Clone)]
struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    body: Bytes,
}

/// 127.0.0.1 の空きポートで待ち受けるサーバー
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    pub async fn start(status: StatusCode, body: &'static [u8]) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            requests: requests.clone(),
            status,
            body: Bytes::from_static(body),
        };

        let app = Router::new().fallback(record).with_state(recorder);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Bytes) {
    recorder.requests.lock().unwrap().push(RecordedRequest {
        method,
        uri,
        headers,
        body,
    });
    (recorder.status, recorder.body.clone())
}
