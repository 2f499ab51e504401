//! ローカルソケット HTTP クライアント
//!
//! tokio の Unix ドメインソケットを使用した非同期 HTTP クライアント。
//! 接続はリクエスト 1 件につき 1 本の使い捨てで、レスポンス受信後に
//! 必ず閉じられる。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_localsock::Client;
//!
//! let client = Client::new("/run/daemon/daemon.sock");
//!
//! // GET
//! let reply = client.get("/1.0").await?;
//!
//! // ヘッダー追加
//! let reply = client.get("/1.0/instances")
//!     .header("Accept", "application/json")
//!     .await?;
//!
//! // POST with body
//! let reply = client.post("/1.0/instances")
//!     .body(b"name=primary".to_vec())
//!     .await?;
//! ```

use std::future::IntoFuture;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use localsock_http11::{Reply, Request};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use crate::error::Result;

/// Host ヘッダーのプレースホルダー値
///
/// ローカルソケットは IP/DNS でルーティングされないため固定値でよい
const HOST_PLACEHOLDER: &str = "localhost";

/// User-Agent に載せるデフォルトのクライアント識別子
const DEFAULT_USER_AGENT: &str = concat!("tokio-localsock/", env!("CARGO_PKG_VERSION"));

/// ローカルソケット HTTP クライアント
///
/// Unix ドメインソケットのパスを指定して作成し、リクエストごとに
/// 接続を張って送受信する。
#[derive(Debug, Clone)]
pub struct Client {
    socket_path: PathBuf,
    connect_timeout: Duration,
    reply_deadline: Duration,
    user_agent: String,
}

impl Client {
    /// 新しいクライアントを作成
    pub fn new(socket_path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: socket_path.as_ref().to_path_buf(),
            connect_timeout: Duration::from_secs(30),
            reply_deadline: Duration::from_secs(60),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// 接続タイムアウトを設定
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// レスポンス全体のデッドラインを設定
    ///
    /// リクエスト書き込み完了時点から計測し、期限内にレスポンスが
    /// 完成しなかった場合は `Timeout` カテゴリーで終端する。
    pub fn reply_deadline(mut self, deadline: Duration) -> Self {
        self.reply_deadline = deadline;
        self
    }

    /// User-Agent のクライアント識別子を設定
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// GET リクエストを作成
    pub fn get(&self, target: &str) -> RequestBuilder<'_> {
        self.request("GET", target)
    }

    /// POST リクエストを作成
    pub fn post(&self, target: &str) -> RequestBuilder<'_> {
        self.request("POST", target)
    }

    /// PUT リクエストを作成
    pub fn put(&self, target: &str) -> RequestBuilder<'_> {
        self.request("PUT", target)
    }

    /// DELETE リクエストを作成
    pub fn delete(&self, target: &str) -> RequestBuilder<'_> {
        self.request("DELETE", target)
    }

    /// 任意のメソッドでリクエストを作成
    pub fn request(&self, method: &str, target: &str) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method: method.to_string(),
            target: target.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    async fn send_request(&self, request: Request) -> Result<Reply> {
        let stream = tokio::time::timeout(
            self.connect_timeout,
            UnixStream::connect(&self.socket_path),
        )
        .await??;

        self.exchange(stream, request).await
    }

    /// リクエストを 1 回書き込み、レスポンスが終端状態に達するまで
    /// 読み取りループを回す
    async fn exchange(&self, mut stream: UnixStream, request: Request) -> Result<Reply> {
        let request_bytes = request.encode();
        stream.write_all(&request_bytes).await?;
        stream.flush().await?;

        let mut reply = Reply::new();
        let mut buf = [0u8; 8192];
        let deadline = tokio::time::Instant::now() + self.reply_deadline;

        while !reply.is_finished() {
            let read_result =
                match tokio::time::timeout_at(deadline, stream.read(&mut buf)).await {
                    Ok(result) => result,
                    Err(_) => {
                        reply.expire();
                        break;
                    }
                };

            match read_result {
                Ok(0) => reply.on_disconnect()?,
                Ok(n) => reply.on_data(&buf[..n])?,
                // 読み取りエラーは切断として扱う
                Err(_) => reply.on_disconnect()?,
            }
        }

        // 接続はリクエストごとに使い捨て
        let _ = stream.shutdown().await;

        Ok(reply)
    }
}

/// リクエストビルダー
///
/// Client のメソッド (get, post など) から取得し、ヘッダーやボディを
/// 追加してから `.await` でリクエストを送信する。
pub struct RequestBuilder<'a> {
    client: &'a Client,
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> RequestBuilder<'a> {
    /// ヘッダーを追加
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// ボディを設定
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// リクエストを送信
    async fn send(self) -> Result<Reply> {
        let request = prepare_request(
            &self.client.user_agent,
            &self.method,
            &self.target,
            self.headers,
            self.body,
        );
        self.client.send_request(request).await
    }
}

impl<'a> IntoFuture for RequestBuilder<'a> {
    type Output = Result<Reply>;
    type IntoFuture = Pin<Box<dyn std::future::Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

/// 送信用リクエストを組み立てる
///
/// Host は固定プレースホルダー、User-Agent はクライアント識別子を
/// 設定する (いずれもユーザーが上書き可能)。POST / PUT には
/// Content-Type を付与し、ボディがある場合はエンコーダーが
/// Content-Length を自動で付ける。
fn prepare_request(
    user_agent: &str,
    method: &str,
    target: &str,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
) -> Request {
    let mut request = Request::new(method, target);

    let has_host = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("Host"));
    if !has_host {
        request = request.header("Host", HOST_PLACEHOLDER);
    }

    let has_user_agent = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("User-Agent"));
    if !has_user_agent {
        request = request.header("User-Agent", user_agent);
    }

    if method == "POST" || method == "PUT" {
        let has_content_type = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("Content-Type"));
        if !has_content_type {
            request = request.header("Content-Type", "application/x-www-form-urlencoded");
        }
    }

    // ユーザー指定のヘッダーを追加
    for (name, value) in &headers {
        request = request.header(name, value);
    }

    // ボディを設定
    if let Some(body) = body {
        request = request.body(body);
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_request_get() {
        let request = prepare_request("ua/1.0", "GET", "/1.0", Vec::new(), None);

        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/1.0");
        assert_eq!(request.get_header("Host"), Some(HOST_PLACEHOLDER));
        assert_eq!(request.get_header("User-Agent"), Some("ua/1.0"));
        assert!(!request.has_header("Content-Type"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_prepare_request_post_with_body() {
        let request = prepare_request(
            "ua/1.0",
            "POST",
            "/1.0/instances",
            Vec::new(),
            Some(b"name=primary".to_vec()),
        );

        assert_eq!(
            request.get_header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body, b"name=primary");

        // エンコード結果に正確な Content-Length が載る
        let encoded = request.encode();
        let text = String::from_utf8_lossy(&encoded);
        assert!(text.contains("Content-Length: 12\r\n"));
        assert!(text.ends_with("\r\n\r\nname=primary"));
    }

    #[test]
    fn test_prepare_request_post_without_body() {
        let request = prepare_request("ua/1.0", "POST", "/1.0/instances", Vec::new(), None);

        // Content-Type は付くが Content-Length は付かない
        assert!(request.has_header("Content-Type"));
        let encoded = request.encode();
        let text = String::from_utf8_lossy(&encoded);
        assert!(!text.contains("Content-Length"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_prepare_request_user_overrides() {
        let headers = vec![
            ("Host".to_string(), "daemon".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        let request = prepare_request("ua/1.0", "PUT", "/1.0/config", headers, None);

        assert_eq!(request.get_header("Host"), Some("daemon"));
        assert_eq!(request.get_header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_prepare_request_delete() {
        let request = prepare_request("ua/1.0", "DELETE", "/1.0/instances/primary", Vec::new(), None);

        let encoded = request.encode();
        let text = String::from_utf8_lossy(&encoded);
        assert!(text.starts_with("DELETE /1.0/instances/primary HTTP/1.1\r\n"));
        assert!(!request.has_header("Content-Type"));
    }
}
