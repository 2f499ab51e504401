//! tokio_localsock - Tokio integration for localsock_http11
//!
//! tokio を使用して Unix ドメインソケット越しにローカルデーモンへ
//! HTTP/1.1 リクエストを送信する非同期クライアント。
//!
//! ## 特徴
//!
//! - **localsock_http11 ベース**: Sans I/O ライブラリをベースにした設計
//! - **非同期 I/O**: tokio による完全非同期対応
//! - **使い捨て接続**: リクエスト 1 件につき接続 1 本 (キープアライブなし)
//! - **期限付き受信**: レスポンス全体に対するデッドラインを設定可能
//!
//! ## クライアント
//!
//! ```ignore
//! use tokio_localsock::Client;
//!
//! // GET
//! let client = Client::new("/run/daemon/daemon.sock");
//! let reply = client.get("/1.0/instances").await?;
//!
//! // POST with body
//! let reply = client.post("/1.0/instances")
//!     .body(b"name=primary".to_vec())
//!     .await?;
//!
//! // エラーカテゴリーの確認
//! if let Some((category, message)) = reply.error() {
//!     eprintln!("request failed: {} ({})", message, category);
//! }
//! ```

pub mod client;
pub mod error;
pub mod reply_ext;

pub use client::{Client, RequestBuilder};
pub use error::{Error, Result};
pub use reply_ext::{JsonError, ReplyExt};

// localsock_http11 の型を re-export
pub use localsock_http11::{Reply, ReplyError, ReplyState, Request};
