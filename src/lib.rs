//! # localsock_http11
//!
//! ローカルソケット向け HTTP/1.1 クライアントトランスポート (Sans I/O)
//!
//! Unix ドメインソケットなどのバイトストリーム接続越しに、ローカルデーモンへ
//! リクエストを 1 回送信し、レスポンスを 1 回受信するための最小構成の
//! クライアントライブラリ。
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: I/O を完全に分離した設計 (tokio 統合は `tokio_localsock`)
//! - **Chunked 対応**: chunked 転送エンコーディングのボディを完全に再組み立て
//! - **閉じたエラーモデル**: HTTP ステータスコードを閉じたカテゴリー集合へ分類
//!
//! ## 使い方
//!
//! ```rust
//! use localsock_http11::{Reply, ReplyState, Request};
//!
//! // リクエストを作成してエンコード
//! let request = Request::new("GET", "/1.0")
//!     .header("Host", "localhost")
//!     .header("User-Agent", "localsock/1.0");
//! let bytes = request.encode();
//! // bytes をローカルソケットへ書き込み...
//!
//! // 受信したバイト列を Reply に投入 (断片化していてもよい)
//! let mut reply = Reply::new();
//! reply.on_data(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok").unwrap();
//! assert_eq!(reply.state(), ReplyState::Finished);
//! assert_eq!(reply.read(1024), Some(&b"ok"[..]));
//! assert_eq!(reply.read(1024), None);
//! ```

mod decoder;
mod encoder;
mod error;
mod limits;
mod reply;
mod request;
mod response;
mod status;

pub use decoder::ResponseDecoder;
pub use encoder::{encode_chunk, encode_chunks, encode_request};
pub use error::Error;
pub use limits::DecoderLimits;
pub use reply::{Reply, ReplyState};
pub use request::Request;
pub use response::{Response, StatusLine};
pub use status::ReplyError;
