//! tokio-localsock エラー型

use std::fmt;

/// tokio-localsock エラー
///
/// プロトコル上の結果 (HTTP エラーステータス、不完全なレスポンス等) は
/// `Reply` の終端状態として表現されるため、ここに現れるのは接続・書き込み
/// の失敗とデコーダーの制限超過のみ。
#[derive(Debug)]
pub enum Error {
    /// I/O エラー
    Io(std::io::Error),
    /// HTTP パースエラー (デコーダーの制限超過など)
    Http(localsock_http11::Error),
    /// 接続タイムアウト
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Timeout => write!(f, "connection timeout"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<localsock_http11::Error> for Error {
    fn from(e: localsock_http11::Error) -> Self {
        Error::Http(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
