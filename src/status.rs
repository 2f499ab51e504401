//! ステータスコードのエラー分類

use std::fmt;

/// レスポンスの終端エラーカテゴリー
///
/// プロトコル上の失敗 (ステータスライン不正、不完全なレスポンス、
/// キャンセル、期限切れ) と、フレーミングには成功したが HTTP エラー
/// ステータスを運んでいた場合の分類を、閉じた集合として表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyError {
    /// ステータスラインが期待するパターンに一致しない
    MalformedStatusLine,
    /// レスポンスが完成する前に接続が閉じられた
    IncompleteResponse,
    /// 呼び出し側によって中止された
    Canceled,
    /// 期限内にレスポンスが完成しなかった
    Timeout,
    /// 400 Bad Request
    InvalidOperation,
    /// 401 Authorization required
    AuthenticationRequired,
    /// 403 Access denied
    AccessDenied,
    /// 404 Not Found
    NotFound,
    /// 409 Resource Conflict
    Conflict,
    /// 500 Internal Server Error
    InternalServerError,
    /// その他のサーバーエラー (501-599)
    UnknownServerError,
    /// その他のコンテンツエラー (402, 405-499)
    UnknownContentError,
}

impl ReplyError {
    /// HTTP ステータスコードをエラーカテゴリーへ分類
    ///
    /// 100-599 の全域で定義される純粋な対応表。400 未満はエラーなし
    /// (None)。範囲外のコードはステータスラインのパターン照合で
    /// 事前に弾かれる。
    pub fn from_status_code(status_code: u16) -> Option<ReplyError> {
        if status_code < 400 {
            return None;
        }

        let category = match status_code {
            400 => ReplyError::InvalidOperation,
            401 => ReplyError::AuthenticationRequired,
            403 => ReplyError::AccessDenied,
            404 => ReplyError::NotFound,
            409 => ReplyError::Conflict,
            500 => ReplyError::InternalServerError,
            code if code > 500 => ReplyError::UnknownServerError,
            _ => ReplyError::UnknownContentError,
        };

        Some(category)
    }
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ReplyError::MalformedStatusLine => "malformed status line",
            ReplyError::IncompleteResponse => "incomplete response",
            ReplyError::Canceled => "canceled",
            ReplyError::Timeout => "timeout",
            ReplyError::InvalidOperation => "invalid operation",
            ReplyError::AuthenticationRequired => "authentication required",
            ReplyError::AccessDenied => "access denied",
            ReplyError::NotFound => "not found",
            ReplyError::Conflict => "conflict",
            ReplyError::InternalServerError => "internal server error",
            ReplyError::UnknownServerError => "unknown server error",
            ReplyError::UnknownContentError => "unknown content error",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ReplyError {}
