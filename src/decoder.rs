//! HTTP レスポンスデコーダー (Sans I/O)

use crate::error::Error;
use crate::limits::DecoderLimits;
use crate::response::{Response, StatusLine};

/// デコード状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodePhase {
    /// ステータスライン待ち
    StartLine,
    /// ヘッダー待ち
    Headers,
    /// ボディ読み取り中 (Content-Length)
    BodyContentLength { remaining: usize },
    /// Chunked - チャンクサイズ行待ち
    ChunkedSize,
    /// Chunked - チャンクデータ待ち
    ChunkedData { remaining: usize },
    /// Chunked - トレーラーヘッダー待ち
    ChunkedTrailer,
    /// 長さ情報なし - 接続が閉じるまでがボディ (close-delimited)
    CloseDelimited,
    /// 完了
    Complete,
}

/// CRLF で終わる行を探す
fn find_line(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// ステータスラインをパース
///
/// `HTTP/<digit>.<digit> <3桁コード> <理由句>` の 3 フィールドに
/// 厳密に一致しない行は [`Error::MalformedStatusLine`] になる。
/// コードの先頭桁は 1-5 に限られるため、値域は 100-599 に収まる。
fn parse_status_line(line: &str) -> Result<StatusLine, Error> {
    let malformed = || Error::MalformedStatusLine(line.to_string());

    let mut parts = line.splitn(3, ' ');
    let (Some(version), Some(code), Some(reason)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let vb = version.as_bytes();
    if !(vb.len() == 8
        && vb.starts_with(b"HTTP/")
        && vb[5].is_ascii_digit()
        && vb[6] == b'.'
        && vb[7].is_ascii_digit())
    {
        return Err(malformed());
    }

    let cb = code.as_bytes();
    if !(cb.len() == 3 && matches!(cb[0], b'1'..=b'5') && cb.iter().all(u8::is_ascii_digit)) {
        return Err(malformed());
    }
    let status_code: u16 = code.parse().map_err(|_| malformed())?;

    Ok(StatusLine {
        version: version.to_string(),
        status_code,
        reason_phrase: reason.to_string(),
    })
}

/// ステータスコードからボディがあるかどうかを判定
fn status_has_body(status_code: u16) -> bool {
    // 1xx, 204, 304 はボディなし
    !((100..200).contains(&status_code) || status_code == 204 || status_code == 304)
}

/// HTTP レスポンスデコーダー (Sans I/O)
///
/// ソケットから届いたバイト列を `feed()` で蓄積バッファへ追記し、
/// `decode()` でパースを試みる。データ不足の場合は `Ok(None)` を返し、
/// 次の `feed()` を待つ。蓄積は追記のみで、パース前にバイトが失われる
/// ことはない。レスポンス 1 件につきデコーダー 1 つ (接続は使い捨て)。
#[derive(Debug)]
pub struct ResponseDecoder {
    buf: Vec<u8>,
    phase: DecodePhase,
    status: Option<StatusLine>,
    chunked: bool,
    content_length: Option<usize>,
    body_buf: Vec<u8>,
    limits: DecoderLimits,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseDecoder {
    /// 新しいデコーダーを作成
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    /// 制限付きでデコーダーを作成
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            buf: Vec::new(),
            phase: DecodePhase::StartLine,
            status: None,
            chunked: false,
            content_length: None,
            body_buf: Vec::new(),
            limits,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &DecoderLimits {
        &self.limits
    }

    /// バッファにデータを追加
    pub fn feed(&mut self, data: &[u8]) -> Result<(), Error> {
        let new_size = self.buf.len() + data.len();
        if new_size > self.limits.max_buffer_size {
            return Err(Error::BufferOverflow {
                size: new_size,
                limit: self.limits.max_buffer_size,
            });
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// バッファの残りデータを取得
    pub fn remaining(&self) -> &[u8] {
        &self.buf
    }

    /// デコーダーをリセット
    pub fn reset(&mut self) {
        self.buf.clear();
        self.phase = DecodePhase::StartLine;
        self.status = None;
        self.chunked = false;
        self.content_length = None;
        self.body_buf.clear();
    }

    /// パース済みステータスラインを取得 (ステータスライン受信前は None)
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// chunked 転送エンコーディングかどうか (ヘッダー受信前は false)
    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    /// close-delimited ボディを読み取り中かどうかを判定
    pub fn is_close_delimited(&self) -> bool {
        matches!(self.phase, DecodePhase::CloseDelimited)
    }

    /// ここまでに組み立て済みのボディを取り出す
    ///
    /// 接続が途中で切断された場合でも、組み立て済みの部分データは
    /// 呼び出し側が利用できる (エラーペイロードなど)。Content-Length
    /// ボディは受信済みのバイトまで、chunked ボディは検証済みの
    /// チャンクまでを返す。
    pub fn take_partial_body(&mut self) -> Vec<u8> {
        if let DecodePhase::BodyContentLength { remaining } = self.phase {
            let available = self.buf.len().min(remaining);
            self.body_buf.extend(self.buf.drain(..available));
        }
        std::mem::take(&mut self.body_buf)
    }

    /// 接続終了を通知 (close-delimited ボディ用)
    ///
    /// 長さ情報のないボディはここで確定する。末尾の行終端 1 つは
    /// ボディに含めない。close-delimited 以外の状態では何もしない。
    /// 次の `decode()` 呼び出しでレスポンスが返る。
    pub fn mark_eof(&mut self) {
        if matches!(self.phase, DecodePhase::CloseDelimited) {
            let mut body = std::mem::take(&mut self.buf);
            if body.ends_with(b"\r\n") {
                body.truncate(body.len() - 2);
            } else if body.ends_with(b"\n") {
                body.truncate(body.len() - 1);
            }
            self.body_buf = body;
            self.phase = DecodePhase::Complete;
        }
    }

    /// レスポンスをデコード
    ///
    /// データ不足の場合は `Ok(None)` を返す (エラーではない)。
    /// 一度レスポンスを返した後は常に `Ok(None)` を返す。
    pub fn decode(&mut self) -> Result<Option<Response>, Error> {
        loop {
            match self.phase {
                DecodePhase::StartLine => {
                    let Some(pos) = find_line(&self.buf) else {
                        return Ok(None);
                    };
                    let line = String::from_utf8_lossy(&self.buf[..pos]).into_owned();
                    self.buf.drain(..pos + 2);

                    self.status = Some(parse_status_line(&line)?);
                    self.phase = DecodePhase::Headers;
                }
                DecodePhase::Headers => {
                    let Some(pos) = find_line(&self.buf) else {
                        return Ok(None);
                    };
                    if pos == 0 {
                        // Empty line - end of headers
                        self.buf.drain(..2);
                        self.enter_body_phase()?;
                        continue;
                    }

                    if pos > self.limits.max_header_line_size {
                        return Err(Error::HeaderLineTooLong {
                            size: pos,
                            limit: self.limits.max_header_line_size,
                        });
                    }

                    let line = String::from_utf8_lossy(&self.buf[..pos]).into_owned();
                    self.buf.drain(..pos + 2);
                    self.scan_header_line(&line);
                }
                DecodePhase::BodyContentLength { remaining } => {
                    if self.buf.len() < remaining {
                        return Ok(None);
                    }
                    self.body_buf = self.buf.drain(..remaining).collect();
                    return self.finish();
                }
                DecodePhase::ChunkedSize => {
                    let Some(pos) = find_line(&self.buf) else {
                        return Ok(None);
                    };
                    if pos > self.limits.max_chunk_line_size {
                        return Err(Error::ChunkLineTooLong {
                            size: pos,
                            limit: self.limits.max_chunk_line_size,
                        });
                    }

                    let line = String::from_utf8_lossy(&self.buf[..pos]).into_owned();
                    // チャンクサイズをパース (";" 以降の拡張は無視)
                    let size_str = line.split(';').next().unwrap_or(&line).trim();
                    let Ok(chunk_size) = usize::from_str_radix(size_str, 16) else {
                        // サイズ行として解釈できない行は「未完」扱いにして
                        // 消費せず次のデータを待つ。接続が先に閉じた場合は
                        // 呼び出し側で不完全なレスポンスとして確定する。
                        return Ok(None);
                    };
                    self.buf.drain(..pos + 2);

                    if chunk_size == 0 {
                        // 最終チャンク
                        self.phase = DecodePhase::ChunkedTrailer;
                    } else {
                        let new_size = self.body_buf.len() + chunk_size;
                        if new_size > self.limits.max_body_size {
                            return Err(Error::BodyTooLarge {
                                size: new_size,
                                limit: self.limits.max_body_size,
                            });
                        }
                        self.phase = DecodePhase::ChunkedData {
                            remaining: chunk_size,
                        };
                    }
                }
                DecodePhase::ChunkedData { remaining } => {
                    // チャンクデータ + CRLF が必要
                    if self.buf.len() < remaining + 2 {
                        return Ok(None);
                    }
                    if self.buf[remaining..remaining + 2] != *b"\r\n" {
                        return Err(Error::InvalidData(
                            "invalid chunked encoding: expected CRLF after chunk data".to_string(),
                        ));
                    }
                    self.body_buf.extend_from_slice(&self.buf[..remaining]);
                    self.buf.drain(..remaining + 2);
                    self.phase = DecodePhase::ChunkedSize;
                }
                DecodePhase::ChunkedTrailer => {
                    // トレーラーヘッダーを処理 (空行まで読む)
                    let Some(pos) = find_line(&self.buf) else {
                        return Ok(None);
                    };
                    if pos == 0 {
                        // 空行 - トレーラー終了
                        self.buf.drain(..2);
                        return self.finish();
                    }
                    self.buf.drain(..pos + 2);
                }
                DecodePhase::CloseDelimited => {
                    // ボディの確定は mark_eof() で行う
                    return Ok(None);
                }
                DecodePhase::Complete => {
                    if self.status.is_some() {
                        return self.finish();
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// ヘッダー行を走査してフレーミングに関わる値だけを拾う
    ///
    /// コロンを含まない行は無視する (厳密なヘッダーパースは行わない)。
    fn scan_header_line(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        let name = name.trim();
        if name.eq_ignore_ascii_case("Transfer-Encoding") {
            if value.to_ascii_lowercase().contains("chunked") {
                self.chunked = true;
            }
        } else if name.eq_ignore_ascii_case("Content-Length") {
            self.content_length = value.trim().parse().ok();
        }
    }

    /// ヘッダー終端後にボディの読み取り方法を決定する
    ///
    /// 優先順位: ボディなしステータス → chunked → Content-Length →
    /// close-delimited (接続が閉じるまでがボディ)。
    fn enter_body_phase(&mut self) -> Result<(), Error> {
        let Some(status) = self.status.as_ref() else {
            return Err(Error::InvalidData("missing status line".to_string()));
        };

        if !status_has_body(status.status_code) {
            self.phase = DecodePhase::Complete;
            return Ok(());
        }

        if self.chunked {
            self.phase = DecodePhase::ChunkedSize;
            return Ok(());
        }

        if let Some(len) = self.content_length {
            if len > self.limits.max_body_size {
                return Err(Error::BodyTooLarge {
                    size: len,
                    limit: self.limits.max_body_size,
                });
            }
            self.phase = if len == 0 {
                DecodePhase::Complete
            } else {
                DecodePhase::BodyContentLength { remaining: len }
            };
            return Ok(());
        }

        self.phase = DecodePhase::CloseDelimited;
        Ok(())
    }

    fn finish(&mut self) -> Result<Option<Response>, Error> {
        self.phase = DecodePhase::Complete;
        let Some(status) = self.status.take() else {
            return Err(Error::InvalidData("missing status line".to_string()));
        };

        Ok(Some(Response {
            status,
            chunked: self.chunked,
            body: std::mem::take(&mut self.body_buf),
        }))
    }
}
