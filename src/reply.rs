//! レスポンス組み立ての状態機械 (Sans I/O)

use crate::decoder::ResponseDecoder;
use crate::error::Error;
use crate::limits::DecoderLimits;
use crate::response::{Response, StatusLine};
use crate::status::ReplyError;

/// レスポンス受信の進行状態
///
/// 遷移は `Reading` から終端状態への一方向のみ。終端状態から
/// 別の状態へ戻ることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    /// 読み取り中
    Reading,
    /// 正常終了
    Finished,
    /// エラー終了 (カテゴリーとメッセージが設定される)
    FinishedWithError,
    /// キャンセル済み (中止または期限切れ)
    Canceled,
}

/// ローカルソケットレスポンス (Sans I/O)
///
/// トランスポートから届いたバイト列を受け取ってレスポンスを組み立て、
/// 終端状態とエラーカテゴリーを管理する。I/O は一切行わず、駆動は
/// `tokio_localsock` などの呼び出し側が担う。
///
/// - `on_data()`: バイト列が届いたときに呼ぶ
/// - `on_disconnect()`: トランスポートが閉じられたときに呼ぶ
/// - `read()`: 組み立て済みボディを先頭から順に読み取る
/// - `abort()` / `expire()`: 中止・期限切れ
#[derive(Debug)]
pub struct Reply {
    decoder: ResponseDecoder,
    state: ReplyState,
    status: Option<StatusLine>,
    chunked: bool,
    error: Option<(ReplyError, String)>,
    body: Vec<u8>,
    cursor: usize,
}

impl Default for Reply {
    fn default() -> Self {
        Self::new()
    }
}

impl Reply {
    /// 新しいレスポンスを作成
    pub fn new() -> Self {
        Self::with_limits(DecoderLimits::default())
    }

    /// 制限付きでレスポンスを作成
    pub fn with_limits(limits: DecoderLimits) -> Self {
        Self {
            decoder: ResponseDecoder::with_limits(limits),
            state: ReplyState::Reading,
            status: None,
            chunked: false,
            error: None,
            body: Vec::new(),
            cursor: 0,
        }
    }

    /// トランスポートから届いたバイト列を処理する
    ///
    /// 蓄積バッファに追記した上でパースを試みる。レスポンスが完成したら
    /// 終端状態へ遷移し、データ不足なら `Reading` のまま次の通知を待つ。
    /// 終端状態に達した後に届いたデータは無視する。
    ///
    /// デコーダーの制限超過 (バッファ超過など) はエラーとして返す。
    pub fn on_data(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.state != ReplyState::Reading {
            return Ok(());
        }
        self.decoder.feed(data)?;
        self.try_decode()
    }

    /// トランスポートの切断を処理する
    ///
    /// close-delimited ボディはここで確定する。それ以外でレスポンスが
    /// 未完成のまま切断された場合は `IncompleteResponse` で終端し、
    /// 組み立て済みの部分ボディは読み取り可能なまま残す。
    pub fn on_disconnect(&mut self) -> Result<(), Error> {
        if self.state != ReplyState::Reading {
            return Ok(());
        }
        self.decoder.mark_eof();
        self.try_decode()?;

        if self.state == ReplyState::Reading {
            self.status = self.decoder.status().cloned();
            self.chunked = self.decoder.is_chunked();
            self.body = self.decoder.take_partial_body();
            self.fail(
                ReplyError::IncompleteResponse,
                "Connection closed before a complete response was received",
            );
        }
        Ok(())
    }

    fn try_decode(&mut self) -> Result<(), Error> {
        match self.decoder.decode() {
            Ok(Some(response)) => {
                self.complete(response);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(Error::MalformedStatusLine(_)) => {
                self.fail(
                    ReplyError::MalformedStatusLine,
                    "Malformed HTTP response from server",
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn complete(&mut self, response: Response) {
        self.chunked = response.chunked;
        self.body = response.body;
        if let Some(category) = ReplyError::from_status_code(response.status.status_code) {
            self.error = Some((category, response.status.reason_phrase.clone()));
            self.state = ReplyState::FinishedWithError;
        } else {
            self.state = ReplyState::Finished;
        }
        self.status = Some(response.status);
    }

    fn fail(&mut self, category: ReplyError, message: &str) {
        self.error = Some((category, message.to_string()));
        self.state = ReplyState::FinishedWithError;
    }

    /// リクエストを中止する
    ///
    /// 終端状態でなければ `Canceled` へ遷移し、組み立て途中のボディを
    /// 破棄する。以後のデータ通知は無視される。終端状態に達した後の
    /// 呼び出しは何もしない。
    pub fn abort(&mut self) {
        self.cancel_with(ReplyError::Canceled, "Operation canceled");
    }

    /// 期限切れを処理する
    ///
    /// `abort()` と同じ振る舞いだが、カテゴリーは `Timeout` を報告する。
    pub fn expire(&mut self) {
        self.cancel_with(ReplyError::Timeout, "Operation timed out");
    }

    fn cancel_with(&mut self, category: ReplyError, message: &str) {
        if self.state != ReplyState::Reading {
            return;
        }
        self.decoder.reset();
        self.body.clear();
        self.cursor = 0;
        self.error = Some((category, message.to_string()));
        self.state = ReplyState::Canceled;
    }

    /// 組み立て済みボディから最大 `max_size` バイトを読み取る
    ///
    /// カーソルを進めながら順に読み取り、終端に達したら `None` を返す
    /// (エラーではない)。終端後は何度呼んでも `None`。
    pub fn read(&mut self, max_size: usize) -> Option<&[u8]> {
        if self.cursor >= self.body.len() {
            return None;
        }
        let n = max_size.min(self.body.len() - self.cursor);
        let data = &self.body[self.cursor..self.cursor + n];
        self.cursor += n;
        Some(data)
    }

    /// 現在の進行状態を取得
    pub fn state(&self) -> ReplyState {
        self.state
    }

    /// 終端状態に達したかどうか
    pub fn is_finished(&self) -> bool {
        self.state != ReplyState::Reading
    }

    /// エラーカテゴリーとメッセージを取得 (エラーなしの場合は None)
    pub fn error(&self) -> Option<(ReplyError, &str)> {
        self.error
            .as_ref()
            .map(|(category, message)| (*category, message.as_str()))
    }

    /// パース済みステータスラインを取得
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// ステータスコードを取得
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_ref().map(|s| s.status_code)
    }

    /// chunked 転送エンコーディングだったかどうか
    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    /// 組み立て済みボディ全体への参照を取得 (カーソルは進めない)
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
