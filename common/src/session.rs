//! セッション制御（画面状態マシン＋履歴管理）
//!
//! Home → Capturing → Processing → Result → Home の循環。
//! アップロード時は Home → Processing に直接入る。
//! 状態・現在の名刺・履歴・エラーメッセージはすべて Session が所有し、
//! 下記の操作以外からは変更しない。

use crate::error::ExtractionError;
use crate::types::{CardField, HistoryEntry, StructuredRecord};
use tracing::{debug, info, warn};

/// 画面状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Home,
    Capturing,
    Processing,
    Result,
}

/// 状態遷移のきっかけ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// 「写真を撮る」
    TakePicture,
    /// 撮影をキャンセル
    CancelCapture,
    /// 撮影またはファイル選択で画像が揃った
    ImageReady,
    ExtractionSucceeded,
    ExtractionFailed,
    /// 「戻る」
    Back,
    /// 「次の名刺をスキャン」
    ScanAnother,
}

impl ViewState {
    /// 遷移表。表にない組み合わせはNone（イベントは無視される）
    pub fn next(self, event: SessionEvent) -> Option<ViewState> {
        match (self, event) {
            (ViewState::Home, SessionEvent::TakePicture) => Some(ViewState::Capturing),
            (ViewState::Home | ViewState::Capturing, SessionEvent::ImageReady) => {
                Some(ViewState::Processing)
            }
            (ViewState::Capturing, SessionEvent::CancelCapture) => Some(ViewState::Home),
            (ViewState::Processing, SessionEvent::ExtractionSucceeded) => Some(ViewState::Result),
            (ViewState::Processing, SessionEvent::ExtractionFailed) => Some(ViewState::Home),
            (ViewState::Result, SessionEvent::Back | SessionEvent::ScanAnother) => {
                Some(ViewState::Home)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Home => "home",
            ViewState::Capturing => "capturing",
            ViewState::Processing => "processing",
            ViewState::Result => "result",
        }
    }
}

/// 実行中の抽出を識別するチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

/// complete_extraction の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    Failed,
    /// 既に別の状態へ移った後に届いた結果。何もしない
    Stale,
}

/// セッション状態
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: ViewState,
    current: StructuredRecord,
    /// 新しい順
    history: Vec<HistoryEntry>,
    error: Option<String>,
    in_flight: Option<ScanTicket>,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn current(&self) -> &StructuredRecord {
        &self.current
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.view == ViewState::Processing
    }

    fn transition(&mut self, event: SessionEvent) -> bool {
        match self.view.next(event) {
            Some(next) => {
                debug!(from = self.view.as_str(), to = next.as_str(), ?event, "view transition");
                self.view = next;
                true
            }
            None => {
                debug!(view = self.view.as_str(), ?event, "event ignored");
                false
            }
        }
    }

    /// Home → Capturing
    pub fn take_picture(&mut self) -> bool {
        let moved = self.transition(SessionEvent::TakePicture);
        if moved {
            self.error = None;
        }
        moved
    }

    /// Capturing → Home
    pub fn cancel_capture(&mut self) -> bool {
        self.transition(SessionEvent::CancelCapture)
    }

    /// Home/Capturing → Processing
    ///
    /// 返したチケットを complete_extraction に渡す。
    /// Processing中はNoneを返し、2つ目の抽出は始まらない。
    pub fn begin_extraction(&mut self) -> Option<ScanTicket> {
        if !self.transition(SessionEvent::ImageReady) {
            return None;
        }
        self.error = None;
        let ticket = ScanTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        info!(ticket = ticket.0, "extraction started");
        Some(ticket)
    }

    /// アップロード画像の抽出開始（Homeからのみ）
    ///
    /// ファイル読込中にカメラ画面へ移っていた場合はNoneを返し、読み込んだ画像は使わない。
    pub fn begin_upload(&mut self) -> Option<ScanTicket> {
        if self.view != ViewState::Home {
            debug!(view = self.view.as_str(), "upload ignored outside home");
            return None;
        }
        self.begin_extraction()
    }

    /// 抽出結果を反映する
    ///
    /// 成功: Processing → Result。現在の名刺を置き換え、履歴の先頭に追加する。
    /// 失敗: Processing → Home。メッセージをエラーバナーに設定する。履歴は増えない。
    pub fn complete_extraction(
        &mut self,
        ticket: ScanTicket,
        outcome: std::result::Result<StructuredRecord, ExtractionError>,
        now_ms: i64,
    ) -> Completion {
        if self.in_flight != Some(ticket) || self.view != ViewState::Processing {
            debug!(ticket = ticket.0, view = self.view.as_str(), "stale extraction result dropped");
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(record) => {
                self.transition(SessionEvent::ExtractionSucceeded);
                self.history.insert(
                    0,
                    HistoryEntry {
                        id: format!("card-{}-{}", now_ms, ticket.0),
                        timestamp_ms: now_ms,
                        record: record.clone(),
                    },
                );
                self.current = record;
                info!(history_len = self.history.len(), "extraction succeeded");
                Completion::Succeeded
            }
            Err(err) => {
                warn!(code = err.kind.code(), detail = %err.detail, "extraction failed");
                self.transition(SessionEvent::ExtractionFailed);
                self.error = Some(err.user_message().to_string());
                Completion::Failed
            }
        }
    }

    /// Result → Home（現在の名刺はそのまま）
    pub fn back(&mut self) -> bool {
        self.transition(SessionEvent::Back)
    }

    /// Result → Home。現在の名刺を空に戻す。履歴は触らない
    pub fn scan_another(&mut self) -> bool {
        let moved = self.transition(SessionEvent::ScanAnother);
        if moved {
            self.current = StructuredRecord::default();
        }
        moved
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// 項目の編集
    ///
    /// 現在の名刺と履歴の先頭（最新）だけを更新する。古い履歴は変更しない。
    pub fn apply_field_edit(&mut self, field: CardField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = %field, len = value.len(), "field edited");
        if let Some(latest) = self.history.first_mut() {
            latest.record.set(field, value.clone());
        }
        self.current.set(field, value);
    }
}
