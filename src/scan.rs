//! 画像ごとの読み取り処理
//!
//! 1枚ずつ Session に通す: begin → 抽出 → complete。
//! 成功後は --set の編集を適用してから「次の名刺をスキャン」でHomeに戻す。

use cardscan_common::{Completion, Session};

use crate::cli::FieldEdit;
use crate::extractor::CardExtractor;
use crate::scanner::{self, ImageInfo};

/// 1枚分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub file_name: String,
    /// 失敗時のユーザー向けメッセージ
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

pub async fn scan_images<E, C>(
    session: &mut Session,
    extractor: &E,
    images: &[ImageInfo],
    edits: &[FieldEdit],
    now_ms: C,
) -> Vec<ScanOutcome>
where
    E: CardExtractor + ?Sized,
    C: Fn() -> i64,
{
    let mut outcomes = Vec::with_capacity(images.len());

    for image in images {
        let data_url = match scanner::load_data_url(&image.path) {
            Ok(data_url) => data_url,
            Err(e) => {
                tracing::warn!(file = %image.file_name, error = %e, "skipping image");
                outcomes.push(ScanOutcome {
                    file_name: image.file_name.clone(),
                    error: Some(e.to_string()),
                });
                continue;
            }
        };

        let Some(ticket) = session.begin_extraction() else {
            tracing::warn!(view = session.view().as_str(), "session busy, image skipped");
            continue;
        };

        let outcome = extractor.extract(&data_url).await;
        let error = match session.complete_extraction(ticket, outcome, now_ms()) {
            Completion::Succeeded => {
                for edit in edits {
                    session.apply_field_edit(edit.field, edit.value.clone());
                }
                session.scan_another();
                None
            }
            Completion::Failed => {
                let message = session.error().map(str::to_string);
                session.dismiss_error();
                message
            }
            Completion::Stale => Some("stale result".to_string()),
        };

        outcomes.push(ScanOutcome {
            file_name: image.file_name.clone(),
            error,
        });
    }

    outcomes
}
