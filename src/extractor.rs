//! 名刺抽出クライアント
//!
//! 画像（Data URL）を受け取り、StructuredRecord か分類済みの ExtractionError を返す。
//! 1回だけ送信し、リトライはしない。

use async_trait::async_trait;
use cardscan_common::gemini::{endpoint_url, http_error};
use cardscan_common::{
    parse_generate_response, ExtractionError, ExtractionErrorKind, GeminiRequest,
    StructuredRecord,
};
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

#[async_trait]
pub trait CardExtractor: Send + Sync {
    async fn extract(&self, image_data: &str) -> std::result::Result<StructuredRecord, ExtractionError>;
}

/// Gemini API を使う抽出クライアント
pub struct GeminiExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CardExtractor for GeminiExtractor {
    async fn extract(&self, image_data: &str) -> std::result::Result<StructuredRecord, ExtractionError> {
        let request = GeminiRequest::for_card_image(image_data);

        let response = self
            .client
            .post(endpoint_url(&self.model, &self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        tracing::debug!(status, body_len = body.len(), "gemini response");

        if !(200..300).contains(&status) {
            return Err(http_error(status, &body));
        }

        parse_generate_response(&body)
    }
}

/// 送信・受信そのものの失敗
fn transport_error(err: reqwest::Error) -> ExtractionError {
    let kind = if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        ExtractionErrorKind::Network
    } else {
        ExtractionErrorKind::Unknown
    };
    ExtractionError::new(kind, err.to_string())
}
