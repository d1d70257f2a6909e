//! WhatsApp ディープリンク生成
//!
//! `https://wa.me/<digits>?text=<url-encoded message>` を組み立てる。
//! 送信先番号は数字以外をすべて取り除くだけで、それ以上の検証はしない。

use crate::error::WhatsAppError;
use crate::types::StructuredRecord;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// 送信先から数字以外を除去
pub fn sanitize_recipient(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 送信メッセージ本文
///
/// 空の項目も省略せず、ラベルだけの行として出す。
pub fn format_message(record: &StructuredRecord) -> String {
    format!(
        "*Business Card*\n\
         \n\
         Name: {}\n\
         Title: {}\n\
         Company: {}\n\
         Phone: {}\n\
         Email: {}\n\
         Website: {}\n\
         Address: {}\n\
         Notes: {}",
        record.full_name,
        record.job_title,
        record.company,
        record.phone,
        record.email,
        record.website,
        record.address,
        record.notes,
    )
}

/// WhatsApp送信用URLを生成
///
/// 数字が1つも残らなければ MissingRecipient。
pub fn build_whatsapp_link(
    record: &StructuredRecord,
    recipient_raw: &str,
) -> Result<String, WhatsAppError> {
    let digits = sanitize_recipient(recipient_raw);
    if digits.is_empty() {
        return Err(WhatsAppError::MissingRecipient);
    }
    let text = format_message(record);
    Ok(format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        urlencoding::encode(&text)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredRecord {
        StructuredRecord {
            full_name: "Jane Doe".to_string(),
            company: "Acme & Co".to_string(),
            email: "jane@acme.test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_recipient() {
        assert_eq!(sanitize_recipient("+1 (555) 123-4567"), "15551234567");
        assert_eq!(sanitize_recipient("abc"), "");
        assert_eq!(sanitize_recipient(""), "");
        // 全角数字は除去される
        assert_eq!(sanitize_recipient("０９０"), "");
    }

    #[test]
    fn test_link_uses_digits() {
        let link = build_whatsapp_link(&sample(), "+1 (555) 123-4567").unwrap();
        assert!(link.starts_with("https://wa.me/15551234567?text="));
    }

    #[test]
    fn test_link_missing_recipient() {
        assert_eq!(
            build_whatsapp_link(&sample(), "abc"),
            Err(WhatsAppError::MissingRecipient)
        );
        assert_eq!(
            build_whatsapp_link(&sample(), "  "),
            Err(WhatsAppError::MissingRecipient)
        );
    }

    #[test]
    fn test_link_text_is_url_encoded() {
        let link = build_whatsapp_link(&sample(), "15551234567").unwrap();
        let (_, query) = link.split_once("?text=").unwrap();
        assert!(!query.contains(' '));
        assert!(!query.contains('\n'));
        assert!(!query.contains('&'));
        let decoded = urlencoding::decode(query).unwrap();
        assert_eq!(decoded, format_message(&sample()));
    }

    #[test]
    fn test_message_keeps_empty_fields() {
        let message = format_message(&StructuredRecord::default());
        for label in [
            "Name: ", "Title: ", "Company: ", "Phone: ", "Email: ", "Website: ", "Address: ", "Notes: ",
        ] {
            assert!(message.contains(label), "{} missing", label);
        }
        assert_eq!(message.lines().count(), 10);
    }

    #[test]
    fn test_message_embeds_values() {
        let message = format_message(&sample());
        assert!(message.contains("Name: Jane Doe\n"));
        assert!(message.contains("Company: Acme & Co\n"));
        assert!(message.ends_with("Notes: "));
    }
}
