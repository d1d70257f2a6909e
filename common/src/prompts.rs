//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有される名刺抽出用プロンプト

use crate::types::CardField;

/// 名刺抽出プロンプト生成
///
/// 8項目のJSONキーを列挙し、読み取れない項目は空文字にするよう指示する。
/// 名刺が写っていない場合は全項目空のオブジェクトを返させる
/// （parse側でNoCardDetectedとして扱う）。
pub fn build_extraction_prompt() -> String {
    let keys = CardField::ALL
        .iter()
        .map(|f| format!("  \"{}\": \"{}\"", f.key(), field_hint(*f)))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are reading a photo of a business card. Extract the contact details printed on it.

## Output format (return exactly one JSON object)
{{
{keys}
}}

## Rules
- Copy text as printed; do not translate or invent values.
- Use an empty string for anything that is not on the card.
- Put any remaining printed text (slogans, secondary numbers, social handles) in "notes".
- If the image does not contain a business card, return the object with every value empty."#
    )
}

fn field_hint(field: CardField) -> &'static str {
    match field {
        CardField::FullName => "person's full name",
        CardField::JobTitle => "job title or position",
        CardField::Company => "company or organization",
        CardField::Phone => "primary phone number with country code if printed",
        CardField::Email => "email address",
        CardField::Website => "website URL",
        CardField::Address => "postal address on one line",
        CardField::Notes => "other useful text",
    }
}
