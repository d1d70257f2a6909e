//! 名刺データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - StructuredRecord: 抽出・編集対象の名刺8項目
//! - CardField: 8項目のいずれかを指す列挙型
//! - HistoryEntry: 抽出成功ごとに作られるセッション履歴

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 名刺から抽出した項目
///
/// 全項目が自由形式のテキスト。未抽出の項目は空文字で表す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredRecord {
    pub full_name: String,
    pub job_title: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub notes: String,
}

impl StructuredRecord {
    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::FullName => &self.full_name,
            CardField::JobTitle => &self.job_title,
            CardField::Company => &self.company,
            CardField::Phone => &self.phone,
            CardField::Email => &self.email,
            CardField::Website => &self.website,
            CardField::Address => &self.address,
            CardField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: CardField, value: impl Into<String>) {
        let slot = match field {
            CardField::FullName => &mut self.full_name,
            CardField::JobTitle => &mut self.job_title,
            CardField::Company => &mut self.company,
            CardField::Phone => &mut self.phone,
            CardField::Email => &mut self.email,
            CardField::Website => &mut self.website,
            CardField::Address => &mut self.address,
            CardField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// 全項目が空白のみならtrue
    pub fn is_empty(&self) -> bool {
        CardField::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }
}

/// 名刺の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    FullName,
    JobTitle,
    Company,
    Phone,
    Email,
    Website,
    Address,
    Notes,
}

impl CardField {
    /// 表示順（CSVの列順と同じ）
    pub const ALL: [CardField; 8] = [
        CardField::FullName,
        CardField::JobTitle,
        CardField::Company,
        CardField::Phone,
        CardField::Email,
        CardField::Website,
        CardField::Address,
        CardField::Notes,
    ];

    /// 画面・CSVヘッダー用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            CardField::FullName => "Full Name",
            CardField::JobTitle => "Job Title",
            CardField::Company => "Company",
            CardField::Phone => "Phone",
            CardField::Email => "Email",
            CardField::Website => "Website",
            CardField::Address => "Address",
            CardField::Notes => "Notes",
        }
    }

    /// JSONキー（AIレスポンスと同じcamelCase）
    pub fn key(&self) -> &'static str {
        match self {
            CardField::FullName => "fullName",
            CardField::JobTitle => "jobTitle",
            CardField::Company => "company",
            CardField::Phone => "phone",
            CardField::Email => "email",
            CardField::Website => "website",
            CardField::Address => "address",
            CardField::Notes => "notes",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardField {
    type Err = String;

    /// JSONキー・snake_case・ラベルのいずれも受け付ける（大文字小文字は無視）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        CardField::ALL
            .iter()
            .copied()
            .find(|f| f.key().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// セッション履歴の1件
///
/// 抽出成功の時点で作られる。timestampはエポックからのミリ秒。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp_ms: i64,
    #[serde(flatten)]
    pub record: StructuredRecord,
}
