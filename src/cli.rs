use cardscan_common::CardField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "cardscan")]
#[command(about = "Scan business cards with AI, export CSV and share via WhatsApp", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 名刺画像を読み取り、CSVを出力
    Scan {
        /// 画像ファイルまたはフォルダ（フォルダは直下の画像のみ）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// CSVの出力先ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 最後に読み取った名刺のWhatsApp送信リンクを表示
        #[arg(short, long, value_name = "NUMBER")]
        whatsapp: Option<String>,

        /// 読み取り後に項目を上書き（例: --set notes="Expo 2026"）
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        edits: Vec<FieldEdit>,

        /// 履歴をJSONでも表示
        #[arg(long)]
        json: bool,
    },

    /// 設定
    Config {
        /// Gemini APIキーを保存
        #[arg(long)]
        set_api_key: Option<String>,

        /// 使用するモデル名を保存
        #[arg(long)]
        model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `FIELD=VALUE` 形式の項目編集
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: CardField,
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
        Ok(Self {
            field: field.trim().parse()?,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_field_edit_parse() {
        let edit: FieldEdit = "notes=Met at Expo".parse().unwrap();
        assert_eq!(edit.field, CardField::Notes);
        assert_eq!(edit.value, "Met at Expo");

        let edit: FieldEdit = "job_title=a=b".parse().unwrap();
        assert_eq!(edit.field, CardField::JobTitle);
        assert_eq!(edit.value, "a=b");
    }

    #[test]
    fn test_field_edit_parse_errors() {
        assert!("notes".parse::<FieldEdit>().is_err());
        assert!("fax=123".parse::<FieldEdit>().is_err());
    }

    #[test]
    fn test_parse_scan_command() {
        let cli = Cli::try_parse_from([
            "cardscan", "scan", "cards/", "--whatsapp", "+1 555", "--set", "company=Acme",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan { paths, whatsapp, edits, .. } => {
                assert_eq!(paths, vec![PathBuf::from("cards/")]);
                assert_eq!(whatsapp.as_deref(), Some("+1 555"));
                assert_eq!(edits.len(), 1);
                assert_eq!(edits[0].field, CardField::Company);
            }
            _ => panic!("expected scan"),
        }
    }
}
