use cardscan::{cli, config, error, export, extractor, scan, scanner};
use cardscan_common::{build_whatsapp_link, Session};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{CardScanError, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { paths, output_dir, whatsapp, edits, json } => {
            println!("📇 cardscan - 名刺読み取り\n");

            // 1. 画像収集
            println!("[1/3] 画像を検索中...");
            let images = scanner::collect_images(&paths)?;
            if images.is_empty() {
                let target = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CardScanError::NoImagesFound(target));
            }
            println!("✔ {}枚の画像を検出\n", images.len());

            // 2. AI読み取り
            println!("[2/3] AI読み取り中...");
            let extractor = extractor::GeminiExtractor::new(&config)?;
            let mut session = Session::new();
            let outcomes = scan::scan_images(&mut session, &extractor, &images, &edits, || {
                chrono::Utc::now().timestamp_millis()
            })
            .await;

            for outcome in &outcomes {
                match &outcome.error {
                    None => println!("  ✔ {}", outcome.file_name),
                    Some(message) => println!("  ✘ {}: {}", outcome.file_name, message),
                }
            }
            let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
            println!("✔ {}/{}枚を読み取り\n", succeeded, outcomes.len());

            if json {
                println!("{}", serde_json::to_string_pretty(session.history())?);
            }

            // 3. CSV出力
            println!("[3/3] CSVを出力中...");
            let output_dir = output_dir.unwrap_or_else(|| std::path::PathBuf::from("."));
            let today = chrono::Local::now().date_naive();
            match export::write_history_csv(session.history(), &output_dir, today)? {
                Some(path) => println!("✔ CSVを保存: {}", path.display()),
                None => println!("- 読み取り結果がないためCSVは作成しません"),
            }

            if let Some(number) = whatsapp {
                let latest = session.history().first().ok_or(CardScanError::NothingToSend)?;
                let link = build_whatsapp_link(&latest.record, &number)?;
                println!("\nWhatsApp: {}", link);
            }

            println!("\n✅ 完了");
        }

        Commands::Config { set_api_key, model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = model {
                config.model = model;
                config.save()?;
                println!("✔ モデルを設定しました: {}", config.model);
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

/// RUST_LOG があればそれを使う。なければ --verbose で debug、通常は warn
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
