//! CLIモジュール

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use daylog::rotation::log_file_name;
use daylog::{CliArgs, Config};
use std::path::PathBuf;

/// daylog - 日次ローテーション付きファイルロガー
#[derive(Parser, Debug)]
#[command(name = "daylog")]
#[command(about = "日次ローテーション付きファイルロガー", long_about = None)]
pub struct Cli {
    /// 設定ファイルのパス
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// ログディレクトリ
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// ログファイル名のプレフィックス
    #[arg(short, long, global = true)]
    pub prefix: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// DEBUGレベルで1行書き込む
    Debug { message: Vec<String> },
    /// INFOレベルで1行書き込む
    Info { message: Vec<String> },
    /// WARNレベルで1行書き込む
    Warn { message: Vec<String> },
    /// ERRORレベルで1行書き込む
    Error { message: Vec<String> },
    /// FATALレベルで1行書き込み、終了コード1で終了する
    Fatal { message: Vec<String> },
    /// 今日のログファイルのパスを表示
    Path,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config: cli.config,
        directory: cli.dir,
        prefix: cli.prefix,
    };
    let config = Config::load(&cli_args)?;

    if let Commands::Path = cli.command {
        let file_name = log_file_name(&config.file_name_prefix, Local::now().date_naive());
        println!("{}", config.directory.join(file_name).display());
        return Ok(());
    }

    daylog::setup(config)?;

    match cli.command {
        Commands::Debug { message } => daylog::debug!(message.join(" ")),
        Commands::Info { message } => daylog::info!(message.join(" ")),
        Commands::Warn { message } => daylog::warn!(message.join(" ")),
        Commands::Error { message } => daylog::error!(message.join(" ")),
        Commands::Fatal { message } => daylog::fatal!(message.join(" ")),
        Commands::Path => {}
    }

    Ok(())
}
