//! daylog - 日次ローテーション付きファイルロガーのCLI

mod cli;
mod logging;

use anyhow::Result;

fn main() -> Result<()> {
    logging::init();
    cli::run()
}
