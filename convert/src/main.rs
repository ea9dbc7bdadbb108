//! 辞書変換ツールのメインエントリーポイント
//!
//! 形態素解析用の辞書を Mozc のシステム辞書形式、またはユーザー辞書形式に変換する
//! サブコマンドを提供します。
//! 変換結果は標準出力に、ログは標準エラー出力に書き出されます。
//! ログの詳細度は `RUST_LOG` で変更できます。

mod common;
mod neologd;
mod sudachi;
mod utdict;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::common::RunError;

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "convert", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// mecab-ipadic-NEologd の CSV を変換します
    Neologd(neologd::Args),

    /// SudachiDict の CSV を変換します
    Sudachi(sudachi::Args),

    /// Mozc-UT の TSV を変換します
    Utdict(utdict::Args),
}

/// 変換ツールの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum ConvertError {
    /// NEologd の変換中のエラー
    #[error("neologd: {0}")]
    Neologd(RunError),

    /// SudachiDict の変換中のエラー
    #[error("sudachi: {0}")]
    Sudachi(RunError),

    /// Mozc-UT の変換中のエラー
    #[error("utdict: {0}")]
    Utdict(RunError),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), ConvertError> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Neologd(args) => neologd::run(args).map_err(ConvertError::Neologd),
        Command::Sudachi(args) => sudachi::run(args).map_err(ConvertError::Sudachi),
        Command::Utdict(args) => utdict::run(args).map_err(ConvertError::Utdict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["convert", "neologd", "-f", "a.csv"]).unwrap();
        assert!(matches!(cli.command, Command::Neologd(_)));
        let cli = Cli::try_parse_from(["convert", "sudachi", "-f", "a.csv", "-s"]).unwrap();
        assert!(matches!(cli.command, Command::Sudachi(_)));
        let cli = Cli::try_parse_from(["convert", "utdict", "-f", "a.tsv", "-U", "u.def"]).unwrap();
        assert!(matches!(cli.command, Command::Utdict(_)));
        assert!(Cli::try_parse_from(["convert", "ipadic", "-f", "a.csv"]).is_err());
    }

    #[test]
    fn test_error_message() {
        let e = ConvertError::Sudachi(RunError::Lexconv(lexconv::LexconvError::UnresolvedPos(
            "名詞,謎,*,*,*,*".to_string(),
        )));
        assert_eq!(
            e.to_string(),
            "sudachi: Conversion failed: Unexpected word class: 名詞,謎,*,*,*,*"
        );
    }
}
