//! SudachiDict の変換
//!
//! SudachiDict の CSV を Mozc の辞書レコードに変換し、標準出力に書き出します。
//! 品詞は Mozc の品詞体系に合わせて書き換えてから照合します。

use std::io::{self, BufWriter};

use clap::Parser;
use lexconv::pipeline::DEFAULT_SLICE;
use lexconv::{FilterOptions, SourceKind};

use crate::common::{CommonArgs, RunError};

/// sudachi コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "sudachi",
    about = "A program to convert a SudachiDict lexicon into Mozc dictionary records."
)]
pub struct Args {
    #[clap(flatten)]
    common: CommonArgs,

    /// Number of rows converted per slice.
    #[clap(short = 'S', long, default_value_t = DEFAULT_SLICE)]
    slice: usize,

    /// Include words spelled only with ASCII letters and spaces.
    #[clap(short = 'e', long)]
    english: bool,

    /// Keep ASCII-only proper nouns even when --no-proper is given.
    #[clap(long)]
    english_proper: bool,

    /// Exclude proper nouns.
    #[clap(short = 'P', long)]
    no_proper: bool,

    /// Include words spelled only with full-width letters.
    #[clap(short = 'w', long)]
    fullwidth_english: bool,

    /// Include full-width-only proper nouns.
    #[clap(long)]
    fullwidth_english_proper: bool,

    /// Include symbols read as "きごう".
    #[clap(short = 's', long)]
    symbol: bool,
}

impl Args {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_english: self.english,
            include_english_proper: self.english_proper,
            exclude_proper: self.no_proper,
            include_fullwidth_english: self.fullwidth_english,
            include_fullwidth_english_proper: self.fullwidth_english_proper,
            include_symbols: self.symbol,
        }
    }
}

/// sudachi コマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや変換に失敗した場合、[`RunError`] を返します。
pub fn run(args: Args) -> Result<(), RunError> {
    let stdout = io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    args.common.convert(
        SourceKind::Sudachi,
        args.filter_options(),
        args.slice,
        &mut wtr,
    )?;
    Ok(())
}
