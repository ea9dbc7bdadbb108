//! mecab-ipadic-NEologd の変換
//!
//! NEologd の CSV を Mozc の辞書レコードに変換し、標準出力に書き出します。

use std::io::{self, BufWriter};

use clap::Parser;
use lexconv::pipeline::DEFAULT_SLICE;
use lexconv::{FilterOptions, SourceKind};

use crate::common::{CommonArgs, RunError};

/// neologd コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "neologd",
    about = "A program to convert a mecab-ipadic-NEologd lexicon into Mozc dictionary records."
)]
pub struct Args {
    #[clap(flatten)]
    common: CommonArgs,

    /// Number of rows converted per slice.
    #[clap(short = 's', long, default_value_t = DEFAULT_SLICE)]
    slice: usize,

    /// Include words spelled only with ASCII letters and spaces.
    #[clap(short = 'E', long)]
    english: bool,
}

impl Args {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_english: self.english,
            ..Default::default()
        }
    }
}

/// neologd コマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや変換に失敗した場合、[`RunError`] を返します。
pub fn run(args: Args) -> Result<(), RunError> {
    let stdout = io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    args.common.convert(
        SourceKind::Neologd,
        args.filter_options(),
        args.slice,
        &mut wtr,
    )?;
    Ok(())
}
