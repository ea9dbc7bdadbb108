//! Mozc-UT の辞書の変換
//!
//! Mozc-UT の TSV は既に接続IDを持つため、品詞の照合は行わずにコストの正規化、
//! 絞り込み、重複排除を適用して書き出します。固有名詞かどうかは参照表で判定します。

use std::io::{self, BufWriter};

use clap::Parser;
use lexconv::pipeline::DEFAULT_SLICE;
use lexconv::{FilterOptions, SourceKind};

use crate::common::{CommonArgs, RunError};

/// utdict コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "utdict",
    about = "A program to filter and renormalize a Mozc-UT dictionary."
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

    /// Exclude proper nouns.
    #[clap(short = 'P', long)]
    no_proper: bool,
}

impl Args {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_english: self.english,
            exclude_proper: self.no_proper,
            ..Default::default()
        }
    }
}

/// utdict コマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや変換に失敗した場合、[`RunError`] を返します。
pub fn run(args: Args) -> Result<(), RunError> {
    let stdout = io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    args.common.convert(
        SourceKind::UtDict,
        args.filter_options(),
        args.slice,
        &mut wtr,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["utdict", "-f", "a.tsv", "-P"]).unwrap();
        assert_eq!(args.slice, 8000);
        assert!(args.filter_options().exclude_proper);
        assert!(!args.filter_options().include_english);
    }
}
