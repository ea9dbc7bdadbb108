//! # lexconv
//!
//! lexconv は、形態素解析用の辞書を Mozc のシステム辞書形式に変換するライブラリです。
//!
//! ## 概要
//!
//! mecab-ipadic-NEologd や SudachiDict の CSV、Mozc-UT の TSV を読み込み、各行を
//! `読み<TAB>左文脈ID<TAB>右文脈ID<TAB>コスト<TAB>表記` の行に変換します。
//! ユーザー辞書の形式(`読み<TAB>表記<TAB>品詞名<TAB>`)で出力することもできます。
//! 変換元の品詞体系は Mozc の品詞体系と完全には一致しないため、
//! Mozc の `id.def` に完全一致しない品詞は、タグの一致数が最も多い品詞の接続IDで近似します。
//!
//! ## 主な機能
//!
//! - **品詞IDの解決**: 完全一致、近似照合、結果の記録による高速化
//! - **コストの正規化**: 変換元のコストを Mozc のコスト範囲に圧縮
//! - **絞り込み**: 仮名を含まない読み、地名、英字のみの表記などの除外
//! - **重複排除**: 同じ読み・ID・表記のレコードは最初の1件のみを出力
//! - **並列変換**: 入力順を保ったままスライス単位で並列に変換
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use lexconv::{FilterChain, FilterOptions, Pipeline, PipelineConfig, ReferenceTable, SourceKind};
//!
//! let id_def = "1288 名詞,固有名詞,一般,*,*,*,*\n1847 名詞,一般,*,*,*,*,*";
//! let lexicon = "あいうえお,1288,1288,50000,名詞,固有名詞,一般,*,*,*,あいうえお,アイウエオ,アイウエオ";
//!
//! let kind = SourceKind::Neologd;
//! let table = ReferenceTable::from_reader(id_def.as_bytes(), kind)?;
//! let filters = FilterChain::new(kind, FilterOptions::default(), None);
//! let pipeline = Pipeline::new(kind, table, filters, PipelineConfig::default())?;
//!
//! let mut out = vec![];
//! pipeline.run(lexicon.lines().map(|l| Ok(l.to_string())), &mut out)?;
//! assert_eq!(String::from_utf8(out)?, "あいうえお\t1288\t1288\t10000\tあいうえお\n");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod dedup;
pub mod errors;
pub mod exclude;
pub mod filter;
pub mod pipeline;
pub mod pos;
pub mod reader;
pub mod reference;
pub mod resolver;
pub mod source;
pub mod user_dict;
pub mod utils;

#[cfg(test)]
mod tests;

pub use cost::normalize_cost;
pub use dedup::{DedupKey, DedupTracker};
pub use errors::{LexconvError, Result};
pub use exclude::{ExcludeList, WordList};
pub use filter::{FilterChain, FilterOptions, SkipReason};
pub use pipeline::{OutputMode, OutputRecord, Pipeline, PipelineConfig, Stats};
pub use pos::PosExpr;
pub use reader::SourceReader;
pub use reference::{ClassId, ReferenceTable};
pub use resolver::{PosResolver, Similarity, TagAgreement};
pub use source::{SourceEntry, SourceKind};
pub use user_dict::{UserDictLine, UserIdDef};
