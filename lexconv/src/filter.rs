//! エントリの絞り込み
//!
//! 出力しない行を判定する述語を順に適用します。最初に棄却した述語で判定を打ち切ります。
//! 述語はいずれも行のフィールドと設定のみを参照するため、
//! 最も重い処理である品詞の解決より前にすべて適用します。

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::exclude::ExcludeList;
use crate::source::{SourceEntry, SourceKind};
use crate::utils;

static ASCII_ENGLISH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z ]+$").unwrap());
static FULLWIDTH_ENGLISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Ａ-Ｚａ-ｚ　 ]+$").unwrap());

/// 「きごう」で変換される記号は多すぎるため既定では除外する
const SYMBOL_READING: &str = "きごう";

/// Sudachi の空白を表す品詞
const WHITESPACE_TAG: &str = "空白";

/// 絞り込みの設定
///
/// いずれも `true` にすると対応する語を出力に含めます(`exclude_proper` のみ逆)。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterOptions {
    /// 英字のみの表記を含める
    pub include_english: bool,

    /// 固有名詞を除外する場合でも、英字のみの固有名詞は含める
    pub include_english_proper: bool,

    /// 固有名詞を除外する
    pub exclude_proper: bool,

    /// 全角英字のみの表記を含める
    pub include_fullwidth_english: bool,

    /// 全角英字のみの表記のうち固有名詞は含める
    pub include_fullwidth_english_proper: bool,

    /// 読みが「きごう」の記号を含める
    pub include_symbols: bool,
}

/// 行を出力しない理由
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// 列が足りない、またはコストが整数でない
    Malformed,
    /// 読みに仮名が含まれない
    NoKana,
    /// 地名
    PlaceName,
    /// 英字のみの表記
    English,
    /// 空白
    Whitespace,
    /// 固有名詞
    ProperNoun,
    /// 全角英字のみの表記
    FullwidthEnglish,
    /// 読みが「きごう」の記号
    Symbol,
    /// 除外語リストに含まれる
    Excluded,
}

impl SkipReason {
    /// 理由の名前
    pub const fn name(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::NoKana => "no-kana",
            Self::PlaceName => "place-name",
            Self::English => "english",
            Self::Whitespace => "whitespace",
            Self::ProperNoun => "proper-noun",
            Self::FullwidthEnglish => "fullwidth-english",
            Self::Symbol => "symbol",
            Self::Excluded => "excluded",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

enum Filter {
    NoKana,
    PlaceName(&'static str),
    English,
    Whitespace,
    ProperNoun { keep_english: bool },
    FullwidthEnglish { keep_proper: bool },
    Symbol,
    Excluded(Arc<dyn ExcludeList>),
}

impl Filter {
    fn rejects(&self, entry: &SourceEntry) -> Option<SkipReason> {
        let rejected = match self {
            Self::NoKana => !utils::contains_kana(&entry.raw_reading),
            Self::PlaceName(tag) => entry.pos.tag(2) == Some(*tag),
            Self::English => {
                ASCII_ENGLISH.is_match(&entry.surface) && !entry.pos.is_proper_noun()
            }
            Self::Whitespace => entry.pos.tag(0) == Some(WHITESPACE_TAG),
            Self::ProperNoun { keep_english } => {
                entry.pos.is_proper_noun()
                    && !(*keep_english && ASCII_ENGLISH.is_match(&entry.surface))
            }
            Self::FullwidthEnglish { keep_proper } => {
                FULLWIDTH_ENGLISH.is_match(&entry.surface)
                    && !(*keep_proper && entry.pos.is_proper_noun())
            }
            Self::Symbol => entry.reading == SYMBOL_READING && entry.pos.is_symbol(),
            Self::Excluded(list) => list.is_excluded(&entry.reading, &entry.surface),
        };
        rejected.then(|| self.reason())
    }

    const fn reason(&self) -> SkipReason {
        match self {
            Self::NoKana => SkipReason::NoKana,
            Self::PlaceName(_) => SkipReason::PlaceName,
            Self::English => SkipReason::English,
            Self::Whitespace => SkipReason::Whitespace,
            Self::ProperNoun { .. } => SkipReason::ProperNoun,
            Self::FullwidthEnglish { .. } => SkipReason::FullwidthEnglish,
            Self::Symbol => SkipReason::Symbol,
            Self::Excluded(_) => SkipReason::Excluded,
        }
    }
}

/// 順序付きの述語列
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    /// 変換元辞書の種類と設定から述語列を構築します。
    ///
    /// 空白・全角英字・記号の述語は Sudachi のみに適用します。
    ///
    /// # 引数
    ///
    /// * `kind` - 変換元辞書の種類
    /// * `options` - 絞り込みの設定
    /// * `exclude` - 除外語リスト
    pub fn new(
        kind: SourceKind,
        options: FilterOptions,
        exclude: Option<Arc<dyn ExcludeList>>,
    ) -> Self {
        let mut filters = vec![Filter::NoKana];
        if let Some(tag) = kind.place_name_tag() {
            filters.push(Filter::PlaceName(tag));
        }
        if !options.include_english {
            filters.push(Filter::English);
        }
        if kind == SourceKind::Sudachi {
            filters.push(Filter::Whitespace);
        }
        if options.exclude_proper {
            filters.push(Filter::ProperNoun {
                keep_english: options.include_english_proper,
            });
        }
        if kind == SourceKind::Sudachi {
            if !options.include_fullwidth_english {
                filters.push(Filter::FullwidthEnglish {
                    keep_proper: options.include_fullwidth_english_proper,
                });
            }
            if !options.include_symbols {
                filters.push(Filter::Symbol);
            }
        }
        if let Some(list) = exclude {
            filters.push(Filter::Excluded(list));
        }
        Self { filters }
    }

    /// 行を棄却する場合はその理由を返します。
    pub fn check(&self, entry: &SourceEntry) -> Option<SkipReason> {
        self.filters.iter().find_map(|f| f.rejects(entry))
    }

    /// 行を棄却する場合はその理由を返します。
    ///
    /// 仮名と地名の判定のみを行います。品詞の一覧を出力する際に使用します。
    pub fn check_basic(&self, entry: &SourceEntry) -> Option<SkipReason> {
        self.filters
            .iter()
            .take_while(|f| matches!(f, Filter::NoKana | Filter::PlaceName(_)))
            .find_map(|f| f.rejects(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::WordList;
    use crate::pos::PosExpr;

    fn entry(surface: &str, raw_reading: &str, pos: &str) -> SourceEntry {
        SourceEntry {
            surface: surface.to_string(),
            reading: utils::normalize_reading(raw_reading),
            raw_reading: raw_reading.to_string(),
            pos: PosExpr::new(pos),
            id: None,
            cost: 0,
        }
    }

    #[test]
    fn test_no_kana() {
        let chain = FilterChain::new(SourceKind::Neologd, FilterOptions::default(), None);
        assert_eq!(
            chain.check(&entry("東京", "TOKYO", "名詞,固有名詞,一般,*,*,*")),
            Some(SkipReason::NoKana)
        );
        assert_eq!(
            chain.check(&entry("東京", "トウキョウ", "名詞,固有名詞,一般,*,*,*")),
            None
        );
    }

    #[test]
    fn test_place_name() {
        let neologd = FilterChain::new(SourceKind::Neologd, FilterOptions::default(), None);
        let sudachi = FilterChain::new(SourceKind::Sudachi, FilterOptions::default(), None);
        let e = entry("東京", "トウキョウ", "名詞,固有名詞,地域,*,*,*");
        assert_eq!(neologd.check(&e), Some(SkipReason::PlaceName));
        assert_eq!(sudachi.check(&e), None);
        let e = entry("東京", "トウキョウ", "名詞,固有名詞,地名,一般,*,*");
        assert_eq!(sudachi.check(&e), Some(SkipReason::PlaceName));
    }

    #[test]
    fn test_utdict_has_no_place_name_filter() {
        let chain = FilterChain::new(SourceKind::UtDict, FilterOptions::default(), None);
        let e = entry("東京", "とうきょう", "名詞,固有名詞,地域,一般,*,*");
        assert_eq!(chain.check(&e), None);
        let e = entry("hello", "はろー", "名詞,一般,*,*,*,*");
        assert_eq!(chain.check(&e), Some(SkipReason::English));
    }

    #[test]
    fn test_english() {
        let chain = FilterChain::new(SourceKind::Neologd, FilterOptions::default(), None);
        assert_eq!(
            chain.check(&entry("hello world", "ハローワールド", "名詞,一般,*,*,*,*")),
            Some(SkipReason::English)
        );
        assert_eq!(
            chain.check(&entry("Baseball Heroes", "ベースボールヒーローズ", "名詞,固有名詞,一般,*,*,*")),
            None
        );

        let options = FilterOptions {
            include_english: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Neologd, options, None);
        assert_eq!(
            chain.check(&entry("hello world", "ハローワールド", "名詞,一般,*,*,*,*")),
            None
        );
    }

    #[test]
    fn test_proper_noun() {
        let options = FilterOptions {
            exclude_proper: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Sudachi, options, None);
        let english = entry("Heroes", "ヒーローズ", "名詞,固有名詞,一般,*,*,*");
        let japanese = entry("英雄", "エイユウ", "名詞,固有名詞,一般,*,*,*");
        assert_eq!(chain.check(&english), Some(SkipReason::ProperNoun));
        assert_eq!(chain.check(&japanese), Some(SkipReason::ProperNoun));

        let options = FilterOptions {
            exclude_proper: true,
            include_english_proper: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Sudachi, options, None);
        assert_eq!(chain.check(&english), None);
        assert_eq!(chain.check(&japanese), Some(SkipReason::ProperNoun));
    }

    #[test]
    fn test_fullwidth_english() {
        let common = entry("ＡＢＣ", "エービーシー", "名詞,普通名詞,一般,*,*,*");
        let proper = entry("ＡＢＣ", "エービーシー", "名詞,固有名詞,一般,*,*,*");

        let chain = FilterChain::new(SourceKind::Sudachi, FilterOptions::default(), None);
        assert_eq!(chain.check(&common), Some(SkipReason::FullwidthEnglish));
        assert_eq!(chain.check(&proper), Some(SkipReason::FullwidthEnglish));

        let options = FilterOptions {
            include_fullwidth_english_proper: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Sudachi, options, None);
        assert_eq!(chain.check(&common), Some(SkipReason::FullwidthEnglish));
        assert_eq!(chain.check(&proper), None);

        let options = FilterOptions {
            include_fullwidth_english: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Sudachi, options, None);
        assert_eq!(chain.check(&common), None);
    }

    #[test]
    fn test_symbol_and_whitespace() {
        let chain = FilterChain::new(SourceKind::Sudachi, FilterOptions::default(), None);
        assert_eq!(
            chain.check(&entry("※", "キゴウ", "記号,一般,*,*,*,*")),
            Some(SkipReason::Symbol)
        );
        assert_eq!(
            chain.check(&entry("記号", "キゴウ", "名詞,普通名詞,一般,*,*,*")),
            None
        );
        assert_eq!(
            chain.check(&entry("　", "クウハク", "空白,*,*,*,*,*")),
            Some(SkipReason::Whitespace)
        );

        let options = FilterOptions {
            include_symbols: true,
            ..Default::default()
        };
        let chain = FilterChain::new(SourceKind::Sudachi, options, None);
        assert_eq!(chain.check(&entry("※", "キゴウ", "記号,一般,*,*,*,*")), None);
    }

    #[test]
    fn test_exclude_list() {
        let list = WordList::from_reader("ばか\t馬鹿\n".as_bytes()).unwrap();
        let chain = FilterChain::new(
            SourceKind::Neologd,
            FilterOptions::default(),
            Some(Arc::new(list)),
        );
        assert_eq!(
            chain.check(&entry("馬鹿", "バカ", "名詞,一般,*,*,*,*")),
            Some(SkipReason::Excluded)
        );
        assert_eq!(chain.check(&entry("馬鹿", "ウマシカ", "名詞,一般,*,*,*,*")), None);
    }

    #[test]
    fn test_first_rejection_wins() {
        let chain = FilterChain::new(SourceKind::Neologd, FilterOptions::default(), None);
        let e = entry("tokyo", "TOKYO", "名詞,固有名詞,地域,*,*,*");
        assert_eq!(chain.check(&e), Some(SkipReason::NoKana));
        assert_eq!(chain.check_basic(&e), Some(SkipReason::NoKana));
        let e = entry("hello", "ハロー", "名詞,一般,*,*,*,*");
        assert_eq!(chain.check_basic(&e), None);
    }
}
