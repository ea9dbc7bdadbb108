//! 変換元辞書の種類ごとの差異を扱うモジュール
//!
//! mecab-ipadic-NEologd と SudachiDict はどちらも MeCab 形式に近い CSV ですが、
//! 列の並び、地名を表す品詞タグ、品詞体系の細部が異なります。
//! Mozc-UT の辞書は Mozc の辞書と同じ TSV で、品詞の代わりに接続IDを持ちます。
//! このモジュールは、それらの差異を [`SourceKind`] に集約し、
//! 1行分のフィールドを共通の [`SourceEntry`] に正規化します。

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::Result;
use crate::pos::PosExpr;
use crate::reference::ClassId;
use crate::utils;

static GODAN_DOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"五段・").unwrap());
static GODAN_KA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"五段-カ行[^,]*").unwrap());
static RA_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ラ行([^,])").unwrap());

/// 変換元辞書の種類
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SourceKind {
    /// mecab-ipadic-NEologd
    ///
    /// `表層形,左文脈ID,右文脈ID,コスト,品詞1,...,品詞6,原形,読み,発音`
    Neologd,

    /// SudachiDict
    ///
    /// `見出し(TRIE用),左連接ID,右連接ID,コスト,見出し(解析結果表示用),品詞1,...,品詞6,読み,正規化表記,...`
    Sudachi,

    /// Mozc-UT の辞書
    ///
    /// `読み<TAB>左文脈ID<TAB>右文脈ID<TAB>コスト<TAB>表記`
    UtDict,
}

/// 品詞を表す列
enum ClassColumn {
    /// 品詞1から始まる6列
    Pos(usize),
    /// 接続IDの列
    Id(usize),
}

/// 列の位置
struct Layout {
    surface: usize,
    cost: usize,
    class: ClassColumn,
    reading: usize,
}

const NEOLOGD_LAYOUT: Layout = Layout {
    surface: 10,
    cost: 3,
    class: ClassColumn::Pos(4),
    reading: 11,
};

const SUDACHI_LAYOUT: Layout = Layout {
    surface: 4,
    cost: 3,
    class: ClassColumn::Pos(5),
    reading: 11,
};

const UTDICT_LAYOUT: Layout = Layout {
    surface: 4,
    cost: 3,
    class: ClassColumn::Id(1),
    reading: 0,
};

const NEOLOGD_GENERIC_TAGS: &[&str] = &["*", "自立", "非自立"];
const SUDACHI_GENERIC_TAGS: &[&str] = &["*", "自立", "非自立", "一般"];

impl SourceKind {
    /// 辞書の名前
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neologd => "neologd",
            Self::Sudachi => "sudachi",
            Self::UtDict => "utdict",
        }
    }

    const fn layout(self) -> &'static Layout {
        match self {
            Self::Neologd => &NEOLOGD_LAYOUT,
            Self::Sudachi => &SUDACHI_LAYOUT,
            Self::UtDict => &UTDICT_LAYOUT,
        }
    }

    /// 地名を表す品詞3のタグ
    ///
    /// 地名は郵便番号データから別途生成されるため、この品詞の行は出力しません。
    /// Mozc-UT の辞書は地名を区別しないため `None` を返します。
    pub const fn place_name_tag(self) -> Option<&'static str> {
        match self {
            Self::Neologd => Some("地域"),
            Self::Sudachi => Some("地名"),
            Self::UtDict => None,
        }
    }

    /// 近似照合で一致しても得点にならない汎用タグ
    pub const fn generic_tags(self) -> &'static [&'static str] {
        match self {
            Self::Neologd | Self::UtDict => NEOLOGD_GENERIC_TAGS,
            Self::Sudachi => SUDACHI_GENERIC_TAGS,
        }
    }

    /// 1行をフィールドに分割します。
    ///
    /// Mozc-UT の辞書はタブ区切り、それ以外は CSV として分割します。
    pub fn split_fields(self, line: &str) -> Result<Vec<String>> {
        match self {
            Self::UtDict => Ok(line.split('\t').map(str::to_string).collect()),
            Self::Neologd | Self::Sudachi => utils::parse_csv_row(line),
        }
    }

    /// 品詞表現を正規化します。
    ///
    /// 参照表(id.def)の品詞と入力行の品詞の両方に同じ書き換えを適用し、
    /// 同じ表記体系で比較できるようにします。
    pub fn canonicalize(self, expr: &str) -> String {
        match self {
            Self::Neologd | Self::UtDict => expr.to_string(),
            Self::Sudachi => {
                let mut tokens: Vec<&str> = expr.split(',').collect();
                if tokens.first() == Some(&"補助記号") {
                    tokens[0] = "記号";
                }
                if tokens.get(1) == Some(&"非自立可能") {
                    tokens[1] = "非自立";
                }
                if tokens.first() == Some(&"名詞") {
                    match tokens.get(1) {
                        Some(&"一般") => tokens[1] = "普通名詞",
                        Some(&"数") => tokens[1] = "数詞",
                        _ => {}
                    }
                }
                let joined = tokens.join(",");
                let s = GODAN_DOT.replace_all(&joined, "五段-");
                let s = GODAN_KA.replace_all(&s, "五段-カ行");
                let s = RA_ROW.replace_all(&s, "ラ行,${1}");
                s.replace("形-", "形,")
            }
        }
    }

    /// 1行分のフィールドを [`SourceEntry`] に正規化します。
    ///
    /// 列が足りない、コストが整数でない、あるいは接続IDが整数でない行は `None` を返します。
    ///
    /// 接続IDを持つ行の品詞表現は空で、参照表から補う必要があります。
    pub fn parse_entry<S>(self, fields: &[S]) -> Option<SourceEntry>
    where
        S: AsRef<str>,
    {
        let layout = self.layout();
        let field = |i: usize| fields.get(i).map(|f| f.as_ref());

        let surface = field(layout.surface)?;
        let raw_reading = field(layout.reading)?;
        let cost = field(layout.cost)?.trim().parse::<i32>().ok()?;
        let (pos, id) = match layout.class {
            ClassColumn::Pos(start) => {
                let mut tags = Vec::with_capacity(6);
                for i in start..start + 6 {
                    tags.push(field(i)?);
                }
                (PosExpr::new(self.canonicalize(&tags.join(","))), None)
            }
            ClassColumn::Id(i) => {
                let id = field(i)?.trim().parse::<u16>().ok()?;
                (PosExpr::default(), Some(ClassId(id)))
            }
        };

        Some(SourceEntry {
            surface: utils::unescape_unicode(surface).into_owned(),
            reading: utils::unescape_unicode(&utils::normalize_reading(raw_reading)).into_owned(),
            raw_reading: raw_reading.to_string(),
            pos,
            id,
            cost,
        })
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = &'static str;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "neologd" => Ok(Self::Neologd),
            "sudachi" => Ok(Self::Sudachi),
            "utdict" => Ok(Self::UtDict),
            _ => Err("Could not parse a source kind"),
        }
    }
}

/// 正規化済みの1行分のエントリ
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceEntry {
    /// 出力する表記
    pub surface: String,

    /// ひらがなに正規化した読み
    pub reading: String,

    /// 変換元の読み(仮名判定に使用)
    pub raw_reading: String,

    /// 正規化済みの品詞表現
    pub pos: PosExpr,

    /// 行が直接指定する接続ID
    pub id: Option<ClassId>,

    /// 変換元のコスト
    pub cost: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_neologd_entry() {
        let row = "#24時間以内に240RT来なければ俺の嫁,1288,1288,3942,名詞,固有名詞,一般,*,*,*,\
                   #24時間以内に240RT来なければ俺の嫁,ニジュウヨジカン,ニジュウヨジカン";
        let fields = utils::parse_csv_row(row).unwrap();
        let entry = SourceKind::Neologd.parse_entry(&fields).unwrap();
        assert_eq!(entry.surface, "#24時間以内に240RT来なければ俺の嫁");
        assert_eq!(entry.reading, "にじゅうよじかん");
        assert_eq!(entry.raw_reading, "ニジュウヨジカン");
        assert_eq!(entry.pos.as_str(), "名詞,固有名詞,一般,*,*,*");
        assert_eq!(entry.id, None);
        assert_eq!(entry.cost, 3942);
    }

    #[test]
    fn test_parse_sudachi_entry() {
        let row = "baseball heroes,4785,4785,5000,BASEBALL HEROES,名詞,固有名詞,一般,*,*,*,\
                   ベースボールヒーローズ,BASEBALL HEROES,*,A,*,*,*,*";
        let fields = utils::parse_csv_row(row).unwrap();
        let entry = SourceKind::Sudachi.parse_entry(&fields).unwrap();
        assert_eq!(entry.surface, "BASEBALL HEROES");
        assert_eq!(entry.reading, "べーすぼーるひーろーず");
        assert_eq!(entry.pos.as_str(), "名詞,固有名詞,一般,*,*,*");
        assert_eq!(entry.cost, 5000);
    }

    #[test]
    fn test_parse_utdict_entry() {
        let kind = SourceKind::UtDict;
        let fields = kind
            .split_fields("あいおいにっせい\t1849\t1849\t6000\tあいおいニッセイ")
            .unwrap();
        let entry = kind.parse_entry(&fields).unwrap();
        assert_eq!(entry.surface, "あいおいニッセイ");
        assert_eq!(entry.reading, "あいおいにっせい");
        assert_eq!(entry.id, Some(ClassId(1849)));
        assert_eq!(entry.pos.as_str(), "");
        assert_eq!(entry.cost, 6000);

        let fields = kind.split_fields("あい\tx\tx\t6000\t愛").unwrap();
        assert_eq!(None, kind.parse_entry(&fields));
    }

    #[test]
    fn test_parse_short_or_broken_row() {
        assert_eq!(None, SourceKind::Neologd.parse_entry(&["東京", "1", "1", "10"]));
        let row = "東京,1,1,abc,名詞,固有名詞,一般,*,*,*,東京,トウキョウ,トーキョー";
        let fields = utils::parse_csv_row(row).unwrap();
        assert_eq!(None, SourceKind::Neologd.parse_entry(&fields));
    }

    #[test]
    fn test_canonicalize_sudachi() {
        let kind = SourceKind::Sudachi;
        assert_eq!(
            kind.canonicalize("動詞,非自立可能,*,*,五段-ラ行,連用形-促音便"),
            "動詞,非自立,*,*,五段-ラ行,連用形,促音便"
        );
        assert_eq!(
            kind.canonicalize("動詞,自立,*,*,五段・カ行促音便,連用タ接続"),
            "動詞,自立,*,*,五段-カ行,連用タ接続"
        );
        assert_eq!(
            kind.canonicalize("動詞,自立,*,*,五段・ラ行アル,基本形"),
            "動詞,自立,*,*,五段-ラ行,アル,基本形"
        );
        assert_eq!(
            kind.canonicalize("名詞,一般,*,*,*,*"),
            "名詞,普通名詞,*,*,*,*"
        );
        assert_eq!(
            kind.canonicalize("名詞,数,*,*,*,*"),
            "名詞,数詞,*,*,*,*"
        );
        assert_eq!(
            kind.canonicalize("名詞,普通名詞,一般,*,*,*"),
            "名詞,普通名詞,一般,*,*,*"
        );
        assert_eq!(
            kind.canonicalize("補助記号,句点,*,*,*,*"),
            "記号,句点,*,*,*,*"
        );
    }

    #[test]
    fn test_canonicalize_neologd_is_identity() {
        assert_eq!(
            SourceKind::Neologd.canonicalize("動詞,自立,*,*,五段・ラ行アル,基本形"),
            "動詞,自立,*,*,五段・ラ行アル,基本形"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Ok(SourceKind::Sudachi), "sudachi".parse());
        assert_eq!(Ok(SourceKind::UtDict), "utdict".parse());
        assert!("ipadic".parse::<SourceKind>().is_err());
    }
}
