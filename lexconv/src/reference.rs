//! 品詞IDの参照表
//!
//! Mozc の `id.def` から、正規化済みの品詞表現と接続IDの対応表を構築します。
//!
//! `id.def` の各行は `<ID> <品詞1>,...,<活用形>,<語彙>` の形式で、
//! 末尾の語彙要素は取り除いて登録します。
//! 照合時の同点処理が定義順に依存するため、表は挿入順を保持します。

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::errors::{LexconvError, Result};
use crate::pos::PosExpr;
use crate::source::SourceKind;
use crate::utils;

/// 接続ID
///
/// 左文脈IDと右文脈IDは常に同じ値を用います。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u16);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 品詞表現から接続IDへの対応表
///
/// 値が `None` のエントリは、近似照合でも解決できなかった品詞表現の記録です。
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    entries: Vec<(PosExpr, Option<ClassId>)>,
    index: HashMap<String, usize>,
    by_id: HashMap<ClassId, usize>,
}

impl ReferenceTable {
    /// 空の参照表を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// `id.def` 形式のリーダーから参照表を構築します。
    ///
    /// # 引数
    ///
    /// * `rdr` - `id.def` のリーダー
    /// * `kind` - 品詞表現の正規化に用いる変換元辞書の種類
    ///
    /// # エラー
    ///
    /// 行の形式が不正な場合、[`LexconvError::InvalidFormat`] が返されます。
    pub fn from_reader<R>(rdr: R, kind: SourceKind) -> Result<Self>
    where
        R: Read,
    {
        let mut table = Self::new();
        let reader = BufReader::new(rdr);
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (id, expr) = Self::parse_line(line).ok_or_else(|| {
                LexconvError::invalid_format(
                    "id.def",
                    format!("line {}: expected `<id> <pos,...>`: {line}", i + 1),
                )
            })?;
            table.insert(PosExpr::new(kind.canonicalize(expr)), Some(id));
        }
        Ok(table)
    }

    fn parse_line(line: &str) -> Option<(ClassId, &str)> {
        let (id, expr) = utils::split_id_line(line)?;
        let id = id.parse::<u16>().ok()?;
        // The last element is the vocabulary, which Mozc uses only for specific words.
        let (expr, _) = expr.trim().rsplit_once(',')?;
        if expr.is_empty() {
            return None;
        }
        Some((ClassId(id), expr))
    }

    /// 品詞表現に対応するエントリを返します。
    ///
    /// 表に無い場合は `None`、解決不能として記録済みの場合は `Some(None)` を返します。
    #[inline(always)]
    pub fn get(&self, expr: &str) -> Option<Option<ClassId>> {
        self.index.get(expr).map(|&i| self.entries[i].1)
    }

    /// 接続IDに対応する品詞表現を返します。
    ///
    /// 同じIDを持つ品詞表現が複数ある場合は、最初に登録されたものを返します。
    pub fn class_of(&self, id: ClassId) -> Option<&PosExpr> {
        self.by_id.get(&id).map(|&i| &self.entries[i].0)
    }

    /// 品詞表現が登録済みかどうか
    pub fn contains(&self, expr: &str) -> bool {
        self.index.contains_key(expr)
    }

    /// エントリを登録します。
    ///
    /// 既に登録済みの品詞表現は値のみを上書きし、順序上の位置は維持します。
    pub fn insert(&mut self, expr: PosExpr, id: Option<ClassId>) {
        let i = match self.index.get(expr.as_str()) {
            Some(&i) => {
                self.entries[i].1 = id;
                i
            }
            None => {
                let i = self.entries.len();
                self.index.insert(expr.as_str().to_string(), i);
                self.entries.push((expr, id));
                i
            }
        };
        if let Some(id) = id {
            self.by_id.entry(id).or_insert(i);
        }
    }

    /// 登録順にエントリを走査するイテレータを返します。
    pub fn iter(&self) -> impl Iterator<Item = (&PosExpr, Option<ClassId>)> + '_ {
        self.entries.iter().map(|(expr, id)| (expr, *id))
    }

    /// 登録済みのエントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 参照表が空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
