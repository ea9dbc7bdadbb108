//! 除外語リスト
//!
//! 変換結果に含めたくない語を判定します。
//! ファイルの各行は `読み<TAB>表記` の組、または表記のみで、
//! 表記のみの行はどの読みに対してもその表記を除外します。
//! 空行と `#` で始まる行は無視します。

use std::io::{BufRead, BufReader, Read};

use hashbrown::{HashMap, HashSet};

use crate::errors::Result;

/// 語が除外対象かどうかを判定する
pub trait ExcludeList: Send + Sync {
    /// 読みと表記の組が除外対象の場合 `true` を返します。
    fn is_excluded(&self, reading: &str, surface: &str) -> bool;
}

/// ファイルから読み込む除外語リスト
#[derive(Clone, Debug, Default)]
pub struct WordList {
    pairs: HashMap<String, HashSet<String>>,
    surfaces: HashSet<String>,
}

impl WordList {
    /// リーダーから除外語リストを読み込みます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut list = Self::default();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((reading, surface)) => {
                    list.pairs
                        .entry(reading.to_string())
                        .or_default()
                        .insert(surface.to_string());
                }
                None => {
                    list.surfaces.insert(line.to_string());
                }
            }
        }
        Ok(list)
    }

    /// 登録されている語の数
    pub fn len(&self) -> usize {
        self.pairs.values().map(HashSet::len).sum::<usize>() + self.surfaces.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.surfaces.is_empty()
    }
}

impl ExcludeList for WordList {
    fn is_excluded(&self, reading: &str, surface: &str) -> bool {
        self.surfaces.contains(surface)
            || self
                .pairs
                .get(reading)
                .is_some_and(|surfaces| surfaces.contains(surface))
    }
}
