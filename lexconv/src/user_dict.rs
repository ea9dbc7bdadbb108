//! ユーザー辞書用の品詞名
//!
//! Mozc のユーザー辞書は接続IDではなく「名詞」「固有名詞」などの品詞名で品詞を指定します。
//! `user_dic_id.def` の各行は `<ID> <品詞名>` の形式で、接続IDから品詞名への対応を定義します。
//! 同じIDが複数回現れた場合は後の行が優先されます。

use std::fmt;
use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::errors::{LexconvError, Result};
use crate::reference::ClassId;
use crate::utils;

/// 接続IDからユーザー辞書の品詞名への対応表
#[derive(Clone, Debug, Default)]
pub struct UserIdDef {
    names: HashMap<ClassId, String>,
}

impl UserIdDef {
    /// 空の対応表を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// `user_dic_id.def` 形式のリーダーから対応表を構築します。
    ///
    /// # エラー
    ///
    /// 行の形式が不正な場合、[`LexconvError::InvalidFormat`] が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut def = Self::new();
        let reader = BufReader::new(rdr);
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (id, name) = Self::parse_line(line).ok_or_else(|| {
                LexconvError::invalid_format(
                    "user_dic_id.def",
                    format!("line {}: expected `<id> <name>`: {line}", i + 1),
                )
            })?;
            def.insert(id, name);
        }
        Ok(def)
    }

    fn parse_line(line: &str) -> Option<(ClassId, &str)> {
        let (id, rest) = utils::split_id_line(line)?;
        let id = id.parse::<u16>().ok()?;
        let name = rest.split_whitespace().next()?;
        Some((ClassId(id), name))
    }

    /// 品詞名を登録します。
    pub fn insert<S>(&mut self, id: ClassId, name: S)
    where
        S: Into<String>,
    {
        self.names.insert(id, name.into());
    }

    /// 接続IDに対応する品詞名を返します。
    #[inline(always)]
    pub fn get(&self, id: ClassId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// 登録済みの品詞名の数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 対応表が空かどうか
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Mozc のユーザー辞書の1行
///
/// `読み<TAB>表記<TAB>品詞名<TAB>コメント` の形式で、コメントは常に空です。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserDictLine<'a> {
    /// ひらがなの読み
    pub reading: &'a str,

    /// 表記
    pub surface: &'a str,

    /// 品詞名
    pub pos_name: &'a str,
}

impl fmt::Display for UserDictLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t", self.reading, self.surface, self.pos_name)
    }
}
