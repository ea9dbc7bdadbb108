//! 品詞表現
//!
//! 品詞タグの並びを `,` で連結した正規形の文字列として保持します。
//! 照合時に位置ごとの比較を行うため、トークンへの分割結果も併せて保持します。

use std::fmt;

/// 品詞タグのワイルドカード
pub const WILDCARD: &str = "*";

/// 品詞タグの区切り文字
pub const DELIMITER: char = ',';

/// 正規化済みの品詞表現
///
/// 既定値はタグを持たない空の品詞表現です。
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PosExpr {
    expr: String,
    tokens: Vec<String>,
}

impl PosExpr {
    /// 連結済みの品詞表現から新しいインスタンスを作成します。
    pub fn new<S>(expr: S) -> Self
    where
        S: Into<String>,
    {
        let expr = expr.into();
        let tokens = expr.split(DELIMITER).map(str::to_string).collect();
        Self { expr, tokens }
    }

    /// 連結済みの品詞表現を返します。
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    /// 品詞タグの並びを返します。
    #[inline(always)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `i` 番目のタグを返します。範囲外の場合は `None` を返します。
    #[inline(always)]
    pub fn tag(&self, i: usize) -> Option<&str> {
        self.tokens.get(i).map(String::as_str)
    }

    /// タグを持たない空の品詞表現かどうか
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 固有名詞を表す品詞かどうか
    pub fn is_proper_noun(&self) -> bool {
        self.expr.contains("固有名詞")
    }

    /// 記号を表す品詞かどうか
    pub fn is_symbol(&self) -> bool {
        self.expr.contains("記号")
    }
}

impl fmt::Display for PosExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.expr)
    }
}
