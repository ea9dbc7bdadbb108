//! 品詞表現から接続IDを求めるリゾルバー
//!
//! 変換元辞書の品詞体系は Mozc の品詞体系と部分的にしか一致しないため、
//! 参照表に完全一致しない品詞表現は、タグの一致数が最も多い既知の品詞で近似します。
//! この近似は単純なタグの一致数によるもので、誤る場合もあります。
//!
//! 一度求めた結果は、解決できなかった場合も含めて参照表に記録され、
//! 以降の同じ品詞表現は完全一致として即座に返ります。

use std::sync::RwLock;

use tracing::debug;

use crate::errors::{LexconvError, Result};
use crate::pos::{PosExpr, WILDCARD};
use crate::reference::{ClassId, ReferenceTable};

/// 品詞表現同士の類似度
pub trait Similarity {
    /// 入力の品詞表現 `expr` と参照表の品詞表現 `candidate` の類似度を返します。
    fn score(&self, expr: &PosExpr, candidate: &PosExpr) -> u32;
}

/// 位置ごとのタグの一致数による類似度
///
/// 入力側がワイルドカードの位置と、参照表側が汎用タグの位置は数えません。
#[derive(Clone, Copy, Debug)]
pub struct TagAgreement {
    generic_tags: &'static [&'static str],
}

impl TagAgreement {
    /// 得点にならない汎用タグを指定して作成します。
    pub const fn new(generic_tags: &'static [&'static str]) -> Self {
        Self { generic_tags }
    }
}

impl Similarity for TagAgreement {
    fn score(&self, expr: &PosExpr, candidate: &PosExpr) -> u32 {
        let mut score = 0;
        for (x, y) in expr.tokens().iter().zip(candidate.tokens()) {
            if x == WILDCARD || self.generic_tags.contains(&y.as_str()) {
                continue;
            }
            if x == y {
                score += 1;
            }
        }
        score
    }
}

/// 参照表と類似度を保持するリゾルバー
///
/// 参照表は複数のワーカーから同時に参照・追記されるため、[`RwLock`] で保護します。
/// 未知の品詞表現の照合と記録は書き込みロックの中で一度に行われます。
pub struct PosResolver<S = TagAgreement> {
    table: RwLock<ReferenceTable>,
    similarity: S,
}

impl<S> PosResolver<S>
where
    S: Similarity,
{
    /// 構築済みの参照表から新しいリゾルバーを作成します。
    pub fn new(table: ReferenceTable, similarity: S) -> Self {
        Self {
            table: RwLock::new(table),
            similarity,
        }
    }

    /// 品詞表現に対応する接続IDを求めます。
    ///
    /// # 戻り値
    ///
    /// 解決できた場合は `Some(ClassId)`、どの既知の品詞とも一致しない場合は `None`
    ///
    /// # エラー
    ///
    /// ロックが汚染されている場合、[`LexconvError::InvalidState`] が返されます。
    pub fn resolve(&self, expr: &PosExpr) -> Result<Option<ClassId>> {
        {
            let table = self
                .table
                .read()
                .map_err(|e| LexconvError::invalid_state("reference table", e.to_string()))?;
            if let Some(id) = table.get(expr.as_str()) {
                return Ok(id);
            }
        }

        let mut table = self
            .table
            .write()
            .map_err(|e| LexconvError::invalid_state("reference table", e.to_string()))?;
        // Another worker may have resolved the same expression in the meantime.
        if let Some(id) = table.get(expr.as_str()) {
            return Ok(id);
        }
        let id = self.nearest(&table, expr);
        debug!(expr = %expr, id = ?id, "approximated word class");
        table.insert(expr.clone(), id);
        Ok(id)
    }

    fn nearest(&self, table: &ReferenceTable, expr: &PosExpr) -> Option<ClassId> {
        let mut best_score = 0;
        let mut best = None;
        for (candidate, id) in table.iter() {
            let score = self.similarity.score(expr, candidate);
            if best_score < score {
                best_score = score;
                best = id;
            }
        }
        best
    }

    /// 接続IDを定義する品詞表現を求めます。
    ///
    /// 品詞の代わりに接続IDを持つ変換元で、固有名詞かどうかの判定に使用します。
    pub fn class_of(&self, id: ClassId) -> Result<Option<PosExpr>> {
        let table = self
            .table
            .read()
            .map_err(|e| LexconvError::invalid_state("reference table", e.to_string()))?;
        Ok(table.class_of(id).cloned())
    }

        /// 参照表に登録済みのエントリ数(近似結果の記録を含む)
    pub fn num_entries(&self) -> Result<usize> {
        let table = self
            .table
            .read()
            .map_err(|e| LexconvError::invalid_state("reference table", e.to_string()))?;
        Ok(table.len())
    }
}
