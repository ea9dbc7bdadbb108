//! 出力済みエントリの重複排除

use std::sync::Mutex;

use hashbrown::HashSet;

use crate::errors::{LexconvError, Result};
use crate::reference::ClassId;

/// 重複判定のキー
///
/// 読み・接続ID・表記を空白で連結した文字列です。
/// コストはキーに含めないため、同じ語が異なるコストで複数回現れた場合は最初の1件のみが残ります。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    /// 読み・接続ID・表記からキーを作成します。
    pub fn new(reading: &str, id: ClassId, surface: &str) -> Self {
        Self(format!("{reading} {id} {surface}"))
    }

    /// キーの文字列表現
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 出力済みのキーを記録する
///
/// 実行全体で1つだけ作成し、すべてのスライスで共有します。
#[derive(Debug, Default)]
pub struct DedupTracker {
    seen: Mutex<HashSet<DedupKey>>,
}

impl DedupTracker {
    /// 空のトラッカーを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// キーが記録済みかどうか
    pub fn seen(&self, key: &DedupKey) -> Result<bool> {
        Ok(self.lock()?.contains(key))
    }

    /// キーを記録します。
    pub fn mark(&self, key: DedupKey) -> Result<()> {
        self.lock()?.insert(key);
        Ok(())
    }

    /// 未記録のキーであれば記録して `true` を返します。
    ///
    /// 判定と記録は1つのロックの中で行われるため、
    /// 同じキーに対して `true` が返るのは常に1回のみです。
    pub fn check_and_mark(&self, key: DedupKey) -> Result<bool> {
        Ok(self.lock()?.insert(key))
    }

    /// 記録済みのキーの数
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// 記録が空かどうか
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashSet<DedupKey>>> {
        self.seen
            .lock()
            .map_err(|e| LexconvError::invalid_state("dedup tracker", e.to_string()))
    }
}
