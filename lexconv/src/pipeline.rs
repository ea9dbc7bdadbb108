//! バッチ変換パイプライン
//!
//! 入力行を固定長のスライスに区切り、スライス内の行をワーカースレッドで並列に変換します。
//! 変換結果は入力順に集められ、重複排除を経て次のスライスに進む前に書き出されます。
//! 出力の順序は入力の順序と常に一致します。

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use hashbrown::HashSet;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::cost::normalize_cost;
use crate::dedup::{DedupKey, DedupTracker};
use crate::errors::{LexconvError, Result};
use crate::filter::{FilterChain, SkipReason};
use crate::pos::PosExpr;
use crate::reference::{ClassId, ReferenceTable};
use crate::resolver::{PosResolver, Similarity, TagAgreement};
use crate::source::SourceKind;
use crate::user_dict::{UserDictLine, UserIdDef};

/// 既定のワーカースレッド数
pub const DEFAULT_THREADS: usize = 18;

/// 既定のスライス長
pub const DEFAULT_SLICE: usize = 8000;

/// 出力の種類
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputMode {
    /// Mozc の辞書レコード
    #[default]
    Records,

    /// 入力に現れる正規化済みの品詞表現の一覧
    ///
    /// 参照表の書き換え規則を調整する際に使用します。
    Classes,

    /// Mozc のユーザー辞書にインポートできる行
    ///
    /// 接続IDを [`UserIdDef`] で品詞名に変換して出力します。
    UserDict,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Records => "records",
            Self::Classes => "classes",
            Self::UserDict => "user-dict",
        })
    }
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "records" => Ok(Self::Records),
            "classes" => Ok(Self::Classes),
            "user-dict" => Ok(Self::UserDict),
            _ => Err("Could not parse an output mode"),
        }
    }
}

/// パイプラインの設定
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PipelineConfig {
    /// ワーカースレッド数
    pub threads: usize,

    /// 1スライスあたりの行数
    pub slice: usize,

    /// 品詞表現が解決できなかった場合に変換を中断する
    pub strict: bool,

    /// 出力の種類
    pub output_mode: OutputMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            slice: DEFAULT_SLICE,
            strict: false,
            output_mode: OutputMode::Records,
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(LexconvError::invalid_argument(
                "threads",
                "must be at least 1",
            ));
        }
        if self.slice == 0 {
            return Err(LexconvError::invalid_argument("slice", "must be at least 1"));
        }
        Ok(())
    }
}

/// Mozc の辞書レコード
///
/// 左文脈IDと右文脈IDには同じ接続IDを出力します。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputRecord {
    /// ひらがなの読み
    pub reading: String,

    /// 接続ID
    pub id: ClassId,

    /// 正規化済みのコスト
    pub cost: i32,

    /// 表記
    pub surface: String,
}

impl OutputRecord {
    /// 重複判定のキー
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.reading, self.id, &self.surface)
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.reading, self.id, self.id, self.cost, self.surface
        )
    }
}

/// 1行分の変換結果
#[derive(Clone, Debug, Eq, PartialEq)]
enum RowOutcome {
    Record(OutputRecord),
    Class(PosExpr),
    Skipped(SkipReason),
    Unresolved(String),
}

/// 変換の集計
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// 読み込んだ行数
    pub rows: usize,

    /// 書き出した行数
    pub emitted: usize,

    /// 重複のため書き出さなかった行数
    pub duplicates: usize,

    /// 品詞表現が解決できなかった行数
    pub unresolved: usize,

    /// ユーザー辞書の品詞名が無いため書き出さなかった行数
    pub unnamed: usize,

    /// 理由ごとの棄却した行数
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl Stats {
    /// 指定した理由で棄却した行数
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    fn log(&self, kind: SourceKind) {
        info!(
            source = %kind,
            rows = self.rows,
            emitted = self.emitted,
            duplicates = self.duplicates,
            unresolved = self.unresolved,
            unnamed = self.unnamed,
            "conversion finished"
        );
        for (reason, count) in &self.skipped {
            info!(%reason, count, "skipped rows");
        }
    }
}

/// 要素を並列に変換し、入力と同じ順序で結果を返します。
///
/// # 引数
///
/// * `pool` - 変換に使用するスレッドプール
/// * `items` - 変換する要素
/// * `f` - 変換関数
pub fn map_slice<T, U, F>(pool: &ThreadPool, items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Send + Sync,
{
    pool.install(|| items.into_par_iter().map(f).collect())
}

/// 変換元辞書を Mozc の辞書レコードに変換するパイプライン
///
/// 参照表と重複排除の状態はパイプラインが所有し、
/// [`Pipeline::run`] を複数回呼び出した場合も引き継がれます。
pub struct Pipeline<S = TagAgreement> {
    kind: SourceKind,
    resolver: PosResolver<S>,
    filters: FilterChain,
    dedup: DedupTracker,
    config: PipelineConfig,
    user_id_def: Option<UserIdDef>,
    pool: ThreadPool,
}

impl Pipeline<TagAgreement> {
    /// 変換元辞書の種類に応じた類似度でパイプラインを作成します。
    ///
    /// # 引数
    ///
    /// * `kind` - 変換元辞書の種類
    /// * `table` - 構築済みの参照表
    /// * `filters` - 絞り込みの述語列
    /// * `config` - パイプラインの設定
    ///
    /// # エラー
    ///
    /// スレッド数またはスライス長が 0 の場合、[`LexconvError::InvalidArgument`] が返されます。
    pub fn new(
        kind: SourceKind,
        table: ReferenceTable,
        filters: FilterChain,
        config: PipelineConfig,
    ) -> Result<Self> {
        let similarity = TagAgreement::new(kind.generic_tags());
        Self::with_similarity(kind, table, similarity, filters, config)
    }
}

impl<S> Pipeline<S>
where
    S: Similarity + Send + Sync,
{
    /// 任意の類似度でパイプラインを作成します。
    pub fn with_similarity(
        kind: SourceKind,
        table: ReferenceTable,
        similarity: S,
        filters: FilterChain,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("lexconv-worker-{i}"))
            .build()?;
        Ok(Self {
            kind,
            resolver: PosResolver::new(table, similarity),
            filters,
            dedup: DedupTracker::new(),
            config,
            user_id_def: None,
            pool,
        })
    }

    /// ユーザー辞書の出力に用いる品詞名の対応表を設定します。
    pub fn user_id_def(mut self, def: UserIdDef) -> Self {
        self.user_id_def = Some(def);
        self
    }

    /// 品詞リゾルバー
    pub fn resolver(&self) -> &PosResolver<S> {
        &self.resolver
    }

    /// 重複排除の状態
    pub fn dedup(&self) -> &DedupTracker {
        &self.dedup
    }

    /// 入力行を変換し、結果を `wtr` に書き出します。
    ///
    /// # 引数
    ///
    /// * `lines` - 入力行(改行を含まない)
    /// * `wtr` - 書き出し先
    ///
    /// # 戻り値
    ///
    /// この呼び出しで処理した行の集計
    ///
    /// # エラー
    ///
    /// 厳格モードで品詞表現が解決できなかった場合、[`LexconvError::UnresolvedPos`] が返されます。
    /// この場合、解決できなかった行を含むスライスは書き出されません。
    ///
    /// ユーザー辞書を出力する設定で品詞名の対応表が無い場合、
    /// [`LexconvError::InvalidArgument`] が返されます。
    pub fn run<I, W>(&self, lines: I, wtr: &mut W) -> Result<Stats>
    where
        I: IntoIterator<Item = Result<String>>,
        W: Write,
    {
        if self.config.output_mode == OutputMode::UserDict && self.user_id_def.is_none() {
            return Err(LexconvError::invalid_argument(
                "user_id_def",
                "required for the user-dict output mode",
            ));
        }
        let mut stats = Stats::default();
        let mut classes = HashSet::new();
        let mut lines = lines.into_iter();
        for slice_index in 0.. {
            let slice = lines
                .by_ref()
                .take(self.config.slice)
                .collect::<Result<Vec<_>>>()?;
            if slice.is_empty() {
                break;
            }
            debug!(slice = slice_index, rows = slice.len(), "processing slice");
            stats.rows += slice.len();

            let outcomes = map_slice(&self.pool, slice, |line| self.process(&line))
                .into_iter()
                .collect::<Result<Vec<_>>>()?;
            self.emit(outcomes, wtr, &mut classes, &mut stats)?;
        }
        wtr.flush()?;
        stats.log(self.kind);
        Ok(stats)
    }

    fn process(&self, line: &str) -> Result<RowOutcome> {
        let Some(mut entry) = self
            .kind
            .split_fields(line)
            .ok()
            .and_then(|fields| self.kind.parse_entry(&fields))
        else {
            return Ok(RowOutcome::Skipped(SkipReason::Malformed));
        };
        // Rows that carry the id take their word class from the reference table.
        if let Some(id) = entry.id {
            if let Some(pos) = self.resolver.class_of(id)? {
                entry.pos = pos;
            }
        }

        if self.config.output_mode == OutputMode::Classes {
            if let Some(reason) = self.filters.check_basic(&entry) {
                return Ok(RowOutcome::Skipped(reason));
            }
            return Ok(match entry.id {
                Some(id) if entry.pos.is_empty() => RowOutcome::Unresolved(format!("id {id}")),
                _ => RowOutcome::Class(entry.pos),
            });
        }

        if let Some(reason) = self.filters.check(&entry) {
            return Ok(RowOutcome::Skipped(reason));
        }
        let id = match entry.id {
            Some(id) => Some(id),
            None => self.resolver.resolve(&entry.pos)?,
        };
        Ok(match id {
            Some(id) => RowOutcome::Record(OutputRecord {
                reading: entry.reading,
                id,
                cost: normalize_cost(entry.cost),
                surface: entry.surface,
            }),
            None => RowOutcome::Unresolved(entry.pos.to_string()),
        })
    }

    fn emit<W>(
        &self,
        outcomes: Vec<RowOutcome>,
        wtr: &mut W,
        classes: &mut HashSet<String>,
        stats: &mut Stats,
    ) -> Result<()>
    where
        W: Write,
    {
        if self.config.strict {
            let unresolved = outcomes.iter().find_map(|outcome| match outcome {
                RowOutcome::Unresolved(expr) => Some(expr),
                _ => None,
            });
            if let Some(expr) = unresolved {
                return Err(LexconvError::UnresolvedPos(expr.clone()));
            }
        }

        let user_id_def = self
            .user_id_def
            .as_ref()
            .filter(|_| self.config.output_mode == OutputMode::UserDict);
        for outcome in outcomes {
            match outcome {
                RowOutcome::Record(record) => {
                    let pos_name = match user_id_def {
                        Some(def) => match def.get(record.id) {
                            Some(name) => Some(name),
                            None => {
                                warn!(
                                    id = %record.id,
                                    surface = %record.surface,
                                    "no user dictionary word class"
                                );
                                stats.unnamed += 1;
                                continue;
                            }
                        },
                        None => None,
                    };
                    if !self.dedup.check_and_mark(record.dedup_key())? {
                        stats.duplicates += 1;
                        continue;
                    }
                    match pos_name {
                        Some(pos_name) => {
                            let line = UserDictLine {
                                reading: &record.reading,
                                surface: &record.surface,
                                pos_name,
                            };
                            writeln!(wtr, "{line}")?;
                        }
                        None => writeln!(wtr, "{record}")?,
                    }
                    stats.emitted += 1;
                }
                RowOutcome::Class(expr) => {
                    if classes.insert(expr.as_str().to_string()) {
                        writeln!(wtr, "{expr}")?;
                        stats.emitted += 1;
                    } else {
                        stats.duplicates += 1;
                    }
                }
                RowOutcome::Skipped(reason) => {
                    *stats.skipped.entry(reason).or_default() += 1;
                }
                RowOutcome::Unresolved(expr) => {
                    warn!(%expr, "unexpected word class");
                    stats.unresolved += 1;
                }
            }
        }
        Ok(())
    }
}
