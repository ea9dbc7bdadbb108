//! サブコマンド共通の引数と変換処理
//!
//! 参照表・除外語リスト・ユーザー辞書の品詞名の読み込み、入力ファイルのオープン、
//! パイプラインの実行など、変換元辞書の種類によらない処理をまとめています。

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lexconv::errors::LexconvError;
use lexconv::pipeline::{DEFAULT_THREADS, OutputMode};
use lexconv::{
    ExcludeList, FilterChain, FilterOptions, Pipeline, PipelineConfig, ReferenceTable,
    SourceKind, SourceReader, Stats, UserIdDef, WordList,
};
use tracing::info;

/// 参照表のパスを上書きする環境変数
pub const ID_FILE_ENV: &str = "MOZC_ID_FILE";

/// `yes` の場合に厳格モードを有効にする環境変数
pub const STRICT_ENV: &str = "ERROR_ON_UNEXPECTED_CLASS";

/// Mozc のソースツリーに対する既定の参照表のパス
pub const DEFAULT_ID_FILE: &str = "../../mozc/src/data/dictionary_oss/id.def";

/// サブコマンド共通の引数
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Number of worker threads.
    #[clap(short = 't', long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Source lexicon file. Can be given more than once; files are converted in order.
    #[clap(short = 'f', long = "filename", required = true)]
    filenames: Vec<PathBuf>,

    /// Encoding of the source files (e.g. euc-jp). UTF-8 is assumed when omitted.
    #[clap(long)]
    encoding: Option<String>,

    /// Mozc id.def file. The MOZC_ID_FILE environment variable takes precedence.
    #[clap(short = 'i', long, default_value = DEFAULT_ID_FILE)]
    idfile: PathBuf,

    /// File listing words to exclude (`reading<TAB>surface` or a bare surface per line).
    #[clap(short = 'x', long)]
    exclude_file: Option<PathBuf>,

    /// What to write: dictionary records, the distinct word classes found in the input,
    /// or user dictionary entries (user-dict).
    #[clap(long, default_value_t = OutputMode::Records)]
    output_mode: OutputMode,

    /// Mozc user_dic_id.def mapping class IDs to user dictionary word class names.
    /// Switches the output to user dictionary entries unless --output-mode says otherwise.
    #[clap(short = 'U', long)]
    user_dic_id_def: Option<PathBuf>,

    /// Abort on a word class that cannot be mapped to any ID.
    /// Also enabled by ERROR_ON_UNEXPECTED_CLASS=yes.
    #[clap(long)]
    strict: bool,
}

/// 変換処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// ファイルを開けなかった
    #[error("Could not open {}: {source}", .path.display())]
    Open {
        /// ファイルのパス
        path: PathBuf,
        /// 原因
        source: io::Error,
    },

    /// 変換エラー
    #[error("Conversion failed: {0}")]
    Lexconv(#[from] LexconvError),
}

/// 環境変数を考慮して参照表のパスを決定する
///
/// 環境変数が空でなければ、コマンドライン引数より優先します。
pub fn resolve_id_file(arg: &Path, env: Option<OsString>) -> PathBuf {
    match env {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => arg.to_path_buf(),
    }
}

/// 環境変数を考慮して厳格モードかどうかを決定する
pub fn resolve_strict(arg: bool, env: Option<&str>) -> bool {
    arg || env == Some("yes")
}

fn open(path: &Path) -> Result<File, RunError> {
    File::open(path).map_err(|source| RunError::Open {
        path: path.to_path_buf(),
        source,
    })
}

impl CommonArgs {
    /// 環境変数を反映したパイプラインの設定
    fn pipeline_config(&self, slice: usize, strict_env: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            threads: self.threads,
            slice,
            strict: resolve_strict(self.strict, strict_env),
            output_mode: self.output_mode(),
        }
    }

    fn output_mode(&self) -> OutputMode {
        match (self.output_mode, &self.user_dic_id_def) {
            (OutputMode::Records, Some(_)) => OutputMode::UserDict,
            (mode, _) => mode,
        }
    }

    fn user_id_def(&self) -> Result<Option<UserIdDef>, RunError> {
        let Some(path) = &self.user_dic_id_def else {
            return Ok(None);
        };
        let def = UserIdDef::from_reader(open(path)?)?;
        info!(path = %path.display(), classes = def.len(), "loaded user dictionary word classes");
        Ok(Some(def))
    }

    fn exclude_list(&self) -> Result<Option<Arc<dyn ExcludeList>>, RunError> {
        let Some(path) = &self.exclude_file else {
            return Ok(None);
        };
        let list = WordList::from_reader(open(path)?)?;
        info!(path = %path.display(), words = list.len(), "loaded exclude list");
        Ok(Some(Arc::new(list)))
    }

    /// 入力ファイルを変換し、結果を `wtr` に書き出します。
    ///
    /// # 引数
    ///
    /// * `kind` - 変換元辞書の種類
    /// * `options` - 絞り込みの設定
    /// * `slice` - 1スライスあたりの行数
    /// * `wtr` - 書き出し先
    pub fn convert<W>(
        &self,
        kind: SourceKind,
        options: FilterOptions,
        slice: usize,
        wtr: &mut W,
    ) -> Result<Stats, RunError>
    where
        W: Write,
    {
        let id_file = resolve_id_file(&self.idfile, std::env::var_os(ID_FILE_ENV));
        let table = ReferenceTable::from_reader(open(&id_file)?, kind)?;
        info!(path = %id_file.display(), classes = table.len(), "loaded reference table");

        let filters = FilterChain::new(kind, options, self.exclude_list()?);
        let strict_env = std::env::var(STRICT_ENV).ok();
        let config = self.pipeline_config(slice, strict_env.as_deref());
        let mut pipeline = Pipeline::new(kind, table, filters, config)?;
        if let Some(def) = self.user_id_def()? {
            pipeline = pipeline.user_id_def(def);
        }

        // Every input is opened before any output; decoding starts when its turn comes.
        let mut readers = Vec::with_capacity(self.filenames.len());
        for path in &self.filenames {
            readers.push(SourceReader::from_reader(
                open(path)?,
                self.encoding.as_deref(),
            )?);
        }
        let lines = readers.into_iter().flat_map(SourceReader::lines);
        Ok(pipeline.run(lines, wtr)?)
    }
}
