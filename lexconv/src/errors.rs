//! エラー型の定義
//!
//! このモジュールは、lexconvライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// lexconv専用のResult型
///
/// エラー型としてデフォルトで[`LexconvError`]を使用します。
pub type Result<T, E = LexconvError> = std::result::Result<T, E>;

/// lexconvのエラー型
///
/// 変換処理で発生する可能性のあるすべてのエラーを表現します。
/// 行単位の問題はスキップとして扱われるため、ここに現れるのは
/// 起動時のエラー、I/Oエラー、および設定で致命的とされた品詞解決の失敗のみです。
#[derive(Debug, thiserror::Error)]
pub enum LexconvError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 品詞表現がどのIDにも解決できなかったエラー
    ///
    /// 厳格モードの場合のみ発生します。
    #[error("Unexpected word class: {0}")]
    UnresolvedPos(String),

    /// 未知の文字エンコーディング名
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// UTF-8エンコーディングエラー
    ///
    /// [`std::str::Utf8Error`]のエラーバリアント。
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// ワーカースレッドプールの構築エラー
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LexconvError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = LexconvError::invalid_format("id.def", "line 3: missing class id");
        assert_eq!(
            e.to_string(),
            "InvalidFormatError: id.def: line 3: missing class id"
        );

        let e = LexconvError::UnresolvedPos("名詞,謎,*,*,*,*".to_string());
        assert_eq!(e.to_string(), "Unexpected word class: 名詞,謎,*,*,*,*");

        let e = LexconvError::invalid_state("dedup", "lock poisoned");
        assert_eq!(e.to_string(), "InvalidStateError: dedup: lock poisoned");
    }
}
