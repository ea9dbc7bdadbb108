//! テキスト処理のユーティリティ関数を提供するモジュール
//!
//! 主に以下の機能を提供します：
//!
//! - CSV行の解析と引用符処理
//! - `id.def` 形式の行の分割
//! - 読みに仮名が含まれるかの判定
//! - カタカナ読みのひらがな化
//! - `\uXXXX` 形式のエスケープの復元

use std::borrow::Cow;
use std::sync::LazyLock;

use csv_core::ReadFieldResult;
use kanaria::string::{ConvertType, UCSStr};
use kanaria::utils::ConvertTarget;
use regex::{Captures, Regex};

use crate::errors::Result;

static KANA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Hiragana}\p{Katakana}]").unwrap());

static UNICODE_ESCAPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").unwrap());

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
/// 4096バイトを超えるフィールドも分割せずに読み込みます。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列(改行を含まない1行)
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use lexconv::utils::parse_csv_row;
/// let fields = parse_csv_row("名詞,トスカーナ").unwrap();
/// assert_eq!(fields, vec!["名詞", "トスカーナ"]);
///
/// let fields_with_quote = parse_csv_row("名詞,\"1,2-ジクロロエタン\"").unwrap();
/// assert_eq!(fields_with_quote, vec!["名詞", "1,2-ジクロロエタン"]);
/// ```
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut field = vec![];
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        match result {
            // An empty input on the next call is treated as EOF by csv_core.
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let text = String::from_utf8(std::mem::take(&mut field))
                    .map_err(|e| e.utf8_error())?;
                fields.push(text);
                if record_end {
                    break;
                }
            }
            ReadFieldResult::End => break,
        }
    }
    Ok(fields)
}

/// `<ID> <残り>` 形式の行を ID とそれ以降に分割する
///
/// 区切りは任意の空白文字で、行頭の空白は無視します。
pub fn split_id_line(line: &str) -> Option<(&str, &str)> {
    line.trim_start().split_once(char::is_whitespace)
}

/// 文字列にひらがなまたはカタカナが1文字以上含まれるかを判定する
pub fn contains_kana(text: &str) -> bool {
    KANA_PATTERN.is_match(text)
}

/// 読みをMozc辞書用のひらがな表記に正規化する
///
/// カタカナをひらがなに変換し、歴史的仮名の「ゐ」「ゑ」を「い」「え」に置き換えます。
///
/// ```
/// # use lexconv::utils::normalize_reading;
/// assert_eq!(normalize_reading("トウキョウ"), "とうきょう");
/// assert_eq!(normalize_reading("ヰスキー"), "いすきー");
/// ```
pub fn normalize_reading(reading: &str) -> String {
    let chars: Vec<char> = reading.chars().collect();
    UCSStr::convert(&chars, ConvertType::Hiragana, ConvertTarget::ALL)
        .iter()
        .map(|&c| match c {
            'ゐ' => 'い',
            'ゑ' => 'え',
            c => c,
        })
        .collect()
}

/// `\uXXXX` 形式のエスケープを対応する文字に復元する
///
/// サロゲート等、文字として不正なコードポイントはそのまま残します。
pub fn unescape_unicode(text: &str) -> Cow<'_, str> {
    UNICODE_ESCAPE_PATTERN.replace_all(text, |caps: &Captures| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), |c| c.to_string())
    })
}

#[cfg(test)]
/// HashMapリテラルを簡潔に記述するためのマクロ
macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

#[cfg(test)]
pub(crate) use hashmap;
