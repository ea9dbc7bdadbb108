//! 変換元辞書ファイルの読み込み
//!
//! UTF-8 以外で配布されている辞書は、エンコーディング名を指定すると
//! 読み込みながら UTF-8 へ変換されます。変換は行を要求された分だけ進むため、
//! ファイル全体をメモリに読み込むことはありません。

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use encoding_rs::{Decoder, DecoderResult, Encoding};

use crate::errors::{LexconvError, Result};

const BOM: char = '\u{feff}';

const BUFFER_SIZE: usize = 8 * 1024;

/// 読み込みながら UTF-8 に変換するリーダー
struct DecodeReader<R> {
    rdr: R,
    decoder: Decoder,
    input: Box<[u8]>,
    input_start: usize,
    input_end: usize,
    output: Box<[u8]>,
    output_start: usize,
    output_end: usize,
    eof: bool,
    malformed: bool,
    finished: bool,
}

impl<R> DecodeReader<R>
where
    R: Read,
{
    fn new(rdr: R, encoding: &'static Encoding) -> Self {
        Self {
            rdr,
            decoder: encoding.new_decoder_with_bom_removal(),
            input: vec![0; BUFFER_SIZE].into_boxed_slice(),
            input_start: 0,
            input_end: 0,
            output: vec![0; BUFFER_SIZE].into_boxed_slice(),
            output_start: 0,
            output_end: 0,
            eof: false,
            malformed: false,
            finished: false,
        }
    }

    fn fill_output(&mut self) -> io::Result<()> {
        while self.output_start == self.output_end && !self.finished {
            // Text decoded before an invalid sequence is handed out first.
            if self.malformed {
                self.finished = true;
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "stream contains a byte sequence invalid in {}",
                        self.decoder.encoding().name()
                    ),
                ));
            }
            if self.input_start == self.input_end && !self.eof {
                self.input_end = self.rdr.read(&mut self.input)?;
                self.input_start = 0;
                self.eof = self.input_end == 0;
            }
            let (result, read, written) = self.decoder.decode_to_utf8_without_replacement(
                &self.input[self.input_start..self.input_end],
                &mut self.output,
                self.eof,
            );
            self.input_start += read;
            self.output_start = 0;
            self.output_end = written;
            match result {
                DecoderResult::InputEmpty => self.finished = self.eof,
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(..) => self.malformed = true,
            }
        }
        Ok(())
    }
}

impl<R> Read for DecodeReader<R>
where
    R: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill_output()?;
        let available = &self.output[self.output_start..self.output_end];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.output_start += n;
        Ok(n)
    }
}

/// 行単位で変換元辞書を読み込むリーダー
pub struct SourceReader {
    inner: Box<dyn BufRead + Send>,
}

impl SourceReader {
    /// ファイルを開きます。
    ///
    /// # 引数
    ///
    /// * `path` - 変換元辞書のパス
    /// * `encoding` - 入力のエンコーディング名(`None` の場合は UTF-8)
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、[`LexconvError::Io`] が返されます。
    /// エンコーディング名が不明な場合、[`LexconvError::UnknownEncoding`] が返されます。
    ///
    /// 内容の読み込みと変換は [`SourceReader::lines`] の走査に合わせて行われます。
    pub fn open<P>(path: P, encoding: Option<&str>) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::from_reader(file, encoding)
    }

    /// 任意のリーダーから作成します。
    ///
    /// この時点では `rdr` から読み込みません。
    pub fn from_reader<R>(rdr: R, encoding: Option<&str>) -> Result<Self>
    where
        R: Read + Send + 'static,
    {
        let Some(label) = encoding else {
            return Ok(Self {
                inner: Box::new(BufReader::new(rdr)),
            });
        };
        let enc = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| LexconvError::UnknownEncoding(label.to_string()))?;
        Ok(Self {
            inner: Box::new(BufReader::new(DecodeReader::new(rdr, enc))),
        })
    }

    /// 空行を除いた行を順に返すイテレータに変換します。
    ///
    /// 行末の改行文字と先頭の BOM は取り除かれます。
    /// 入力のエンコーディングとして不正なバイト列を読んだ場合、
    /// その位置で [`LexconvError::InvalidFormat`] を返します。
    pub fn lines(self) -> impl Iterator<Item = Result<String>> {
        self.inner
            .lines()
            .enumerate()
            .filter_map(|(i, line)| match line {
                Ok(line) => {
                    let line = line.trim_end_matches('\r');
                    let line = if i == 0 {
                        line.trim_start_matches(BOM)
                    } else {
                        line
                    };
                    (!line.is_empty()).then(|| Ok(line.to_string()))
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    Some(Err(LexconvError::invalid_format("input", e.to_string())))
                }
                Err(e) => Some(Err(e.into())),
            })
    }
}
