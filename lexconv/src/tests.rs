//! lexconvのテストモジュール群
//!
//! 変換元辞書の種類ごとに、参照表の構築から出力までを通して検証するテストを含みます。

mod utdict;
