use crate::errors::{LexconvError, Result};
use crate::filter::{FilterChain, FilterOptions, SkipReason};
use crate::pipeline::{OutputMode, Pipeline, PipelineConfig};
use crate::reference::ReferenceTable;
use crate::source::SourceKind;

const ID_DEF: &str = include_str!("./resources/id.def");
const LEXICON_TSV: &str = include_str!("./resources/utdict.tsv");

const EXPECTED: &str = "\
あいおいにっせい\t1288\t1288\t6600\tあいおいニッセイ
べーすぼーる\t1288\t1288\t6500\tBaseball
ねこ\t1847\t1847\t6300\t猫
なぞ\t9999\t9999\t6300\t謎
とうきょう\t1293\t1293\t6300\t東京
";

fn rows(tsv: &str) -> impl Iterator<Item = Result<String>> + '_ {
    tsv.lines().map(|l| Ok(l.to_string()))
}

fn pipeline_with(options: FilterOptions, config: PipelineConfig) -> Pipeline {
    let kind = SourceKind::UtDict;
    let table = ReferenceTable::from_reader(ID_DEF.as_bytes(), kind).unwrap();
    let filters = FilterChain::new(kind, options, None);
    Pipeline::new(kind, table, filters, config).unwrap()
}

fn convert(pipeline: &Pipeline, tsv: &str) -> String {
    let mut out = vec![];
    pipeline.run(rows(tsv), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// 行の接続IDをそのまま使い、品詞の照合は行わない
#[test]
fn test_convert_lexicon() {
    let pipeline = pipeline_with(FilterOptions::default(), PipelineConfig::default());
    let mut out = vec![];
    let stats = pipeline.run(rows(LEXICON_TSV), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);

    assert_eq!(stats.rows, 9);
    assert_eq!(stats.emitted, 5);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.unresolved, 0);
    assert_eq!(stats.skipped(SkipReason::English), 1);
    assert_eq!(stats.skipped(SkipReason::NoKana), 1);
    assert_eq!(stats.skipped(SkipReason::Malformed), 1);
    assert_eq!(pipeline.resolver().num_entries().unwrap(), 15);
}

/// 英字のみの表記でも、参照表で固有名詞とわかる行は残る
#[test]
fn test_include_english() {
    let options = FilterOptions {
        include_english: true,
        ..Default::default()
    };
    let pipeline = pipeline_with(options, PipelineConfig::default());
    let expected = "\
あいおいにっせい\t1288\t1288\t6600\tあいおいニッセイ
はろー\t1847\t1847\t6500\thello
べーすぼーる\t1288\t1288\t6500\tBaseball
ねこ\t1847\t1847\t6300\t猫
なぞ\t9999\t9999\t6300\t謎
とうきょう\t1293\t1293\t6300\t東京
";
    assert_eq!(convert(&pipeline, LEXICON_TSV), expected);
}

#[test]
fn test_exclude_proper_nouns() {
    let options = FilterOptions {
        exclude_proper: true,
        ..Default::default()
    };
    let pipeline = pipeline_with(options, PipelineConfig::default());
    let mut out = vec![];
    let stats = pipeline.run(rows(LEXICON_TSV), &mut out).unwrap();
    let expected = "\
ねこ\t1847\t1847\t6300\t猫
なぞ\t9999\t9999\t6300\t謎
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(stats.skipped(SkipReason::ProperNoun), 3);
}

/// 品詞の一覧は参照表から引いた品詞表現で出力する
#[test]
fn test_output_classes() {
    let config = PipelineConfig {
        output_mode: OutputMode::Classes,
        ..Default::default()
    };
    let pipeline = pipeline_with(FilterOptions::default(), config);
    let mut out = vec![];
    let stats = pipeline.run(rows(LEXICON_TSV), &mut out).unwrap();
    let expected = "\
名詞,固有名詞,一般,*,*,*
名詞,一般,*,*,*,*
名詞,固有名詞,地域,一般,*,*
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(stats.unresolved, 1);
}

#[test]
fn test_output_classes_strict() {
    let config = PipelineConfig {
        output_mode: OutputMode::Classes,
        strict: true,
        ..Default::default()
    };
    let pipeline = pipeline_with(FilterOptions::default(), config);
    let mut out = vec![];
    match pipeline.run(rows(LEXICON_TSV), &mut out) {
        Err(LexconvError::UnresolvedPos(expr)) => assert_eq!(expr, "id 9999"),
        _ => panic!("unexpected result"),
    }
    assert!(out.is_empty());
}
