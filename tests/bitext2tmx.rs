use std::collections::HashSet;
use std::fs;

use tmxbitext::error::Error;
use tmxbitext::filtering::SegmentFilter;
use tmxbitext::lang::LanguageCode;
use tmxbitext::pipelines::{Bitext2Tmx, Pipeline, Tmx2Bitext};
use tmxbitext::tmx::TmxReader;

fn pairs() -> Vec<(String, String)> {
    [
        ("Hello world.", "你好，世界。"),
        ("Tom & Jerry <3", "猫和老鼠 <3"),
        ("It costs 5 > 3 dollars.", "它花费 5 > 3 美元。"),
        ("\"Quoted\" text", "“引用”文本"),
    ]
    .iter()
    .map(|(s, t)| (s.to_string(), t.to_string()))
    .collect()
}

#[test_log::test]
fn round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let bitext: String = pairs()
        .iter()
        .map(|(s, t)| format!("{}\t{}\n", s, t))
        .collect();
    fs::write(dir.path().join("resource.en-zh.bitext"), bitext).unwrap();

    let report = Bitext2Tmx::new(dir.path().to_path_buf(), None).run().unwrap();
    assert!(report.is_success());
    let output = &report.files()[0].output;
    assert_eq!(output, &dir.path().join("resource.en-zh.tmx"));

    let read: HashSet<(String, String)> = TmxReader::from_path(output)
        .unwrap()
        .map(|unit| {
            let unit = unit.unwrap();
            let (s, t) = unit.pair("en-US", "zh-CN");
            (s.unwrap().to_string(), t.unwrap().to_string())
        })
        .collect();
    assert_eq!(read, pairs().into_iter().collect());
}

#[test]
fn back_to_bitext() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("resource.en-zh.bitext");
    fs::write(&input, "Hello world.\t你好，世界。\nmalformed\n").unwrap();

    let report = Bitext2Tmx::new(input, None).run().unwrap();
    assert_eq!(report.files()[0].outcome.as_ref().unwrap().nb_skipped, 1);

    let out = tempfile::tempdir().unwrap();
    let report = Tmx2Bitext::new(
        dir.path().join("resource.en-zh.tmx"),
        Some(out.path().to_path_buf()),
        LanguageCode::parse("en").unwrap(),
        LanguageCode::parse("zh").unwrap(),
        SegmentFilter::default(),
    )
    .run()
    .unwrap();
    assert!(report.is_success());

    let bitext = fs::read_to_string(out.path().join("resource.en-zh.en-zh.bitext")).unwrap();
    assert_eq!(bitext.lines().collect::<Vec<_>>(), vec!["Hello world.\t你好，世界。"]);
}

#[test]
fn invalid_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.en-zh.bitext"), "a\tb\n").unwrap();
    fs::write(dir.path().join("bad.bitext"), "a\tb\n").unwrap();

    assert!(matches!(
        Bitext2Tmx::new(dir.path().to_path_buf(), None).run(),
        Err(Error::InvalidNamingConvention(_))
    ));
    // nothing is converted when a name is invalid
    assert!(!dir.path().join("good.en-zh.tmx").exists());

    let other = tempfile::tempdir().unwrap();
    let input = other.path().join("resource.en-qq.bitext");
    fs::write(&input, "a\tb\n").unwrap();
    assert!(matches!(
        Bitext2Tmx::new(input, None).run(),
        Err(Error::InvalidLanguageTag(_))
    ));
}
