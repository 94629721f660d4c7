use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tmxbitext::filtering::SegmentFilter;
use tmxbitext::tmx::TmxReader;

const NB_UNITS: usize = 10_000;

fn document() -> String {
    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<tmx version="1.4"><header srclang="en-US" segtype="sentence"/><body>
"#,
    );
    for i in 0..NB_UNITS {
        doc.push_str(&format!(
            "<tu><tuv xml:lang=\"en-US\"><seg>Sentence number {i} with <b>bold</b> text &amp; more.</seg></tuv>\
             <tuv xml:lang=\"de-DE\"><seg>Satz Nummer {i} mit <b>fettem</b> Text &amp; mehr.</seg></tuv></tu>\n"
        ));
    }
    doc.push_str("</body></tmx>\n");
    doc
}

pub fn read_units(c: &mut Criterion) {
    let doc = document();
    c.bench_function("read units", |b| {
        b.iter(|| {
            let nb = TmxReader::new(black_box(doc.as_bytes())).count();
            assert_eq!(nb, NB_UNITS);
        })
    });
}

pub fn read_and_filter(c: &mut Criterion) {
    let doc = document();
    let filter = SegmentFilter::default();
    c.bench_function("read and filter units", |b| {
        b.iter(|| {
            TmxReader::new(black_box(doc.as_bytes()))
                .filter_map(Result::ok)
                .filter(|unit| {
                    let (s, t) = unit.pair("en-US", "de-DE");
                    filter.filter(s, t).is_ok()
                })
                .count()
        })
    });
}

criterion_group!(benches, read_units, read_and_filter);
criterion_main!(benches);
