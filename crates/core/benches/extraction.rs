use criterion::{Criterion, black_box, criterion_group, criterion_main};
use w3scrape_core::{Document, DisabledRenderer, Page, TopicExtractor, convert_tables, locate_container};

const BASE: &str = "https://www.w3schools.com/html/";

fn fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/w3schools/html_intro.html").unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("parse_and_locate_container", |b| {
        b.iter(|| {
            let document = Document::parse(black_box(&html));
            locate_container(&document).is_some()
        })
    });
}

fn bench_topics(c: &mut Criterion) {
    let html = fixture();
    let page = Page::from_html(BASE, &html).unwrap();

    c.bench_function("extract_page_topics", |b| {
        b.iter(|| {
            let mut renderer = DisabledRenderer;
            let mut extractor = TopicExtractor::new(BASE, &mut renderer);
            extractor.extract_page(black_box(&page))
        })
    });
}

fn bench_tables(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("convert_tables", |b| b.iter(|| convert_tables(black_box(&html))));
}

criterion_group!(benches, bench_parse, bench_topics, bench_tables);
criterion_main!(benches);
