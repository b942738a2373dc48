//! Performance benchmarks for rs-seo-audit.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic Vietnamese article for the full pipeline
//! - The keyword and readability collectors on a long text
//! - Pages of growing size for throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_seo_audit::signals::{keywords, readability};
use rs_seo_audit::{analyze, analyze_with_options, Options};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="vi">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Hướng dẫn chọn máy tính xách tay cho sinh viên năm 2024</title>
    <meta name="description" content="Cách chọn máy tính xách tay phù hợp với nhu cầu học tập, ngân sách và thời lượng pin cho sinh viên.">
    <link rel="canonical" href="https://example.vn/may-tinh-sinh-vien">
    <script type="application/ld+json">
    {"@context":"https://schema.org","@type":"Article","headline":"Chọn máy tính","author":{"@type":"Person","name":"Nguyễn Văn A"},"datePublished":"2024-03-01"}
    </script>
</head>
<body>
    <nav>
        <a href="/">Trang chủ</a>
        <a href="/gioi-thieu">Giới thiệu</a>
    </nav>
    <article>
        <h1>Chọn máy tính xách tay cho sinh viên</h1>
        <p>Máy tính xách tay là công cụ học tập quan trọng. Bạn nên cân nhắc cấu hình, trọng lượng và giá.</p>
        <h2>Cấu hình cần thiết</h2>
        <p>Bộ xử lý tầm trung và 16GB bộ nhớ đủ cho hầu hết ngành học. Xem <a href="/so-sanh-cpu">so sánh bộ xử lý</a>.</p>
        <img src="/images/may-tinh-sinh-vien.jpg" alt="Máy tính cho sinh viên" width="800" height="450" loading="lazy">
        <h2>Thời lượng pin</h2>
        <p>Pin trên tám giờ giúp bạn học cả ngày. Tham khảo <a href="https://moet.gov.vn/">Bộ Giáo dục</a>.</p>
    </article>
    <footer>
        <p>Bản quyền 2024</p>
    </footer>
</body>
</html>
"#;

fn bench_analyze_default(c: &mut Criterion) {
    c.bench_function("analyze_default", |b| {
        b.iter(|| analyze(black_box(SAMPLE_HTML), "https://example.vn/may-tinh-sinh-vien", None));
    });
}

fn bench_analyze_with_focus_keyword(c: &mut Criterion) {
    let options = Options {
        keyword_limit: 30,
        ..Options::default()
    };

    c.bench_function("analyze_focus_keyword", |b| {
        b.iter(|| {
            analyze_with_options(
                black_box(SAMPLE_HTML),
                "https://example.vn/may-tinh-sinh-vien",
                Some("máy tính"),
                black_box(&options),
            )
        });
    });
}

fn bench_text_collectors(c: &mut Criterion) {
    let text = "Máy tính xách tay là công cụ học tập quan trọng cho sinh viên. ".repeat(200);
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();

    let mut group = c.benchmark_group("text_collectors");
    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("keywords", |b| {
        b.iter(|| {
            keywords::collect(
                black_box(&text),
                black_box(&words),
                &keywords::Placement::default(),
                None,
                15,
                5,
            )
        });
    });
    group.bench_function("readability", |b| {
        b.iter(|| readability::analyze(black_box(&text), black_box(&words)));
    });
    group.finish();
}

/// Long category pages built by repeating the article section.
fn bench_page_size(c: &mut Criterion) {
    let (head, rest) = SAMPLE_HTML.split_at(SAMPLE_HTML.find("<article>").unwrap_or(0));
    let (article, tail) = rest.split_at(rest.find("<footer>").unwrap_or(rest.len()));

    let mut group = c.benchmark_group("page_size");

    for sections in [1usize, 10, 100] {
        let html = format!("{head}{}{tail}", article.repeat(sections));
        let size_kb = html.len() / 1024;
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", format!("{sections} sections ({size_kb}KB)")),
            &html,
            |b, html| {
                b.iter(|| analyze(black_box(html), "https://example.vn/danh-muc", None));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_analyze_default,
    bench_analyze_with_focus_keyword,
    bench_text_collectors,
    bench_page_size
);
criterion_main!(benches);
