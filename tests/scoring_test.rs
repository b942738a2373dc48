#![allow(clippy::expect_used)]

use rs_seo_audit::{
    analyze, merge_performance_metrics, AnalysisResult, Category, PerformanceMetrics, Status,
};

const URL: &str = "https://example.vn/bai-viet";

fn page(title: &str, body: &str) -> String {
    format!(
        "<html lang=\"vi\"><head><title>{title}</title></head><body><main>{body}</main></body></html>"
    )
}

fn filler(sentences: usize) -> String {
    "<p>Nội dung hữu ích cho người đọc mỗi ngày.</p>\n".repeat(sentences)
}

fn category(result: &AnalysisResult, category: Category) -> (f64, Status) {
    let entry = result.breakdown.get(category).expect("category scored");
    (entry.points, entry.status)
}

#[test]
fn weighted_maxima_sum_to_one_hundred_before_and_after_merge() {
    let result = analyze(&page("Tiêu đề", &filler(10)), URL, None).expect("analysis");
    assert_eq!(result.breakdown.max_total(), 100.0);

    let merged = merge_performance_metrics(
        result,
        PerformanceMetrics {
            lcp: Some(2.0),
            cls: Some(0.3),
            ..PerformanceMetrics::default()
        },
    );
    assert_eq!(merged.breakdown.max_total(), 100.0);
    assert_eq!(category(&merged, Category::Performance), (3.0, Status::Warning));
}

#[test]
fn title_length_bands() {
    for (length, points) in [(45, 9.0), (15, 4.0), (0, 0.0), (70, 0.0)] {
        let title = "t".repeat(length);
        let result = analyze(&page(&title, &filler(10)), URL, None).expect("analysis");
        assert_eq!(
            category(&result, Category::Title).0,
            points,
            "title of {length} characters"
        );
    }
}

#[test]
fn long_article_with_links_and_schema_gets_full_credit() {
    let schema = r#"<script type="application/ld+json">
        {"@context":"https://schema.org","@type":"Article","headline":"Hướng dẫn",
         "author":{"@type":"Person","name":"Trần Thị B"},"datePublished":"2024-05-01"}
    </script>"#;
    let links = r#"<p><a href="/mot">Một</a> <a href="/hai">Hai</a> <a href="https://example.vn/ba">Ba</a></p>"#;
    let html = format!(
        "<html><head><title>Hướng dẫn</title>{schema}</head><body><main><h1>Hướng dẫn</h1>\n{}{links}</main></body></html>",
        filler(165)
    );

    let result = analyze(&html, URL, None).expect("analysis");

    let words = result.signals.content_stats.word_count;
    assert!((1400..=1600).contains(&words), "word count {words}");
    assert_eq!(result.signals.links.internal(), 3);
    assert_eq!(category(&result, Category::ContentLength), (4.0, Status::Good));
    assert_eq!(category(&result, Category::InternalLinks), (4.0, Status::Good));
    assert!(category(&result, Category::Schema).0 >= 3.0);
}

#[test]
fn merging_metrics_twice_is_idempotent() {
    let result = analyze(&page("Tiêu đề", &filler(10)), URL, None).expect("analysis");
    let metrics = PerformanceMetrics {
        lcp: Some(1.9),
        cls: Some(0.05),
        inp: Some(120.0),
        ..PerformanceMetrics::default()
    };

    let once = merge_performance_metrics(result, metrics.clone());
    let twice = merge_performance_metrics(once.clone(), metrics);

    assert_eq!(once.score(), twice.score());
    assert_eq!(once.breakdown, twice.breakdown);
    assert_eq!(once.recommendations, twice.recommendations);
}

#[test]
fn display_max_follows_performance_state() {
    let mut result = analyze(&page("Tiêu đề", &filler(10)), URL, None).expect("analysis");
    assert_eq!(result.display_max(), 92.0);
    assert_eq!(category(&result, Category::Performance), (0.0, Status::Warning));

    result.mark_performance_unavailable("metrics service down");
    assert_eq!(result.display_max(), 92.0);

    result.merge_performance_metrics(PerformanceMetrics {
        lcp: Some(1.0),
        cls: Some(0.0),
        inp: Some(50.0),
        ..PerformanceMetrics::default()
    });
    assert_eq!(result.display_max(), 100.0);
    assert_eq!(category(&result, Category::Performance), (8.0, Status::Good));
}

#[test]
fn empty_metrics_mark_performance_unavailable() {
    let result = analyze(&page("Tiêu đề", &filler(10)), URL, None).expect("analysis");
    let before = result.score();

    let merged = merge_performance_metrics(result, PerformanceMetrics::default());

    assert!(!merged.performance.is_measured());
    assert!(matches!(
        merged.performance,
        rs_seo_audit::PerformanceState::Unavailable { .. }
    ));
    assert_eq!(merged.score(), before);
}

#[test]
fn total_never_exceeds_one_hundred() {
    let result = analyze(&page("Tiêu đề", &filler(10)), URL, None).expect("analysis");
    assert!(result.score() <= 100.0);
    assert!(result.score() >= 0.0);
}
