#![allow(clippy::expect_used)]

use std::time::Duration;

use rs_seo_audit::session::{AuditSession, FetchedPage, MetricsSource, PageSource};
use rs_seo_audit::{
    AnalysisResult, Category, Error, Options, PerformanceMetrics, PerformanceState, Result,
    SiteProbes,
};
use url::Url;

const URL: &str = "https://example.vn/may-tinh";

struct FakePages {
    status: u16,
    delay: Duration,
}

impl FakePages {
    fn ok() -> Self {
        Self {
            status: 200,
            delay: Duration::ZERO,
        }
    }
}

impl PageSource for FakePages {
    async fn fetch_page(&self, _url: &Url) -> Result<FetchedPage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let body = format!(
            "<!DOCTYPE html><html><head><title>Máy tính</title></head><body><main><p>{}</p></main></body></html>",
            "Máy tính xách tay cho sinh viên. ".repeat(10)
        );
        Ok(FetchedPage {
            status: self.status,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into_bytes(),
        })
    }

    async fn probe_site(&self, _url: &Url) -> SiteProbes {
        SiteProbes {
            robots_txt: Some(true),
            sitemap: Some(false),
            www: None,
        }
    }
}

enum FakeMetrics {
    Fast,
    Failing,
    Hanging,
}

impl MetricsSource for FakeMetrics {
    async fn fetch_metrics(&self, _url: &Url) -> Result<PerformanceMetrics> {
        match self {
            Self::Fast => Ok(PerformanceMetrics {
                lcp: Some(1.5),
                cls: Some(0.01),
                inp: Some(90.0),
                ..PerformanceMetrics::default()
            }),
            Self::Failing => Err(Error::Network("metrics API unreachable".to_string())),
            Self::Hanging => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(PerformanceMetrics::default())
            }
        }
    }
}

#[tokio::test]
async fn primary_result_reaches_sink_before_metrics_merge() {
    let session = AuditSession::new(FakePages::ok(), FakeMetrics::Fast, Options::default());
    let mut sink: Vec<AnalysisResult> = Vec::new();

    let result = session
        .run("client-a", URL, Some("máy tính"), &mut sink)
        .await
        .expect("audit");

    assert_eq!(sink.len(), 2);
    assert_eq!(sink[0].performance, PerformanceState::Pending);
    assert_eq!(sink[0].display_max(), 92.0);
    assert!(sink[1].performance.is_measured());
    assert_eq!(result.breakdown.points(Category::Performance), 8.0);
    assert_eq!(result.breakdown.points(Category::RobotsTxt), 2.0);
    assert_eq!(result.breakdown.points(Category::Sitemap), 0.0);
    assert_eq!(sink[0].score() + 8.0, result.score());
}

#[tokio::test]
async fn failed_metrics_leave_primary_score_intact() {
    let session = AuditSession::new(FakePages::ok(), FakeMetrics::Failing, Options::default());
    let mut sink: Vec<AnalysisResult> = Vec::new();

    let result = session.run("client-a", URL, None, &mut sink).await.expect("audit");

    assert!(matches!(
        &result.performance,
        PerformanceState::Unavailable { reason } if reason.contains("unreachable")
    ));
    assert_eq!(result.score(), sink[0].score());
    assert_eq!(result.breakdown.max_total(), 100.0);
}

#[tokio::test(start_paused = true)]
async fn slow_metrics_time_out() {
    let options = Options {
        metrics_timeout_secs: 5,
        ..Options::default()
    };
    let session = AuditSession::new(FakePages::ok(), FakeMetrics::Hanging, options);
    let mut sink: Vec<AnalysisResult> = Vec::new();

    let result = session.run("client-a", URL, None, &mut sink).await.expect("audit");

    assert!(matches!(
        &result.performance,
        PerformanceState::Unavailable { reason } if reason.contains("timed out")
    ));
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn repeat_audit_is_served_from_cache() {
    let session = AuditSession::new(FakePages::ok(), FakeMetrics::Fast, Options::default());
    let mut sink: Vec<AnalysisResult> = Vec::new();

    session.run("client-a", URL, None, &mut sink).await.expect("first audit");
    session
        .run("client-a", "  HTTPS://example.vn/may-tinh ", None, &mut sink)
        .await
        .expect("second audit");

    assert_eq!(session.cache().lock().await.len(), 1);
    // The cached primary result still goes through the metrics stage.
    assert_eq!(sink.len(), 4);
    assert!(!sink[2].performance.is_measured());
    assert!(sink[3].performance.is_measured());
}

#[tokio::test]
async fn fetch_status_maps_to_error_codes() {
    for (status, code) in [(404, "E009"), (403, "E010"), (500, "E003")] {
        let pages = FakePages {
            status,
            ..FakePages::ok()
        };
        let session = AuditSession::new(pages, FakeMetrics::Fast, Options::default());
        let mut sink: Vec<AnalysisResult> = Vec::new();

        let err = session
            .run("client-a", URL, None, &mut sink)
            .await
            .expect_err("status error");
        assert_eq!(err.code(), code);
        assert!(sink.is_empty());
    }
}

#[tokio::test]
async fn rate_limit_rejects_excess_requests() {
    let options = Options {
        rate_limit_requests: 2,
        ..Options::default()
    };
    let session = AuditSession::new(FakePages::ok(), FakeMetrics::Fast, options);
    let mut sink: Vec<AnalysisResult> = Vec::new();

    session.run("client-a", URL, None, &mut sink).await.expect("first");
    session.run("client-a", URL, None, &mut sink).await.expect("second");
    let err = session
        .run("client-a", URL, None, &mut sink)
        .await
        .expect_err("third is limited");

    assert_eq!(err.code(), "E011");
    assert!(session.run("client-b", URL, None, &mut sink).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn audits_on_one_session_overlap() {
    let pages = FakePages {
        delay: Duration::from_secs(10),
        ..FakePages::ok()
    };
    let session = AuditSession::new(pages, FakeMetrics::Fast, Options::default());
    let mut first: Vec<AnalysisResult> = Vec::new();
    let mut second: Vec<AnalysisResult> = Vec::new();
    let start = tokio::time::Instant::now();

    let (a, b) = tokio::join!(
        session.run("client-a", URL, None, &mut first),
        session.run("client-b", "https://example.vn/khac", None, &mut second),
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    // Both fetches waited at the same time.
    assert!(start.elapsed() < Duration::from_secs(20));
    assert_eq!(session.cache().lock().await.len(), 2);
}

/// Serves the page plus a fixed set of other paths; everything else is 404.
struct RoutedPages {
    live: Vec<&'static str>,
}

impl PageSource for RoutedPages {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let live = self.live.iter().any(|l| url.as_str() == *l);
        let body = format!(
            "<html><body><main><p>{}</p></main></body></html>",
            "Nội dung trang đủ dài để phân tích. ".repeat(8)
        );
        Ok(FetchedPage {
            status: if live { 200 } else { 404 },
            content_type: Some("text/html".to_string()),
            body: if live { body.into_bytes() } else { Vec::new() },
        })
    }
}

#[tokio::test]
async fn default_probes_go_through_the_page_source() {
    let pages = RoutedPages {
        live: vec![
            URL,
            "https://example.vn/robots.txt",
            "https://example.vn/wp-sitemap.xml",
            "https://www.example.vn/may-tinh",
        ],
    };
    let session = AuditSession::new(pages, FakeMetrics::Fast, Options::default());
    let mut sink: Vec<AnalysisResult> = Vec::new();

    let result = session.run("client-a", URL, None, &mut sink).await.expect("audit");
    let site = result.signals.site;

    assert_eq!(site.robots_txt, Some(true));
    assert_eq!(site.sitemap, Some(true));
    assert!(site.www_issue());
    assert_eq!(result.breakdown.points(Category::RobotsTxt), 2.0);
}
