//! Audit a saved HTML page from the command line.
//!
//! ```text
//! seo-audit --html page.html --url https://example.vn/may-tinh --keyword "máy tính"
//! curl -s https://example.vn/ | seo-audit --url https://example.vn/ --json
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_seo_audit::report::{JsonReport, ReportSink, TextReport};
use rs_seo_audit::signals::site::WwwProbe;
use rs_seo_audit::{analyze_bytes, AnalysisRequest, Options, PerformanceMetrics, SiteProbes};

#[derive(Parser)]
#[command(name = "seo-audit", version, about = "On-page SEO audit of one HTML document")]
struct Args {
    /// HTML file to audit. Reads stdin when omitted.
    #[arg(long)]
    html: Option<PathBuf>,

    /// URL the page was served from.
    #[arg(long)]
    url: String,

    /// Focus keyword.
    #[arg(long)]
    keyword: Option<String>,

    /// JSON file with Core Web Vitals (lcp, cls, inp, ...) to merge.
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Whether the site serves robots.txt.
    #[arg(long)]
    robots_txt: Option<bool>,

    /// Whether the site serves a sitemap.
    #[arg(long)]
    sitemap: Option<bool>,

    /// Both the www and the bare host answer.
    #[arg(long)]
    www_both: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    /// JSON file with analysis options.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = match args.config.as_deref().map(load_json::<Options>).transpose() {
        Ok(options) => options.unwrap_or_default(),
        Err(e) => {
            eprintln!("config: {e}");
            return ExitCode::from(2);
        }
    };
    let metrics = match args.metrics.as_deref().map(load_json::<PerformanceMetrics>).transpose() {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("metrics: {e}");
            return ExitCode::from(2);
        }
    };
    let html = match read_html(args.html.as_deref()) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("html: {e}");
            return ExitCode::from(2);
        }
    };

    let site = SiteProbes {
        robots_txt: args.robots_txt,
        sitemap: args.sitemap,
        www: args.www_both.then_some(WwwProbe {
            www_exists: true,
            non_www_exists: true,
        }),
    };
    let request = AnalysisRequest::new("", &args.url)
        .with_focus_keyword(args.keyword.as_deref())
        .with_site_probes(site);

    let mut result = match analyze_bytes(&html, request, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.code());
            return ExitCode::FAILURE;
        }
    };

    let mut sink: Box<dyn ReportSink> = if args.json {
        Box::new(JsonReport::new(io::stdout()))
    } else {
        Box::new(TextReport::new(io::stdout()))
    };

    sink.primary(&result);
    if let Some(metrics) = metrics {
        result.merge_performance_metrics(metrics);
        sink.updated(&result);
    }

    ExitCode::SUCCESS
}

fn read_html(path: Option<&std::path::Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}
