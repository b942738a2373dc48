//! Reads HTML from stdin and prints the analysis as JSON on stdout.
//! The page URL and an optional focus keyword are positional arguments.

use rs_seo_audit::{analyze_bytes, AnalysisRequest, Options};
use serde::Serialize;
use std::io::{self, Read};

#[derive(Serialize)]
struct Failure {
    code: &'static str,
    message: String,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_default();
    let keyword = args.next();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let request = AnalysisRequest::new("", &url).with_focus_keyword(keyword.as_deref());
    let output = match analyze_bytes(&html, request, &Options::default()) {
        Ok(result) => serde_json::to_string(&result),
        Err(e) => serde_json::to_string(&Failure {
            code: e.code(),
            message: e.to_string(),
        }),
    };

    println!("{}", output.unwrap_or_default());
}
