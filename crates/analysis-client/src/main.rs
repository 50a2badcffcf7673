//! stock-report: fetch an analysis report for one ticker and write it as HTML.
//!
//! Usage:
//!   stock-report FPT
//!   stock-report vn-index --out report.html
//!
//! The proxy endpoint comes from `ANALYSIS_API_URL`.

use analysis_client::AnalysisServiceClient;
use anyhow::Context;
use report_render::{escape_html, render_report_html};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  stock-report <TICKER>              Print the report HTML to stdout");
    eprintln!("  stock-report <TICKER> --out FILE   Write the report HTML to FILE");
}

fn html_document(ticker: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"vi\">\n<head>\n<meta charset=\"utf-8\">\n<title>Báo cáo Phân tích: {}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(ticker),
        body
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut ticker: Option<String> = None;
    let mut out: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = args.next(),
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => ticker = Some(other.trim().to_uppercase()),
        }
    }

    let Some(ticker) = ticker.filter(|t| !t.is_empty()) else {
        print_usage();
        std::process::exit(2);
    };

    let client = AnalysisServiceClient::from_env();
    tracing::info!(ticker = %ticker, endpoint = client.endpoint(), "Requesting analysis");

    let report = match client.fetch_stock_analysis(&ticker).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Lỗi Phân Tích: {e}");
            std::process::exit(1);
        }
    };

    let html = html_document(&ticker, &render_report_html(&report, &ticker));
    match out {
        Some(path) => {
            std::fs::write(&path, html).with_context(|| format!("writing report to {path}"))?;
            eprintln!("Report for {ticker} written to {path}");
        }
        None => print!("{html}"),
    }

    Ok(())
}
