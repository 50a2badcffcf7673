use report_core::{AnalysisReport, ReportSection};

use crate::escape::escape_html;
use crate::sources::render_sources_list;
use crate::style::RecommendationStyle;

const PROSE: &str = "prose prose-invert prose-sm sm:prose-base max-w-none text-gray-300";
const SOURCES_TITLE: &str = "Nguồn Dữ liệu Tham khảo";

/// Full report as one HTML fragment: header, recommendation banner, one
/// collapsible block per analysis section and the source list.
///
/// Section bodies are inserted as-is (they are already rendered HTML); every
/// other model-supplied value is escaped here.
pub fn render_report_html(report: &AnalysisReport, ticker: &str) -> String {
    let ticker = escape_html(ticker);
    let mut html = String::from(r#"<article class="mt-8 space-y-6 max-w-4xl mx-auto">"#);

    html.push_str(&header_html(report, &ticker));
    html.push_str(&recommendation_html(report));

    html.push_str(r#"<div class="space-y-4">"#);
    for (i, section) in ReportSection::ALL.iter().enumerate() {
        let mut body = String::new();
        if *section == ReportSection::Technical {
            if let Some(image) = &report.technical_chart_image {
                body.push_str(&format!(
                    r#"<div class="mb-6"><img src="data:image/png;base64,{}" alt="Biểu đồ phân tích kỹ thuật cho {ticker}" class="rounded-lg shadow-lg w-full"></div>"#,
                    escape_html(image)
                ));
            }
        }
        body.push_str(&format!(
            r#"<div class="{PROSE}">{}</div>"#,
            report.section(*section)
        ));
        html.push_str(&section_html(section.title(), &body, i == 0));
    }

    let sources = render_sources_list(&report.sources);
    if !sources.is_empty() {
        html.push_str(&section_html(SOURCES_TITLE, &sources, true));
    }
    html.push_str("</div></article>");

    html
}

fn header_html(report: &AnalysisReport, ticker: &str) -> String {
    let mut html = format!(
        r#"<header class="text-center"><h2 class="text-3xl font-bold text-gray-100">Báo cáo Phân tích: <span class="text-cyan-400">{ticker}</span></h2><p class="text-gray-400 mt-1">Dữ liệu tính đến cuối ngày {}</p>"#,
        escape_html(&report.assumed_date)
    );
    if report.closing_price != "N/A" {
        html.push_str(&format!(
            r#"<p class="text-gray-300 font-semibold">Giá đóng cửa: <span class="text-yellow-400">{}</span></p>"#,
            escape_html(&report.closing_price)
        ));
    }
    html.push_str("</header>");
    html
}

fn recommendation_html(report: &AnalysisReport) -> String {
    let style = RecommendationStyle::for_action(report.recommendation.kind());
    format!(
        r#"<section class="{} border {} p-6 rounded-xl shadow-lg"><h3 class="text-xl font-bold text-gray-100">Khuyến nghị Đầu tư</h3><p class="text-2xl font-extrabold {} mt-1">{}</p><div class="mt-4 {PROSE}">{}</div></section>"#,
        style.background,
        style.border,
        style.text,
        escape_html(&report.recommendation.action.to_uppercase()),
        report.recommendation.details
    )
}

fn section_html(title: &str, body: &str, open: bool) -> String {
    let open = if open { " open" } else { "" };
    format!(
        r#"<details class="bg-gray-800/50 border border-gray-700 rounded-xl overflow-hidden"{open}><summary class="flex items-center justify-between p-4 cursor-pointer"><h3 class="text-lg font-semibold text-gray-100">{}</h3></summary><div class="p-4 border-t border-gray-700">{body}</div></details>"#,
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::{Recommendation, Source};

    fn report() -> AnalysisReport {
        AnalysisReport {
            assumed_date: "15/10/2026".to_string(),
            closing_price: "95.400".to_string(),
            macro_analysis: "<p>Vĩ mô</p>".to_string(),
            industry: "<p>Ngành</p>".to_string(),
            fundamental: "<p>Cơ bản</p>".to_string(),
            technical: "<p>Kỹ thuật</p>".to_string(),
            cash_flow: "<p>Dòng tiền</p>".to_string(),
            recommendation: Recommendation {
                action: "mua".to_string(),
                details: "<p>Vùng giá 90</p>".to_string(),
            },
            sources: vec![Source::new("CafeF", "https://cafef.vn")],
            technical_chart_image: Some("AAAA".to_string()),
        }
    }

    #[test]
    fn test_report_layout() {
        let html = render_report_html(&report(), "FPT");

        assert!(html.starts_with("<article"));
        assert!(html.ends_with("</article>"));
        assert!(html.contains(r#"<span class="text-cyan-400">FPT</span>"#));
        assert!(html.contains("Giá đóng cửa"));
        assert!(html.contains(r#"mt-1">MUA</p>"#));
        assert!(html.contains("bg-green-500/10 border border-green-500"));
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
        assert!(html.contains(SOURCES_TITLE));
    }

    #[test]
    fn test_sections_in_order_with_first_open() {
        let html = render_report_html(&report(), "FPT");

        let positions: Vec<usize> = ReportSection::ALL
            .iter()
            .map(|s| html.find(&escape_html(s.title())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(html.matches("</details>").count(), 6);
        assert_eq!(html.matches(r#"overflow-hidden" open>"#).count(), 2);
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let mut report = report();
        report.closing_price = "N/A".to_string();
        report.sources.clear();
        report.technical_chart_image = None;

        let html = render_report_html(&report, "HPG");
        assert!(!html.contains("Giá đóng cửa"));
        assert!(!html.contains(SOURCES_TITLE));
        assert!(!html.contains("<img"));
        assert_eq!(html.matches("</details>").count(), 5);
    }

    #[test]
    fn test_model_values_are_escaped() {
        let mut report = report();
        report.assumed_date = "<b>hôm nay</b>".to_string();
        report.recommendation.action = "<script>".to_string();

        let html = render_report_html(&report, "<i>VN-INDEX</i>");
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<i>"));
        assert!(html.contains("&lt;i&gt;VN-INDEX&lt;/i&gt;"));
        assert!(html.contains("bg-gray-700/20"));
    }
}
