use chrono::NaiveDate;
use report_core::{AnalysisReport, RawAnalysis, Recommendation, Source};

use crate::markdown::render_markdown;

/// Shown when the model returned no recommendation block at all.
pub const NO_RECOMMENDATION_DETAILS: &str = "Không có khuyến nghị chi tiết.";

const NOT_AVAILABLE: &str = "N/A";

/// Turn the proxy payload into a display-ready report.
///
/// Missing or empty fields fall back to defaults rather than failing: the
/// date to `fallback_date` (`d/m/yyyy`), the price and action to `N/A`.
/// Every prose field is rendered against the payload's source list.
pub fn build_report(raw: RawAnalysis, fallback_date: NaiveDate) -> AnalysisReport {
    let sources = raw.sources;

    let recommendation = match raw.recommendation {
        Some(rec) => Recommendation {
            action: present(rec.action).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            details: render_field(rec.details, &sources),
        },
        None => Recommendation {
            action: NOT_AVAILABLE.to_string(),
            details: render_markdown(NO_RECOMMENDATION_DETAILS, &sources),
        },
    };

    let report = AnalysisReport {
        assumed_date: present(raw.assumed_date)
            .unwrap_or_else(|| fallback_date.format("%-d/%-m/%Y").to_string()),
        closing_price: present(raw.closing_price).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        macro_analysis: render_field(raw.macro_analysis, &sources),
        industry: render_field(raw.industry, &sources),
        fundamental: render_field(raw.fundamental, &sources),
        technical: render_field(raw.technical, &sources),
        cash_flow: render_field(raw.cash_flow, &sources),
        recommendation,
        technical_chart_image: present(raw.technical_chart_image),
        sources,
    };

    tracing::debug!(
        sources = report.sources.len(),
        has_chart = report.technical_chart_image.is_some(),
        "Assembled analysis report"
    );

    report
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn render_field(text: Option<String>, sources: &[Source]) -> String {
    render_markdown(text.as_deref().unwrap_or_default(), sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::RawRecommendation;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn test_full_payload_is_rendered() {
        let raw: RawAnalysis = serde_json::from_value(serde_json::json!({
            "assumedDate": "15/10/2026",
            "closingPrice": "95.400 VND",
            "macro": "Lạm phát **ổn định** [1]",
            "industry": "Ngành CNTT",
            "fundamental": "ROE 25%",
            "technical": "RSI 60",
            "cashFlow": "Khối ngoại mua ròng",
            "recommendation": { "action": "MUA", "details": "* Vùng giá 90-92\n* Dừng lỗ 85" },
            "sources": [{ "title": "CafeF", "uri": "https://cafef.vn/fpt" }],
            "technicalChartImage": "iVBORw0KGgo="
        }))
        .unwrap();

        let report = build_report(raw, today());

        assert_eq!(report.assumed_date, "15/10/2026");
        assert_eq!(report.closing_price, "95.400 VND");
        assert!(report.macro_analysis.starts_with("<p>Lạm phát <strong>ổn định</strong> <sup>[<a href=\"https://cafef.vn/fpt\""));
        assert_eq!(report.industry, "<p>Ngành CNTT</p>");
        assert_eq!(report.cash_flow, "<p>Khối ngoại mua ròng</p>");
        assert_eq!(report.recommendation.action, "MUA");
        assert_eq!(
            report.recommendation.details,
            "<ul><li>Vùng giá 90-92</li><li>Dừng lỗ 85</li></ul>"
        );
        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.technical_chart_image.as_deref(), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let report = build_report(RawAnalysis::default(), today());

        assert_eq!(report.assumed_date, "5/3/2026");
        assert_eq!(report.closing_price, "N/A");
        assert_eq!(report.macro_analysis, "");
        assert_eq!(report.technical, "");
        assert_eq!(report.recommendation.action, "N/A");
        assert_eq!(
            report.recommendation.details,
            format!("<p>{NO_RECOMMENDATION_DETAILS}</p>")
        );
        assert!(report.sources.is_empty());
        assert!(report.technical_chart_image.is_none());
    }

    #[test]
    fn test_recommendation_without_details_renders_empty() {
        let raw = RawAnalysis {
            recommendation: Some(RawRecommendation {
                action: Some(String::new()),
                details: None,
            }),
            ..RawAnalysis::default()
        };

        let report = build_report(raw, today());
        assert_eq!(report.recommendation.action, "N/A");
        assert_eq!(report.recommendation.details, "");
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let raw = RawAnalysis {
            assumed_date: Some(String::new()),
            closing_price: Some(String::new()),
            technical_chart_image: Some(String::new()),
            ..RawAnalysis::default()
        };

        let report = build_report(raw, today());
        assert_eq!(report.assumed_date, "5/3/2026");
        assert_eq!(report.closing_price, "N/A");
        assert!(report.technical_chart_image.is_none());
    }

    #[test]
    fn test_citations_beyond_sources_stay_plain() {
        let raw = RawAnalysis {
            fundamental: Some("P/E thấp [3]".to_string()),
            sources: vec![Source::new("A", "https://a.vn")],
            ..RawAnalysis::default()
        };

        let report = build_report(raw, today());
        assert_eq!(report.fundamental, "<p>P/E thấp <sup>[3]</sup></p>");
    }
}
