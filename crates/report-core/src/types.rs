use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A grounding source the model cited.
///
/// Sources are referenced by position only: `[1]` in model text points at
/// the first entry of the list it was delivered with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
}

impl Source {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Model text together with the sources its citation markers refer to.
#[derive(Debug, Clone, Default)]
pub struct GroundedAnalysis {
    pub text: String,
    pub sources: Vec<Source>,
}

/// Recommendation block as the model produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecommendation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub details: Option<String>,
}

/// Payload returned by the analysis proxy, before any rendering.
///
/// Every text field is optional. The model is not strict about types, so a
/// number or boolean where text is expected is kept as its string form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    #[serde(default, deserialize_with = "lenient_text")]
    pub assumed_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub closing_price: Option<String>,
    #[serde(rename = "macro", default, deserialize_with = "lenient_text")]
    pub macro_analysis: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fundamental: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub technical: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cash_flow: Option<String>,
    #[serde(default)]
    pub recommendation: Option<RawRecommendation>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub technical_chart_image: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rendered recommendation; `details` is HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub details: String,
}

impl Recommendation {
    pub fn kind(&self) -> RecommendationAction {
        RecommendationAction::parse(&self.action)
    }
}

/// Fully rendered report. Section fields hold HTML fragments ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub assumed_date: String,
    pub closing_price: String,
    #[serde(rename = "macro")]
    pub macro_analysis: String,
    pub industry: String,
    pub fundamental: String,
    pub technical: String,
    pub cash_flow: String,
    pub recommendation: Recommendation,
    pub sources: Vec<Source>,
    pub technical_chart_image: Option<String>,
}

impl AnalysisReport {
    pub fn section(&self, section: ReportSection) -> &str {
        match section {
            ReportSection::Macro => &self.macro_analysis,
            ReportSection::Industry => &self.industry,
            ReportSection::Fundamental => &self.fundamental,
            ReportSection::CashFlow => &self.cash_flow,
            ReportSection::Technical => &self.technical,
        }
    }
}

/// Investment call, normalized from whatever wording the model used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationAction {
    Buy,
    Sell,
    Hold,
    Unknown,
}

impl RecommendationAction {
    /// Accepts the Vietnamese labels the prompt asks for and their English
    /// equivalents, case-insensitively.
    pub fn parse(action: &str) -> Self {
        match action.trim().to_uppercase().as_str() {
            "MUA" | "BUY" => RecommendationAction::Buy,
            "BÁN" | "SELL" => RecommendationAction::Sell,
            "NẮM GIỮ" | "HOLD" => RecommendationAction::Hold,
            _ => RecommendationAction::Unknown,
        }
    }
}

/// Report sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSection {
    Macro,
    Industry,
    Fundamental,
    CashFlow,
    Technical,
}

impl ReportSection {
    pub const ALL: [ReportSection; 5] = [
        ReportSection::Macro,
        ReportSection::Industry,
        ReportSection::Fundamental,
        ReportSection::CashFlow,
        ReportSection::Technical,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportSection::Macro => "Phân tích Vĩ mô & Vi mô",
            ReportSection::Industry => "Phân tích Ngành",
            ReportSection::Fundamental => "Phân tích Cơ bản Doanh nghiệp",
            ReportSection::CashFlow => "Phân tích Dòng tiền",
            ReportSection::Technical => "Phân tích Kỹ thuật",
        }
    }

    /// Field name in the proxy payload
    pub fn key(&self) -> &'static str {
        match self {
            ReportSection::Macro => "macro",
            ReportSection::Industry => "industry",
            ReportSection::Fundamental => "fundamental",
            ReportSection::CashFlow => "cashFlow",
            ReportSection::Technical => "technical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_analysis_reads_camel_case_payload() {
        let json = r#"{
            "assumedDate": "15/10/2026",
            "closingPrice": "95.400",
            "macro": "GDP tăng [1]",
            "cashFlow": "Khối ngoại mua ròng",
            "recommendation": { "action": "MUA", "details": "Vùng giá 90-92" },
            "sources": [{ "title": "VnExpress", "uri": "https://vnexpress.net/a" }],
            "technicalChartImage": null
        }"#;

        let raw: RawAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(raw.assumed_date.as_deref(), Some("15/10/2026"));
        assert_eq!(raw.macro_analysis.as_deref(), Some("GDP tăng [1]"));
        assert_eq!(raw.cash_flow.as_deref(), Some("Khối ngoại mua ròng"));
        assert!(raw.industry.is_none());
        assert!(raw.technical_chart_image.is_none());
        assert_eq!(raw.sources, vec![Source::new("VnExpress", "https://vnexpress.net/a")]);
        let rec = raw.recommendation.unwrap();
        assert_eq!(rec.action.as_deref(), Some("MUA"));
    }

    #[test]
    fn test_raw_analysis_keeps_numbers_as_text() {
        let json = r#"{ "closingPrice": 95400, "sources": null }"#;
        let raw: RawAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(raw.closing_price.as_deref(), Some("95400"));
        assert!(raw.sources.is_empty());
    }

    #[test]
    fn test_empty_payload_deserializes() {
        let raw: RawAnalysis = serde_json::from_str("{}").unwrap();
        assert!(raw.recommendation.is_none());
        assert!(raw.sources.is_empty());
    }

    #[test]
    fn test_recommendation_action_parse() {
        assert_eq!(RecommendationAction::parse("MUA"), RecommendationAction::Buy);
        assert_eq!(RecommendationAction::parse("buy"), RecommendationAction::Buy);
        assert_eq!(RecommendationAction::parse("bán"), RecommendationAction::Sell);
        assert_eq!(RecommendationAction::parse("Nắm giữ"), RecommendationAction::Hold);
        assert_eq!(RecommendationAction::parse(" HOLD "), RecommendationAction::Hold);
        assert_eq!(RecommendationAction::parse("N/A"), RecommendationAction::Unknown);
        assert_eq!(RecommendationAction::parse(""), RecommendationAction::Unknown);
    }

    #[test]
    fn test_report_serializes_macro_field_name() {
        let report = AnalysisReport {
            assumed_date: "1/1/2026".to_string(),
            closing_price: "N/A".to_string(),
            macro_analysis: "<p>m</p>".to_string(),
            industry: String::new(),
            fundamental: String::new(),
            technical: String::new(),
            cash_flow: String::new(),
            recommendation: Recommendation {
                action: "N/A".to_string(),
                details: String::new(),
            },
            sources: vec![],
            technical_chart_image: None,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["macro"], "<p>m</p>");
        assert_eq!(value["cashFlow"], "");
        assert!(value["technicalChartImage"].is_null());
        assert_eq!(report.section(ReportSection::Macro), "<p>m</p>");
    }

    #[test]
    fn test_sections_in_display_order() {
        let keys: Vec<&str> = ReportSection::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, ["macro", "industry", "fundamental", "cashFlow", "technical"]);
    }
}
