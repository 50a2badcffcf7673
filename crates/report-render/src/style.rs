use report_core::RecommendationAction;

/// CSS classes for the recommendation banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl RecommendationStyle {
    pub fn for_action(action: RecommendationAction) -> Self {
        match action {
            RecommendationAction::Buy => Self {
                background: "bg-green-500/10",
                text: "text-green-400",
                border: "border-green-500",
            },
            RecommendationAction::Sell => Self {
                background: "bg-red-500/10",
                text: "text-red-400",
                border: "border-red-500",
            },
            RecommendationAction::Hold => Self {
                background: "bg-yellow-500/10",
                text: "text-yellow-400",
                border: "border-yellow-500",
            },
            RecommendationAction::Unknown => Self {
                background: "bg-gray-700/20",
                text: "text-gray-300",
                border: "border-gray-600",
            },
        }
    }
}
