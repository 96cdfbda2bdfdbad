//! Request and response schemas for the brand kit API
//!
//! Everything here is a request-scoped value object: built for one generation
//! request, serialized to the caller, then dropped. Nothing persists.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tone
// ============================================================================

/// Brand tone recognized by the palette table and the logo prompt builder.
///
/// Parsed leniently: matching is case-insensitive and anything unrecognized
/// maps to `Default`, which selects the neutral palette and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Playful,
    Luxury,
    Innovative,
    Friendly,
    Minimalist,
    Default,
}

impl Tone {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "professional" => Self::Professional,
            "playful" => Self::Playful,
            "luxury" => Self::Luxury,
            "innovative" => Self::Innovative,
            "friendly" => Self::Friendly,
            "minimalist" => Self::Minimalist,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Playful => "Playful",
            Self::Luxury => "Luxury",
            Self::Innovative => "Innovative",
            Self::Friendly => "Friendly",
            Self::Minimalist => "Minimalist",
            Self::Default => "Default",
        }
    }

    /// All recognized tones, Default included.
    pub fn all() -> &'static [Tone] {
        &[
            Self::Professional,
            Self::Playful,
            Self::Luxury,
            Self::Innovative,
            Self::Friendly,
            Self::Minimalist,
            Self::Default,
        ]
    }
}

// ============================================================================
// Request models
// ============================================================================

/// Inbound request for a full brand kit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRequest {
    pub business_idea: String,
    pub industry: String,
    #[serde(default = "default_audience")]
    pub target_audience: String,
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_audience() -> String {
    "General Public".to_string()
}

fn default_tone() -> String {
    "Professional".to_string()
}

/// Regenerate only the logo, keeping the rest of an existing kit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateLogoRequest {
    pub name: String,
    pub industry: String,
    pub tone: String,
    pub color_palette: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRequest {
    pub business_idea: String,
}

// ============================================================================
// Response models
// ============================================================================

/// One brand name candidate with its tagline and naming-strength score.
///
/// The normalizer guarantees `name` and `tagline` are non-empty and
/// `score` is within 1..=100 before one of these is constructed from
/// provider output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub name: String,
    pub tagline: String,
    pub score: i64,
}

/// A social media post for one platform.
///
/// `platform` is one of LinkedIn, Twitter, Instagram — or the "Error"
/// sentinel emitted by the fallback tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialContent {
    pub platform: String,
    pub content: String,
    pub hashtags: Vec<String>,
}

/// A generated logo: the prompt that requested it, the image reference
/// (data: payload or remote URL), and which tier produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoArtifact {
    pub prompt: String,
    pub url: String,
    pub service: String,
}

/// The composite result. Assembled once after every step has resolved;
/// never exposed partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandKit {
    pub identity: Vec<BrandIdentity>,
    pub description: String,
    pub social_media: Vec<SocialContent>,
    pub email_copy: String,
    pub logo: LogoArtifact,
    pub sentiment_analysis: String,
    pub color_palette: Vec<String>,
    pub brand_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

// ============================================================================
// Strategy analyzer models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAudienceData {
    pub demographics: String,
    pub behaviors: String,
    pub pain_points: String,
    pub why_choose: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionStrategyData {
    pub messaging_style: String,
    pub emotional_triggers: String,
    pub trust_building: String,
    pub content_tone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingStrategiesData {
    pub platforms: String,
    pub content_strategy: String,
    pub collaborations: String,
    pub retention: String,
}

/// Startup strategy report across nine strategic areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub industry_category: String,
    pub market_offerings: Vec<String>,
    pub saturation_level: String,
    pub saturation_explanation: String,
    pub differentiation_opportunities: Vec<String>,
    pub value_positioning: Vec<String>,
    pub target_audience: TargetAudienceData,
    pub attraction_strategy: AttractionStrategyData,
    pub marketing_strategies: MarketingStrategiesData,
    pub strategic_advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse_recognized() {
        assert_eq!(Tone::parse("Playful"), Tone::Playful);
        assert_eq!(Tone::parse("luxury"), Tone::Luxury);
        assert_eq!(Tone::parse("  MINIMALIST "), Tone::Minimalist);
    }

    #[test]
    fn test_tone_parse_unrecognized_maps_to_default() {
        assert_eq!(Tone::parse("Corporate Gothic"), Tone::Default);
        assert_eq!(Tone::parse(""), Tone::Default);
    }

    #[test]
    fn test_brand_request_defaults() {
        let req: BrandRequest = serde_json::from_str(
            r#"{"business_idea": "eco-friendly water bottles", "industry": "retail"}"#,
        )
        .unwrap();
        assert_eq!(req.target_audience, "General Public");
        assert_eq!(req.tone, "Professional");
    }

    #[test]
    fn test_chat_request_context_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "help me"}"#).unwrap();
        assert!(req.context.is_empty());
    }
}
