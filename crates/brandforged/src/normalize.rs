//! Response normalization
//!
//! Text generation providers answer with free text that is *supposed* to be
//! JSON but routinely arrives wrapped in markdown fences or prose. This
//! module turns that untrusted output into typed records, or fails with a
//! structured error the resolver converts into a tier advance. It never
//! fabricates content: fallback data is the resolver's job.

use brandforge_common::{
    snippet, AttractionStrategyData, BrandIdentity, MarketingStrategiesData, ProviderError,
    SocialContent, StrategyAnalysis, TargetAudienceData,
};
use serde_json::Value;

/// Valid saturation labels in a strategy report.
const SATURATION_LEVELS: &[&str] = &["LOW", "MODERATE", "HIGH"];

// ============================================================================
// Decoding
// ============================================================================

/// Strip incidental markdown fences and trim.
fn sanitize(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode provider text into a JSON document.
///
/// Strict decode after fence-stripping; if that fails, salvage the outermost
/// JSON object/array from surrounding prose and decode strictly again.
pub fn decode_document(raw: &str) -> Result<Value, ProviderError> {
    let cleaned = sanitize(raw);

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    if let Some(extracted) = extract_json(&cleaned) {
        if let Ok(value) = serde_json::from_str::<Value>(extracted) {
            return Ok(value);
        }
    }

    Err(ProviderError::Malformed(snippet(raw)))
}

/// Slice from the first opening bracket to the matching last closing one.
fn extract_json(text: &str) -> Option<&str> {
    let obj = text.find('{').map(|start| (start, text.rfind('}')));
    let arr = text.find('[').map(|start| (start, text.rfind(']')));

    // Prefer whichever document opens first.
    let (start, end) = match (obj, arr) {
        (Some((o, oe)), Some((a, ae))) => {
            if o < a {
                (o, oe?)
            } else {
                (a, ae?)
            }
        }
        (Some((o, oe)), None) => (o, oe?),
        (None, Some((a, ae))) => (a, ae?),
        (None, None) => return None,
    };

    (end > start).then(|| &text[start..=end])
}

// ============================================================================
// Field helpers
// ============================================================================

fn contract(detail: impl Into<String>) -> ProviderError {
    ProviderError::Contract(detail.into())
}

fn require_str(value: &Value, key: &str) -> Result<String, ProviderError> {
    let s = value
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| contract(format!("missing or non-string field '{key}'")))?;
    if s.trim().is_empty() {
        return Err(contract(format!("field '{key}' is empty")));
    }
    Ok(s.to_string())
}

fn require_str_list(value: &Value, key: &str) -> Result<Vec<String>, ProviderError> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| contract(format!("missing or non-list field '{key}'")))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| contract(format!("non-string entry in '{key}'")))
        })
        .collect()
}

// ============================================================================
// Per-capability normalizers
// ============================================================================

/// Parse brand identity candidates: a non-empty array of
/// `{name, tagline, score}` with score within 1..=100.
pub fn parse_identities(raw: &str) -> Result<Vec<BrandIdentity>, ProviderError> {
    let document = decode_document(raw)?;
    let items = document
        .as_array()
        .ok_or_else(|| contract("identity payload is not an array"))?;
    if items.is_empty() {
        return Err(contract("identity payload is an empty array"));
    }

    items
        .iter()
        .map(|item| {
            let name = require_str(item, "name")?;
            let tagline = require_str(item, "tagline")?;
            let score = item
                .get("score")
                .and_then(|v| v.as_i64())
                .ok_or_else(|| contract("missing or non-integer field 'score'"))?;
            if !(1..=100).contains(&score) {
                return Err(contract(format!("score {score} outside 1..=100")));
            }
            Ok(BrandIdentity { name, tagline, score })
        })
        .collect()
}

/// Parse social posts: platform restricted to the supported set (the
/// "Error" sentinel is reserved for the fallback tier and is rejected from
/// live provider output).
pub fn parse_social_posts(raw: &str) -> Result<Vec<SocialContent>, ProviderError> {
    let document = decode_document(raw)?;
    let items = document
        .as_array()
        .ok_or_else(|| contract("social payload is not an array"))?;
    if items.is_empty() {
        return Err(contract("social payload is an empty array"));
    }

    items
        .iter()
        .map(|item| {
            let platform = canonical_platform(&require_str(item, "platform")?)?;
            let content = require_str(item, "content")?;
            let hashtags = require_str_list(item, "hashtags")?;
            Ok(SocialContent {
                platform,
                content,
                hashtags,
            })
        })
        .collect()
}

fn canonical_platform(label: &str) -> Result<String, ProviderError> {
    match label.trim().to_lowercase().as_str() {
        "linkedin" => Ok("LinkedIn".to_string()),
        "twitter" => Ok("Twitter".to_string()),
        "instagram" => Ok("Instagram".to_string()),
        other => Err(contract(format!("unsupported platform '{other}'"))),
    }
}

/// Parse the classifier document, shaped `[[{label, score}, ...]]`, into the
/// user-facing sentiment line.
pub fn parse_sentiment(document: &Value) -> Result<String, ProviderError> {
    let top = document
        .get(0)
        .and_then(|inner| inner.as_array())
        .and_then(|inner| inner.first())
        .ok_or_else(|| contract("classifier payload is not a nested label list"))?;

    let label = require_str(top, "label")?;
    let score = top
        .get("score")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| contract("missing or non-numeric field 'score'"))?;

    let percent = (score * 1000.0).round() / 10.0;
    Ok(format!("Detected Sentiment: {label} ({percent}%)"))
}

/// Parse the nine-area strategy report against its full schema.
pub fn parse_strategy(raw: &str) -> Result<StrategyAnalysis, ProviderError> {
    let document = decode_document(raw)?;
    if !document.is_object() {
        return Err(contract("strategy payload is not an object"));
    }

    let saturation_level = require_str(&document, "saturation_level")?;
    if !SATURATION_LEVELS.contains(&saturation_level.as_str()) {
        return Err(contract(format!(
            "saturation_level '{saturation_level}' not one of LOW/MODERATE/HIGH"
        )));
    }

    let target_audience = document
        .get("target_audience")
        .ok_or_else(|| contract("missing field 'target_audience'"))?;
    let attraction = document
        .get("attraction_strategy")
        .ok_or_else(|| contract("missing field 'attraction_strategy'"))?;
    let marketing = document
        .get("marketing_strategies")
        .ok_or_else(|| contract("missing field 'marketing_strategies'"))?;

    Ok(StrategyAnalysis {
        industry_category: require_str(&document, "industry_category")?,
        market_offerings: require_str_list(&document, "market_offerings")?,
        saturation_level,
        saturation_explanation: require_str(&document, "saturation_explanation")?,
        differentiation_opportunities: require_str_list(&document, "differentiation_opportunities")?,
        value_positioning: require_str_list(&document, "value_positioning")?,
        target_audience: TargetAudienceData {
            demographics: require_str(target_audience, "demographics")?,
            behaviors: require_str(target_audience, "behaviors")?,
            pain_points: require_str(target_audience, "pain_points")?,
            why_choose: require_str(target_audience, "why_choose")?,
        },
        attraction_strategy: AttractionStrategyData {
            messaging_style: require_str(attraction, "messaging_style")?,
            emotional_triggers: require_str(attraction, "emotional_triggers")?,
            trust_building: require_str(attraction, "trust_building")?,
            content_tone: require_str(attraction, "content_tone")?,
        },
        marketing_strategies: MarketingStrategiesData {
            platforms: require_str(marketing, "platforms")?,
            content_strategy: require_str(marketing, "content_strategy")?,
            collaborations: require_str(marketing, "collaborations")?,
            retention: require_str(marketing, "retention")?,
        },
        strategic_advice: require_str(&document, "strategic_advice")?,
    })
}
