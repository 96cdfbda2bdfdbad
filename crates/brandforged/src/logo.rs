//! Logo prompt construction and placeholder synthesis
//!
//! The prompt builder and the placeholder tier both make randomized
//! choices (icon, layout, color variation, generation seed). The random
//! source is always an explicit argument so tests can pin a seed and
//! assert exact output.

use brandforge_common::{LogoArtifact, Tone};
use rand::Rng;

/// Primary color used when the caller supplies an empty palette.
pub const DEFAULT_PRIMARY_COLOR: &str = "#6366f1";

/// Provenance tag for locally synthesized logos.
pub const PLACEHOLDER_SERVICE: &str = "placeholder";

fn tone_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "corporate, clean, trustworthy, minimal",
        Tone::Playful => "vibrant, friendly, approachable, fun",
        Tone::Luxury => "elegant, sophisticated, premium, refined",
        Tone::Innovative => "futuristic, tech-forward, dynamic, modern",
        Tone::Friendly => "warm, approachable, welcoming, soft",
        Tone::Minimalist => "ultra-clean, simple, geometric, sparse",
        Tone::Default => "modern, professional",
    }
}

fn industry_icons(industry: &str) -> &'static [&'static str] {
    match industry.trim().to_lowercase().as_str() {
        "technology" => &["circuit pattern", "digital node", "tech symbol", "data icon"],
        "food" => &["leaf element", "organic shape", "natural form", "fresh symbol"],
        "fitness" => &["dynamic shape", "movement icon", "energy symbol", "active mark"],
        "finance" => &["shield icon", "growth arrow", "secure symbol", "trust mark"],
        "education" => &["book symbol", "knowledge icon", "learning mark", "growth element"],
        "health" => &["wellness symbol", "care icon", "vitality mark", "health element"],
        "retail" => &["shopping icon", "product symbol", "store mark", "commerce element"],
        _ => &["abstract icon", "symbolic mark", "brand element", "unique symbol"],
    }
}

const LAYOUT_STYLES: &[&str] = &[
    "icon positioned above brand name",
    "icon integrated beside brand name",
    "circular emblem enclosing icon and text",
    "monogram lettermark with decorative element",
    "badge-style with icon centerpiece",
    "horizontal lockup with icon left",
];

/// Build the brand-aligned logo prompt with randomized visual directives.
pub fn build_logo_prompt(
    name: &str,
    industry: &str,
    tone: Tone,
    primary_color: &str,
    rng: &mut impl Rng,
) -> String {
    let icons = industry_icons(industry);
    let icon = icons[rng.gen_range(0..icons.len())];
    let layout = LAYOUT_STYLES[rng.gen_range(0..LAYOUT_STYLES.len())];
    let style = tone_style(tone);
    let variation_seed: u32 = rng.gen_range(10_000..=99_999);

    format!(
        r#"Create a single professional logo design for '{name}' brand, {industry} industry.

CRITICAL: Generate ONE logo only, not multiple variations or a grid layout.

VISUAL STYLE: {style}, modern branding aesthetic
LAYOUT: {layout}
ICON ELEMENT: {icon}, simple and recognizable
COLOR: {primary_color} as primary brand color
TYPOGRAPHY: clean sans-serif, professional lettering
COMPOSITION: single logo, centered on white background

REQUIREMENTS:
- ONE logo design only (not a grid, not multiple variations)
- Include both icon/symbol AND brand name text
- Flat design, vector-style graphics
- High contrast, sharp edges
- Scalable and professional
- NO multiple logo variations in one image
- NO grid layouts or collages
- NO gradients, NO textures, NO photorealistic elements
- Clean white or transparent background
- Single centered logo composition

BRAND IDENTITY: Modern startup logo, ready for real-world use
VARIATION_SEED: {variation_seed}"#
    )
}

// ============================================================================
// Placeholder synthesis
// ============================================================================

fn parse_channels(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Derive a contrast variation of the brand color: lighter, darker, or a
/// green/red channel shift. Unparseable colors pass through unchanged.
fn vary_color(hex: &str, rng: &mut impl Rng) -> String {
    let Some((r, g, b)) = parse_channels(hex) else {
        return hex.to_string();
    };

    match rng.gen_range(0..4) {
        0 => format!(
            "{:02x}{:02x}{:02x}",
            r.saturating_add(40),
            g.saturating_add(40),
            b.saturating_add(40)
        ),
        1 => format!(
            "{:02x}{:02x}{:02x}",
            r.saturating_sub(40),
            g.saturating_sub(40),
            b.saturating_sub(40)
        ),
        2 => format!("{:02x}{:02x}{:02x}", r, g.saturating_add(60), b),
        _ => format!("{:02x}{:02x}{:02x}", r.saturating_add(60), g, b),
    }
}

/// Synthesize the terminal-tier logo: pure local computation, total by
/// construction. The image reference is a styled placehold.co URL carrying
/// the brand name and a variation of the primary color.
pub fn placeholder_logo(
    name: &str,
    primary_color: &str,
    prompt: String,
    rng: &mut impl Rng,
) -> LogoArtifact {
    let color_hex = primary_color.trim_start_matches('#');
    let variation = vary_color(color_hex, rng);

    let layouts: [(&str, String); 5] = [
        ("800x800", name.to_string()),
        ("800x600", format!("◆ {name} ◆")),
        ("800x800", format!("● {name}")),
        ("800x800", format!("▲ {name} ▲")),
        ("800x800", format!("■ {name}")),
    ];
    let (size, text) = &layouts[rng.gen_range(0..layouts.len())];

    let background = if rng.gen_bool(0.5) { variation } else { color_hex.to_string() };
    let encoded = urlencoding::encode(text);

    LogoArtifact {
        url: format!("https://placehold.co/{size}/{background}/ffffff?text={encoded}&font=roboto"),
        prompt,
        service: PLACEHOLDER_SERVICE.to_string(),
    }
}
