//! Tone-keyed color palettes
//!
//! Palettes are a fixed local table rather than a provider call: the kit
//! needs them early (the logo depends on the primary color) and they must
//! never fail. Unrecognized tones get the neutral table.

use crate::schemas::Tone;

/// Number of colors in every palette.
pub const PALETTE_LEN: usize = 5;

const PROFESSIONAL: [&str; PALETTE_LEN] = ["#0f172a", "#334155", "#475569", "#94a3b8", "#f8fafc"];
const PLAYFUL: [&str; PALETTE_LEN] = ["#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff"];
const LUXURY: [&str; PALETTE_LEN] = ["#000000", "#1c1c1c", "#d4af37", "#f5f5f5", "#ffffff"];
const INNOVATIVE: [&str; PALETTE_LEN] = ["#6366f1", "#8b5cf6", "#ec4899", "#10b981", "#1e293b"];
const FRIENDLY: [&str; PALETTE_LEN] = ["#f97316", "#fbbf24", "#fde68a", "#34d399", "#fff7ed"];
const MINIMALIST: [&str; PALETTE_LEN] = ["#111111", "#3f3f46", "#a1a1aa", "#e4e4e7", "#ffffff"];
const NEUTRAL: [&str; PALETTE_LEN] = ["#000000", "#ffffff", "#cccccc", "#333333", "#666666"];

/// Look up the palette for a tone. Pure and total: same tone, same colors,
/// every call.
pub fn palette_for(tone: Tone) -> Vec<String> {
    let table = match tone {
        Tone::Professional => &PROFESSIONAL,
        Tone::Playful => &PLAYFUL,
        Tone::Luxury => &LUXURY,
        Tone::Innovative => &INNOVATIVE,
        Tone::Friendly => &FRIENDLY,
        Tone::Minimalist => &MINIMALIST,
        Tone::Default => &NEUTRAL,
    };
    table.iter().map(|c| c.to_string()).collect()
}

/// Check a color value is exactly `#RRGGBB`.
pub fn is_hex_triplet(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tone_yields_five_hex_triplets() {
        for tone in Tone::all() {
            let palette = palette_for(*tone);
            assert_eq!(palette.len(), PALETTE_LEN, "tone {:?}", tone);
            for color in &palette {
                assert!(is_hex_triplet(color), "bad color {color} for {tone:?}");
            }
        }
    }

    #[test]
    fn test_palette_is_deterministic() {
        for tone in Tone::all() {
            assert_eq!(palette_for(*tone), palette_for(*tone));
        }
    }

    #[test]
    fn test_unrecognized_tone_gets_neutral_table() {
        assert_eq!(palette_for(Tone::parse("no-such-tone")), palette_for(Tone::Default));
    }

    #[test]
    fn test_playful_table_pinned() {
        // The fan-out feeds palette[0] to the logo as the primary color;
        // the table itself is part of the API contract.
        assert_eq!(palette_for(Tone::Playful)[0], "#ff6b6b");
    }

    #[test]
    fn test_hex_triplet_validation() {
        assert!(is_hex_triplet("#0f172a"));
        assert!(!is_hex_triplet("0f172a"));
        assert!(!is_hex_triplet("#0f172"));
        assert!(!is_hex_triplet("#0f172g"));
        assert!(!is_hex_triplet("#0f172aa"));
    }
}
