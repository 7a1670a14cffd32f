//! Rating palette codec.
//!
//! Translates between the three representations of an episode rating:
//! the qualitative label, its ordinal encoding (1-9, used in storage and
//! URLs), and its display color. Also recovers a color from decorated
//! text such as `"Episode 3 (7.8)"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display color, as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RatingColor(&'static str);

impl RatingColor {
    pub fn as_hex(&self) -> &'static str {
        self.0
    }

    /// Decoded RGB components. Malformed hex yields black rather than
    /// failing; the palette constants below are all well-formed.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.0.trim_start_matches('#');
        let byte_at = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        (byte_at(0), byte_at(2), byte_at(4))
    }
}

impl fmt::Display for RatingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Color used when an ordinal does not map to any label. Kept outside the
/// nine official palette entries so unmappable input is distinguishable.
pub const FALLBACK_COLOR: RatingColor = RatingColor("#808080");

/// The nine rating labels, worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingLabel {
    Garbage,
    Broken,
    Weak,
    Inconsistent,
    Whatever,
    Acceptable,
    Solid,
    Stunning,
    Generational,
}

use RatingLabel::*;

/// Order the labels are listed in for pickers and legends.
///
/// Note `broken` precedes `weak` here while the ordinal encoding below
/// has `weak` at 2 and `broken` at 3. The two orders disagree on purpose:
/// they disagreed in every deployed build, and stored ordinals depend on
/// the encoding order staying exactly as it is.
pub const DISPLAY_ORDER: [RatingLabel; 9] = [
    Garbage,
    Broken,
    Weak,
    Inconsistent,
    Whatever,
    Acceptable,
    Solid,
    Stunning,
    Generational,
];

/// Ordinal encoding order: `ORDINAL_ORDER[n - 1]` is the label for ordinal n.
const ORDINAL_ORDER: [RatingLabel; 9] = [
    Garbage,
    Weak,
    Broken,
    Inconsistent,
    Whatever,
    Acceptable,
    Solid,
    Stunning,
    Generational,
];

static PAREN_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("paren group regex"));

impl RatingLabel {
    /// Fixed display color for this label.
    pub fn color(self) -> RatingColor {
        RatingColor(match self {
            Garbage => "#ff0000",
            Weak => "#EE4B2B",
            Broken => "#FFAC1C",
            Inconsistent => "#ffcc00",
            Whatever => "#ffff00",
            Acceptable => "#ccff66",
            Solid => "#99ff33",
            Stunning => "#66ff99",
            Generational => "#00ffff",
        })
    }

    /// Ordinal encoding, 1..=9. Bijective with the label set.
    pub fn ordinal(self) -> u8 {
        match self {
            Garbage => 1,
            Weak => 2,
            Broken => 3,
            Inconsistent => 4,
            Whatever => 5,
            Acceptable => 6,
            Solid => 7,
            Stunning => 8,
            Generational => 9,
        }
    }

    /// Label for a (possibly fractional) ordinal. Truncates toward
    /// negative infinity before the table lookup: 3.9 is still ordinal 3.
    /// NaN, infinities, and anything outside 1..=9 yield `None`.
    pub fn from_ordinal(value: f64) -> Option<RatingLabel> {
        let floored = value.floor();
        if !(1.0..=9.0).contains(&floored) {
            return None;
        }
        Some(ORDINAL_ORDER[floored as usize - 1])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Garbage => "garbage",
            Broken => "broken",
            Weak => "weak",
            Inconsistent => "inconsistent",
            Whatever => "whatever",
            Acceptable => "acceptable",
            Solid => "solid",
            Stunning => "stunning",
            Generational => "generational",
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DISPLAY_ORDER
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown rating label: {s}"))
    }
}

/// Color for a numeric rating, falling back to [`FALLBACK_COLOR`] when the
/// value does not floor into 1..=9. Total over all of f64, NaN included.
pub fn color_from_ordinal(value: f64) -> RatingColor {
    RatingLabel::from_ordinal(value)
        .map(RatingLabel::color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Color for a rating embedded in decorated text as a parenthesized
/// number, e.g. `"Score: (7.8)/10"`. Returns `None` when no parenthesized
/// group exists at all; unparseable or out-of-range content inside the
/// parentheses degrades to [`FALLBACK_COLOR`] instead of failing.
pub fn color_from_embedded(text: &str) -> Option<RatingColor> {
    let group = PAREN_GROUP.captures(text)?;
    let value = group[1].trim().parse::<f64>().unwrap_or(f64::NAN);
    Some(color_from_ordinal(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn ordinals_are_a_bijection_onto_1_through_9() {
        let seen: HashSet<u8> = DISPLAY_ORDER.iter().map(|l| l.ordinal()).collect();
        assert_eq!(seen.len(), 9);
        assert!(seen.iter().all(|o| (1..=9).contains(o)));
    }

    #[test]
    fn ordinal_round_trips_through_color() {
        for label in DISPLAY_ORDER {
            assert_eq!(color_from_ordinal(label.ordinal() as f64), label.color());
            assert_eq!(RatingLabel::from_ordinal(label.ordinal() as f64), Some(label));
        }
    }

    #[test]
    fn display_and_encoding_orders_disagree_on_weak_broken() {
        assert_eq!(DISPLAY_ORDER[1], Broken);
        assert_eq!(DISPLAY_ORDER[2], Weak);
        assert_eq!(RatingLabel::from_ordinal(2.0), Some(Weak));
        assert_eq!(RatingLabel::from_ordinal(3.0), Some(Broken));
    }

    #[test]
    fn out_of_range_ordinals_fall_back() {
        for value in [0.0, -1.0, -0.5, 10.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(color_from_ordinal(value), FALLBACK_COLOR, "value {value}");
        }
        // 9.5 floors to 9 and is still in range.
        assert_eq!(color_from_ordinal(9.5), Generational.color());
    }

    #[test]
    fn fallback_is_not_an_official_color() {
        assert!(DISPLAY_ORDER.iter().all(|l| l.color() != FALLBACK_COLOR));
    }

    #[test]
    fn truncation_is_floor_not_round() {
        assert_eq!(color_from_ordinal(3.9), Broken.color());
        assert_eq!(color_from_ordinal(7.8), Solid.color());
    }

    #[test]
    fn embedded_rating_extraction() {
        assert_eq!(color_from_embedded("Score: (7.8)/10"), Some(Solid.color()));
        assert_eq!(color_from_embedded("no parens here"), None);
        assert_eq!(color_from_embedded("rated (abc)"), Some(FALLBACK_COLOR));
        assert_eq!(color_from_embedded("rated (12)"), Some(FALLBACK_COLOR));
        // First group wins.
        assert_eq!(
            color_from_embedded("(1) then (9)"),
            Some(Garbage.color())
        );
    }

    #[test]
    fn label_strings_round_trip() {
        for label in DISPLAY_ORDER {
            assert_eq!(label.as_str().parse::<RatingLabel>(), Ok(label));
        }
        assert!("amazing".parse::<RatingLabel>().is_err());
    }

    #[test]
    fn rgb_decodes_palette_hex() {
        assert_eq!(Garbage.color().rgb(), (0xff, 0, 0));
        assert_eq!(Weak.color().rgb(), (0xee, 0x4b, 0x2b));
        assert_eq!(Generational.color().rgb(), (0, 0xff, 0xff));
    }

    proptest! {
        #[test]
        fn color_ignores_fractional_part(value in -100.0f64..100.0) {
            prop_assert_eq!(color_from_ordinal(value), color_from_ordinal(value.floor()));
        }

        #[test]
        fn color_from_ordinal_is_total(value in proptest::num::f64::ANY) {
            // Must never panic, whatever the bits.
            let _ = color_from_ordinal(value);
        }
    }
}
