//! Password strength scoring.
//!
//! The score is a number in `0..=100` built from two parts: a length part
//! worth 4 points per character up to 60, and a variety part worth 10 points
//! for each character class present. It works on any string, not only on
//! generated passwords.

use std::fmt;

const POINTS_PER_CHAR: usize = 4;
const LENGTH_CAP: usize = 60;
const POINTS_PER_CLASS: usize = 10;

/// Qualitative tier shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of distinct classes (lowercase, uppercase, digit, symbol) in `value`.
pub fn class_variety(value: &str) -> usize {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for c in value.chars() {
        if c.is_ascii_lowercase() {
            lower = true;
        } else if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else {
            symbol = true;
        }
    }

    [lower, upper, digit, symbol].iter().filter(|&&b| b).count()
}

pub fn estimate_strength(value: &str) -> u8 {
    let length_points = (value.chars().count() * POINTS_PER_CHAR).min(LENGTH_CAP);
    let variety_points = class_variety(value) * POINTS_PER_CLASS;
    (length_points + variety_points).min(100) as u8
}

/// Maps a score to its tier. Scores above 100 count as `Strong`.
pub fn classify(score: u8) -> StrengthLabel {
    match score {
        0..=25 => StrengthLabel::Weak,
        26..=50 => StrengthLabel::Fair,
        51..=75 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    }
}
