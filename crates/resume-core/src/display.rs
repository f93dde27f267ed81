//! Projection of a [`ParseResult`] into display text.
//!
//! Absent and present-but-empty fields are treated alike: both show the
//! field's placeholder.

use crate::result::ParseResult;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_SKILLS: &str = "No relevant skills found";
pub const NO_EDUCATION: &str = "No education details found";
pub const NO_EXPERIENCE: &str = "No experience ranges found";
pub const NO_TEXT: &str = "No text available";

/// A list field, or the message shown in its place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entries<'a> {
    Items(&'a [String]),
    Empty(&'static str),
}

impl<'a> Entries<'a> {
    pub fn new(list: Option<&'a Vec<String>>, fallback: &'static str) -> Self {
        match list {
            Some(items) if !items.is_empty() => Self::Items(items),
            _ => Self::Empty(fallback),
        }
    }
}

/// Text for a scalar field, `N/A` when missing or empty.
pub fn text_or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Score as a gauge ratio in `0.0..=1.0`.
pub fn score_ratio(score: f64) -> f64 {
    if score.is_finite() {
        (score / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Score as a percentage label: `87%`, `87.5%`.
pub fn score_label(score: f64) -> String {
    format!("{}%", score)
}

/// Everything the result panels show, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub match_score: f64,
    pub skills: Entries<'a>,
    pub education: Entries<'a>,
    pub experience: Entries<'a>,
    pub full_text: &'a str,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a ParseResult) -> Self {
        Self {
            name: text_or_na(result.name.as_deref()),
            email: text_or_na(result.email.as_deref()),
            phone: text_or_na(result.phone.as_deref()),
            match_score: result.match_score.unwrap_or(0.0),
            skills: Entries::new(result.skills.as_ref(), NO_SKILLS),
            education: Entries::new(result.education.as_ref(), NO_EDUCATION),
            experience: Entries::new(result.experience.as_ref(), NO_EXPERIENCE),
            full_text: result
                .full_text
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(NO_TEXT),
        }
    }

    pub fn score_ratio(&self) -> f64 {
        score_ratio(self.match_score)
    }

    pub fn score_label(&self) -> String {
        score_label(self.match_score)
    }
}
