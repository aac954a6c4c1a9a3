//! The career-development profile a user fills in before requesting a
//! Learning Drop. Pure data — the prompt builder reads it, the session
//! controller mutates it field-by-field.

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of learning-format preferences shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningFormat {
    Podcasts,
    Books,
    Courses,
    Articles,
    Videos,
}

impl LearningFormat {
    pub const ALL: [LearningFormat; 5] = [
        LearningFormat::Podcasts,
        LearningFormat::Books,
        LearningFormat::Courses,
        LearningFormat::Articles,
        LearningFormat::Videos,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LearningFormat::Podcasts => "Podcasts",
            LearningFormat::Books => "Books",
            LearningFormat::Courses => "Courses",
            LearningFormat::Articles => "Articles",
            LearningFormat::Videos => "Videos",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LearningFormat::Podcasts => "🎧",
            LearningFormat::Books => "📚",
            LearningFormat::Courses => "🎓",
            LearningFormat::Articles => "📰",
            LearningFormat::Videos => "🎬",
        }
    }

    /// Display form used in the prompt, e.g. "Books 📚".
    pub fn with_emoji(&self) -> String {
        format!("{} {}", self.label(), self.emoji())
    }
}

/// Price preference for recommended resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePreference {
    #[default]
    Any,
    Free,
    Paid,
}

impl PricePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePreference::Any => "Any",
            PricePreference::Free => "Free",
            PricePreference::Paid => "Paid",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Any" => Some(PricePreference::Any),
            "Free" => Some(PricePreference::Free),
            "Paid" => Some(PricePreference::Paid),
            _ => None,
        }
    }
}

/// A user's full form state. Sessions start from `Profile::default()`
/// (everything empty, price preference Any, no format preferences).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub country: String,
    pub area: String,
    pub current_position: String,
    pub time_in_current_role: String,
    pub short_term_goals: String,
    pub long_term_goals: String,
    pub hard_skills: String,
    pub soft_skills: String,
    /// Duplicate-free by construction — only mutated via `toggle_preference`.
    pub learning_preferences: Vec<LearningFormat>,
    pub price_preference: PricePreference,
    pub time_available_per_week: String,
    pub additional_comments: String,
}

impl Profile {
    /// Replaces a single field by its wire name. Returns `false` for an
    /// unknown field name or an unparseable enum value; the caller decides
    /// how to surface that. `learning_preferences` is not settable here —
    /// it goes through `toggle_preference`.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "country" => self.country = value.to_string(),
            "area" => self.area = value.to_string(),
            "current_position" => self.current_position = value.to_string(),
            "time_in_current_role" => self.time_in_current_role = value.to_string(),
            "short_term_goals" => self.short_term_goals = value.to_string(),
            "long_term_goals" => self.long_term_goals = value.to_string(),
            "hard_skills" => self.hard_skills = value.to_string(),
            "soft_skills" => self.soft_skills = value.to_string(),
            "time_available_per_week" => self.time_available_per_week = value.to_string(),
            "additional_comments" => self.additional_comments = value.to_string(),
            "price_preference" => match PricePreference::parse(value) {
                Some(pref) => self.price_preference = pref,
                None => return false,
            },
            _ => return false,
        }
        true
    }

    /// Adds the format if absent, removes it if present. Order of the
    /// remaining preferences is preserved.
    pub fn toggle_preference(&mut self, format: LearningFormat) {
        if let Some(pos) = self.learning_preferences.iter().position(|p| *p == format) {
            self.learning_preferences.remove(pos);
        } else {
            self.learning_preferences.push(format);
        }
    }

    /// Preferences rendered for the prompt, e.g. "Courses 🎓, Books 📚".
    pub fn preferences_with_emojis(&self) -> String {
        self.learning_preferences
            .iter()
            .map(|p| p.with_emoji())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
