//! Prompt Builder — turns a profile (plus, on regenerate, the previous raw
//! output) into the Learning Coach instruction prompt. Pure string
//! construction: deterministic for identical inputs, no error conditions.

use crate::generation::prompts::{LEARNING_COACH_PROMPT_TEMPLATE, REGENERATION_BLOCK_TEMPLATE};
use crate::models::profile::Profile;

/// Builds the full generation prompt. Empty optional fields substitute as
/// empty segments — the surrounding punctuation in the template stays valid.
///
/// `{regeneration_block}` is filled last so user-supplied text (goals,
/// comments, the previous message) is never rescanned for placeholders.
pub fn build_prompt(profile: &Profile, previous_message: Option<&str>) -> String {
    let preferences = profile.preferences_with_emojis();

    let regeneration_block = match previous_message {
        Some(prev) if !prev.trim().is_empty() => {
            REGENERATION_BLOCK_TEMPLATE.replace("{previous_message}", prev)
        }
        _ => String::new(),
    };

    LEARNING_COACH_PROMPT_TEMPLATE
        .replace("{country}", &profile.country)
        .replace("{preferences}", &preferences)
        .replace("{price_preference}", profile.price_preference.as_str())
        .replace("{name}", &profile.name)
        .replace("{email}", &profile.email)
        .replace("{area}", &profile.area)
        .replace("{current_position}", &profile.current_position)
        .replace("{time_in_current_role}", &profile.time_in_current_role)
        .replace("{short_term_goals}", &profile.short_term_goals)
        .replace("{long_term_goals}", &profile.long_term_goals)
        .replace("{hard_skills}", &profile.hard_skills)
        .replace("{soft_skills}", &profile.soft_skills)
        .replace(
            "{time_available_per_week}",
            &profile.time_available_per_week,
        )
        .replace("{additional_comments}", &profile.additional_comments)
        .replace("{regeneration_block}", &regeneration_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{LearningFormat, PricePreference};

    /// The demo profile the original form shipped with — kept as a fixture.
    fn sample_profile() -> Profile {
        Profile {
            name: "Alex Chen".to_string(),
            email: "alex.chen@ontop.com".to_string(),
            country: "United States".to_string(),
            area: "Engineering".to_string(),
            current_position: "Software Engineer II".to_string(),
            time_in_current_role: "1 year 2 months".to_string(),
            short_term_goals: "Get promoted to Senior Software Engineer.".to_string(),
            long_term_goals: "Transition into a Tech Lead role within 2 years.".to_string(),
            hard_skills: "System Design, Go (Golang), Kubernetes".to_string(),
            soft_skills: "Mentorship, Technical Leadership, Communication".to_string(),
            learning_preferences: vec![
                LearningFormat::Courses,
                LearningFormat::Books,
                LearningFormat::Articles,
            ],
            price_preference: PricePreference::Any,
            time_available_per_week: "5-7 hours".to_string(),
            additional_comments: "Interested in distributed systems.".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_name_title_and_subsections() {
        let prompt = build_prompt(&sample_profile(), None);
        assert!(prompt.contains("Alex Chen"));
        assert!(prompt.contains("Your Learning Drop 🚀"));
        assert!(prompt.contains("**Hard Skills**"));
        assert!(prompt.contains("**Soft Skills**"));
    }

    #[test]
    fn test_prompt_has_no_unsubstituted_placeholders() {
        let prompt = build_prompt(&sample_profile(), None);
        assert!(!prompt.contains('{'), "leftover placeholder in: {prompt}");
        assert!(!prompt.contains('}'));
    }

    #[test]
    fn test_prompt_embeds_country_in_verification_protocol_and_user_data() {
        let prompt = build_prompt(&sample_profile(), None);
        assert!(prompt.contains("**'United States'**"));
        assert!(prompt.contains("- Country: United States"));
        assert!(prompt.contains("\"PASSED for United States.\""));
    }

    #[test]
    fn test_prompt_renders_preferences_with_emojis() {
        let prompt = build_prompt(&sample_profile(), None);
        assert!(prompt.contains("Courses 🎓, Books 📚, Articles 📰"));
    }

    #[test]
    fn test_prompt_renders_price_preference() {
        let mut profile = sample_profile();
        profile.price_preference = PricePreference::Free;
        let prompt = build_prompt(&profile, None);
        assert!(prompt.contains("`Price Preference` (Free)"));
        assert!(prompt.contains("- Price Preference: Free"));
    }

    #[test]
    fn test_first_generation_has_no_regeneration_block() {
        let prompt = build_prompt(&sample_profile(), None);
        assert!(!prompt.contains("CRITICAL REGENERATION INSTRUCTION"));
        assert!(!prompt.contains("<PREVIOUS_UNSATISFACTORY_RESPONSE>"));
    }

    #[test]
    fn test_regeneration_embeds_previous_message_verbatim() {
        let previous = "Hey Alex, welcome.\nYour Learning Drop 🚀\n\
            [**Go Programming**](https://example.com/go) — Free — (Book 📚)";
        let prompt = build_prompt(&sample_profile(), Some(previous));
        assert!(prompt.contains(previous));
        assert!(prompt.contains("DO NOT repeat any links, topics, or recommendations"));
        assert!(prompt.contains("<PREVIOUS_UNSATISFACTORY_RESPONSE>"));
        assert!(prompt.contains("</PREVIOUS_UNSATISFACTORY_RESPONSE>"));
    }

    #[test]
    fn test_blank_previous_message_is_treated_as_absent() {
        let prompt = build_prompt(&sample_profile(), Some("   "));
        assert!(!prompt.contains("CRITICAL REGENERATION INSTRUCTION"));
    }

    #[test]
    fn test_empty_profile_builds_without_malformed_segments() {
        let prompt = build_prompt(&Profile::default(), None);
        assert!(prompt.contains("- Name: \n"));
        assert!(prompt.contains("- Additional Comments: \n"));
        // No preferences selected: the parenthesized rule still closes cleanly.
        assert!(prompt.contains("\"Learning Preferences\" ()."));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_build_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(
            build_prompt(&profile, Some("previous")),
            build_prompt(&profile, Some("previous"))
        );
    }
}
