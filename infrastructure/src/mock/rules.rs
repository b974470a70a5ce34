//! Keyword rules that turn answer text into recommendations
//!
//! Stands in for the backend's recommendation engine: every rule whose
//! pattern matches any selected answer contributes one recommendation.

use checkin_domain::{Answer, ChildId, Recommendation};
use regex::Regex;
use std::sync::LazyLock;

struct KeywordRule {
    pattern: Regex,
    trait_name: &'static str,
    goal: &'static str,
    activity: &'static str,
}

const RULE_SOURCES: [(&str, &str, &str, &str); 8] = [
    (
        r"(?i)\b(restless|waking|fall asleep|tired)\b",
        "Sleep Quality",
        "Build a calm, predictable bedtime routine",
        "Dim the lights and read together for 15 minutes before bed",
    ),
    (
        r"(?i)\b(picky|refusing|eating less)\b",
        "Nutrition",
        "Make mealtimes relaxed and exploratory",
        "Let your child help wash and arrange vegetables for one meal a day",
    ),
    (
        r"(?i)\b(tantrums?|upset|irritable|anxious|reassurance)\b",
        "Emotional Regulation",
        "Help your child name and manage big feelings",
        "Practice 'smell the flower, blow the candle' breathing when calm",
    ),
    (
        r"(?i)\b(avoids|struggles to share|shy)\b",
        "Social Development",
        "Grow comfort and confidence with peers",
        "Arrange a short one-on-one playdate with a familiar child",
    ),
    (
        r"(?i)\b(hard to understand|few new words)\b",
        "Language Development",
        "Enrich everyday conversation",
        "Narrate daily routines aloud and pause for your child to fill in words",
    ),
    (
        r"(?i)\b(low energy|mostly sitting|rarely went outside)\b",
        "Physical Activity",
        "Add more movement to each day",
        "Take a 20-minute outdoor walk with a scavenger-hunt list",
    ),
    (
        r"(?i)\b(distracted|few minutes)\b",
        "Attention",
        "Stretch focus a little at a time",
        "Do a short puzzle together and celebrate finishing it",
    ),
    (
        r"(?i)\bthree hours\b",
        "Screen Habits",
        "Balance screen time with hands-on play",
        "Swap one screen session a day for building blocks or drawing",
    ),
];

static RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    RULE_SOURCES
        .iter()
        .filter_map(|&(pattern, trait_name, goal, activity)| {
            Regex::new(pattern).ok().map(|pattern| KeywordRule {
                pattern,
                trait_name,
                goal,
                activity,
            })
        })
        .collect()
});

const GENERAL_TRAIT: &str = "Healthy Routines";

fn general_recommendation() -> Recommendation {
    Recommendation::new(
        GENERAL_TRAIT,
        "Keep up the consistent daily rhythm",
        "Spend ten minutes of undivided play time together each day",
    )
}

/// Recommendations for the given answers, in rule order; never empty
pub fn recommend(answers: &[Answer]) -> Vec<Recommendation> {
    let matched: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| {
            answers
                .iter()
                .any(|answer| rule.pattern.is_match(&answer.selected_text))
        })
        .map(|rule| Recommendation::new(rule.trait_name, rule.goal, rule.activity))
        .collect();

    if matched.is_empty() {
        vec![general_recommendation()]
    } else {
        matched
    }
}

/// A one-line summary of what the rules found
pub fn summarize(
    child_id: &ChildId,
    answers: &[Answer],
    recommendations: &[Recommendation],
) -> String {
    let focus: Vec<&str> = recommendations
        .iter()
        .map(|r| r.trait_name.as_str())
        .filter(|name| *name != GENERAL_TRAIT)
        .collect();

    if focus.is_empty() {
        format!(
            "Reviewed {} answers for {}. Nothing stood out this week; keep up the good routines.",
            answers.len(),
            child_id
        )
    } else {
        format!(
            "Reviewed {} answers for {}. Areas to focus on: {}.",
            answers.len(),
            child_id,
            focus.join(", ")
        )
    }
}
