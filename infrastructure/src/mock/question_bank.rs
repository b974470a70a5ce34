//! Canned check-in questions for the mock gateway
//!
//! The question set for a child is chosen from its id alone, so the same id
//! always yields the same questions in the same order.

use checkin_domain::{ChildId, Question};

/// Number of questions in every mock check-in
pub const QUESTIONS_PER_CHECK_IN: usize = 5;

struct BankEntry {
    id: &'static str,
    prompt: &'static str,
    category: &'static str,
    options: [&'static str; 4],
}

// The first option of every entry describes a concern so that answering
// index 0 throughout always trips at least one keyword rule.
static BANK: [BankEntry; 10] = [
    BankEntry {
        id: "q-sleep",
        prompt: "How has your child been sleeping this past week?",
        category: "sleep",
        options: [
            "Restless, waking up often at night",
            "Takes a long time to fall asleep",
            "Mostly sleeping well",
            "Sleeping great",
        ],
    },
    BankEntry {
        id: "q-appetite",
        prompt: "How has eating been going?",
        category: "nutrition",
        options: [
            "Very picky, refusing most meals",
            "Eating less than usual",
            "Normal appetite",
            "Eating well and trying new foods",
        ],
    },
    BankEntry {
        id: "q-mood",
        prompt: "How would you describe their mood lately?",
        category: "emotional",
        options: [
            "Frequent tantrums or getting upset",
            "More irritable than usual",
            "Generally content",
            "Cheerful and calm",
        ],
    },
    BankEntry {
        id: "q-social",
        prompt: "How are they getting along with other children?",
        category: "social",
        options: [
            "Avoids other kids or struggles to share",
            "Shy at first but warms up",
            "Plays well with others",
            "Seeks out friends eagerly",
        ],
    },
    BankEntry {
        id: "q-language",
        prompt: "How has their communication been?",
        category: "language",
        options: [
            "Hard to understand, few new words",
            "Picked up some new words",
            "Talking in full sentences",
            "Very talkative and curious",
        ],
    },
    BankEntry {
        id: "q-activity",
        prompt: "How physically active have they been?",
        category: "physical",
        options: [
            "Low energy, mostly sitting",
            "Active in short bursts",
            "Regular active play",
            "Constantly running and climbing",
        ],
    },
    BankEntry {
        id: "q-focus",
        prompt: "How well can they stay focused on one activity?",
        category: "attention",
        options: [
            "Easily distracted, switches quickly",
            "Focuses for a few minutes",
            "Stays on task with some help",
            "Deeply absorbed for long stretches",
        ],
    },
    BankEntry {
        id: "q-screen",
        prompt: "How much screen time did they have on a typical day?",
        category: "habits",
        options: [
            "More than three hours",
            "One to three hours",
            "Under an hour",
            "None at all",
        ],
    },
    BankEntry {
        id: "q-outdoor",
        prompt: "How often did they play outdoors?",
        category: "physical",
        options: [
            "Rarely went outside",
            "Once or twice",
            "Most days",
            "Every day",
        ],
    },
    BankEntry {
        id: "q-routine",
        prompt: "How did they handle changes in their routine?",
        category: "emotional",
        options: [
            "Became very anxious",
            "Needed extra reassurance",
            "Adjusted with little fuss",
            "Took it in stride",
        ],
    },
];

/// FNV-1a over the id bytes; stable across platforms and releases
fn fingerprint(child_id: &ChildId) -> u64 {
    child_id
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn to_question(entry: &BankEntry) -> Option<Question> {
    let options = entry.options.iter().map(|o| o.to_string()).collect();
    Question::new(entry.id, entry.prompt, options)
        .ok()
        .map(|question| question.with_category(entry.category))
}

/// The deterministic question set for `child_id`
pub fn questions_for(child_id: &ChildId) -> Vec<Question> {
    let start = (fingerprint(child_id) % BANK.len() as u64) as usize;
    (0..QUESTIONS_PER_CHECK_IN)
        .filter_map(|offset| to_question(&BANK[(start + offset) % BANK.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_child_same_questions() {
        let a = questions_for(&ChildId::new("child-7"));
        let b = questions_for(&ChildId::new("child-7"));
        assert_eq!(a, b);
        assert_eq!(a.len(), QUESTIONS_PER_CHECK_IN);
    }

    #[test]
    fn test_every_bank_entry_is_valid() {
        assert!(BANK.iter().all(|entry| to_question(entry).is_some()));
    }

    #[test]
    fn test_question_ids_unique_within_set() {
        let questions = questions_for(&ChildId::new("anyone"));
        let ids: HashSet<_> = questions.iter().map(|q| q.id()).collect();
        assert_eq!(ids.len(), questions.len());
    }

    #[test]
    fn test_different_children_can_get_different_sets() {
        let sets: HashSet<Vec<String>> = (0..20)
            .map(|i| {
                questions_for(&ChildId::new(format!("child-{i}")))
                    .iter()
                    .map(|q| q.id().to_string())
                    .collect()
            })
            .collect();
        assert!(sets.len() > 1);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(&ChildId::new("")), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fingerprint(&ChildId::new("a")), 0xaf63_dc4c_8601_ec8c);
    }
}
