//! Keyword-based risk and language classification.
//!
//! All checks are pure, deterministic, case-insensitive substring matches
//! against fixed keyword lists. There is no tokenization and no negation
//! handling, so unrelated text containing a substring is an accepted false
//! positive. The lists live in one consolidated, language-tagged table so
//! the classifiers cannot silently drift apart.

use sahaara_types::agent::Language;

/// Suicidal-ideation indicators (English). Narrow, high-precision list:
/// any hit triggers unconditional escalation without a model call.
const SUICIDAL_ENGLISH: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "better off dead",
    "not worth living",
    "suicidal",
    "self-harm",
    "hurt myself",
    "end it all",
    "taking my life",
    "ending it",
    "wish i was dead",
];

/// Suicidal-ideation indicators (romanized Urdu/Hindi).
const SUICIDAL_URDU_HINDI: &[&str] = &[
    "khud kushi",
    "khudkushi",
    "apne aap ko mar",
    "mar jana",
    "jan dena",
    "zindagi khatam",
    "khatam karna",
    "khatam kar dena",
    "marna chahta",
    "marna chahunga",
    "marne ki soch",
];

/// Severe hopelessness/depression indicators.
const HOPELESSNESS: &[&str] = &[
    "hopeless",
    "no point",
    "no future",
    "nothing matters",
    "can't go on",
    "give up",
    "despair",
    "helpless",
    "worthless",
    "deep depression",
    "severe depression",
    "major depression",
    "umsaid",
    "be umeed",
    "nirash",
];

/// Acute-crisis indicators.
const CRISIS: &[&str] = &[
    "emergency",
    "crisis",
    "urgent help",
    "immediate danger",
    "can't cope",
    "overwhelmed",
    "breakdown",
    "panic attack",
    "severe anxiety",
];

// The upstream concern superset carried "kisi" in its Urdu/Hindi list while
// the escalation list did not. The drift is preserved here rather than
// guessed away: "kisi" widens the concern check only.
const CONCERN_EXTRA_URDU_HINDI: &[&str] = &["kisi"];

/// Affirmative phrasings taken as consent to the interview referral.
const REFERRAL_CONSENT: &[&str] = &[
    "yes",
    "sure",
    "okay",
    "ok",
    "yes please",
    "connect me",
    "speak with specialist",
    "talk to psychiatrist",
    "interview",
    "assessment",
    "help me",
    "need help",
];

/// Weapon/method/location vocabulary indicating a specific plan.
const SPECIFIC_PLAN: &[&str] = &[
    "jump", "floor", "building", "pills", "weapon", "gun", "knife", "rope", "bridge", "train",
    "overdose", "cut", "hang", "drown", "8th", "9th", "roof", "balcony",
];

/// Urdu/Hindi indicators: native script (Urdu and Devanagari) plus romanized
/// word stems. Matched against the raw message, not the lowercased form,
/// since script characters have no case.
const URDU_HINDI_INDICATORS: &[&str] = &[
    "میں", "آپ", "ہے", "ہیں", "کر", "کے", "کی", "سے", "کو", "پر", "اور", "لیکن", "تھا", "تھی",
    "mein", "aap", "hai", "hain", "kar", "ke", "ki", "se", "ko", "par", "aur", "lekin", "tha",
    "thi", "mujhe", "tum", "tu", "main", "tumhara", "tumhari", "tumhare", "apna", "apne", "apni",
    "मैं", "आप", "है", "हैं", "कर", "के", "की", "से", "को", "पर", "और", "लेकिन", "था", "थी",
    "मुझे", "तुम", "तू", "मैन", "तुम्हारा", "तुम्हारी", "तुम्हारे", "अपना", "अपने", "अपनी",
];

fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|kw| haystack_lower.contains(kw))
}

/// Detect suicidal keywords and phrases. Any hit requires immediate
/// referral to the interview agent, bypassing the model entirely.
pub fn is_suicidal(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    contains_any(&lower, SUICIDAL_ENGLISH) || contains_any(&lower, SUICIDAL_URDU_HINDI)
}

/// Detect the broader mental-health-concern superset: suicidal ideation,
/// severe hopelessness, and acute-crisis vocabulary.
pub fn is_mental_health_concern(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    contains_any(&lower, SUICIDAL_ENGLISH)
        || contains_any(&lower, SUICIDAL_URDU_HINDI)
        || contains_any(&lower, CONCERN_EXTRA_URDU_HINDI)
        || contains_any(&lower, HOPELESSNESS)
        || contains_any(&lower, CRISIS)
}

/// Detect consent to the previously offered interview referral.
pub fn is_referral_consent(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    contains_any(&lower, REFERRAL_CONSENT)
}

/// Detect weapon/method/location vocabulary indicating a specific plan.
pub fn mentions_specific_plan(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    contains_any(&lower, SPECIFIC_PLAN)
}

/// Detect a language preference from a message: an explicit named-language
/// mention first, then script/word-stem auto-detection for Urdu/Hindi.
///
/// Returns `None` when nothing matches; the caller keeps whatever language
/// the session already has.
pub fn detect_language(text: &str) -> Option<Language> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    if ["urdu", "اردو", "hindi", "हिंदी"].iter().any(|w| lower.contains(w)) {
        return Some(Language::UrduHindi);
    }
    if ["spanish", "español"].iter().any(|w| lower.contains(w)) {
        return Some(Language::Spanish);
    }
    if ["french", "français"].iter().any(|w| lower.contains(w)) {
        return Some(Language::French);
    }
    if ["arabic", "عربي"].iter().any(|w| lower.contains(w)) {
        return Some(Language::Arabic);
    }
    if lower.contains("english") {
        return Some(Language::English);
    }

    if URDU_HINDI_INDICATORS.iter().any(|w| text.contains(w)) {
        return Some(Language::UrduHindi);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suicidal_english() {
        assert!(is_suicidal("I want to kill myself"));
        assert!(is_suicidal("thinking about suicide lately"));
        assert!(!is_suicidal("I had a rough day at work"));
    }

    #[test]
    fn test_suicidal_romanized_urdu() {
        assert!(is_suicidal("me khud kushi karna chahta hun"));
        assert!(is_suicidal("mujhe mar jana hai"));
    }

    #[test]
    fn test_suicidal_case_insensitive() {
        assert!(is_suicidal("I WANT TO KILL MYSELF"));
        assert!(is_suicidal("SuIcIdE"));
    }

    #[test]
    fn test_suicidal_empty() {
        assert!(!is_suicidal(""));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let text = "I feel hopeless and can't go on";
        let first = is_mental_health_concern(text);
        let second = is_mental_health_concern(text);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_concern_superset_covers_suicidal() {
        // Everything the escalation list flags, the concern superset flags too.
        for kw in SUICIDAL_ENGLISH.iter().chain(SUICIDAL_URDU_HINDI) {
            assert!(is_mental_health_concern(kw), "superset misses '{kw}'");
        }
    }

    #[test]
    fn test_concern_hopelessness_and_crisis() {
        assert!(is_mental_health_concern("everything feels hopeless"));
        assert!(is_mental_health_concern("I'm having a panic attack"));
        assert!(!is_mental_health_concern("what a lovely morning"));
    }

    #[test]
    fn test_concern_drift_kisi() {
        // "kisi" is only in the concern superset, not the escalation list.
        assert!(is_mental_health_concern("kisi se baat karni hai"));
        assert!(!is_suicidal("kisi se baat karni hai"));
    }

    #[test]
    fn test_referral_consent() {
        assert!(is_referral_consent("yes please"));
        assert!(is_referral_consent("Okay, connect me"));
        assert!(!is_referral_consent("no thanks"));
    }

    #[test]
    fn test_specific_plan_vocabulary() {
        assert!(mentions_specific_plan("I will jump from the 8th floor"));
        assert!(mentions_specific_plan("I have pills with me"));
        assert!(!mentions_specific_plan("I feel very low today"));
    }

    #[test]
    fn test_detect_language_explicit_mention() {
        assert_eq!(detect_language("I speak Urdu"), Some(Language::UrduHindi));
        assert_eq!(detect_language("hablo español"), Some(Language::Spanish));
        assert_eq!(detect_language("je parle français"), Some(Language::French));
        assert_eq!(detect_language("I prefer English"), Some(Language::English));
    }

    #[test]
    fn test_detect_language_romanized_urdu() {
        assert_eq!(
            detect_language("mein theek hoon, aap kaise hain"),
            Some(Language::UrduHindi)
        );
    }

    #[test]
    fn test_detect_language_native_script() {
        assert_eq!(detect_language("میں ٹھیک ہوں"), Some(Language::UrduHindi));
        assert_eq!(detect_language("मैं ठीक हूँ"), Some(Language::UrduHindi));
    }

    #[test]
    fn test_detect_language_none() {
        assert_eq!(detect_language("good morning to you"), None);
        assert_eq!(detect_language(""), None);
    }
}
