//! Name variation rules
//!
//! Every rule is a plain string transformation of the base name, so the
//! same input and config always produce the same candidates.

use crate::config::VariationConfig;
use crate::types::{VariationPattern, VariationSet};
use regex::Regex;

/// One or more consonants followed by one or more vowels
const SYLLABLE_PATTERN: &str = r"(?i)[^aeiou]+[aeiou]+";

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch.to_ascii_lowercase())
}

/// Candidate base names for every pattern; disabled patterns map to an empty list
pub fn generate_variations(base: &str, config: &VariationConfig) -> VariationSet {
    VariationPattern::ALL
        .iter()
        .map(|&pattern| {
            let candidates = if config.is_enabled(pattern) {
                match pattern {
                    VariationPattern::Hyphenated => hyphenated(base),
                    VariationPattern::Abbreviated => abbreviated(base).into_iter().collect(),
                    VariationPattern::Prefix => prefixed(base, &config.prefixes),
                    VariationPattern::Suffix => suffixed(base, &config.suffixes),
                    VariationPattern::Numbers => numbered(base, config.max_numbers),
                }
            } else {
                Vec::new()
            };
            (pattern, candidates)
        })
        .collect()
}

/// camelCase split plus a syllable split, both lowercased
fn hyphenated(base: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    let mut split = String::with_capacity(base.len() + 4);
    let mut prev: Option<char> = None;
    for ch in base.chars() {
        if matches!(prev, Some(p) if p.is_ascii_lowercase()) && ch.is_ascii_uppercase() {
            split.push('-');
        }
        split.push(ch);
        prev = Some(ch);
    }
    let split = split.to_lowercase();
    if split != base && !split.contains("--") {
        candidates.push(split);
    }

    let chunks = syllable_chunks(base);
    if chunks.len() >= 2 {
        let joined = chunks.join("-").to_lowercase();
        if !joined.contains("--") {
            candidates.push(joined);
        }
    }

    candidates
}

/// Non-overlapping consonant run + vowel run matches.
///
/// A leading vowel run and trailing consonants belong to no chunk.
fn syllable_chunks(base: &str) -> Vec<&str> {
    match Regex::new(SYLLABLE_PATTERN) {
        Ok(re) => re.find_iter(base).map(|m| m.as_str()).collect(),
        Err(_) => Vec::new(),
    }
}

fn abbreviated(base: &str) -> Option<String> {
    let stripped: String = base.chars().filter(|c| !is_vowel(*c)).collect();
    if stripped.chars().count() >= 3 && stripped != base {
        Some(stripped)
    } else {
        None
    }
}

fn prefixed(base: &str, prefixes: &[String]) -> Vec<String> {
    prefixes
        .iter()
        .flat_map(|p| [format!("{}-{}", p, base), format!("{}{}", p, base)])
        .collect()
}

fn suffixed(base: &str, suffixes: &[String]) -> Vec<String> {
    suffixes
        .iter()
        .flat_map(|s| [format!("{}-{}", base, s), format!("{}{}", base, s)])
        .collect()
}

fn numbered(base: &str, max_numbers: u32) -> Vec<String> {
    (2..=max_numbers.saturating_add(1))
        .map(|n| format!("{}{}", base, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(patterns: &[VariationPattern]) -> VariationConfig {
        VariationConfig {
            patterns: patterns.iter().map(|p| p.as_str().to_string()).collect(),
            ..VariationConfig::default()
        }
    }

    #[test]
    fn test_numbers() {
        let config = VariationConfig {
            max_numbers: 3,
            ..config_with(&[VariationPattern::Numbers])
        };
        let set = generate_variations("foo", &config);
        assert_eq!(set[&VariationPattern::Numbers], vec!["foo2", "foo3", "foo4"]);

        let config = VariationConfig {
            max_numbers: 0,
            ..config
        };
        assert!(generate_variations("foo", &config)[&VariationPattern::Numbers].is_empty());
    }

    #[test]
    fn test_prefixes_in_order() {
        let config = VariationConfig {
            prefixes: vec!["get".to_string(), "my".to_string()],
            ..config_with(&[VariationPattern::Prefix])
        };
        let set = generate_variations("app", &config);
        assert_eq!(
            set[&VariationPattern::Prefix],
            vec!["get-app", "getapp", "my-app", "myapp"]
        );
    }

    #[test]
    fn test_suffixes_in_order() {
        let config = VariationConfig {
            suffixes: vec!["hq".to_string(), "ly".to_string()],
            ..config_with(&[VariationPattern::Suffix])
        };
        let set = generate_variations("app", &config);
        assert_eq!(
            set[&VariationPattern::Suffix],
            vec!["app-hq", "apphq", "app-ly", "apply"]
        );
    }

    #[test]
    fn test_disabled_patterns_are_empty() {
        let set = generate_variations("example", &config_with(&[VariationPattern::Numbers]));

        assert_eq!(set.len(), VariationPattern::ALL.len());
        for pattern in VariationPattern::ALL {
            if pattern != VariationPattern::Numbers {
                assert!(set[&pattern].is_empty(), "{pattern} should be empty");
            }
        }
    }

    #[test]
    fn test_abbreviation() {
        let config = config_with(&[VariationPattern::Abbreviated]);

        assert_eq!(generate_variations("example", &config)[&VariationPattern::Abbreviated], vec!["xmpl"]);
        assert_eq!(generate_variations("ExAmple", &config)[&VariationPattern::Abbreviated], vec!["xmpl"]);
        // too short once stripped
        assert!(generate_variations("audio", &config)[&VariationPattern::Abbreviated].is_empty());
        // nothing to strip
        assert!(generate_variations("rhythm", &config)[&VariationPattern::Abbreviated].is_empty());
    }

    #[test]
    fn test_abbreviation_has_no_vowels() {
        let config = config_with(&[VariationPattern::Abbreviated]);
        for base in ["domainforge", "Banana", "queueing", "cloudstack", "ai"] {
            for candidate in &generate_variations(base, &config)[&VariationPattern::Abbreviated] {
                assert!(candidate.chars().count() >= 3);
                assert!(!candidate.chars().any(is_vowel), "{candidate} has a vowel");
            }
        }
    }

    #[test]
    fn test_hyphenation_camel_case() {
        let config = config_with(&[VariationPattern::Hyphenated]);
        let set = generate_variations("myApp", &config);
        assert_eq!(set[&VariationPattern::Hyphenated], vec!["my-app"]);

        let set = generate_variations("CloudStack", &config);
        assert_eq!(set[&VariationPattern::Hyphenated], vec!["cloud-stack", "clou-dsta"]);
    }

    #[test]
    fn test_hyphenation_keeps_lowercased_name() {
        let config = config_with(&[VariationPattern::Hyphenated]);

        // lowercasing alone is a change
        assert_eq!(
            generate_variations("Example", &config)[&VariationPattern::Hyphenated],
            vec!["example", "xa-mple"]
        );
        // already lowercase and nothing inserted
        assert_eq!(
            generate_variations("example", &config)[&VariationPattern::Hyphenated],
            vec!["xa-mple"]
        );
    }

    #[test]
    fn test_hyphenation_syllables() {
        let config = config_with(&[VariationPattern::Hyphenated]);

        assert_eq!(
            generate_variations("domainforge", &config)[&VariationPattern::Hyphenated],
            vec!["do-mai-nfo-rge"]
        );
        // leading vowels and trailing consonants fall outside every chunk
        assert_eq!(
            generate_variations("banana", &config)[&VariationPattern::Hyphenated],
            vec!["ba-na-na"]
        );
        assert_eq!(
            generate_variations("startup", &config)[&VariationPattern::Hyphenated],
            vec!["sta-rtu"]
        );
        // a single chunk is not split
        assert!(generate_variations("apple", &config)[&VariationPattern::Hyphenated].is_empty());
        assert!(generate_variations("foo", &config)[&VariationPattern::Hyphenated].is_empty());
        assert!(generate_variations("bcd", &config)[&VariationPattern::Hyphenated].is_empty());
    }

    #[test]
    fn test_syllable_chunks() {
        assert_eq!(syllable_chunks("example"), vec!["xa", "mple"]);
        assert_eq!(syllable_chunks("CloudStack"), vec!["Clou", "dSta"]);
        assert_eq!(syllable_chunks("apple"), vec!["pple"]);
        assert!(syllable_chunks("rhythm").is_empty());
    }

    #[test]
    fn test_hyphenation_is_lowercase_without_double_hyphens() {
        let config = config_with(&[VariationPattern::Hyphenated]);
        for base in ["CloudStack", "my-app", "getItDone", "a-Bc", "ExampleHQ"] {
            for candidate in &generate_variations(base, &config)[&VariationPattern::Hyphenated] {
                assert!(!candidate.contains("--"), "{candidate} from {base}");
                assert_eq!(candidate, &candidate.to_lowercase());
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = VariationConfig::default();
        for base in ["example", "myApp", "domainforge"] {
            assert_eq!(generate_variations(base, &config), generate_variations(base, &config));
        }
    }

    #[test]
    fn test_duplicates_are_kept() {
        let config = VariationConfig {
            prefixes: vec!["go".to_string(), "go".to_string()],
            ..config_with(&[VariationPattern::Prefix])
        };
        let set = generate_variations("app", &config);
        assert_eq!(set[&VariationPattern::Prefix].len(), 4);
    }
}
