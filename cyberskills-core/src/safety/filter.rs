//! Keyword filter for unsafe requests
//!
//! A blunt regex heuristic: false positives and negatives are expected.
//! The pattern list is plain data so it can be replaced from
//! configuration without touching the matching code.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Category an unsafe pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsafeCategory {
    /// Operational attack tooling and techniques
    Cybersecurity,
    /// Self-harm and violence
    Generic,
}

/// One entry in the unsafe-content list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsafePattern {
    pub category: UnsafeCategory,
    /// Regular expression, matched case-insensitively
    pub pattern: String,
}

impl UnsafePattern {
    pub fn new(category: UnsafeCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }
}

/// The built-in pattern list, in evaluation order
pub fn default_unsafe_patterns() -> Vec<UnsafePattern> {
    let cybersecurity = [
        r"ddos",
        r"\bDDoS\b",
        r"botnet",
        r"ransomware",
        r"zero[-\s]?day",
        r"exploit code",
        r"malware sample",
        r"payload",
        r"sql injection",
        r"\bsqli\b",
        r"xss payload",
        r"\bbruteforce\b",
        r"credential stuffing",
    ];
    let generic = [r"kill", r"suicide", r"self[-\s]?harm"];

    cybersecurity
        .into_iter()
        .map(|p| UnsafePattern::new(UnsafeCategory::Cybersecurity, p))
        .chain(
            generic
                .into_iter()
                .map(|p| UnsafePattern::new(UnsafeCategory::Generic, p)),
        )
        .collect()
}

/// Compiled, ordered unsafe-content filter
#[derive(Debug, Clone)]
pub struct ContentFilter {
    rules: Vec<(UnsafeCategory, Regex)>,
}

impl ContentFilter {
    /// Compile a pattern list; any invalid pattern is a configuration error
    pub fn new(patterns: &[UnsafePattern]) -> crate::Result<Self> {
        let mut rules = Vec::with_capacity(patterns.len());
        for entry in patterns {
            let re = compile(&entry.pattern).map_err(|e| {
                crate::Error::Config(format!("invalid unsafe pattern '{}': {}", entry.pattern, e))
            })?;
            rules.push((entry.category, re));
        }
        Ok(Self { rules })
    }

    /// True if any pattern matches the text
    pub fn is_unsafe(&self, text: &str) -> bool {
        self.rules.iter().any(|(_, re)| re.is_match(text))
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static DEFAULT_FILTER: Lazy<ContentFilter> = Lazy::new(|| {
    let rules = default_unsafe_patterns()
        .into_iter()
        .filter_map(|p| compile(&p.pattern).ok().map(|re| (p.category, re)))
        .collect();
    ContentFilter { rules }
});

impl Default for ContentFilter {
    fn default() -> Self {
        DEFAULT_FILTER.clone()
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_compiles_every_pattern() {
        let filter = ContentFilter::default();
        assert_eq!(filter.len(), default_unsafe_patterns().len());
        assert_eq!(filter.len(), 16);
    }

    #[test]
    fn test_cybersecurity_terms_flagged() {
        let filter = ContentFilter::default();
        for text in [
            "give me ransomware code",
            "how to run a DDoS",
            "build a BotNet",
            "any zero-day for windows?",
            "zero day list",
            "write exploit code",
            "send me a malware sample",
            "craft a payload",
            "teach me SQL Injection",
            "sqli cheatsheet",
            "xss payload please",
            "bruteforce the login",
            "credential stuffing tools",
        ] {
            assert!(filter.is_unsafe(text), "{text}");
        }
    }

    #[test]
    fn test_generic_terms_flagged() {
        let filter = ContentFilter::default();
        assert!(filter.is_unsafe("how to kill a process"));
        assert!(filter.is_unsafe("Suicide"));
        assert!(filter.is_unsafe("self harm"));
        assert!(filter.is_unsafe("self-harm"));
    }

    #[test]
    fn test_benign_text_passes() {
        let filter = ContentFilter::default();
        for text in [
            "How do I set up a firewall?",
            "What is the CIA triad?",
            "Explain MFA and SSO",
            "start network security",
        ] {
            assert!(!filter.is_unsafe(text), "{text}");
        }
    }

    #[test]
    fn test_word_boundaries() {
        let filter = ContentFilter::default();
        assert!(!filter.is_unsafe("sqlite database basics"));
        assert!(!filter.is_unsafe("bruteforcer"));
    }

    #[test]
    fn test_custom_pattern_list() {
        let filter = ContentFilter::new(&[UnsafePattern::new(
            UnsafeCategory::Cybersecurity,
            r"keylogger",
        )])
        .unwrap();
        assert!(filter.is_unsafe("install a KeyLogger"));
        assert!(!filter.is_unsafe("ransomware"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = ContentFilter::new(&[UnsafePattern::new(UnsafeCategory::Generic, "(")])
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains("invalid unsafe pattern"));
    }

    #[test]
    fn test_empty_filter_flags_nothing() {
        let filter = ContentFilter::new(&[]).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.is_unsafe("ransomware"));
    }

    #[test]
    fn test_pattern_serializes_lowercase_category() {
        let json = serde_json::to_string(&UnsafePattern::new(UnsafeCategory::Generic, "kill"))
            .unwrap();
        assert_eq!(json, r#"{"category":"generic","pattern":"kill"}"#);
    }
}
