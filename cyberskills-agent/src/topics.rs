//! Fixed menu of topic shortcuts
//!
//! Topic prompts are system-originated, which is why the controller sends
//! them without the user-input checks. Only values of this closed enum can
//! take that path.

use std::fmt;
use std::str::FromStr;

/// A learning module the backend knows how to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Fundamentals,
    NetworkSecurity,
    CloudSecurity,
    IdentityAccess,
    SocThreatDetection,
    DigitalHygiene,
}

impl Topic {
    /// Every topic, in menu order
    pub const ALL: [Topic; 6] = [
        Topic::Fundamentals,
        Topic::NetworkSecurity,
        Topic::CloudSecurity,
        Topic::IdentityAccess,
        Topic::SocThreatDetection,
        Topic::DigitalHygiene,
    ];

    /// Name the backend matches on
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Fundamentals => "cybersecurity fundamentals",
            Topic::NetworkSecurity => "network security",
            Topic::CloudSecurity => "cloud security",
            Topic::IdentityAccess => "identity and access management",
            Topic::SocThreatDetection => "soc and threat detection",
            Topic::DigitalHygiene => "digital hygiene",
        }
    }

    /// Short name for command lines
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::Fundamentals => "fundamentals",
            Topic::NetworkSecurity => "network",
            Topic::CloudSecurity => "cloud",
            Topic::IdentityAccess => "iam",
            Topic::SocThreatDetection => "soc",
            Topic::DigitalHygiene => "hygiene",
        }
    }

    /// The message sent when the topic is picked
    pub fn prompt(&self) -> String {
        format!("start {}", self.label())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topic {
    type Err = String;

    /// Accepts a slug, the full label, or a 1-based menu number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Ok(n) = wanted.parse::<usize>() {
            if let Some(topic) = n.checked_sub(1).and_then(|i| Topic::ALL.get(i)) {
                return Ok(*topic);
            }
        }
        Topic::ALL
            .into_iter()
            .find(|t| t.slug() == wanted || t.label() == wanted)
            .ok_or_else(|| format!("unknown topic: {}", s.trim()))
    }
}
