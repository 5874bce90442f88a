//! Curated knowledge base.
//!
//! Loaded once at startup (built-in entries or a TOML knowledge pack) and
//! read-only afterwards.

mod builtin;

use crate::matcher::{PatternRule, PatternTable};
use crate::templates::DISCLAIMER;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("unknown symptom key: {0}")]
    UnknownKey(String),

    #[error("duplicate symptom key: {0}")]
    DuplicateKey(String),

    #[error("symptom entry #{0} has an empty key")]
    EmptyKey(usize),

    #[error("symptom '{0}' has an empty answer")]
    EmptyAnswer(String),

    #[error("failed to read knowledge pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse knowledge pack: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Structured advice for one curated symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub key: String,
    pub answer: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub remedies: Vec<String>,
}

impl SymptomEntry {
    /// Three-part HTML answer followed by the disclaimer
    pub fn render(&self) -> String {
        let mut html = format!("<strong>Direct Answer:</strong><br>{}<br><br>", self.answer);
        html.push_str("<strong>Actionable Tips:</strong><ul>");
        for tip in &self.tips {
            html.push_str(&format!("<li>{}</li>", tip));
        }
        html.push_str("</ul><strong>Home Remedies:</strong><ul>");
        for remedy in &self.remedies {
            html.push_str(&format!("<li>{}</li>", remedy));
        }
        html.push_str("</ul><br>");
        html.push_str(DISCLAIMER);
        html
    }
}

/// Immutable set of curated entries, in declaration order
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<SymptomEntry>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<SymptomEntry>) -> Result<Self, KnowledgeError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.key.trim().is_empty() {
                return Err(KnowledgeError::EmptyKey(i));
            }
            if entry.answer.trim().is_empty() {
                return Err(KnowledgeError::EmptyAnswer(entry.key.clone()));
            }
            if index.insert(entry.key.clone(), i).is_some() {
                return Err(KnowledgeError::DuplicateKey(entry.key.clone()));
            }
        }
        Ok(Self { entries, index })
    }

    /// The curated entries shipped with carebot
    pub fn builtin() -> Self {
        let entries: Vec<SymptomEntry> = builtin::ENTRIES
            .iter()
            .map(|e| SymptomEntry {
                key: e.key.to_string(),
                answer: e.answer.to_string(),
                tips: e.tips.iter().map(|s| s.to_string()).collect(),
                remedies: e.remedies.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, key: &str) -> Option<&SymptomEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Render the answer for a curated key
    pub fn render(&self, key: &str) -> Result<String, KnowledgeError> {
        self.get(key)
            .map(SymptomEntry::render)
            .ok_or_else(|| KnowledgeError::UnknownKey(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One `[[symptom]]` table of a knowledge pack
#[derive(Debug, Clone, Deserialize)]
struct PackEntry {
    #[serde(flatten)]
    entry: SymptomEntry,
    #[serde(default)]
    triggers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PackFile {
    #[serde(default)]
    symptom: Vec<PackEntry>,
}

/// Knowledge base plus the tier-1 table it ships with
#[derive(Debug, Clone)]
pub struct KnowledgePack {
    pub knowledge: KnowledgeBase,
    pub patterns: PatternTable,
}

impl KnowledgePack {
    pub fn builtin() -> Self {
        Self {
            knowledge: KnowledgeBase::builtin(),
            patterns: PatternTable::builtin(),
        }
    }

    /// Parse a TOML pack. Entry order becomes tier-1 precedence.
    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeError> {
        let file: PackFile = toml::from_str(content)?;

        let mut rules = Vec::new();
        let mut entries = Vec::with_capacity(file.symptom.len());
        for pack_entry in file.symptom {
            if !pack_entry.triggers.is_empty() {
                rules.push(PatternRule {
                    key: pack_entry.entry.key.clone(),
                    triggers: pack_entry
                        .triggers
                        .iter()
                        .map(|t| t.to_lowercase())
                        .collect(),
                });
            }
            entries.push(pack_entry.entry);
        }

        Ok(Self {
            knowledge: KnowledgeBase::new(entries)?,
            patterns: PatternTable::new(rules),
        })
    }

    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let content = fs::read_to_string(path)?;
        let pack = Self::from_toml_str(&content)?;
        info!(
            "Loaded knowledge pack from {} ({} entries, {} patterns)",
            path.display(),
            pack.knowledge.len(),
            pack.patterns.len()
        );
        Ok(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_pattern_table() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 12);
        for key in PatternTable::builtin().keys() {
            assert!(kb.contains(key), "missing entry for {}", key);
        }
    }

    #[test]
    fn test_render_structure() {
        let kb = KnowledgeBase::builtin();
        let html = kb.render("knee").unwrap();
        assert!(html.starts_with("<strong>Direct Answer:</strong><br>Knee pain"));
        assert!(html.contains("</ul><strong>Home Remedies:</strong><ul><li>R.I.C.E Method"));
        assert!(html.ends_with(DISCLAIMER));
        assert_eq!(html.matches("<li>").count(), 9);
    }

    #[test]
    fn test_render_exact_small_entry() {
        let entry = SymptomEntry {
            key: "x".into(),
            answer: "A.".into(),
            tips: vec!["t1".into()],
            remedies: vec!["r1".into(), "r2".into()],
        };
        assert_eq!(
            entry.render(),
            format!(
                "<strong>Direct Answer:</strong><br>A.<br><br><strong>Actionable Tips:</strong><ul><li>t1</li></ul><strong>Home Remedies:</strong><ul><li>r1</li><li>r2</li></ul><br>{}",
                DISCLAIMER
            )
        );
    }

    #[test]
    fn test_render_unknown_key() {
        let kb = KnowledgeBase::builtin();
        assert!(matches!(kb.render("wrist"), Err(KnowledgeError::UnknownKey(k)) if k == "wrist"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let entry = SymptomEntry {
            key: "cough".into(),
            answer: "a".into(),
            tips: vec![],
            remedies: vec![],
        };
        let err = KnowledgeBase::new(vec![entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateKey(_)));
    }

    #[test]
    fn test_pack_from_toml() {
        let pack = KnowledgePack::from_toml_str(
            r#"
[[symptom]]
key = "rash"
answer = "Rashes are usually harmless."
tips = ["Keep the area clean"]
remedies = ["Oatmeal bath"]
triggers = ["Rash", "hives"]

[[symptom]]
key = "hiccups"
answer = "Hiccups pass on their own."
"#,
        )
        .unwrap();

        assert_eq!(pack.knowledge.len(), 2);
        assert_eq!(pack.patterns.len(), 1);
        assert_eq!(pack.patterns.rules()[0].triggers, vec!["rash", "hives"]);
        assert!(pack.knowledge.get("hiccups").unwrap().tips.is_empty());
    }

    #[test]
    fn test_example_pack() {
        let pack =
            KnowledgePack::from_toml_str(include_str!("../../../../config/knowledge.example.toml"))
                .unwrap();
        let keys: Vec<&str> = pack.knowledge.keys().collect();
        assert_eq!(keys, vec!["sunburn", "hiccups"]);
        assert_eq!(
            pack.patterns.first_match("got a bad sun burn").map(|r| r.key.as_str()),
            Some("sunburn")
        );
    }

    #[test]
    fn test_pack_rejects_empty_key() {
        let err = KnowledgePack::from_toml_str(
            r#"
[[symptom]]
key = " "
answer = "x"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::EmptyKey(0)));
    }

    #[test]
    fn test_pack_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.toml");
        std::fs::write(
            &path,
            "[[symptom]]\nkey = \"burn\"\nanswer = \"Cool the burn.\"\ntriggers = [\"burn\"]\n",
        )
        .unwrap();

        let pack = KnowledgePack::load(&path).unwrap();
        assert!(pack.knowledge.contains("burn"));
    }

    #[test]
    fn test_pack_load_missing_file() {
        let err = KnowledgePack::load(Path::new("/nonexistent/carebot/pack.toml")).unwrap_err();
        assert!(matches!(err, KnowledgeError::Io(_)));
    }
}
