//! Skill vocabulary: alias to canonical mapping and its load/reload lifecycle

use crate::error::{JobFitError, Result};
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BUILTIN_VOCABULARY: &str = include_str!("skills.toml");

/// One canonical skill and the raw phrases that mean it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(default, rename = "skill")]
    skills: Vec<SkillEntry>,
}

/// Lower-cased alias → canonical name. Every canonical also maps to itself.
///
/// Keys are stored as phrases: split on whitespace, commas and slashes and
/// joined by single spaces, the same way skill text is tokenized.
#[derive(Debug, Clone, Default)]
pub struct SkillVocabulary {
    aliases: HashMap<String, String>,
    canonical_count: usize,
    longest_phrase: usize,
}

impl SkillVocabulary {
    pub fn from_entries(entries: &[SkillEntry]) -> Self {
        let mut aliases = HashMap::new();
        let mut canonical_count = 0;

        for entry in entries {
            let canonical = entry.canonical.trim().to_lowercase();
            if canonical.is_empty() {
                continue;
            }
            canonical_count += 1;

            aliases.insert(phrase_key(&canonical), canonical.clone());
            for alias in &entry.aliases {
                let alias = phrase_key(alias);
                if !alias.is_empty() {
                    aliases.entry(alias).or_insert_with(|| canonical.clone());
                }
            }
        }

        let longest_phrase = aliases
            .keys()
            .map(|key| key.split(' ').count())
            .max()
            .unwrap_or(0);

        Self {
            aliases,
            canonical_count,
            longest_phrase,
        }
    }

    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.aliases.get(&phrase_key(phrase)).map(String::as_str)
    }

    /// Word count of the longest alias.
    pub fn longest_phrase(&self) -> usize {
        self.longest_phrase
    }

    /// Number of alias keys, canonical self-mappings included.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn canonical_count(&self) -> usize {
        self.canonical_count
    }

    /// Aliases grouped under their canonical name, sorted for display.
    pub fn grouped(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: HashMap<&str, Vec<String>> = HashMap::new();
        for (alias, canonical) in &self.aliases {
            let group = groups.entry(canonical.as_str()).or_default();
            if alias != canonical {
                group.push(alias.clone());
            }
        }

        let mut grouped: Vec<(String, Vec<String>)> = groups
            .into_iter()
            .map(|(canonical, mut aliases)| {
                aliases.sort();
                (canonical.to_string(), aliases)
            })
            .collect();
        grouped.sort_by(|a, b| a.0.cmp(&b.0));
        grouped
    }
}

/// Where the vocabulary comes from. Implementations may block.
pub trait VocabularySource: Send + Sync {
    fn fetch(&self) -> Result<Vec<SkillEntry>>;

    fn describe(&self) -> String;
}

/// The table compiled into the binary.
pub struct BuiltinVocabulary;

impl VocabularySource for BuiltinVocabulary {
    fn fetch(&self) -> Result<Vec<SkillEntry>> {
        parse_vocabulary(BUILTIN_VOCABULARY)
    }

    fn describe(&self) -> String {
        "built-in vocabulary".to_string()
    }
}

/// A user supplied TOML file with `[[skill]]` tables.
pub struct TomlFileVocabulary {
    path: PathBuf,
}

impl TomlFileVocabulary {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl VocabularySource for TomlFileVocabulary {
    fn fetch(&self) -> Result<Vec<SkillEntry>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            JobFitError::Vocabulary(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        parse_vocabulary(&content)
    }

    fn describe(&self) -> String {
        format!("vocabulary file {}", self.path.display())
    }
}

fn phrase_key(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_vocabulary(content: &str) -> Result<Vec<SkillEntry>> {
    let file: VocabularyFile = toml::from_str(content)
        .map_err(|e| JobFitError::Vocabulary(format!("Failed to parse vocabulary: {}", e)))?;
    Ok(file.skills)
}

/// Process-wide holder for the vocabulary.
///
/// The source is read once on first use and shared read-only afterwards;
/// [`VocabularyStore::reload`] is the only way to replace it. A failed or
/// empty fetch leaves the store without a vocabulary, which callers treat as
/// "no normalization available".
pub struct VocabularyStore {
    source: Box<dyn VocabularySource>,
    current: RwLock<Option<Option<Arc<SkillVocabulary>>>>,
}

impl VocabularyStore {
    pub fn new(source: Box<dyn VocabularySource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    pub fn builtin() -> Self {
        Self::new(Box::new(BuiltinVocabulary))
    }

    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(Box::new(TomlFileVocabulary::new(path))),
            None => Self::builtin(),
        }
    }

    /// The loaded vocabulary, fetching it on first call.
    pub fn load(&self) -> Option<Arc<SkillVocabulary>> {
        if let Some(loaded) = self.current.read().as_ref() {
            return loaded.clone();
        }

        let mut guard = self.current.write();
        // another caller may have loaded it while we waited for the lock
        if let Some(loaded) = guard.as_ref() {
            return loaded.clone();
        }

        let loaded = self.fetch();
        *guard = Some(loaded.clone());
        loaded
    }

    /// Re-read the source and swap the shared vocabulary.
    pub fn reload(&self) -> Option<Arc<SkillVocabulary>> {
        let loaded = self.fetch();
        *self.current.write() = Some(loaded.clone());
        loaded
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn fetch(&self) -> Option<Arc<SkillVocabulary>> {
        debug!("Loading skill vocabulary from {}", self.source.describe());

        match self.source.fetch() {
            Ok(entries) => {
                let vocabulary = SkillVocabulary::from_entries(&entries);
                if vocabulary.is_empty() {
                    warn!(
                        "{} is empty, using fallback skill list",
                        self.source.describe()
                    );
                    None
                } else {
                    info!(
                        "Loaded {} skills ({} aliases) from {}",
                        vocabulary.canonical_count(),
                        vocabulary.len(),
                        self.source.describe()
                    );
                    Some(Arc::new(vocabulary))
                }
            }
            Err(e) => {
                warn!("Skill vocabulary unavailable, using fallback skill list: {}", e);
                None
            }
        }
    }
}
