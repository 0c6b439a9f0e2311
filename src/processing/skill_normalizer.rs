//! Skill canonicalization against the alias vocabulary

use crate::error::{JobFitError, Result};
use crate::processing::vocabulary::SkillVocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DICTIONARY_CONFIDENCE: f32 = 1.0;
pub const FALLBACK_CONFIDENCE: f32 = 0.8;

/// Shorter tokens never reach the vocabulary.
const MIN_TOKEN_CHARS: usize = 2;

/// Well-known technology terms used when no vocabulary is loaded: (term, canonical).
const FALLBACK_SKILLS: &[(&str, &str)] = &[
    ("javascript", "javascript"),
    ("typescript", "typescript"),
    ("python", "python"),
    ("java", "java"),
    ("c#", "csharp"),
    (".net", "dotnet"),
    ("golang", "go"),
    ("rust", "rust"),
    ("php", "php"),
    ("ruby", "ruby"),
    ("kotlin", "kotlin"),
    ("swift", "swift"),
    ("scala", "scala"),
    ("react", "react"),
    ("angular", "angular"),
    ("vue", "vue"),
    ("next.js", "nextjs"),
    ("node.js", "nodejs"),
    ("nodejs", "nodejs"),
    ("node", "nodejs"),
    ("express", "express"),
    ("nestjs", "nestjs"),
    ("django", "django"),
    ("flask", "flask"),
    ("fastapi", "fastapi"),
    ("spring boot", "spring"),
    ("spring", "spring"),
    ("laravel", "laravel"),
    ("html", "html"),
    ("css", "css"),
    ("sql", "sql"),
    ("postgresql", "postgresql"),
    ("postgres", "postgresql"),
    ("mysql", "mysql"),
    ("sql server", "sqlserver"),
    ("oracle", "oracle"),
    ("mongodb", "mongodb"),
    ("redis", "redis"),
    ("elasticsearch", "elasticsearch"),
    ("graphql", "graphql"),
    ("git", "git"),
    ("github", "git"),
    ("gitlab", "git"),
    ("docker", "docker"),
    ("kubernetes", "kubernetes"),
    ("k8s", "kubernetes"),
    ("aws", "aws"),
    ("azure", "azure"),
    ("gcp", "gcp"),
    ("terraform", "terraform"),
    ("jenkins", "jenkins"),
    ("ci/cd", "cicd"),
    ("linux", "linux"),
    ("windows", "windows"),
    ("kafka", "kafka"),
    ("rabbitmq", "rabbitmq"),
    ("scrum", "scrum"),
    ("excel", "excel"),
    ("power bi", "powerbi"),
    ("powerbi", "powerbi"),
    ("figma", "figma"),
];

/// A vocabulary hit inside a source fragment.
///
/// Dictionary hits carry fragment-level offsets (`0..fragment length`) and the
/// whole fragment as `origin`; fallback hits carry the character span of the
/// matched term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub canonical: String,
    pub origin: String,
    pub offset_start: usize,
    pub offset_end: usize,
    pub confidence: f32,
}

pub struct SkillNormalizer {
    token_split_regex: Regex,
    non_word_regex: Regex,
    fallback_matcher: AhoCorasick,
}

impl SkillNormalizer {
    pub fn new() -> Result<Self> {
        let token_split_regex = Regex::new(r"[\s,/]+").expect("Invalid token split regex");
        let non_word_regex = Regex::new(r"\W").expect("Invalid non-word regex");

        let patterns: Vec<&str> = FALLBACK_SKILLS.iter().map(|(term, _)| *term).collect();
        let fallback_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                JobFitError::Vocabulary(format!("Failed to build fallback skill matcher: {}", e))
            })?;

        Ok(Self {
            token_split_regex,
            non_word_regex,
            fallback_matcher,
        })
    }

    /// Canonicalize the skills mentioned in `texts`, one entry per canonical
    /// name, in order of first appearance.
    pub fn normalize<'a, I>(&self, texts: I, vocabulary: Option<&SkillVocabulary>) -> Vec<ExtractedSkill>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for text in texts {
            let found = match vocabulary {
                Some(vocabulary) => self.dictionary_matches(text, vocabulary),
                None => self.fallback_matches(text),
            };

            for skill in found {
                if seen.insert(skill.canonical.clone()) {
                    skills.push(skill);
                }
            }
        }

        skills
    }

    /// Greedy longest-phrase lookup over the fragment's tokens. Each window
    /// is tried as written first (`c#`, `node.js`) and then with non-word
    /// characters removed.
    fn dictionary_matches(&self, text: &str, vocabulary: &SkillVocabulary) -> Vec<ExtractedSkill> {
        let lower = text.to_lowercase();
        let fragment_length = text.chars().count();

        let tokens: Vec<(&str, String)> = self
            .token_split_regex
            .split(&lower)
            .filter(|token| !token.is_empty())
            .map(|token| (token, self.non_word_regex.replace_all(token, "").into_owned()))
            .collect();

        let longest = vocabulary.longest_phrase().max(1);
        let mut skills = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let widest = longest.min(tokens.len() - start);
            let hit = (1..=widest).rev().find_map(|width| {
                lookup_window(&tokens[start..start + width], vocabulary).map(|c| (c, width))
            });

            match hit {
                Some((canonical, width)) => {
                    skills.push(ExtractedSkill {
                        canonical: canonical.to_string(),
                        origin: text.to_string(),
                        offset_start: 0,
                        offset_end: fragment_length,
                        confidence: DICTIONARY_CONFIDENCE,
                    });
                    start += width;
                }
                None => start += 1,
            }
        }

        skills
    }

    fn fallback_matches(&self, text: &str) -> Vec<ExtractedSkill> {
        self.fallback_matcher
            .find_iter(text)
            .filter(|mat| is_word_bounded(text, mat.start(), mat.end()))
            .map(|mat| {
                let offset_start = text[..mat.start()].chars().count();
                let offset_end = offset_start + text[mat.start()..mat.end()].chars().count();
                ExtractedSkill {
                    canonical: FALLBACK_SKILLS[mat.pattern().as_usize()].1.to_string(),
                    origin: text.to_string(),
                    offset_start,
                    offset_end,
                    confidence: FALLBACK_CONFIDENCE,
                }
            })
            .collect()
    }
}

fn lookup_window<'v>(window: &[(&str, String)], vocabulary: &'v SkillVocabulary) -> Option<&'v str> {
    let raw = window.iter().map(|(raw, _)| *raw).collect::<Vec<_>>().join(" ");
    if raw.chars().count() >= MIN_TOKEN_CHARS {
        if let Some(canonical) = vocabulary.lookup(&raw) {
            return Some(canonical);
        }
    }

    if window.iter().any(|(_, bare)| bare.is_empty()) {
        return None;
    }
    let bare = window.iter().map(|(_, bare)| bare.as_str()).collect::<Vec<_>>().join(" ");
    if bare.chars().count() >= MIN_TOKEN_CHARS {
        vocabulary.lookup(&bare)
    } else {
        None
    }
}

/// True when the match is not glued to surrounding letters or digits.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
