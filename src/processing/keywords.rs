//! Term-frequency keyword ranking

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Portuguese function words. Tokens of two characters or fewer are dropped
/// before this list applies, so short words are not listed.
pub const PORTUGUESE_STOP_WORDS: &[&str] = &[
    "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "até", "com", "como", "contra",
    "das", "del", "dela", "delas", "dele", "deles", "depois", "dos", "ela", "elas", "ele",
    "eles", "entre", "era", "eram", "essa", "essas", "esse", "esses", "esta", "está", "estamos",
    "estão", "estar", "estas", "estava", "estavam", "este", "estes", "estou", "for", "foi",
    "foram", "forem", "fosse", "fossem", "fui", "isso", "isto", "lhe", "lhes",
    "mais", "mas", "mesmo", "meu", "meus", "minha", "minhas", "muito", "muitos", "nas", "nem",
    "nós", "nossa", "nossas", "nosso", "nossos", "num", "numa", "não", "nos", "para",
    "pela", "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "são", "seja",
    "sejam", "sem", "ser", "será", "serão", "seu", "seus", "sob", "sobre", "sua", "suas",
    "também", "tem", "têm", "temos", "tendo", "tenha", "ter", "teu", "teus", "tinha", "tinham",
    "tua", "tuas", "uma", "umas", "uns", "você", "vocês", "vos",
];

/// Minimum length a token must exceed to be counted.
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopKeyword {
    pub term: String,
    pub weight: f64,
}

/// Ranks terms by plain frequency over the filtered token stream.
pub struct KeywordRanker {
    punctuation_regex: Regex,
    stop_words: HashSet<String>,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRanker {
    pub fn new() -> Self {
        Self::with_stop_words(PORTUGUESE_STOP_WORDS.iter().copied())
    }

    pub fn with_stop_words<'a, I>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            punctuation_regex: Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"),
            stop_words: stop_words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Top `top_n` terms by `count / filtered token count`, heaviest first.
    /// Equal weights keep the order in which the terms first appeared.
    pub fn rank(&self, text: &str, top_n: usize) -> Vec<TopKeyword> {
        let lower = text.to_lowercase();
        let stripped = self.punctuation_regex.replace_all(&lower, " ");

        let tokens: Vec<&str> = stripped
            .split_whitespace()
            .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        if tokens.is_empty() {
            return Vec::new();
        }

        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &token in &tokens {
            let count = counts.entry(token).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        let total = tokens.len() as f64;
        let mut keywords: Vec<TopKeyword> = order
            .into_iter()
            .map(|term| TopKeyword {
                term: term.to_string(),
                weight: counts[term] as f64 / total,
            })
            .collect();

        // sort_by is stable
        keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        keywords.truncate(top_n);
        keywords
    }
}
