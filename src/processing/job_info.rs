//! Structured attribute extraction from job posting text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_INFORMED: &str = "Not informed";
pub const DEFAULT_CURRENCY: &str = "BRL";

const KNOWN_CITIES: &[&str] = &[
    "são paulo",
    "rio de janeiro",
    "belo horizonte",
    "brasília",
    "salvador",
    "fortaleza",
    "curitiba",
    "recife",
    "porto alegre",
];

const ROLE_WORDS: &[&str] = &[
    "desenvolvedor",
    "developer",
    "analista",
    "analyst",
    "gerente",
    "manager",
    "coordenador",
    "coordinator",
    "especialista",
    "specialist",
    "consultor",
    "consultant",
    "engenheiro",
    "engineer",
    "arquiteto",
    "architect",
    "designer",
    "product",
    "tech",
    "senior",
    "junior",
    "pleno",
    "mid-level",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "superior",
    "graduação",
    "bacharelado",
    "licenciatura",
    "tecnólogo",
    "pós-graduação",
    "mestrado",
    "doutorado",
    "mba",
    "ensino médio",
    "técnico",
    "bachelor",
    "degree",
    "master",
];

const UNTITLED_POSITION: &str = "Untitled position";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkModel {
    Remote,
    #[serde(rename = "On-site")]
    OnSite,
    Hybrid,
    #[default]
    #[serde(rename = "Not informed")]
    NotInformed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "CLT")]
    Clt,
    #[serde(rename = "PJ")]
    Pj,
    Internship,
    Temporary,
    #[default]
    #[serde(rename = "Not informed")]
    NotInformed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    #[default]
    Monthly,
    Annual,
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    Portuguese,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: String,
    pub period: SalaryPeriod,
}

impl Default for Salary {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: DEFAULT_CURRENCY.to_string(),
            period: SalaryPeriod::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub title: String,
    pub work_model: WorkModel,
    pub employment_type: EmploymentType,
    pub salary: Salary,
    pub location: String,
    pub education: String,
    pub languages: Vec<Language>,
}

impl Default for JobInfo {
    fn default() -> Self {
        Self {
            title: UNTITLED_POSITION.to_string(),
            work_model: WorkModel::NotInformed,
            employment_type: EmploymentType::NotInformed,
            salary: Salary::default(),
            location: NOT_INFORMED.to_string(),
            education: NOT_INFORMED.to_string(),
            languages: vec![Language::Portuguese],
        }
    }
}

/// Pattern rules over the full normalized job text. Every field is optional;
/// salary parsing uses the first figure in document order.
pub struct AttributeExtractor {
    remote_regex: Regex,
    on_site_regex: Regex,
    hybrid_regex: Regex,
    clt_regex: Regex,
    pj_regex: Regex,
    internship_regex: Regex,
    temporary_regex: Regex,
    salary_regex: Regex,
    annual_regex: Regex,
    hourly_regex: Regex,
    location_regex: Regex,
    english_regex: Regex,
    spanish_regex: Regex,
}

impl Default for AttributeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeExtractor {
    pub fn new() -> Self {
        let pattern = |p: &str| Regex::new(p).expect("Invalid job attribute regex");

        Self {
            remote_regex: pattern(r"(?i)\b(remoto|remote|home\s?office|trabalho\s?remoto)\b"),
            on_site_regex: pattern(r"(?i)\b(presencial|escritório|on-?site)\b"),
            hybrid_regex: pattern(r"(?i)\b(híbrido|hybrid|flexível|flexible|misto)\b"),
            clt_regex: pattern(r"(?i)\bclt\b"),
            pj_regex: pattern(r"(?i)\b(pj|pessoa\s?jurídica|freelancer)\b"),
            internship_regex: pattern(r"(?i)\b(estágio|estagiário|internship)\b"),
            temporary_regex: pattern(r"(?i)\b(temporário|contrato\s?temporário|temporary)\b"),
            salary_regex: pattern(
                r"(?i)r\$\s?([0-9]{1,3}(?:\.[0-9]{3})*(?:,[0-9]{2})?)\s?(?:a|até)?\s?r?\$?\s?([0-9]{1,3}(?:\.[0-9]{3})*(?:,[0-9]{2})?)?",
            ),
            annual_regex: pattern(r"(?i)\b(anual|ano|annual|yearly)\b"),
            hourly_regex: pattern(r"(?i)\b(hora|horário|hourly)\b"),
            location_regex: pattern(
                r"(?i)(?:localização|local|cidade|região|location|city|region):\s*([^.\n]+)",
            ),
            english_regex: pattern(r"(?i)\b(inglês|english)\b"),
            spanish_regex: pattern(r"(?i)\b(espanhol|spanish)\b"),
        }
    }

    pub fn extract(&self, text: &str) -> JobInfo {
        JobInfo {
            title: extract_title(text),
            work_model: self.work_model(text),
            employment_type: self.employment_type(text),
            salary: self.salary(text),
            location: self.location(text),
            education: extract_education(text),
            languages: self.languages(text),
        }
    }

    pub fn work_model(&self, text: &str) -> WorkModel {
        if self.remote_regex.is_match(text) {
            WorkModel::Remote
        } else if self.on_site_regex.is_match(text) {
            WorkModel::OnSite
        } else if self.hybrid_regex.is_match(text) {
            WorkModel::Hybrid
        } else {
            WorkModel::NotInformed
        }
    }

    pub fn employment_type(&self, text: &str) -> EmploymentType {
        if self.clt_regex.is_match(text) {
            EmploymentType::Clt
        } else if self.pj_regex.is_match(text) {
            EmploymentType::Pj
        } else if self.internship_regex.is_match(text) {
            EmploymentType::Internship
        } else if self.temporary_regex.is_match(text) {
            EmploymentType::Temporary
        } else {
            EmploymentType::NotInformed
        }
    }

    /// Parse the first currency figure (or range) in the text. The period is
    /// only looked up when a figure was found.
    pub fn salary(&self, text: &str) -> Salary {
        let mut salary = Salary::default();

        let Some(caps) = self.salary_regex.captures(text) else {
            return salary;
        };

        salary.min = caps.get(1).and_then(|m| parse_amount(m.as_str()));
        salary.max = caps.get(2).and_then(|m| parse_amount(m.as_str()));

        if self.annual_regex.is_match(text) {
            salary.period = SalaryPeriod::Annual;
        } else if self.hourly_regex.is_match(text) {
            salary.period = SalaryPeriod::Hourly;
        }

        salary
    }

    /// An explicit `location:` style label wins over the city gazetteer.
    pub fn location(&self, text: &str) -> String {
        if let Some(caps) = self.location_regex.captures(text) {
            if let Some(value) = caps.get(1) {
                return value.as_str().trim().to_string();
            }
        }

        let lower = text.to_lowercase();
        KNOWN_CITIES
            .iter()
            .find(|city| lower.contains(*city))
            .map(|city| title_case(city))
            .unwrap_or_else(|| NOT_INFORMED.to_string())
    }

    pub fn languages(&self, text: &str) -> Vec<Language> {
        let mut languages = vec![Language::Portuguese];
        if self.english_regex.is_match(text) {
            languages.push(Language::English);
        }
        if self.spanish_regex.is_match(text) {
            languages.push(Language::Spanish);
        }
        languages
    }
}

/// First of the opening ten lines that looks like a role name, else the first line.
pub fn extract_title(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for line in lines.iter().take(10) {
        let length = line.chars().count();
        if length > 10 && length < 100 {
            let lower = line.to_lowercase();
            if ROLE_WORDS.iter().any(|word| lower.contains(word)) {
                return line.to_string();
            }
        }
    }

    lines
        .first()
        .map(|line| line.to_string())
        .unwrap_or_else(|| UNTITLED_POSITION.to_string())
}

/// First sentence or line mentioning a schooling level.
pub fn extract_education(text: &str) -> String {
    text.split(['.', '!', '?', '\n'])
        .find(|sentence| {
            let lower = sentence.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .map(|sentence| sentence.trim().trim_start_matches(['-', '•', '*']).trim().to_string())
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}

/// `1.234,56` → `1234.56`
fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace('.', "").replace(',', ".").parse().ok()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for WorkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkModel::Remote => write!(f, "Remote"),
            WorkModel::OnSite => write!(f, "On-site"),
            WorkModel::Hybrid => write!(f, "Hybrid"),
            WorkModel::NotInformed => write!(f, "{}", NOT_INFORMED),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::Clt => write!(f, "CLT"),
            EmploymentType::Pj => write!(f, "PJ"),
            EmploymentType::Internship => write!(f, "Internship"),
            EmploymentType::Temporary => write!(f, "Temporary"),
            EmploymentType::NotInformed => write!(f, "{}", NOT_INFORMED),
        }
    }
}

impl fmt::Display for SalaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryPeriod::Monthly => write!(f, "monthly"),
            SalaryPeriod::Annual => write!(f, "annual"),
            SalaryPeriod::Hourly => write!(f, "hourly"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Portuguese => write!(f, "pt-BR"),
            Language::English => write!(f, "en"),
            Language::Spanish => write!(f, "es"),
        }
    }
}
