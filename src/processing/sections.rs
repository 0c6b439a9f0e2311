//! Heuristic section segmentation for job postings and resumes
//!
//! Both segmenters walk the non-empty lines once. A line containing a header
//! cue re-points the active section and is consumed; any other line is
//! appended to the active section after its bullet or numbering is stripped.

use crate::processing::text_processor::split_sentences;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

const RESPONSIBILITY_CUES: &[&str] = &["responsabilidade", "atividade", "função"];
const REQUIREMENT_CUES: &[&str] = &["requisito", "qualificação", "exigência"];
const NICE_TO_HAVE_CUES: &[&str] = &["desejável", "diferencial", "plus", "desirable", "differential"];
const BENEFIT_CUES: &[&str] = &["benefício", "oferecemos"];
const TOOLS_CUES: &[&str] = &["tecnologia", "ferramenta", "stack"];

// Sentence-level cues, used only when no header was found anywhere.
const SENTENCE_RESPONSIBILITY_CUES: &[&str] = &["responsável", "desenvolver", "gerenciar"];
const SENTENCE_REQUIREMENT_CUES: &[&str] = &["experiência", "conhecimento", "domínio"];
const SENTENCE_NICE_TO_HAVE_CUES: &[&str] = &["desejável", "diferencial", "desirable", "differential"];
const SENTENCE_BENEFIT_CUES: &[&str] = &["benefício", "vale", "plano"];

const EXPERIENCE_CUES: &[&str] = &["experiência", "profissional", "trabalho"];
const SKILL_CUES: &[&str] = &["habilidade", "competência", "skill"];
const CERTIFICATION_CUES: &[&str] = &["certificação", "certificado", "curso"];
const EDUCATION_CUES: &[&str] = &["formação", "educação", "acadêmic"];

/// Lines this short are never section content.
const MIN_CONTENT_LINE_CHARS: usize = 10;
/// Content left after bullet stripping must be longer than this.
const MIN_STRIPPED_LINE_CHARS: usize = 5;
/// Fallback sentences must be longer than this.
const MIN_FALLBACK_SENTENCE_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSection {
    Responsibilities,
    RequirementsMust,
    RequirementsNice,
    Benefits,
    ToolsTech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSection {
    Experience,
    Skills,
    Certifications,
    Education,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSections {
    pub responsibilities: Vec<String>,
    pub requirements_must: Vec<String>,
    pub requirements_nice: Vec<String>,
    pub benefits: Vec<String>,
    pub tools_tech: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub certifications: Vec<String>,
    pub education: Vec<String>,
    pub personal_info: PersonalInfo,
}

/// Either kind of segmented document, for consumers that handle both.
#[derive(Debug, Clone, Copy)]
pub enum SectionSet<'a> {
    Job(&'a JobSections),
    Resume(&'a ResumeSections),
}

impl JobSections {
    pub fn section_mut(&mut self, section: JobSection) -> &mut Vec<String> {
        match section {
            JobSection::Responsibilities => &mut self.responsibilities,
            JobSection::RequirementsMust => &mut self.requirements_must,
            JobSection::RequirementsNice => &mut self.requirements_nice,
            JobSection::Benefits => &mut self.benefits,
            JobSection::ToolsTech => &mut self.tools_tech,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.responsibilities.is_empty()
            && self.requirements_must.is_empty()
            && self.requirements_nice.is_empty()
            && self.benefits.is_empty()
            && self.tools_tech.is_empty()
    }

    /// Lines that may mention skills, in must, nice, tools order.
    pub fn skill_texts(&self) -> Vec<String> {
        self.requirements_must
            .iter()
            .chain(&self.requirements_nice)
            .chain(&self.tools_tech)
            .cloned()
            .collect()
    }
}

impl ResumeSections {
    pub fn section_mut(&mut self, section: ResumeSection) -> &mut Vec<String> {
        match section {
            ResumeSection::Experience => &mut self.experience,
            ResumeSection::Skills => &mut self.skills,
            ResumeSection::Certifications => &mut self.certifications,
            ResumeSection::Education => &mut self.education,
        }
    }

    /// Lines that may mention skills, in skills, experience, certifications order.
    pub fn skill_texts(&self) -> Vec<String> {
        self.skills
            .iter()
            .chain(&self.experience)
            .chain(&self.certifications)
            .cloned()
            .collect()
    }
}

pub struct SectionSegmenter {
    bullet_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let bullet_regex = Regex::new(r"^[-•*\d+.)\s]+").expect("Invalid bullet regex");
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
            .expect("Invalid email regex");
        let phone_regex =
            Regex::new(r"\(?[0-9]{2}\)?\s?[0-9]{4,5}-?[0-9]{4}").expect("Invalid phone regex");

        Self {
            bullet_regex,
            email_regex,
            phone_regex,
        }
    }

    /// Partition a job posting into its five sections.
    ///
    /// When no header is found at all, sentences are classified by cue words
    /// instead; sentences matching no cue are dropped.
    pub fn segment_job(&self, text: &str) -> JobSections {
        let mut sections = JobSections::default();
        let mut current = None;

        for line in non_empty_lines(text) {
            let lower = line.to_lowercase();

            if let Some(header) = classify_job_header(&lower) {
                current = Some(header);
                continue;
            }

            if let Some(section) = current {
                if let Some(content) = self.content_line(line) {
                    sections.section_mut(section).push(content);
                }
            }
        }

        if sections.is_empty() {
            debug!("No job section content found, classifying sentences");
            self.classify_job_sentences(text, &mut sections);
        }

        sections
    }

    /// Partition a resume into its sections and pull out contact details.
    pub fn segment_resume(&self, text: &str) -> ResumeSections {
        let mut sections = ResumeSections {
            personal_info: self.extract_personal_info(text),
            ..ResumeSections::default()
        };
        let mut current = None;

        for line in non_empty_lines(text) {
            let lower = line.to_lowercase();

            if let Some(header) = classify_resume_header(&lower) {
                current = Some(header);
                continue;
            }

            if let Some(section) = current {
                if let Some(content) = self.content_line(line) {
                    sections.section_mut(section).push(content);
                }
            }
        }

        sections
    }

    /// Scan every line for name, email and phone; the first match of each wins.
    pub fn extract_personal_info(&self, text: &str) -> PersonalInfo {
        let mut info = PersonalInfo::default();

        for line in non_empty_lines(text) {
            let email = self.email_regex.find(line);
            if let Some(found) = email {
                if info.email.is_empty() {
                    info.email = found.as_str().to_string();
                }
            }

            let phone = self.phone_regex.find(line);
            if let Some(found) = phone {
                if info.phone.is_empty() {
                    info.phone = found.as_str().to_string();
                }
            }

            let length = line.chars().count();
            if info.name.is_empty()
                && length > 5
                && length < 50
                && email.is_none()
                && phone.is_none()
                && !line.chars().any(|c| c.is_ascii_digit())
            {
                info.name = line.to_string();
            }
        }

        info
    }

    fn classify_job_sentences(&self, text: &str, sections: &mut JobSections) {
        for sentence in split_sentences(text) {
            if sentence.trim().chars().count() <= MIN_FALLBACK_SENTENCE_CHARS {
                continue;
            }
            let lower = sentence.to_lowercase();
            let sentence = sentence.trim().to_string();

            if contains_any(&lower, SENTENCE_RESPONSIBILITY_CUES) {
                sections.responsibilities.push(sentence);
            } else if contains_any(&lower, SENTENCE_REQUIREMENT_CUES) {
                if contains_any(&lower, SENTENCE_NICE_TO_HAVE_CUES) {
                    sections.requirements_nice.push(sentence);
                } else {
                    sections.requirements_must.push(sentence);
                }
            } else if contains_any(&lower, SENTENCE_BENEFIT_CUES) {
                sections.benefits.push(sentence);
            }
        }
    }

    fn content_line(&self, line: &str) -> Option<String> {
        if line.chars().count() <= MIN_CONTENT_LINE_CHARS {
            return None;
        }
        let stripped = self.bullet_regex.replace(line, "");
        let stripped = stripped.trim();
        if stripped.chars().count() > MIN_STRIPPED_LINE_CHARS {
            Some(stripped.to_string())
        } else {
            None
        }
    }
}

// Cue groups are tested in a fixed order; a requirements line that also
// carries a nice-to-have cue goes to the nice list.
fn classify_job_header(lower: &str) -> Option<JobSection> {
    if contains_any(lower, RESPONSIBILITY_CUES) {
        Some(JobSection::Responsibilities)
    } else if contains_any(lower, REQUIREMENT_CUES) {
        if contains_any(lower, NICE_TO_HAVE_CUES) {
            Some(JobSection::RequirementsNice)
        } else {
            Some(JobSection::RequirementsMust)
        }
    } else if contains_any(lower, BENEFIT_CUES) {
        Some(JobSection::Benefits)
    } else if contains_any(lower, TOOLS_CUES) {
        Some(JobSection::ToolsTech)
    } else {
        None
    }
}

fn classify_resume_header(lower: &str) -> Option<ResumeSection> {
    if contains_any(lower, EXPERIENCE_CUES) {
        Some(ResumeSection::Experience)
    } else if contains_any(lower, SKILL_CUES) {
        Some(ResumeSection::Skills)
    } else if contains_any(lower, CERTIFICATION_CUES) {
        Some(ResumeSection::Certifications)
    } else if contains_any(lower, EDUCATION_CUES) {
        Some(ResumeSection::Education)
    } else {
        None
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED_JOB: &str = "Desenvolvedor Full Stack Pleno
Responsabilidades:
- Desenvolver novas funcionalidades para a plataforma
• Participar das revisões de código do time
Requisitos:
1. Experiência sólida com JavaScript e React
2) Conhecimento em Node.js e PostgreSQL
Requisitos considerados diferencial:
* Vivência com TypeScript e AWS
Benefícios:
- Vale refeição e plano de saúde
Tecnologias:
- Docker, Git e GitHub Actions";

    const RESUME: &str = "joao.silva@email.com
(11) 99999-9999
João Silva
Experiência Profissional
Desenvolvedor na Empresa X de 2019 a 2023
Habilidades
JavaScript, React, Node.js, PostgreSQL
Formação
Bacharelado em Ciência da Computação pela USP
Cursos e certificados
AWS Certified Cloud Practitioner";

    #[test]
    fn test_job_sections_follow_headers() {
        let segmenter = SectionSegmenter::new();
        let sections = segmenter.segment_job(STRUCTURED_JOB);

        assert_eq!(
            sections.responsibilities,
            vec![
                "Desenvolver novas funcionalidades para a plataforma",
                "Participar das revisões de código do time",
            ]
        );
        assert_eq!(
            sections.requirements_must,
            vec![
                "Experiência sólida com JavaScript e React",
                "Conhecimento em Node.js e PostgreSQL",
            ]
        );
        assert_eq!(sections.requirements_nice, vec!["Vivência com TypeScript e AWS"]);
        assert_eq!(sections.benefits, vec!["Vale refeição e plano de saúde"]);
        assert_eq!(sections.tools_tech, vec!["Docker, Git e GitHub Actions"]);
    }

    #[test]
    fn test_nice_to_have_cue_overrides_requirements() {
        let segmenter = SectionSegmenter::new();
        let text = "Requisitos (diferencial):\nExperiência com Kubernetes em produção";
        let sections = segmenter.segment_job(text);

        assert!(sections.requirements_must.is_empty());
        assert_eq!(sections.requirements_nice, vec!["Experiência com Kubernetes em produção"]);
    }

    #[test]
    fn test_short_lines_are_not_content() {
        let segmenter = SectionSegmenter::new();
        let text = "Requisitos:\nSQL e Git\n-- 1) 2. abc\nBoa comunicação escrita";
        let sections = segmenter.segment_job(text);

        assert_eq!(sections.requirements_must, vec!["Boa comunicação escrita"]);
    }

    #[test]
    fn test_sentence_fallback_without_headers() {
        let segmenter = SectionSegmenter::new();
        let text = "Buscamos profissional responsável por desenvolver APIs escaláveis. \
Necessário experiência com Python e Django. \
Conhecimento em Kubernetes é um diferencial. \
Oferecemos vale refeição e plano odontológico. \
Ambiente descontraído";
        let sections = segmenter.segment_job(text);

        assert_eq!(
            sections.responsibilities,
            vec!["Buscamos profissional responsável por desenvolver APIs escaláveis"]
        );
        assert_eq!(sections.requirements_must, vec!["Necessário experiência com Python e Django"]);
        assert_eq!(sections.requirements_nice, vec!["Conhecimento em Kubernetes é um diferencial"]);
        assert_eq!(sections.benefits, vec!["Oferecemos vale refeição e plano odontológico"]);
        assert!(sections.tools_tech.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_sections() {
        let segmenter = SectionSegmenter::new();
        assert!(segmenter.segment_job("").is_empty());

        let resume = segmenter.segment_resume("");
        assert_eq!(resume, ResumeSections::default());
    }

    #[test]
    fn test_resume_personal_info() {
        let segmenter = SectionSegmenter::new();
        let sections = segmenter.segment_resume(RESUME);

        assert_eq!(sections.personal_info.email, "joao.silva@email.com");
        assert_eq!(sections.personal_info.phone, "(11) 99999-9999");
        assert_eq!(sections.personal_info.name, "João Silva");
    }

    #[test]
    fn test_resume_sections() {
        let segmenter = SectionSegmenter::new();
        let sections = segmenter.segment_resume(RESUME);

        assert_eq!(sections.experience, vec!["Desenvolvedor na Empresa X de 2019 a 2023"]);
        assert_eq!(sections.skills, vec!["JavaScript, React, Node.js, PostgreSQL"]);
        assert_eq!(sections.education, vec!["Bacharelado em Ciência da Computação pela USP"]);
        assert_eq!(sections.certifications, vec!["AWS Certified Cloud Practitioner"]);
    }

    #[test]
    fn test_personal_info_first_match_wins() {
        let segmenter = SectionSegmenter::new();
        let text = "Contato: primeiro@email.com\nMaria Oliveira\nsegundo@email.com\n(21) 3333-4444\n(11) 98888-7777\nCarlos Souza";
        let info = segmenter.extract_personal_info(text);

        assert_eq!(info.email, "primeiro@email.com");
        assert_eq!(info.phone, "(21) 3333-4444");
        assert_eq!(info.name, "Maria Oliveira");
    }

    #[test]
    fn test_english_words_in_content_stay_content() {
        let segmenter = SectionSegmenter::new();

        let resume = segmenter
            .segment_resume("Habilidades\nExperience with React and Node.js\nPython, SQL e Docker");
        assert_eq!(
            resume.skills,
            vec!["Experience with React and Node.js", "Python, SQL e Docker"]
        );
        assert!(resume.experience.is_empty());

        let job = segmenter.segment_job(
            "Responsabilidades:\nDevelop internal tools for the data team\nManter APIs REST em produção",
        );
        assert_eq!(
            job.responsibilities,
            vec!["Develop internal tools for the data team", "Manter APIs REST em produção"]
        );
        assert!(job.tools_tech.is_empty());
    }

    #[test]
    fn test_plural_headers_follow_cue_substrings() {
        let segmenter = SectionSegmenter::new();

        // "certificações" does not contain "certificação"
        let resume = segmenter.segment_resume(
            "Formação\nBacharelado em Ciência da Computação\nCertificações\nAWS Solutions Architect",
        );
        assert!(resume.certifications.is_empty());
        assert_eq!(
            resume.education,
            vec![
                "Bacharelado em Ciência da Computação",
                "Certificações",
                "AWS Solutions Architect",
            ]
        );
    }
}
