//! Text processing and analysis module

pub mod validator;
pub mod text_processor;
pub mod sections;
pub mod job_info;
pub mod vocabulary;
pub mod skill_normalizer;
pub mod keywords;
pub mod alerts;
pub mod ats_matcher;
pub mod analyzer;
