//! Completeness alerts for segmented documents

use crate::processing::job_info::{JobInfo, WorkModel};
use crate::processing::sections::{JobSections, ResumeSections, SectionSet};
use std::fmt;

/// A missing piece of information worth flagging to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    MissingResponsibilities,
    MissingMustRequirements,
    MissingBenefits,
    MissingSalary,
    MissingWorkModel,
    MissingExperience,
    MissingSkills,
    MissingEmail,
    MissingPhone,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Alert::MissingResponsibilities => "Responsibilities not clearly identified",
            Alert::MissingMustRequirements => "Mandatory requirements not specified",
            Alert::MissingBenefits => "Benefits not informed",
            Alert::MissingSalary => "Salary not informed",
            Alert::MissingWorkModel => "Work model not specified",
            Alert::MissingExperience => "Professional experience not identified",
            Alert::MissingSkills => "Technical skills not clearly listed",
            Alert::MissingEmail => "E-mail not found",
            Alert::MissingPhone => "Phone number not found",
        };
        f.write_str(message)
    }
}

/// Alert messages for either kind of document, in a fixed check order.
///
/// Salary and work model are only checked for job postings when `info` is given.
pub fn generate_alerts(sections: SectionSet<'_>, info: Option<&JobInfo>) -> Vec<String> {
    let alerts = match sections {
        SectionSet::Job(job) => job_alerts(job, info),
        SectionSet::Resume(resume) => resume_alerts(resume),
    };
    alerts.iter().map(Alert::to_string).collect()
}

pub fn job_alerts(sections: &JobSections, info: Option<&JobInfo>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if sections.responsibilities.is_empty() {
        alerts.push(Alert::MissingResponsibilities);
    }
    if sections.requirements_must.is_empty() {
        alerts.push(Alert::MissingMustRequirements);
    }
    if sections.benefits.is_empty() {
        alerts.push(Alert::MissingBenefits);
    }

    if let Some(info) = info {
        if info.salary.min.is_none() {
            alerts.push(Alert::MissingSalary);
        }
        if info.work_model == WorkModel::NotInformed {
            alerts.push(Alert::MissingWorkModel);
        }
    }

    alerts
}

pub fn resume_alerts(sections: &ResumeSections) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if sections.experience.is_empty() {
        alerts.push(Alert::MissingExperience);
    }
    if sections.skills.is_empty() {
        alerts.push(Alert::MissingSkills);
    }
    if sections.personal_info.email.is_empty() {
        alerts.push(Alert::MissingEmail);
    }
    if sections.personal_info.phone.is_empty() {
        alerts.push(Alert::MissingPhone);
    }

    alerts
}
