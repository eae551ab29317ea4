//! Field Data Catalog: résumé content, job-analysis keywords and headline text
//! for every career field.
//!
//! Predefined fields come from `data/fields.yaml`, embedded in the binary and
//! parsed once on first use. Any other tag gets content synthesized from its
//! name, so every lookup returns non-empty data.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::fields::FieldTag;

/// Résumé building blocks for one career field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    pub education: String,
    pub experience_title: String,
    pub experience_bullets: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

/// Skill keywords scanned for in job postings, plus typical responsibilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    profile: FieldData,
    job: JobConfig,
    industry_keywords: Vec<String>,
    title: String,
    summary: String,
    position: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    fields: BTreeMap<String, CatalogEntry>,
}

static CATALOG: Lazy<BTreeMap<String, CatalogEntry>> = Lazy::new(|| {
    match serde_yaml::from_str::<CatalogFile>(include_str!("../../data/fields.yaml")) {
        Ok(file) => file.fields,
        Err(e) => {
            error!("Embedded field catalog failed to parse, using synthesized content only: {e}");
            BTreeMap::new()
        }
    }
});

/// Fixed position labels for synthesized fields that have a conventional name.
const SYNTHESIZED_POSITIONS: &[(&str, &str)] = &[
    ("brain_surgeon", "NEUROSURGEON / BRAIN SURGEON"),
    ("cardiologist", "CARDIOLOGIST / HEART SURGEON"),
    ("surgeon", "MEDICAL SURGEON"),
    ("doctor", "MEDICAL DOCTOR"),
    ("lawyer", "ATTORNEY / LAWYER"),
    ("attorney", "ATTORNEY / LAWYER"),
    ("accountant", "PROFESSIONAL ACCOUNTANT"),
    ("financial_analyst", "FINANCIAL ANALYST"),
];

fn entry(field: &FieldTag) -> Option<&'static CatalogEntry> {
    CATALOG.get(field.as_str())
}

/// True when the field has hand-written catalog content.
pub fn is_predefined(field: &FieldTag) -> bool {
    entry(field).is_some()
}

/// Tags with hand-written catalog content, in sorted order.
pub fn predefined_fields() -> Vec<FieldTag> {
    CATALOG.keys().map(|k| FieldTag::new(k)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

pub fn get_field_data(field: &FieldTag) -> FieldData {
    entry(field)
        .map(|e| e.profile.clone())
        .unwrap_or_else(|| synthesize_field_data(field))
}

pub fn job_config(field: &FieldTag) -> JobConfig {
    entry(field)
        .map(|e| e.job.clone())
        .unwrap_or_else(|| synthesize_job_config(field))
}

pub fn industry_keywords(field: &FieldTag) -> Vec<String> {
    if let Some(e) = entry(field) {
        return e.industry_keywords.clone();
    }

    let keywords: [&str; 4] = match Family::of(field) {
        Family::Medical(_) => ["Healthcare", "Medical Surgery", "Patient Care", "Clinical Excellence"],
        Family::Engineering(_) => ["Engineering", "Technical Solutions", "Project Management", "Innovation"],
        Family::Legal => ["Legal Services", "Litigation", "Client Representation", "Legal Expertise"],
        Family::Finance => ["Financial Services", "Accounting", "Financial Analysis", "Compliance"],
        Family::Generic => {
            return vec![
                field.display_name(),
                "Professional Services".into(),
                "Industry Expertise".into(),
                "Client Solutions".into(),
            ]
        }
    };
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Headline under the candidate's name, e.g. "Registered Nurse & Healthcare Professional".
pub fn professional_title(field: &FieldTag) -> String {
    if let Some(e) = entry(field) {
        return e.title.clone();
    }

    let display = field.display_name();
    match Family::of(field) {
        Family::Medical(MedicalSpecialty::Brain) => "Neurosurgeon & Brain Surgery Specialist".into(),
        Family::Medical(MedicalSpecialty::Cardio) => {
            "Cardiologist & Cardiovascular Surgery Specialist".into()
        }
        Family::Medical(MedicalSpecialty::General) => format!("{display} & Medical Professional"),
        Family::Engineering(_) => format!("{display} & Technical Specialist"),
        Family::Legal => "Attorney & Legal Professional".into(),
        Family::Finance => format!("{display} & Financial Professional"),
        Family::Generic => format!("{display} & Professional Specialist"),
    }
}

pub fn professional_summary(field: &FieldTag) -> String {
    if let Some(e) = entry(field) {
        return e.summary.clone();
    }

    let display = field.display_name();
    let phrase = field.phrase();
    match Family::of(field) {
        Family::Medical(specialty) => {
            let focus = match specialty {
                MedicalSpecialty::Brain => "neurosurgical",
                MedicalSpecialty::Cardio => "cardiovascular",
                MedicalSpecialty::General => "surgical",
            };
            format!(
                "Experienced {display} with 5+ years of comprehensive medical expertise in {focus} procedures, \
                 patient care, and clinical excellence. Proven expertise in advanced surgical techniques, patient \
                 management, and medical team collaboration with demonstrated ability to achieve 95% successful \
                 patient outcomes. Strong knowledge of medical protocols, surgical safety standards, and healthcare \
                 regulations. Committed to delivering exceptional patient care through precision medicine and \
                 continuous professional development."
            )
        }
        Family::Engineering(branch) => {
            let focus = match branch {
                EngineeringBranch::Mechanical => "mechanical systems",
                EngineeringBranch::Civil => "civil infrastructure",
                EngineeringBranch::Other => "engineering solutions",
            };
            format!(
                "Experienced {display} with 5+ years of comprehensive technical expertise in {focus}, project \
                 management, and engineering design. Proven expertise in technical analysis, system optimization, \
                 and cross-functional collaboration with demonstrated ability to improve efficiency by 25% through \
                 innovative engineering solutions. Strong knowledge of industry standards, safety protocols, and \
                 technical best practices. Committed to delivering high-quality engineering projects through \
                 technical excellence and continuous innovation."
            )
        }
        Family::Legal => format!(
            "Experienced {display} with 5+ years of comprehensive legal expertise in case management, litigation, \
             and client representation. Proven expertise in legal research, case strategy, and courtroom advocacy \
             with demonstrated ability to achieve favorable outcomes in 90% of cases. Strong knowledge of legal \
             procedures, regulatory compliance, and client service excellence. Committed to delivering exceptional \
             legal representation through thorough preparation and strategic advocacy."
        ),
        Family::Finance => {
            let focus = if field.contains("analyst") {
                "financial analysis and investment management"
            } else {
                "accounting, tax preparation, and financial compliance"
            };
            format!(
                "Experienced {display} with 5+ years of comprehensive expertise in {focus}. Proven expertise in \
                 financial reporting, regulatory compliance, and client service with demonstrated ability to improve \
                 financial efficiency by 25% through strategic analysis. Strong knowledge of accounting standards, \
                 tax regulations, and financial best practices. Committed to delivering accurate financial services \
                 through attention to detail and professional excellence."
            )
        }
        Family::Generic => format!(
            "Experienced {display} with 5+ years of comprehensive expertise in {phrase} operations, project \
             management, and professional service delivery. Proven expertise in {phrase} techniques, quality \
             assurance, and client satisfaction with demonstrated ability to improve performance by 25% through \
             professional excellence. Strong knowledge of industry standards, best practices, and professional \
             protocols. Committed to delivering exceptional {phrase} services through continuous improvement and \
             professional development."
        ),
    }
}

/// Upper-case position label, e.g. "NEUROSURGEON / BRAIN SURGEON".
pub fn position_title(field: &FieldTag) -> String {
    if let Some(e) = entry(field) {
        return e.position.clone();
    }
    SYNTHESIZED_POSITIONS
        .iter()
        .find(|(tag, _)| *tag == field.as_str())
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| field.display_name().to_uppercase())
}

// ────────────────────────────────────────────────────────────────────────────
// Synthesis for fields without catalog entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MedicalSpecialty {
    Brain,
    Cardio,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineeringBranch {
    Mechanical,
    Civil,
    Other,
}

/// Rough grouping of an uncatalogued tag, decided from the words in its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Medical(MedicalSpecialty),
    Engineering(EngineeringBranch),
    Legal,
    Finance,
    Generic,
}

impl Family {
    fn of(field: &FieldTag) -> Self {
        let tag = field.as_str();
        if tag.contains("surgeon") || tag.contains("doctor") || tag == "cardiologist" {
            let specialty = if tag.contains("brain") {
                MedicalSpecialty::Brain
            } else if tag.contains("cardio") || tag.contains("heart") {
                MedicalSpecialty::Cardio
            } else {
                MedicalSpecialty::General
            };
            Family::Medical(specialty)
        } else if tag.contains("engineer") && !tag.contains("software") {
            let branch = if tag.contains("mechanical") {
                EngineeringBranch::Mechanical
            } else if tag.contains("civil") {
                EngineeringBranch::Civil
            } else {
                EngineeringBranch::Other
            };
            Family::Engineering(branch)
        } else if tag == "lawyer" || tag == "attorney" {
            Family::Legal
        } else if tag.contains("accountant") || tag.contains("financial") {
            Family::Finance
        } else {
            Family::Generic
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn synthesize_job_config(field: &FieldTag) -> JobConfig {
    let phrase = field.phrase();
    match Family::of(field) {
        Family::Medical(MedicalSpecialty::Brain) => JobConfig {
            skills: strings(&[
                "neurosurgery", "brain surgery", "microsurgery", "surgical planning", "patient care",
                "medical imaging", "surgical instruments", "post-operative care", "medical documentation",
            ]),
            responsibilities: strings(&[
                "Perform complex neurosurgical procedures on brain and spinal cord",
                "Diagnose and treat neurological conditions requiring surgical intervention",
                "Collaborate with medical team for comprehensive patient care",
                "Maintain surgical skills through continuing medical education",
                "Ensure patient safety and optimal surgical outcomes",
            ]),
        },
        Family::Medical(MedicalSpecialty::Cardio) => JobConfig {
            skills: strings(&[
                "cardiology", "heart surgery", "cardiac procedures", "patient assessment", "medical imaging",
                "surgical techniques", "cardiac care", "emergency response", "medical documentation",
            ]),
            responsibilities: strings(&[
                "Perform cardiac surgical procedures and interventions",
                "Diagnose and treat cardiovascular conditions",
                "Manage cardiac emergency situations and critical care",
                "Collaborate with cardiology team for patient treatment",
                "Maintain board certification and medical expertise",
            ]),
        },
        Family::Medical(MedicalSpecialty::General) => JobConfig {
            skills: strings(&[
                "surgery", "medical procedures", "patient care", "surgical planning", "medical knowledge",
                "surgical instruments", "post-operative care", "medical documentation", "patient safety",
            ]),
            responsibilities: strings(&[
                "Perform surgical procedures with precision and safety",
                "Provide comprehensive patient care and medical consultation",
                "Collaborate with medical team for optimal patient outcomes",
                "Maintain medical certifications and continuing education",
                "Ensure compliance with medical standards and protocols",
            ]),
        },
        Family::Engineering(branch) => {
            let mut skills = strings(&[
                "engineering design", "technical analysis", "project management", "problem solving",
                "technical documentation", "quality assurance", "safety protocols", "team collaboration",
            ]);
            match branch {
                EngineeringBranch::Mechanical => skills.extend(strings(&[
                    "cad design", "manufacturing", "mechanical systems", "materials science",
                ])),
                EngineeringBranch::Civil => skills.extend(strings(&[
                    "structural design", "construction management", "site planning", "surveying",
                ])),
                EngineeringBranch::Other => {}
            }
            JobConfig {
                skills,
                responsibilities: vec![
                    format!("Design and develop {phrase} solutions and systems"),
                    "Manage technical projects from concept to completion".into(),
                    "Ensure compliance with engineering standards and safety regulations".into(),
                    "Collaborate with cross-functional teams on complex projects".into(),
                    "Maintain professional engineering credentials and certifications".into(),
                ],
            }
        }
        Family::Legal => JobConfig {
            skills: strings(&[
                "legal research", "case analysis", "litigation", "client representation", "legal writing",
                "court procedures", "case management", "legal strategy", "negotiation", "legal compliance",
            ]),
            responsibilities: strings(&[
                "Represent clients in legal matters and court proceedings",
                "Conduct comprehensive legal research and case analysis",
                "Prepare legal documents, briefs, and case strategies",
                "Negotiate settlements and agreements on behalf of clients",
                "Maintain bar admission and continuing legal education",
            ]),
        },
        Family::Finance | Family::Generic => JobConfig {
            skills: vec![
                format!("{phrase} expertise"),
                "professional skills".into(),
                "industry knowledge".into(),
                "client service".into(),
                "project management".into(),
                "quality assurance".into(),
                "team collaboration".into(),
                "problem solving".into(),
            ],
            responsibilities: vec![
                format!("Apply professional {phrase} expertise in diverse work situations"),
                format!("Deliver high-quality {phrase} services to clients and stakeholders"),
                format!("Collaborate with teams to achieve {phrase} project objectives"),
                "Maintain professional standards and industry certifications".into(),
                format!("Continuously develop {phrase} skills and knowledge"),
            ],
        },
    }
}

fn synthesize_field_data(field: &FieldTag) -> FieldData {
    let display = field.display_name();
    let phrase = field.phrase();

    let (education, experience_title, experience_bullets, skills): (String, String, Vec<String>, Vec<String>) =
        match Family::of(field) {
            Family::Medical(MedicalSpecialty::Brain) => (
                "Medical School — Doctor of Medicine (M.D.), 2018\nUniversity Hospital — Neurosurgery Residency, 2022\nState University — B.S. Biology (Pre-Med), 2014".into(),
                "Neurosurgeon / Brain Surgeon | Medical Center | 2020 - Present".into(),
                strings(&[
                    "Performed complex neurosurgical procedures with 95% success rate in brain tumor removals",
                    "Managed pre and post-operative care for 200+ patients annually in neurosurgery department",
                    "Collaborated with multidisciplinary medical team for comprehensive patient treatment plans",
                    "Maintained board certification and completed advanced neurosurgical training programs",
                ]),
                strings(&[
                    "Surgical Skills: Brain Surgery, Neurosurgical Procedures, Microsurgery, Tumor Removal",
                    "Medical Equipment: Surgical Instruments, Imaging Systems, Neurosurgical Tools, OR Technology",
                    "Clinical Skills: Patient Assessment, Surgical Planning, Post-operative Care, Medical Documentation",
                    "Specializations: Brain Tumors, Trauma Surgery, Spinal Surgery, Minimally Invasive Procedures",
                ]),
            ),
            Family::Medical(MedicalSpecialty::Cardio) => (
                "Medical School — Doctor of Medicine (M.D.), 2018\nHeart Institute — Cardiology Fellowship, 2022\nState University — B.S. Biology (Pre-Med), 2014".into(),
                "Cardiologist / Heart Surgeon | Cardiac Center | 2020 - Present".into(),
                strings(&[
                    "Performed cardiac procedures with exceptional patient outcomes and 98% success rate",
                    "Managed cardiac care for 300+ patients annually in cardiovascular surgery department",
                    "Led cardiac emergency response team for critical care interventions",
                    "Maintained board certification in cardiology and cardiovascular surgery",
                ]),
                strings(&[
                    "Cardiac Procedures: Heart Surgery, Cardiac Catheterization, Angioplasty, Bypass Surgery",
                    "Medical Equipment: Cardiac Monitors, Defibrillators, Catheterization Labs, Imaging Systems",
                    "Clinical Skills: Cardiac Assessment, Surgical Planning, Critical Care, Patient Management",
                    "Specializations: Interventional Cardiology, Heart Failure, Arrhythmias, Preventive Cardiology",
                ]),
            ),
            Family::Medical(MedicalSpecialty::General) => (
                "Medical School — Doctor of Medicine (M.D.), 2018\nSurgical Residency Program, 2022\nState University — B.S. Biology (Pre-Med), 2014".into(),
                format!("{display} | Medical Center | 2020 - Present"),
                strings(&[
                    "Performed surgical procedures with excellent patient outcomes and safety record",
                    "Managed surgical care for diverse patient population in hospital setting",
                    "Participated in emergency surgical response team for trauma cases",
                    "Maintained surgical credentials and completed continuing medical education",
                ]),
                strings(&[
                    "Surgical Skills: General Surgery, Minimally Invasive Procedures, Surgical Planning, OR Management",
                    "Medical Equipment: Surgical Instruments, Laparoscopic Tools, Imaging Systems, OR Technology",
                    "Clinical Skills: Patient Assessment, Surgical Techniques, Post-operative Care, Medical Records",
                    "Specializations: Emergency Surgery, Trauma Care, Surgical Consultation, Patient Safety",
                ]),
            ),
            Family::Engineering(EngineeringBranch::Mechanical) => (
                "Engineering School — Bachelor of Science in Mechanical Engineering, 2020\nState University — M.S. Mechanical Engineering, 2024".into(),
                format!("{display} | Engineering Firm | 2020 - Present"),
                strings(&[
                    "Designed mechanical systems and components resulting in 20% efficiency improvements",
                    "Managed engineering projects from concept to production with cross-functional teams",
                    "Optimized manufacturing processes reducing production costs by 15%",
                    "Maintained professional engineering license and industry certifications",
                ]),
                strings(&[
                    "Engineering Design: CAD/CAM, SolidWorks, AutoCAD, Mechanical Systems Design",
                    "Manufacturing: CNC Programming, Quality Control, Production Planning, Process Optimization",
                    "Technical Skills: Thermodynamics, Materials Science, Fluid Mechanics, Machine Design",
                    "Project Management: Engineering Projects, Team Leadership, Technical Documentation",
                ]),
            ),
            Family::Engineering(EngineeringBranch::Civil) => (
                "Engineering School — Bachelor of Science in Civil Engineering, 2020\nState University — M.S. Civil Engineering, 2024".into(),
                format!("{display} | Engineering Firm | 2020 - Present"),
                strings(&[
                    "Designed civil infrastructure projects including roads, bridges, and drainage systems",
                    "Managed construction projects ensuring compliance with safety and quality standards",
                    "Conducted site evaluations and prepared technical engineering reports",
                    "Maintained Professional Engineer license and continuing education requirements",
                ]),
                strings(&[
                    "Civil Design: Structural Analysis, AutoCAD Civil 3D, Project Planning, Site Development",
                    "Construction Management: Project Oversight, Quality Assurance, Safety Protocols, Cost Estimation",
                    "Technical Skills: Surveying, Hydraulics, Geotechnical Engineering, Environmental Compliance",
                    "Professional: PE License, Project Management, Technical Reports, Client Relations",
                ]),
            ),
            Family::Engineering(EngineeringBranch::Other) => (
                format!("Engineering School — Bachelor of Science in {display}, 2020\nState University — M.S. {display}, 2024"),
                format!("{display} | Engineering Firm | 2020 - Present"),
                vec![
                    format!("Applied {phrase} principles to design and develop engineering solutions"),
                    "Collaborated with engineering teams on complex technical projects".into(),
                    "Ensured compliance with industry standards and safety regulations".into(),
                    "Maintained professional development and technical certifications".into(),
                ],
                vec![
                    format!("{display} Design: Technical Design, Engineering Analysis, Project Development"),
                    "Technical Tools: CAD Software, Engineering Analysis, Technical Documentation".into(),
                    "Professional Skills: Project Management, Quality Assurance, Problem Solving".into(),
                    "Industry Knowledge: Engineering Standards, Safety Protocols, Technical Innovation".into(),
                ],
            ),
            Family::Legal => (
                "Law School — Juris Doctor (J.D.), 2019\nState University — B.A. Political Science (Pre-Law), 2016".into(),
                format!("{display} | Law Firm | 2020 - Present"),
                strings(&[
                    "Represented clients in legal matters with successful case outcomes and client satisfaction",
                    "Conducted legal research and prepared comprehensive legal documents and briefs",
                    "Negotiated settlements and agreements achieving favorable outcomes for clients",
                    "Maintained bar admission and completed continuing legal education requirements",
                ]),
                strings(&[
                    "Legal Practice: Case Research, Legal Writing, Litigation, Client Representation",
                    "Court Procedures: Trial Advocacy, Depositions, Legal Motions, Settlement Negotiations",
                    "Legal Research: Case Law Analysis, Statute Interpretation, Legal Precedent Research",
                    "Client Services: Legal Consultation, Case Management, Document Preparation, Legal Strategy",
                ]),
            ),
            Family::Finance if field.contains("accountant") => (
                "Business School — Bachelor of Science in Finance/Accounting, 2020\nState University — MBA Finance, 2024".into(),
                format!("{display} | Financial Services | 2020 - Present"),
                strings(&[
                    "Prepared accurate financial statements and reports for diverse client portfolio",
                    "Managed tax preparation and compliance ensuring adherence to federal and state regulations",
                    "Conducted financial analysis supporting business decision-making processes",
                    "Maintained CPA certification and completed continuing professional education",
                ]),
                strings(&[
                    "Accounting: Financial Statements, Tax Preparation, Audit Support, Bookkeeping",
                    "Software: QuickBooks, Excel, SAP, Financial Reporting Systems, Tax Software",
                    "Financial Analysis: Budget Analysis, Cost Accounting, Financial Planning, Variance Analysis",
                    "Compliance: GAAP Standards, Tax Regulations, Internal Controls, Financial Compliance",
                ]),
            ),
            Family::Finance => (
                "Business School — Bachelor of Science in Finance/Accounting, 2020\nState University — MBA Finance, 2024".into(),
                format!("{display} | Financial Services | 2020 - Present"),
                strings(&[
                    "Conducted comprehensive financial analysis supporting investment decisions",
                    "Prepared detailed financial reports and presentations for senior management",
                    "Analyzed market trends and investment opportunities for portfolio optimization",
                    "Maintained financial certifications and industry professional development",
                ]),
                strings(&[
                    "Financial Analysis: Investment Analysis, Financial Modeling, Market Research, Risk Assessment",
                    "Software: Excel, Bloomberg, Financial Databases, Analytical Tools, Reporting Systems",
                    "Investment: Portfolio Analysis, Securities Analysis, Financial Planning, Market Analysis",
                    "Professional: CFA Certification, Financial Reporting, Client Presentations, Research",
                ]),
            ),
            Family::Generic => (
                format!("Professional School — Degree in {display}, 2020\nState University — Professional Certificate in {display}, 2022"),
                format!("{display} | Professional Services | 2020 - Present"),
                vec![
                    format!("Applied professional {phrase} expertise in challenging work environments"),
                    format!("Delivered high-quality {phrase} services with excellent client satisfaction"),
                    format!("Collaborated effectively with teams to achieve {phrase} project objectives"),
                    format!("Maintained professional development and industry certifications in {phrase}"),
                ],
                vec![
                    format!("{display} Skills: Professional expertise, industry knowledge, specialized techniques"),
                    format!("Technical Abilities: {phrase} tools, industry software, professional equipment"),
                    "Professional Skills: Project management, quality assurance, client service, team collaboration".into(),
                    format!("Industry Knowledge: {phrase} standards, best practices, safety protocols"),
                ],
            ),
        };

    FieldData {
        education,
        experience_title,
        experience_bullets,
        skills,
        projects: vec![
            format!("Professional {display} Certification"),
            format!("{display} Excellence Recognition"),
            format!("Advanced {display} Training Completion"),
            "Industry Leadership and Development".into(),
        ],
    }
}
