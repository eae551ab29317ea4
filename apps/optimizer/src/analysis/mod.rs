//! Rule-based analysis: job postings, bullet impact, and ATS compatibility.

pub mod ats;
pub mod impact;
pub mod job;

pub use ats::analyze_ats_compatibility;
pub use job::{analyze_job_posting, JobAnalysis};
