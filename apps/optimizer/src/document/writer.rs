//! Persists an [`Optimization`]: one text file per stage, the rebuilt
//! `optimized_resume.docx`, and a JSON manifest tying them together.
//!
//! A failed text file or DOCX is logged and recorded, never fatal; only a
//! directory that cannot be created aborts the save.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::assembler::{Optimization, ResumeStyle, StageKey};
use crate::document::layout::build_resume_document;
use crate::errors::AppError;
use crate::fields::{DetectionSource, FieldTag};

pub const DOCX_FILE: &str = "optimized_resume.docx";
pub const MANIFEST_FILE: &str = "optimization_manifest.json";

#[derive(Debug, Default)]
pub struct SavedFiles {
    pub dir: PathBuf,
    /// Stage key → written file, in output order.
    pub files: BTreeMap<String, PathBuf>,
    pub docx: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    /// File name → error message for everything that could not be written.
    pub failures: Vec<(String, String)>,
}

impl SavedFiles {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    field: &'a FieldTag,
    detection_source: DetectionSource,
    style: ResumeStyle,
    role: &'a str,
    company: &'a str,
    generated_at: DateTime<Local>,
    files: BTreeMap<&'a str, &'a str>,
    docx: Option<&'a str>,
}

/// `{prefix}_{YYYYmmdd_HHMMSS}`.
pub fn timestamped_dir(prefix: &str, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("{prefix}_{}", now.format("%Y%m%d_%H%M%S")))
}

pub fn save_results_to_files(opt: &Optimization, dir: &Path) -> Result<SavedFiles, AppError> {
    fs::create_dir_all(dir)?;
    info!(dir = %dir.display(), stages = opt.results.len(), "saving optimization results");

    let mut saved = SavedFiles {
        dir: dir.to_path_buf(),
        ..SavedFiles::default()
    };

    for (stage, text) in StageKey::ALL
        .iter()
        .filter_map(|stage| opt.results.get(stage).map(|text| (stage, text)))
    {
        let path = dir.join(stage.file_name());
        match fs::write(&path, text) {
            Ok(()) => {
                saved.files.insert(stage.key().to_string(), path);
            }
            Err(e) => {
                error!(file = stage.file_name(), "failed to write stage output: {e}");
                saved.failures.push((stage.file_name().to_string(), e.to_string()));
            }
        }
    }

    let docx_path = dir.join(DOCX_FILE);
    let document = build_resume_document(opt.primary_variant(), &opt.field);
    match document.save(&docx_path) {
        Ok(()) => {
            info!(
                lines = document.visible_lines().len(),
                links = document.hyperlinks().len(),
                "DOCX résumé written"
            );
            saved.docx = Some(docx_path);
        }
        Err(e) => {
            warn!(file = DOCX_FILE, "DOCX generation failed, text outputs kept: {e}");
            saved.failures.push((DOCX_FILE.to_string(), e.to_string()));
        }
    }

    let manifest_path = dir.join(MANIFEST_FILE);
    match write_manifest(opt, &saved, &manifest_path) {
        Ok(()) => saved.manifest = Some(manifest_path),
        Err(e) => {
            warn!(file = MANIFEST_FILE, "failed to write manifest: {e}");
            saved.failures.push((MANIFEST_FILE.to_string(), e.to_string()));
        }
    }

    info!(
        written = saved.files.len(),
        failed = saved.failures.len(),
        "results saved"
    );
    Ok(saved)
}

fn write_manifest(opt: &Optimization, saved: &SavedFiles, path: &Path) -> Result<(), AppError> {
    let files = saved
        .files
        .iter()
        .filter_map(|(key, path)| {
            let name = path.file_name()?.to_str()?;
            Some((key.as_str(), name))
        })
        .collect();

    let manifest = Manifest {
        field: &opt.field,
        detection_source: opt.detection_source,
        style: opt.style,
        role: &opt.role,
        company: &opt.company,
        generated_at: Local::now(),
        files,
        docx: saved.docx.as_ref().map(|_| DOCX_FILE),
    };
    let json = serde_json::to_string_pretty(&manifest).map_err(anyhow::Error::from)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::assembler::{process_complete_optimization, OptimizationRequest};
    use crate::document::reader::read_docx_text;

    const DEMO_JOB: &str = include_str!("../../data/demo_job.txt");
    const DEMO_RESUME: &str = include_str!("../../data/demo_resume.txt");

    fn optimize(style: ResumeStyle) -> Optimization {
        process_complete_optimization(&OptimizationRequest {
            job_description: DEMO_JOB.to_string(),
            resume_content: DEMO_RESUME.to_string(),
            role: "Optical Engineer".to_string(),
            company: "Lumen Labs".to_string(),
            style,
        })
        .unwrap()
    }

    #[test]
    fn test_timestamped_dir() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            timestamped_dir("resume_optimization_output", now),
            PathBuf::from("resume_optimization_output_20240309_070501")
        );
    }

    #[test]
    fn test_saves_every_stage_docx_and_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let opt = optimize(ResumeStyle::Narrative);

        let saved = save_results_to_files(&opt, &dir).unwrap();
        assert!(saved.is_complete());
        assert_eq!(saved.files.len(), opt.results.len());
        for (stage, text) in &opt.results {
            let written = fs::read_to_string(dir.join(stage.file_name())).unwrap();
            assert_eq!(&written, text);
        }

        let docx = read_docx_text(saved.docx.as_ref().unwrap()).unwrap();
        assert!(docx.starts_with("JOHN SMITH"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap()).unwrap();
        assert_eq!(manifest["field"], "optical_engineer");
        assert_eq!(manifest["style"], "narrative");
        assert_eq!(manifest["company"], "Lumen Labs");
        assert_eq!(
            manifest["files"][StageKey::NarrativeResume.key()],
            "narrative_story_resume.txt"
        );
        assert_eq!(manifest["docx"], DOCX_FILE);
    }

    #[test]
    fn test_combined_style_writes_all_variants() {
        let tmp = tempfile::tempdir().unwrap();
        let saved = save_results_to_files(&optimize(ResumeStyle::Combined), tmp.path()).unwrap();
        for file in [
            "combined_comprehensive_resume.txt",
            "narrative_story_resume.txt",
            "enhanced_standard_resume.txt",
        ] {
            assert!(tmp.path().join(file).is_file(), "{file} missing");
        }
        assert!(saved.docx.is_some());
    }

    #[test]
    fn test_docx_survives_control_characters_in_resume() {
        let tmp = tempfile::tempdir().unwrap();
        let opt = process_complete_optimization(&OptimizationRequest {
            job_description: DEMO_JOB.to_string(),
            resume_content: "Jane Doe\nEmail: jane@example.com\nSkills:\nPython\u{b} Rust, SQL\u{c}\nExperience:\n- Led a team\u{1} of 5".to_string(),
            role: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            style: ResumeStyle::Standard,
        })
        .unwrap();

        let saved = save_results_to_files(&opt, tmp.path()).unwrap();
        assert!(saved.is_complete());

        let file = fs::File::open(saved.docx.as_ref().unwrap()).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("word/document.xml").unwrap(), &mut xml).unwrap();
        assert!(!xml
            .chars()
            .any(|c| matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')));
        let mut reader = quick_xml::Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("document.xml is malformed: {e}"),
            }
        }
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("taken");
        fs::write(&blocker, "a file, not a directory").unwrap();
        let err = save_results_to_files(&optimize(ResumeStyle::Standard), &blocker).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
