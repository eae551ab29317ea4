//! Command line surface and the interactive shell.
//!
//! All console prompting lives here; the assembler below it never touches
//! stdin or stdout.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::assembler::{process_complete_optimization, Optimization, OptimizationRequest, ResumeStyle};
use crate::config::Config;
use crate::document::{convert_docx_to_txt, read_file_safely, save_results_to_files, timestamped_dir, SavedFiles};
use crate::errors::AppError;
use crate::fields::catalog::predefined_fields;
use crate::fields::detector::detect_career_field;

const DEMO_JOB: &str = include_str!("../data/demo_job.txt");
const DEMO_RESUME: &str = include_str!("../data/demo_resume.txt");

#[derive(Debug, Parser)]
#[command(
    name = "resume-optimizer",
    version,
    about = "Tailors a résumé to a job description across any career field",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Job description text or file path (.txt, .docx, .pdf)
    pub job_description: Option<String>,

    /// Résumé text or file path (.txt, .docx, .pdf)
    #[arg(short, long)]
    pub resume: Option<String>,

    /// Target job role [default: RESUME_DEFAULT_ROLE or "Software Engineer"]
    #[arg(long)]
    pub role: Option<String>,

    /// Target company name [default: RESUME_DEFAULT_COMPANY or "Target Company"]
    #[arg(short, long)]
    pub company: Option<String>,

    /// Output directory prefix; a timestamp is appended
    #[arg(short, long)]
    pub output: Option<String>,

    /// Prompt for input file paths
    #[arg(short, long)]
    pub browse: bool,

    /// Résumé style: 1 narrative, 2 enhanced standard, 3 combined
    #[arg(short, long, value_parser = parse_style)]
    pub style: Option<ResumeStyle>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a .docx file to plain text
    Convert {
        docx: PathBuf,
        /// Output path [default: <name>_converted.txt next to the input]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the career fields that have hand-written catalog content
    Fields {
        /// Show the field a role or job text maps to instead
        #[arg(long, value_name = "TEXT")]
        detect: Option<String>,
    },
}

fn parse_style(raw: &str) -> Result<ResumeStyle, String> {
    ResumeStyle::from_choice(raw).ok_or_else(|| format!("expected 1, 2 or 3, got '{raw}'"))
}

// ────────────────────────────────────────────────────────────────────────────
// Console
// ────────────────────────────────────────────────────────────────────────────

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Console { input, out }
    }

    fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// One trimmed line, or `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Pasted text ended by two consecutive blank lines or end of input.
    fn read_block(&mut self) -> Result<String, AppError> {
        let mut lines: Vec<String> = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() && lines.last().map_or(false, |l| l.trim().is_empty()) {
                break;
            }
            lines.push(line);
        }
        while lines.last().map_or(false, |l| l.trim().is_empty()) {
            lines.pop();
        }
        Ok(lines.join("\n"))
    }

    fn report(&mut self, err: &AppError) -> Result<(), AppError> {
        report_error(&mut self.out, err)?;
        Ok(())
    }
}

/// Writes the `Error:` line and, when one exists, the `Tip:` line.
pub fn report_error<W: Write>(out: &mut W, err: &AppError) -> io::Result<()> {
    writeln!(out, "Error: {err}")?;
    if let Some(hint) = err.hint() {
        writeln!(out, "Tip: {hint}")?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

pub fn run(cli: Cli, config: &Config) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    run_with(cli, config, &mut console)
}

pub fn run_with<R: BufRead, W: Write>(
    cli: Cli,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    match &cli.command {
        Some(Command::Convert { docx, output }) => {
            let written = convert_docx_to_txt(docx, output.as_deref())?;
            console.say(&format!("Converted {} -> {}", docx.display(), written.display()))?;
            return Ok(());
        }
        Some(Command::Fields { detect: Some(text) }) => {
            let field = detect_career_field(text);
            console.say(&format!("{:<28} {}", field.as_str(), field.display_name()))?;
            return Ok(());
        }
        Some(Command::Fields { detect: None }) => {
            for field in predefined_fields() {
                console.say(&format!("{:<28} {}", field.as_str(), field.display_name()))?;
            }
            console.say("Any other role gets synthesized content.")?;
            return Ok(());
        }
        None => {}
    }

    console.say("RESUME OPTIMIZER")?;
    console.say("    ATS-friendly, field-aware résumés with .docx output\n")?;

    let mut role = cli.role.clone();
    let mut company = cli.company.clone();

    let (job_description, resume_content) = if cli.browse {
        let inputs = browse_mode(console, config)?;
        if role.is_none() {
            role = ask_with_default(console, "Target job role", &config.default_role)?;
        }
        if company.is_none() {
            company = ask_with_default(console, "Target company", &config.default_company)?;
        }
        inputs
    } else {
        let job = cli
            .job_description
            .as_deref()
            .map(|arg| text_or_file(console, arg, "job description", config))
            .transpose()?;
        let resume = cli
            .resume
            .as_deref()
            .map(|arg| text_or_file(console, arg, "resume", config))
            .transpose()?;
        match job {
            Some(job) if !job.trim().is_empty() => (job, resume.unwrap_or_default()),
            _ => interactive_menu(console, config)?,
        }
    };

    if job_description.trim().is_empty() {
        return Err(AppError::MissingInput("Job description"));
    }
    if resume_content.trim().is_empty() {
        return Err(AppError::MissingInput("Resume content"));
    }

    let style = match cli.style {
        Some(style) => style,
        None => ask_style(console)?,
    };

    let role = role.unwrap_or_else(|| config.default_role.clone());
    let company = company.unwrap_or_else(|| config.default_company.clone());
    console.say(&format!("\nProcessing résumé optimization for {role} at {company}..."))?;

    let optimization = process_complete_optimization(&OptimizationRequest {
        job_description,
        resume_content,
        role,
        company,
        style,
    })?;

    let prefix = cli.output.as_deref().unwrap_or(&config.output_prefix);
    let dir = timestamped_dir(prefix, Local::now());
    let saved = save_results_to_files(&optimization, &dir)?;
    print_summary(console, &optimization, &saved)
}

// ────────────────────────────────────────────────────────────────────────────
// Input modes
// ────────────────────────────────────────────────────────────────────────────

/// An existing path is read through the safe reader; anything else is the text itself.
fn text_or_file<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    arg: &str,
    label: &str,
    config: &Config,
) -> Result<String, AppError> {
    let path = Path::new(arg);
    if !path.is_file() {
        return Ok(arg.to_string());
    }
    console.say(&format!("Reading {label} from file: {}", path.display()))?;
    let text = read_file_safely(path, config.max_input_bytes)?;
    console.say(&format!("    Loaded {} characters", text.chars().count()))?;
    Ok(text)
}

fn interactive_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<(String, String), AppError> {
    console.say("INTERACTIVE MODE")?;
    console.say("    1. Enter file paths")?;
    console.say("    2. Enter text manually")?;
    console.say("    3. Run demo with sample data\n")?;

    loop {
        let choice = match console.ask("Select option (1-3): ")? {
            Some(choice) => choice,
            None => {
                console.say("\nInput closed, using demo mode")?;
                "3".to_string()
            }
        };
        debug!(choice = %choice.trim(), "interactive menu");

        match choice.trim() {
            "1" => match read_paths(console, config)? {
                Some(inputs) => return Ok(inputs),
                None => console.say("Both files are required. Please try again.")?,
            },
            "2" => {
                console.say("\nPaste the job description (press Enter twice when finished):")?;
                let job = console.read_block()?;
                if job.trim().is_empty() {
                    console.say("Job description cannot be empty. Please try again.")?;
                    continue;
                }
                console.say("\nPaste your current résumé (press Enter twice when finished):")?;
                let resume = console.read_block()?;
                if resume.trim().is_empty() {
                    console.say("Résumé cannot be empty. Please try again.")?;
                    continue;
                }
                return Ok((job, resume));
            }
            "3" => {
                console.say("\nRunning demo mode...")?;
                info!("using embedded demo inputs");
                return Ok((DEMO_JOB.to_string(), DEMO_RESUME.to_string()));
            }
            _ => console.say("Invalid choice. Please select 1, 2, or 3.")?,
        }
    }
}

/// Path prompts in place of file dialogs; pasted text is the fallback.
fn browse_mode<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<(String, String), AppError> {
    console.say("BROWSE MODE")?;
    let job = match ask_path(console, "Job description file path: ", config)? {
        Some(text) => text,
        None => {
            console.say("Enter the job description instead (press Enter twice when finished):")?;
            console.read_block()?
        }
    };
    let resume = match ask_path(console, "Résumé file path: ", config)? {
        Some(text) => text,
        None => {
            console.say("Enter your résumé instead (press Enter twice when finished):")?;
            console.read_block()?
        }
    };
    Ok((job, resume))
}

fn read_paths<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<Option<(String, String)>, AppError> {
    let Some(job) = ask_path(console, "\nJob description file path: ", config)? else {
        return Ok(None);
    };
    let Some(resume) = ask_path(console, "Résumé file path: ", config)? else {
        return Ok(None);
    };
    Ok(Some((job, resume)))
}

/// Reads the file at the entered path. Unreadable files are reported, not fatal.
fn ask_path<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    config: &Config,
) -> Result<Option<String>, AppError> {
    let Some(raw) = console.ask(prompt)? else {
        return Ok(None);
    };
    let raw = raw.trim().trim_matches(['"', '\'']);
    if raw.is_empty() {
        return Ok(None);
    }
    match read_file_safely(Path::new(raw), config.max_input_bytes) {
        Ok(text) => {
            console.say(&format!("    Loaded {} characters", text.chars().count()))?;
            Ok(Some(text))
        }
        Err(err) => {
            err.log();
            console.report(&err)?;
            Ok(None)
        }
    }
}

fn ask_with_default<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
    default: &str,
) -> Result<Option<String>, AppError> {
    let answer = console.ask(&format!("{label} (default: {default}): "))?;
    Ok(answer.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()))
}

/// Blank input or end of input picks the narrative style.
fn ask_style<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<ResumeStyle, AppError> {
    console.say("\nChoose resume style:")?;
    for style in [ResumeStyle::Narrative, ResumeStyle::Standard, ResumeStyle::Combined] {
        console.say(&format!("    {}. {}", style as u8, style.label()))?;
    }
    loop {
        let Some(answer) = console.ask("Choose resume style (1-3, default 1): ")? else {
            return Ok(ResumeStyle::Narrative);
        };
        if answer.trim().is_empty() {
            return Ok(ResumeStyle::Narrative);
        }
        match ResumeStyle::from_choice(&answer) {
            Some(style) => return Ok(style),
            None => console.say("Invalid choice. Please select 1, 2, or 3.")?,
        }
    }
}

fn print_summary<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    opt: &Optimization,
    saved: &SavedFiles,
) -> Result<(), AppError> {
    console.say("\nOPTIMIZATION COMPLETE!")?;
    console.say(&format!("    Career field: {}", opt.field.display_name()))?;
    console.say(&format!("    Resume style: {}", opt.style))?;
    if opt.resume_info.has_name() {
        console.say(&format!("    Candidate: {}", opt.resume_info.name))?;
    }
    console.say(&format!(
        "    Required skills: {}",
        opt.analysis.required_skills.join(", ")
    ))?;
    console.say(&format!("Results saved to: {}", saved.dir.display()))?;
    for path in saved.files.values().chain(saved.docx.iter()) {
        if let Some(name) = path.file_name() {
            console.say(&format!("    - {}", name.to_string_lossy()))?;
        }
    }
    if let Some(manifest) = &saved.manifest {
        console.say(&format!("    Manifest: {}", manifest.display()))?;
    }
    if !saved.is_complete() {
        console.say("Some outputs could not be written:")?;
    }
    for (file, reason) in &saved.failures {
        warn!(file = %file, "output not written");
        console.say(&format!("    ! {file} could not be written: {reason}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use clap::CommandFactory;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&console.out).into_owned()
    }

    fn config_in(dir: &Path) -> Config {
        Config {
            output_prefix: dir.join("run").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    fn output_dirs(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "resume-optimizer", "job.txt", "-r", "cv.docx", "--role", "Welder", "-c", "Acme", "-s", "3",
        ])
        .unwrap();
        assert_eq!(cli.job_description.as_deref(), Some("job.txt"));
        assert_eq!(cli.role.as_deref(), Some("Welder"));
        assert_eq!(cli.style, Some(ResumeStyle::Combined));

        let cli = Cli::try_parse_from(["resume-optimizer", "convert", "cv.docx", "-o", "cv.txt"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Convert { .. })));

        assert!(Cli::try_parse_from(["resume-optimizer", "-s", "4"]).is_err());
    }

    #[test]
    fn test_read_block_stops_at_double_blank_line() {
        let mut c = console("line one\n\nline three\n\n\nignored\n");
        assert_eq!(c.read_block().unwrap(), "line one\n\nline three");
        assert_eq!(c.read_line().unwrap().as_deref(), Some("ignored"));
    }

    #[test]
    fn test_menu_eof_picks_demo() {
        let mut c = console("");
        let (job, resume) = interactive_menu(&mut c, &Config::default()).unwrap();
        assert_eq!(job, DEMO_JOB);
        assert_eq!(resume, DEMO_RESUME);
        assert!(printed(&c).contains("demo mode"));
    }

    #[test]
    fn test_menu_manual_entry_after_invalid_choice() {
        let mut c = console("9\n2\nNeed a welder\n\n\nMike Rodriguez\nMIG welding\n\n\n");
        let (job, resume) = interactive_menu(&mut c, &Config::default()).unwrap();
        assert_eq!(job, "Need a welder");
        assert_eq!(resume, "Mike Rodriguez\nMIG welding");
        assert!(printed(&c).contains("Invalid choice"));
    }

    #[test]
    fn test_menu_paths_report_missing_file_then_retry() {
        let tmp = tempfile::tempdir().unwrap();
        let job = tmp.path().join("job.txt");
        let resume = tmp.path().join("resume.txt");
        fs::write(&job, "Hiring an electrician").unwrap();
        fs::write(&resume, "Sam Lee\nWiring").unwrap();

        let input = format!(
            "1\n{missing}\n1\n{job}\n{resume}\n",
            missing = tmp.path().join("missing.txt").display(),
            job = job.display(),
            resume = resume.display()
        );
        let mut c = console(&input);
        let (job_text, resume_text) = interactive_menu(&mut c, &Config::default()).unwrap();
        assert_eq!(job_text, "Hiring an electrician");
        assert_eq!(resume_text, "Sam Lee\nWiring");
        assert!(printed(&c).contains("Error: File not found"));
    }

    #[test]
    fn test_style_prompt_defaults_to_narrative() {
        assert_eq!(ask_style(&mut console("")).unwrap(), ResumeStyle::Narrative);
        assert_eq!(ask_style(&mut console("\n")).unwrap(), ResumeStyle::Narrative);
        assert_eq!(ask_style(&mut console("x\n2\n")).unwrap(), ResumeStyle::Standard);
    }

    #[test]
    fn test_missing_resume_creates_no_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["resume-optimizer", "Hiring a plumber", "-s", "1"]).unwrap();
        let err = run_with(cli, &config_in(tmp.path()), &mut console("")).unwrap_err();
        assert!(matches!(err, AppError::MissingInput("Resume content")));
        assert_eq!(output_dirs(tmp.path()), 0);
    }

    #[test]
    fn test_full_run_writes_outputs() {
        let tmp = tempfile::tempdir().unwrap();
        let resume = tmp.path().join("resume.txt");
        fs::write(&resume, DEMO_RESUME).unwrap();
        let cli = Cli::try_parse_from([
            "resume-optimizer",
            DEMO_JOB,
            "-r",
            resume.to_str().unwrap(),
            "--role",
            "Optical Engineer",
            "-s",
            "2",
        ])
        .unwrap();

        let mut c = console("");
        run_with(cli, &config_in(tmp.path()), &mut c).unwrap();

        let out = printed(&c);
        assert!(out.contains("Results saved to:"));
        assert!(out.contains("optimized_resume.docx"));
        // The résumé file plus one output directory.
        assert_eq!(output_dirs(tmp.path()), 2);
    }

    #[test]
    fn test_fields_subcommand_lists_catalog() {
        let cli = Cli::try_parse_from(["resume-optimizer", "fields"]).unwrap();
        let mut c = console("");
        run_with(cli, &Config::default(), &mut c).unwrap();
        let out = printed(&c);
        assert!(out.contains("optical_engineer"));
        assert!(out.contains("welder"));
    }

    #[test]
    fn test_fields_detect_prints_tag() {
        let cli = Cli::try_parse_from(["resume-optimizer", "fields", "--detect", "Marine Biologist"]).unwrap();
        let mut c = console("");
        run_with(cli, &Config::default(), &mut c).unwrap();
        assert!(printed(&c).starts_with("marine_biologist"));
        assert!(printed(&c).contains("Marine Biologist"));
    }

    #[test]
    fn test_report_error_writes_error_and_tip() {
        let mut out = Vec::new();
        report_error(&mut out, &AppError::MissingInput("Job description")).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error: "));
        assert!(lines[1].starts_with("Tip: "));

        let mut out = Vec::new();
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        report_error(&mut out, &AppError::Io(io)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_convert_subcommand() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.docx");
        let cli = Cli::try_parse_from(["resume-optimizer", "convert", missing.to_str().unwrap()]).unwrap();
        let err = run_with(cli, &Config::default(), &mut console("")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
