use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use hospi::{compute_scores, ObservationRecord, PdfOptions, RubricCatalog};

const EXIT_SUCCESS: i32 = 0;
const EXIT_RECORD: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Docx,
    Pdf,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Docx => "docx",
            Format::Pdf => "pdf",
            Format::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write an empty record for a profile or focus selection
    Init {
        /// Profile name from the config to take focus and weights from
        #[arg(short, long)]
        profile: Option<String>,

        /// Comma-separated module IDs (defaults to the whole rubric)
        #[arg(short, long, value_delimiter = ',')]
        focus: Vec<String>,

        /// Colleague name recorded in the form
        #[arg(long, default_value = "")]
        colleague: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print per-module averages and the weighted overall score
    Score {
        /// Record JSON written by `init` or `export`
        record: PathBuf,
    },
    /// Print the rubric: rating scale, suggested comments and all criteria
    Rubric,
    /// Render DOCX, PDF and JSON reports from a record
    Export {
        /// Record JSON written by `init` or `export`
        record: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Only render the listed formats (defaults to all three)
        #[arg(long, value_delimiter = ',')]
        formats: Vec<Format>,

        /// TTF with Unicode coverage for the PDF renderer; without it the PDF
        /// falls back to builtin fonts and ASCII transliteration
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "hospi")]
#[command(about = "Classroom observation scoring and report export", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/hospi/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let config_path = cli.config.clone().map(PathBuf::from);
    let config = match hospi::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config (including a catalog override) at startup
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalog = config.catalog();
    if cli.verbose {
        eprintln!(
            "Catalog '{}' with {} modules, {} profiles configured",
            catalog.report_title,
            catalog.modules.len(),
            config.profiles.len()
        );
    }

    match cli.command {
        Commands::Init {
            profile,
            focus,
            colleague,
            out,
        } => {
            let (focus, weights) = match profile {
                Some(name) => match config.profiles.get(&name) {
                    Some(profile) => (profile.focus.clone(), profile.weights.clone()),
                    None => {
                        eprintln!("Unknown profile '{}'.", name);
                        if !config.profiles.is_empty() {
                            eprintln!("Available profiles:");
                            for name in config.profiles.keys() {
                                eprintln!("  - {}", name);
                            }
                        }
                        std::process::exit(EXIT_CONFIG);
                    }
                },
                None => (focus, Default::default()),
            };

            let mut record = match ObservationRecord::for_focus(&catalog, &focus) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Record error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            record.date = chrono::Local::now().format("%Y-%m-%d").to_string();
            record.colleague = colleague;
            record.weights = weights;

            let bytes = match hospi::render_json(&record, &catalog) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Record error: {}", e);
                    std::process::exit(EXIT_RECORD);
                }
            };

            match out {
                Some(path) => {
                    if let Err(e) = write_atomic(&path, &bytes) {
                        eprintln!("Write error: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                    println!("Wrote {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout();
                    if stdout.write_all(&bytes).is_err() || writeln!(stdout).is_err() {
                        std::process::exit(EXIT_IO);
                    }
                }
            }
        }

        Commands::Score { record } => {
            let record = load_record(&record, &catalog, cli.verbose);
            let scores = compute_scores(&record);
            let use_colors = hospi::output::should_use_colors();
            println!(
                "{}",
                hospi::output::format_score_summary(&scores, &catalog, use_colors)
            );
        }

        Commands::Rubric => {
            let use_colors = hospi::output::should_use_colors();
            println!("{}", hospi::output::format_rubric(&catalog, use_colors));
        }

        Commands::Export {
            record: record_path,
            out_dir,
            formats,
            font,
        } => {
            let record = load_record(&record_path, &catalog, cli.verbose);
            let scores = compute_scores(&record);

            let selected: Vec<Format> = if formats.is_empty() {
                vec![Format::Docx, Format::Pdf, Format::Json]
            } else {
                formats
            };
            let pdf_options = PdfOptions { unicode_font: font };

            for format in selected {
                let result = match format {
                    Format::Docx => hospi::render_docx(&record, &catalog, &scores),
                    Format::Pdf => hospi::render_pdf(&record, &catalog, &scores, &pdf_options),
                    Format::Json => hospi::render_json(&record, &catalog),
                };
                let bytes = match result {
                    Ok(b) => b,
                    Err(e) => {
                        eprintln!("Render error ({}): {}", format.extension(), e);
                        std::process::exit(EXIT_RECORD);
                    }
                };

                let path = out_dir.join(export_file_name(&record, format));
                if let Err(e) = write_atomic(&path, &bytes) {
                    eprintln!("Write error: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
                if cli.verbose {
                    eprintln!("  {} bytes of {}", bytes.len(), format.extension());
                }
                println!("Wrote {}", path.display());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate a record file; exits with a listing of every problem
/// when the record does not match the catalog.
fn load_record(path: &Path, catalog: &RubricCatalog, verbose: bool) -> ObservationRecord {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to read record at {}: {}", path.display(), e);
            std::process::exit(EXIT_IO);
        }
    };

    let record = match hospi::parse_record(&bytes, catalog) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Record error: {}", e);
            std::process::exit(EXIT_RECORD);
        }
    };

    if let Err(errors) = hospi::validate_record(&record, catalog) {
        eprintln!("Record errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_RECORD);
    }

    if verbose {
        eprintln!(
            "Loaded record for '{}' with {} modules",
            record.colleague,
            record.modules.len()
        );
    }
    record
}

/// File naming convention: Hospitationsbogen_<colleague>_<date>.<ext>
fn export_file_name(record: &ObservationRecord, format: Format) -> String {
    format!(
        "Hospitationsbogen_{}_{}.{}",
        record.colleague.replace(' ', "_"),
        record.date,
        format.extension()
    )
}

/// Write report bytes atomically so a failed export never leaves a truncated
/// file behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
