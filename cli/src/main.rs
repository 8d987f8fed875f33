//! resumark CLI - resume markdown rendering and export tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumark::export::{today, PdfExporter};
use resumark::{
    export_markdown, parse_file_with_options, ExportOptions, JsonFormat, LearningPath,
    MarkdownParser, ModuleUpdate, ParseOptions, RenderOptions, ResourceUpdate, ResumeDocument,
};

#[derive(Parser)]
#[command(name = "resumark")]
#[command(author = "QualifyAI")]
#[command(version)]
#[command(about = "Render resume markdown to HTML, PDF, and JSON", long_about = None)]
struct Cli {
    /// Input markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export markdown, PDF, HTML and JSON into a directory
    Convert {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Date used in export file names (YYYY-MM-DD, default today)
        #[arg(long, env = "RESUMARK_DATE")]
        date: Option<NaiveDate>,

        /// Extra job-detail tokens (e.g. 2025)
        #[arg(long = "token", value_name = "TOKEN")]
        tokens: Vec<String>,
    },

    /// Render screen HTML
    Html {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a complete HTML page with stylesheet
        #[arg(short, long)]
        standalone: bool,

        /// CSS class prefix
        #[arg(long, default_value = "resume")]
        class_prefix: String,

        /// Extra job-detail tokens (e.g. 2025)
        #[arg(long = "token", value_name = "TOKEN")]
        tokens: Vec<String>,
    },

    /// Export a paginated PDF
    Pdf {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Date used in the file name (YYYY-MM-DD, default today)
        #[arg(long, env = "RESUMARK_DATE")]
        date: Option<NaiveDate>,

        /// Off-screen canvas width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Pixel density
        #[arg(long, default_value = "2")]
        scale: f32,

        /// Extra job-detail tokens (e.g. 2025)
        #[arg(long = "token", value_name = "TOKEN")]
        tokens: Vec<String>,
    },

    /// Export the markdown file, or normalize it with --normalize
    #[command(alias = "md")]
    Markdown {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Date used in the file name (YYYY-MM-DD, default today)
        #[arg(long, env = "RESUMARK_DATE")]
        date: Option<NaiveDate>,

        /// Print the re-serialized document instead of exporting the source
        #[arg(long)]
        normalize: bool,
    },

    /// Convert the document model to JSON
    Json {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Update a learning path JSON file and show progress
    Learning {
        /// Learning path JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Mark a module completed
        #[arg(long, value_name = "MODULE")]
        complete_module: Vec<String>,

        /// Mark a resource completed (MODULE/RESOURCE)
        #[arg(long, value_name = "MODULE/RESOURCE")]
        complete_resource: Vec<String>,

        /// Write the updated path back to the file
        #[arg(short, long)]
        write: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            date,
            tokens,
        }) => cmd_convert(&input, output.as_deref(), date, tokens),
        Some(Commands::Html {
            input,
            output,
            standalone,
            class_prefix,
            tokens,
        }) => cmd_html(&input, output.as_deref(), standalone, &class_prefix, tokens),
        Some(Commands::Pdf {
            input,
            output,
            date,
            width,
            scale,
            tokens,
        }) => cmd_pdf(&input, output.as_deref(), date, width, scale, tokens),
        Some(Commands::Markdown {
            input,
            output,
            date,
            normalize,
        }) => cmd_markdown(&input, output.as_deref(), date, normalize),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Learning {
            input,
            complete_module,
            complete_resource,
            write,
        }) => cmd_learning(&input, &complete_module, &complete_resource, write),
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), None, Vec::new())
            } else {
                println!("{}", "Usage: resumark <FILE> [OUTPUT]".yellow());
                println!("       resumark --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn parse_options(tokens: Vec<String>) -> ParseOptions {
    tokens
        .into_iter()
        .fold(ParseOptions::new(), |options, token| options.with_job_detail_token(token))
}

fn load(input: &Path, tokens: Vec<String>) -> resumark::Result<ResumeDocument> {
    let doc = parse_file_with_options(input, parse_options(tokens))?;
    log::debug!(
        "Parsed {}: {} section(s), {} entr(ies)",
        input.display(),
        doc.sections.len(),
        doc.entry_count()
    );
    Ok(doc)
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    date: Option<NaiveDate>,
    tokens: Vec<String>,
) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    let date = date.unwrap_or_else(today);

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing resume...");
    let source = fs::read_to_string(input)?;
    let doc = MarkdownParser::with_options(source.as_str(), parse_options(tokens)).parse();
    pb.inc(1);

    pb.set_message("Exporting markdown...");
    let markdown = export_markdown(&source, date).write_to_dir(&output_dir)?;
    pb.inc(1);

    pb.set_message("Exporting PDF...");
    let pdf = PdfExporter::default()
        .export(&doc, date)?
        .ok_or("PDF export already in progress")?
        .write_to_dir(&output_dir)?;
    pb.inc(1);

    pb.set_message("Rendering HTML and JSON...");
    let html = resumark::render::to_html(&doc, &RenderOptions::new().with_standalone(true))?;
    fs::write(output_dir.join("resume.html"), &html)?;
    let json = resumark::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("resume.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for path in [&markdown, &pdf] {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", "├─".dimmed(), name);
    }
    println!("  {} resume.html", "├─".dimmed());
    println!("  {} resume.json", "└─".dimmed());

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    standalone: bool,
    class_prefix: &str,
    tokens: Vec<String>,
) -> CliResult {
    let doc = load(input, tokens)?;

    let options = RenderOptions::new()
        .with_standalone(standalone)
        .with_class_prefix(class_prefix);
    let html = resumark::render::to_html(&doc, &options)?;

    if let Some(path) = output {
        fs::write(path, &html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

fn cmd_pdf(
    input: &Path,
    output: Option<&Path>,
    date: Option<NaiveDate>,
    width: u32,
    scale: f32,
    tokens: Vec<String>,
) -> CliResult {
    let doc = load(input, tokens)?;

    let options = ExportOptions::new().with_width(width).with_scale(scale);
    let exporter = PdfExporter::new(options);
    let artifact = exporter
        .export(&doc, date.unwrap_or_else(today))?
        .ok_or("PDF export already in progress")?;

    let path = artifact.write_to_dir(output.unwrap_or(Path::new(".")))?;
    println!(
        "{} {} ({} bytes)",
        "Saved to".green(),
        path.display(),
        artifact.len()
    );

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    date: Option<NaiveDate>,
    normalize: bool,
) -> CliResult {
    let source = fs::read_to_string(input)?;

    if normalize {
        let doc = resumark::parse_markdown(&source);
        println!("{}", resumark::render::to_markdown(&doc));
        return Ok(());
    }

    let artifact = export_markdown(&source, date.unwrap_or_else(today));
    let path = artifact.write_to_dir(output.unwrap_or(Path::new(".")))?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let doc = resumark::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = resumark::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let doc = resumark::parse_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(title) = doc.title() {
        println!("{}: {}", "Name".bold(), title);
    }
    if let Some(contact) = doc.contact() {
        println!("{}: {}", "Contact".bold(), contact.contact_tokens().join(", "));
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &doc.sections {
        let layout = if section.is_chronological() {
            "chronological"
        } else {
            "flat"
        };
        println!(
            "{} {} ({}, {} entries, {} loose lines)",
            "•".dimmed(),
            section.display_title().bold(),
            layout,
            section.entries.len(),
            section.loose_content.len()
        );
    }

    println!();
    println!("{}: {}", "Entries".bold(), doc.entry_count());
    println!("{}: {}", "Bullets".bold(), doc.bullet_count());

    let pdf = PdfExporter::default().render(&doc)?;
    println!("{}: {}", "PDF pages".bold(), pdf.page_count);

    Ok(())
}

fn cmd_learning(
    input: &Path,
    modules: &[String],
    resources: &[String],
    write: bool,
) -> CliResult {
    let mut path: LearningPath = serde_json::from_str(&fs::read_to_string(input)?)?;

    for module in modules {
        path.update_module(module, ModuleUpdate::completed(true))?;
    }
    for spec in resources {
        let (module, resource) = spec
            .split_once('/')
            .ok_or_else(|| format!("Expected MODULE/RESOURCE, got '{}'", spec))?;
        path.update_resource(module, resource, ResourceUpdate::completed(true))?;
    }

    println!("{}", path.title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for module in &path.modules {
        let mark = if module.completed {
            "✓".green()
        } else {
            "·".dimmed()
        };
        let done = module.resources.iter().filter(|r| r.completed).count();
        println!(
            "{} {} ({}/{} resources)",
            mark,
            module.title,
            done,
            module.resources.len()
        );
    }
    println!("\n{}: {:.0}%", "Progress".bold(), path.progress() * 100.0);

    if write {
        fs::write(input, serde_json::to_string_pretty(&path)?)?;
        println!("{} {}", "Saved to".green(), input.display());
    }

    Ok(())
}
