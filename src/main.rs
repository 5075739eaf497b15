//! chaptext CLI entry point
//! Parses plain-text chapter files into structured content: title,
//! sections, figure/table references and key terms

use anyhow::Result;
use chaptext::commands::{
    extract_chapter_from_file, extract_reference_list, extract_section_list, extract_term_list,
    format_chapter_text, parse_multiple_chapters, validate_chapter, ChapterInput,
    ParsedChapterDto,
};
use chaptext::utils::{chapter_display_name, read_chapter_file};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chaptext",
    version,
    about = "Chapter text extraction for curriculum content"
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chapter file into its full structured form
    Parse {
        /// Path to the chapter text file
        file: String,
    },
    /// List the titled sections of a chapter file
    Sections {
        /// Path to the chapter text file
        file: String,
    },
    /// List the figure and table references of a chapter file
    References {
        /// Path to the chapter text file
        file: String,
    },
    /// List the key terms of a chapter file with their definitions
    Terms {
        /// Path to the chapter text file
        file: String,
    },
    /// Print the normalized chapter text
    Format {
        /// Path to the chapter text file
        file: String,
    },
    /// Check a chapter file for the structure the app expects
    Validate {
        /// Path to the chapter text file
        file: String,
    },
    /// Parse several chapter files in one run
    Batch {
        /// Paths to the chapter text files
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn print_chapter_summary(chapter: &ParsedChapterDto) {
    println!("Title: {}", chapter.title);
    println!("Sections: {}", chapter.total_sections);
    for section in &chapter.sections {
        println!("  - {}", section.title);
    }
    println!("References: {}", chapter.total_references);
    for reference in &chapter.references {
        println!("  - {} {}", reference.kind, reference.id);
    }
    println!("Key terms: {}", chapter.total_key_terms);
    for (term, definition) in &chapter.key_terms {
        println!("  - {}: {}", term, definition);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    match cli.command {
        Commands::Parse { file } => {
            let chapter = extract_chapter_from_file(&file)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chapter)?);
            } else {
                print_chapter_summary(&chapter);
            }
        }
        Commands::Sections { file } => {
            let content = read_chapter_file(&file)?;
            let sections = extract_section_list(&content)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for section in &sections {
                    println!("== {}", section.title);
                    if !section.content.is_empty() {
                        println!("{}", section.content);
                    }
                }
            }
        }
        Commands::References { file } => {
            let content = read_chapter_file(&file)?;
            let references = extract_reference_list(&content)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&references)?);
            } else {
                for reference in &references {
                    println!("{} {}", reference.kind, reference.id);
                }
            }
        }
        Commands::Terms { file } => {
            let content = read_chapter_file(&file)?;
            let terms = extract_term_list(&content)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&terms)?);
            } else {
                for (term, definition) in &terms {
                    println!("{}: {}", term, definition);
                }
            }
        }
        Commands::Format { file } => {
            let content = read_chapter_file(&file)?;
            println!("{}", format_chapter_text(&content)?);
        }
        Commands::Validate { file } => {
            let content = read_chapter_file(&file)?;
            let report = validate_chapter(&content)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}: {} sections, {} references, {} key terms",
                    if report.is_valid { "ok" } else { "invalid" },
                    report.section_count,
                    report.reference_count,
                    report.key_term_count
                );
                for issue in &report.issues {
                    println!("  warning: {}", issue);
                }
            }
            if !report.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Batch { files } => {
            let mut inputs = Vec::new();
            for file in &files {
                inputs.push(ChapterInput {
                    content: read_chapter_file(file)?,
                    source_path: Some(file.clone()),
                });
            }

            let chapters = parse_multiple_chapters(inputs)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chapters)?);
            } else {
                for (file, chapter) in files.iter().zip(&chapters) {
                    println!(
                        "{}: '{}' ({} sections, {} references, {} key terms)",
                        chapter_display_name(file),
                        chapter.title,
                        chapter.total_sections,
                        chapter.total_references,
                        chapter.total_key_terms
                    );
                }
            }
        }
    }

    Ok(())
}
