use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use castlint::{LangStandard, Lexer, LintSession};

#[derive(Parser)]
#[command(name = "castlint")]
#[command(author, version, about = "A C/C++ literal cast linter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Human readable terminal diagnostics (default)
    #[value(name = "text")]
    Text,
    /// Machine readable JSON findings
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a source file and report casts of literal constants
    Check {
        /// The source file to check
        input: PathBuf,

        /// Language standard the source is compiled as
        #[arg(long = "std", value_enum, default_value = "c++23")]
        standard: LangStandard,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Dump tokens to stdout
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Apply all safe literal rewrites to a source file
    Fix {
        /// The source file to fix
        input: PathBuf,

        /// Language standard the source is compiled as
        #[arg(long = "std", value_enum, default_value = "c++23")]
        standard: LangStandard,

        /// Write the fixed source here instead of rewriting in place
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Print the fixed source to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Check {
            input,
            standard,
            format,
            dump_tokens,
        } => check(input, standard, format, dump_tokens),
        Commands::Fix {
            input,
            standard,
            output,
            stdout,
        } => fix(input, standard, output, stdout),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn check(
    input: PathBuf,
    standard: LangStandard,
    format: OutputFormat,
    dump_tokens: bool,
) -> Result<()> {
    log::info!("Checking {:?} as {}", input, standard);

    let mut session = LintSession::new(&input)?;

    if dump_tokens {
        println!("{}", "=== Tokens ===".blue().bold());
        for (i, token) in Lexer::new(&session.source).enumerate() {
            println!("{:4}: {} @ {:?}", i, token.token, token.span.range());
        }
        println!();
    }

    let findings = session.lint(standard);

    if session.has_errors() {
        session.report_errors()?;
    }

    match format {
        OutputFormat::Text => {
            session.report_findings(&findings)?;
            if findings.is_empty() {
                println!("{}: No literal casts found", "success".green().bold());
            } else {
                println!(
                    "{}: {} literal cast(s) found",
                    "warning".yellow().bold(),
                    findings.len()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&findings)?);
        }
    }

    if !findings.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn fix(
    input: PathBuf,
    standard: LangStandard,
    output: Option<PathBuf>,
    to_stdout: bool,
) -> Result<()> {
    log::info!("Fixing {:?} as {}", input, standard);

    let mut session = LintSession::new(&input)?;
    let findings = session.lint(standard);

    if session.has_errors() {
        session.report_errors()?;
    }

    let fixable = findings.iter().filter(|f| f.fix.is_some()).count();
    let fixed = session.fixed_source(&findings);

    if to_stdout {
        print!("{}", fixed);
        return Ok(());
    }

    let target = output.unwrap_or(input);
    write_atomically(&target, &fixed)?;
    println!(
        "{}: Applied {} fix(es) to {:?}",
        "success".green().bold(),
        fixable,
        target
    );

    Ok(())
}

/// Replace the target file contents without leaving a torn file behind
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .context("Failed to create temporary file for in-place fix")?;
    tmp.write_all(contents.as_bytes())
        .context("Failed to write fixed source")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {:?}", path))?;

    Ok(())
}
