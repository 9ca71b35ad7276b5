use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use eternals_rs::logging::init_logging;
use eternals_rs::prelude::*;

/// Exit code when a scan is cut short by Ctrl-C (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(name = "eternals", version)]
#[command(about = "Filesystem housekeeping: duplicates, bulk remove/rename, temp cleanup, video runtimes", long_about = None)]
struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find files with identical content
    Dupes(DupesArgs),
    /// Delete files matching name criteria
    Remove(RemoveArgs),
    /// Rename files matching name criteria
    Rename(RenameArgs),
    /// Delete the contents of the system temporary directory
    ClearTemp,
    /// Total the runtime of every video under a directory
    VideoLength(VideoLengthArgs),
}

#[derive(Args)]
struct DupesArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Hash files on a worker pool
    #[arg(short, long)]
    multiprocessing: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long, requires = "multiprocessing")]
    workers: Option<usize>,

    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the report file as JSON
    #[arg(long, requires = "output")]
    json: bool,

    /// No progress bar
    #[arg(long)]
    batch: bool,
}

#[derive(Args)]
struct VideoLengthArgs {
    /// Directory to search for .mp4, .avi and .mkv files
    directory: PathBuf,

    /// List each video with its runtime and size
    #[arg(long)]
    files: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// No progress bar
    #[arg(long)]
    batch: bool,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct CriteriaArgs {
    /// Exact file name
    #[arg(short, long)]
    filename: Option<String>,

    /// File name suffix, e.g. .log
    #[arg(short, long)]
    extension: Option<String>,

    /// Start of file name
    #[arg(short = 's', long = "startname")]
    start_name: Option<String>,
}

impl From<CriteriaArgs> for FileCriteria {
    fn from(args: CriteriaArgs) -> Self {
        FileCriteria {
            filename: args.filename,
            extension: args.extension,
            start_name: args.start_name,
        }
    }
}

#[derive(Args)]
struct RemoveArgs {
    /// Target directory (default: current directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    #[command(flatten)]
    criteria: CriteriaArgs,
}

#[derive(Args)]
struct RenameArgs {
    /// Target directory (default: current directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    #[command(flatten)]
    criteria: CriteriaArgs,

    /// New file name, without extension
    #[arg(short, long = "newname")]
    new_name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Dupes(args) => run_dupes(args, cli.quiet),
        Command::Remove(args) => run_remove(args),
        Command::Rename(args) => run_rename(args),
        Command::ClearTemp => run_clear_temp(),
        Command::VideoLength(args) => run_video_length(args, cli.quiet),
    }
}

fn run_dupes(args: DupesArgs, quiet: bool) -> Result<()> {
    let shutdown_requested = install_shutdown_handler()?;

    println!("{}", "Starting, please wait...".green());
    if args.multiprocessing {
        println!("{}", "Multiprocessing: ON.".cyan());
    } else {
        println!("{}", "Multiprocessing: OFF.".cyan());
    }

    let progress = progress_bar(args.batch || quiet)?;

    let mut options = if args.multiprocessing {
        ScanOptions::parallel()
    } else {
        ScanOptions::sequential()
    }
    .with_shutdown_flag(shutdown_requested)
    .with_progress(progress.clone());
    options.workers = args.workers;

    let report = scan_directory(&args.directory, &options)
        .with_context(|| format!("Failed to scan {}", args.directory.display()))?;
    progress.finish_and_clear();

    print_lines(&render_duplicates(&report.digests))?;
    print_lines(&render_summary(&report))?;

    if let Some(output) = &args.output {
        if args.json {
            write_json_report(output, &report)?;
        } else {
            write_report(output, &report)?;
        }
        println!("Report saved to: {}", output.display());
    }

    if report.interrupted {
        std::process::exit(EXIT_INTERRUPTED);
    }

    Ok(())
}

fn run_video_length(args: VideoLengthArgs, quiet: bool) -> Result<()> {
    let shutdown_requested = install_shutdown_handler()?;
    let progress = progress_bar(args.batch || quiet)?;

    let mut options = ScanOptions::parallel()
        .with_shutdown_flag(shutdown_requested)
        .with_progress(progress.clone());
    options.workers = args.workers;

    let report = measure_videos(&args.directory, &options)
        .with_context(|| format!("Failed to search {}", args.directory.display()))?;
    progress.finish_and_clear();

    if args.files {
        print_lines(&render_video_table(&report))?;
    }
    print_lines(&render_runtime_summary(&report))?;

    if report.interrupted {
        std::process::exit(EXIT_INTERRUPTED);
    }

    Ok(())
}

fn run_remove(args: RemoveArgs) -> Result<()> {
    let dir = target_directory(args.directory)?;
    let files = collect_candidates(&dir, args.criteria.into())?;

    println!("{}", format!("Found {} file(s) to delete.", files.len()).yellow());
    if files.is_empty() {
        println!("{}", "No files found matching the specified criteria.".green());
        return Ok(());
    }

    println!("{}", "Files to delete:".red());
    for file in &files {
        println!("{}", file.display().to_string().red());
    }

    if !ask_to_continue()? {
        println!("{}", "Aborted. No files were deleted.".green());
        return Ok(());
    }

    let summary = remove_files(&files);
    for applied in &summary.applied {
        println!("{}", format!("Deleted file: {}", applied.from.display()).green());
    }
    print_failures("Error deleting file", &summary.failures);
    println!(
        "{}",
        format!("Total files deleted: {}", summary.success_count()).yellow()
    );

    Ok(())
}

fn run_rename(args: RenameArgs) -> Result<()> {
    let dir = target_directory(args.directory)?;
    let files = collect_candidates(&dir, args.criteria.into())?;

    println!("{}", format!("Found {} file(s) to rename.", files.len()).yellow());
    if files.is_empty() {
        println!("{}", "No files found matching the specified criteria.".yellow());
        return Ok(());
    }

    println!("Files to rename:");
    for file in &files {
        println!(
            "{} -> {}",
            file.display(),
            renamed_path(file, &args.new_name).display()
        );
    }

    if !ask_to_continue()? {
        println!("{}", "Aborted. No files were renamed.".yellow());
        return Ok(());
    }

    let summary = rename_files(&files, &args.new_name);
    for applied in &summary.applied {
        if let Some(to) = &applied.to {
            println!(
                "{}",
                format!("Renamed file: {} to {}", applied.from.display(), to.display()).green()
            );
        }
    }
    print_failures("Error renaming file", &summary.failures);
    println!(
        "{}",
        format!("Total files renamed: {}", summary.success_count()).yellow()
    );

    Ok(())
}

fn run_clear_temp() -> Result<()> {
    let temp_dir = env::temp_dir();
    let size = eternals_rs::actions::directory_size(&temp_dir);

    println!("Temporary directory: {}", temp_dir.display());
    println!(
        "{}",
        format!("Current size: {:.2} MB", size as f64 / (1024.0 * 1024.0)).yellow()
    );

    if !ask_to_continue()? {
        println!("{}", "Aborted. Nothing was removed.".green());
        return Ok(());
    }

    let summary = clear_directory(&temp_dir)
        .with_context(|| format!("Temporary directory not found: {}", temp_dir.display()))?;

    print_failures("Error removing file", &summary.file_failures);
    print_failures("Error removing directory", &summary.dir_failures);

    println!("Temporary directory cleared.");
    println!("{}", format!("Files deleted: {}", summary.files_deleted).green());
    println!(
        "{}",
        format!("Files failed to delete: {}", summary.file_failures.len()).red()
    );
    println!("{}", format!("Directories deleted: {}", summary.dirs_deleted).green());
    println!(
        "{}",
        format!("Directories failed to delete: {}", summary.dir_failures.len()).red()
    );
    println!(
        "{}",
        format!("Space freed: {:.2} MB", summary.freed_megabytes()).yellow()
    );

    Ok(())
}

/// Raise the returned flag on Ctrl-C so walks and pools stop picking up
/// new files
fn install_shutdown_handler() -> Result<Arc<AtomicBool>> {
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();

    ctrlc::set_handler(move || {
        eprintln!("\nShutdown requested. Finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    Ok(shutdown_requested)
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn target_directory(directory: Option<PathBuf>) -> Result<PathBuf> {
    match directory {
        Some(dir) => Ok(dir),
        None => env::current_dir().context("Failed to read current directory"),
    }
}

fn collect_candidates(dir: &Path, criteria: FileCriteria) -> Result<Vec<PathBuf>> {
    let collected = collect_matching(dir, &criteria)
        .with_context(|| format!("Failed to search {}", dir.display()))?;
    print_failures("Could not read", &collected.failures);
    Ok(collected.files)
}

fn ask_to_continue() -> Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let prompt = "Do you want to continue?".yellow().to_string();
    confirm(&prompt, &mut stdin.lock(), &mut stdout).context("Failed to read confirmation")
}

fn print_failures(label: &str, failures: &[FileFailure]) {
    for failure in failures {
        eprintln!(
            "{}",
            format!("{}: {} - {}", label, failure.path.display(), failure.message).red()
        );
    }
}

/// Console sink for formatted report lines
fn print_lines(lines: &[ReportLine]) -> io::Result<()> {
    write_lines(&mut io::stdout().lock(), lines)
}

fn write_lines<W: Write>(out: &mut W, lines: &[ReportLine]) -> io::Result<()> {
    for line in lines {
        let styled = match line.kind {
            LineKind::Heading => line.text.yellow(),
            LineKind::Digest => line.text.cyan(),
            LineKind::Member | LineKind::Success => line.text.green(),
            LineKind::Failure => line.text.red(),
            LineKind::Summary => line.text.normal(),
            LineKind::Blank => {
                writeln!(out)?;
                continue;
            }
        };
        writeln!(out, "{}", styled)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_lines_emits_each_line() {
        colored::control::set_override(false);
        let lines = vec![
            ReportLine::new(LineKind::Heading, "Duplicate files:"),
            ReportLine::blank(),
            ReportLine::new(LineKind::Summary, "Files hashed: 2"),
        ];

        let mut out = Vec::new();
        write_lines(&mut out, &lines).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Duplicate files:\n\nFiles hashed: 2\n"
        );
    }

    #[test]
    fn test_write_lines_propagates_write_errors() {
        let lines = vec![ReportLine::new(LineKind::Summary, "Files hashed: 0")];
        let err = write_lines(&mut ClosedPipe, &lines).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
