use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg} ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Validate command line arguments. The input directory check is the only
/// fatal error in the program; everything past it is recovered per file.
pub fn validate_inputs(args: &Args) -> Result<()> {
    if !args.input_dir.exists() {
        return Err(anyhow::anyhow!(
            "Input directory does not exist: {}",
            args.input_dir.display()
        ));
    }
    if !args.input_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Input path is not a directory: {}",
            args.input_dir.display()
        ));
    }

    let extensions = args.parse_extensions();
    if extensions.is_empty() {
        return Err(anyhow::anyhow!("No valid extensions specified"));
    }

    Ok(())
}

/// Check if a filename ends (case-insensitively) with one of the specified
/// extensions. Suffix matching, not `Path::extension`: a dotfile named
/// `.png` still counts as a PNG.
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => {
            let name = name.to_lowercase();
            extensions.iter().any(|ext| name.ends_with(&format!(".{}", ext)))
        }
        None => false,
    }
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print error message
pub fn error_println(message: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), message);
}
