use anyhow::Result;
use clap::Parser;
use console::style;
use std::time::Instant;

mod cli;
mod config_file;
mod image_processing;
mod utils;

use cli::{Args, MirrorMode};
use image_processing::{prepare_run, ProcessingConfig, ProcessingEngine};
use utils::{create_progress_bar, format_duration, verbose_println};

fn main() -> Result<()> {
    let start_time = Instant::now();
    let mut args = Args::parse();

    // Print banner
    println!("{}", style("Tile Processor").bold().blue());
    println!(
        "{}",
        style("Batch image mirroring and pixel remapping").dim()
    );
    println!();

    args.load_and_merge_config()?;

    let config = ProcessingConfig {
        mirror: args.mirror,
        extensions: args.parse_extensions(),
        verbose: args.verbose,
        dry_run: args.dry_run,
    };

    if config.verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Input folder: {}", args.input_dir.display());
        println!("  Output folder: {}", args.output_dir.display());
        println!("  Mirror mode: {}", mirror_label(config.mirror));
        println!("  Extensions: {:?}", config.extensions);
        if config.dry_run {
            println!("  Dry run mode: enabled (simulation only - no files will be created)");
        }
        println!();
    }

    // Fatal configuration check, then output directory creation. A missing
    // input directory exits non-zero before anything is written.
    prepare_run(&args)?;
    if config.dry_run {
        verbose_println(
            config.verbose,
            "Dry run mode: Skipping output directory creation",
        );
    }

    let dry_run_mode = config.dry_run;
    let engine = ProcessingEngine::new(config);

    let image_files = engine.discover_images(&args.input_dir);
    println!(
        "{}",
        style(format!("Found {} images", image_files.len())).green()
    );

    if image_files.is_empty() {
        println!(
            "{}",
            style("No images found with specified extensions").red()
        );
        return Ok(());
    }

    let progress = create_progress_bar(image_files.len() as u64);
    progress.set_message("Processing images");

    let results = engine.process_batch(&image_files, &args.output_dir, &progress);

    progress.finish_with_message("Processing complete");
    println!();

    // Print results summary
    let successful = results.iter().filter(|r| r.is_ok()).count();
    let failed = results.len() - successful;
    let total_time = start_time.elapsed();
    let total_pixels_replaced: u64 = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|r| r.pixels_replaced)
        .sum();

    let header = if dry_run_mode {
        style("Dry Run Results Summary:").bold().cyan()
    } else {
        style("Results Summary:").bold().green()
    };
    println!("{}", header);

    let processed_label = if dry_run_mode {
        "Would be processed"
    } else {
        "Successfully processed"
    };
    println!("  {}: {}", processed_label, style(successful).bold().green());
    if failed > 0 {
        println!("  Failed: {}", style(failed).bold().red());
    }
    println!(
        "  Pixels replaced by rule: {}",
        style(total_pixels_replaced).bold().cyan()
    );

    if successful > 0 {
        println!();
        println!("{}", style("Processed files:").bold().blue());
        for (i, result) in results.iter().filter_map(|r| r.as_ref().ok()).enumerate() {
            let filename = result
                .input_path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("unknown");
            println!(
                "  {}: {} [{}x{}] - {} pixels replaced ({})",
                style(format!("#{}", i + 1)).dim(),
                style(filename).bold(),
                result.width,
                result.height,
                result.pixels_replaced,
                format_duration(result.processing_time)
            );
        }
    }

    println!();
    println!("{}", style("Performance:").bold().blue());
    println!(
        "  Total processing time: {}",
        style(format_duration(total_time)).bold()
    );
    println!(
        "  Average time per image: {}",
        style(format_duration(total_time / image_files.len() as u32)).dim()
    );

    println!();
    let output_header = if dry_run_mode {
        style("Output files (would be created):").bold().cyan()
    } else {
        style("Output files:").bold().green()
    };
    println!("{}", output_header);
    println!("  All files: {}", args.output_dir.display());

    if failed > 0 {
        println!();
        println!("{}", style("Errors encountered:").bold().red());
        let mut error_count = 0;
        for (i, result) in results.iter().enumerate() {
            if let Err(e) = result {
                error_count += 1;
                let filename = image_files[i]
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("unknown");
                println!(
                    "  {}: {} - {:#}",
                    style(format!("#{}", error_count)).dim(),
                    style(filename).bold().red(),
                    e
                );
            }
        }

        println!();
        println!(
            "{}",
            style(format!(
                "{} errors occurred during processing",
                error_count
            ))
            .bold()
            .yellow()
        );
        println!("  Check image files and try again with --verbose for more details");
    }

    // Per-file failures do not affect the exit status
    Ok(())
}

fn mirror_label(mode: MirrorMode) -> &'static str {
    match mode {
        MirrorMode::None => "none",
        MirrorMode::Horizontal => "horizontal",
        MirrorMode::Vertical => "vertical",
    }
}
