pub mod mirror;
pub mod rule;

use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::cli::{Args, MirrorMode};
use crate::utils::{error_println, has_valid_extension, validate_inputs, verbose_println};

pub use rule::{CornerHighlight, PixelRule};

/// Validate the configuration and create the output directory, in that
/// order. A missing input directory is the program's only fatal error and
/// must never leave a freshly created output directory behind; dry runs
/// create nothing at all.
pub fn prepare_run(args: &Args) -> Result<()> {
    validate_inputs(args)?;
    if !args.dry_run {
        std::fs::create_dir_all(&args.output_dir)
            .context("Failed to create output directory")?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub mirror: MirrorMode,
    pub extensions: Vec<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

pub struct ProcessingEngine {
    config: ProcessingConfig,
    rule: Box<dyn PixelRule>,
}

impl ProcessingEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        Self::with_rule(config, Box::new(CornerHighlight))
    }

    /// Build an engine with a caller-supplied remapping rule
    pub fn with_rule(config: ProcessingConfig, rule: Box<dyn PixelRule>) -> Self {
        Self { config, rule }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Discover all image files directly inside the input directory.
    /// The listing is non-recursive; files in subdirectories are ignored.
    /// An unreadable entry is reported and skipped, never fatal.
    pub fn discover_images(&self, input_dir: &Path) -> Vec<PathBuf> {
        verbose_println(
            self.config.verbose,
            &format!("Scanning directory: {}", input_dir.display()),
        );

        let mut image_files = Vec::new();

        let walker = WalkDir::new(input_dir).follow_links(false).max_depth(1);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error_println(&format!("Failed to read directory entry: {}", e));
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && has_valid_extension(path, &self.config.extensions) {
                image_files.push(path.to_path_buf());
            }
        }

        // Sort for consistent processing order
        image_files.sort();

        verbose_println(
            self.config.verbose,
            &format!("Found {} image files", image_files.len()),
        );
        image_files
    }

    /// Process all discovered files sequentially. A failure on one file is
    /// recorded in its result slot and never aborts the rest of the batch.
    pub fn process_batch(
        &self,
        image_files: &[PathBuf],
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Vec<Result<ProcessingResult>> {
        let mut results = Vec::with_capacity(image_files.len());

        for input_path in image_files {
            if let Some(filename) = input_path.file_name().and_then(|f| f.to_str()) {
                progress.set_message(format!("Processing {}", filename));
            }

            results.push(self.process_single_image(input_path, output_dir));
            progress.inc(1);
        }

        results
    }

    /// Run one image through the full pipeline:
    /// decode -> normalize to RGBA -> mirror -> pixel remap -> encode.
    /// The output keeps the input's filename (and therefore its format).
    pub fn process_single_image(
        &self,
        input_path: &Path,
        output_dir: &Path,
    ) -> Result<ProcessingResult> {
        let start = Instant::now();

        verbose_println(
            self.config.verbose,
            &format!("Processing: {}", input_path.display()),
        );

        // Decode and normalize: every source color type becomes 8-bit RGBA
        let img = image::open(input_path)
            .with_context(|| format!("Failed to decode image: {}", input_path.display()))?;
        let mut rgba_img = img.to_rgba8();

        if self.config.mirror != MirrorMode::None {
            verbose_println(
                self.config.verbose,
                &format!("  Mirroring {:?}", self.config.mirror),
            );
        }
        mirror::apply_mirror(&mut rgba_img, self.config.mirror);

        // Rule coordinates are in mirrored space: mirror first, then remap
        let pixels_replaced = rule::apply_rule(&mut rgba_img, self.rule.as_ref());
        verbose_println(
            self.config.verbose,
            &format!(
                "  Rule '{}' replaced {} pixels",
                self.rule.name(),
                pixels_replaced
            ),
        );

        let file_name = input_path
            .file_name()
            .with_context(|| format!("Input path has no filename: {}", input_path.display()))?;
        let output_path = output_dir.join(file_name);

        if self.config.dry_run {
            verbose_println(
                self.config.verbose,
                &format!("  Dry run: would save to {}", output_path.display()),
            );
        } else {
            save_rgba_image(&rgba_img, &output_path)?;
            verbose_println(
                self.config.verbose,
                &format!("  Saved to: {}", output_path.display()),
            );
        }

        Ok(ProcessingResult {
            input_path: input_path.to_path_buf(),
            output_path,
            width: rgba_img.width(),
            height: rgba_img.height(),
            pixels_replaced,
            processing_time: start.elapsed(),
        })
    }
}

/// Encode an RGBA buffer to the given path, inferring the format from the
/// extension. JPEG has no alpha channel, so those outputs are flattened to
/// RGB; every other recognized format is written as RGBA.
fn save_rgba_image(img: &RgbaImage, output_path: &Path) -> Result<()> {
    let is_jpeg =
        has_valid_extension(output_path, &["jpg".to_string(), "jpeg".to_string()]);

    let result = if is_jpeg {
        DynamicImage::ImageRgba8(img.clone()).to_rgb8().save(output_path)
    } else {
        img.save(output_path)
    };

    result.with_context(|| format!("Failed to encode image: {}", output_path.display()))
}

#[derive(Debug)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels_replaced: u64,
    pub processing_time: std::time::Duration,
}
