use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MirrorMode {
    /// Leave the pixel grid as-is
    #[value(name = "none")]
    None,
    /// Flip left-right: output (x, y) = input (W-1-x, y)
    #[value(name = "horizontal")]
    Horizontal,
    /// Flip top-bottom: output (x, y) = input (x, H-1-y)
    #[value(name = "vertical")]
    Vertical,
}

#[derive(Parser, Debug)]
#[command(
    name = "tile-processor",
    about = "Batch tile image processor with mirroring and per-pixel color remapping",
    long_about = "
Tile Processor

Reads every recognized image directly inside an input directory, optionally
mirrors it horizontally or vertically, applies a per-pixel color remapping
rule, and writes the result to the output directory under the same filename.
Files that fail to decode or encode are reported and skipped; the rest of the
batch still runs.

Example Usage:
  # Mirror all tiles horizontally with the default corner-highlight rule
  tile-processor -i ./input_tiles -o ./output_tiles -m horizontal

  # No mirroring, verbose per-file output
  tile-processor -i ./input_tiles -o ./output_tiles --verbose

  # Only process PNG and BMP files
  tile-processor -i ./tiles -o ./out --extensions png,bmp

  # Load settings from a JSON config file (CLI flags still win)
  tile-processor --config ./tiles.json

  # Simulate a run without writing any files
  tile-processor -i ./tiles -o ./out -m vertical --dry-run --verbose"
)]
pub struct Args {
    /// Input directory containing the original tile images
    #[arg(
        short = 'i',
        long = "input",
        default_value = "./input_tiles",
        value_name = "DIR"
    )]
    pub input_dir: PathBuf,

    /// Output directory for processed images (created if absent)
    #[arg(
        short = 'o',
        long = "output",
        default_value = "./output_tiles",
        value_name = "DIR"
    )]
    pub output_dir: PathBuf,

    /// Mirroring applied to every image before pixel remapping
    #[arg(short = 'm', long = "mirror", default_value = "none")]
    pub mirror: MirrorMode,

    /// Comma-separated list of image extensions to process
    #[arg(long = "extensions", default_value = "png,jpg,jpeg,bmp,gif,tiff")]
    pub extensions_str: String,

    /// Optional JSON configuration file; command-line flags take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output with per-file progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Perform a dry run: decode and transform but do not write any files
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Args {
    /// Parse the extensions string into a lowercase vector
    pub fn parse_extensions(&self) -> Vec<String> {
        self.extensions_str
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}


// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./input_tiles"),
            output_dir: PathBuf::from("./output_tiles"),
            mirror: MirrorMode::None,
            extensions_str: "png,jpg,jpeg,bmp,gif,tiff".to_string(),
            config_file: None,
            verbose: false,
            dry_run: false,
        }
    }
}
