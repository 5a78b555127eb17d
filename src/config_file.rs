use crate::cli::{Args, MirrorMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// JSON configuration file format
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub mirror: Option<String>,
    pub extensions: Option<String>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Args {
    /// Load configuration from a JSON file and merge with command-line arguments.
    /// Command-line arguments take precedence over config file values.
    pub fn load_and_merge_config(&mut self) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            let config: ConfigFile = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            self.merge_from_config(config);

            if self.verbose {
                eprintln!("Loaded configuration from: {:?}", config_path);
            }
        }
        Ok(())
    }

    fn merge_from_config(&mut self, config: ConfigFile) {
        // Check which arguments were explicitly provided on the command line
        let args_from_cli = std::env::args().collect::<Vec<_>>();

        if !args_from_cli.iter().any(|a| a == "-i" || a == "--input") {
            if let Some(input) = config.input_path {
                self.input_dir = PathBuf::from(input);
            }
        }

        if !args_from_cli.iter().any(|a| a == "-o" || a == "--output") {
            if let Some(output) = config.output_path {
                self.output_dir = PathBuf::from(output);
            }
        }

        if !args_from_cli.iter().any(|a| a == "-m" || a == "--mirror") {
            if let Some(mirror) = config.mirror {
                self.mirror = match mirror.as_str() {
                    "horizontal" => MirrorMode::Horizontal,
                    "vertical" => MirrorMode::Vertical,
                    "none" => MirrorMode::None,
                    _ => self.mirror,
                };
            }
        }

        if !args_from_cli.iter().any(|a| a == "--extensions") {
            if let Some(ext) = config.extensions {
                self.extensions_str = ext;
            }
        }

        // Boolean flags only apply if currently false (default)
        if !self.verbose {
            self.verbose = config.verbose.unwrap_or(false);
        }

        if !self.dry_run {
            self.dry_run = config.dry_run.unwrap_or(false);
        }
    }
}
