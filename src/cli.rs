// src/cli.rs
use crate::config::{ResumeConfig, DEFAULT_CONFIG_FILE};
use crate::font_validator::validate_fonts;
use crate::generator::ResumeGenerator;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "resume-pdf")]
#[command(about = "Render a resume JSON file into a one-page PDF")]
pub struct ResumeCli {
    #[command(subcommand)]
    pub command: Option<ResumeCommand>,

    /// Optional YAML file overriding the default settings
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Resume data file
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Where to write the PDF
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Directory holding the regular, bold and italic font files
    #[arg(long, global = true)]
    pub fonts_dir: Option<PathBuf>,

    /// Render the summary section after the contact block
    #[arg(long, global = true)]
    pub with_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ResumeCommand {
    /// Render the resume (default)
    Generate,
    /// Check that the font resources exist and parse
    Fonts,
}

impl ResumeCli {
    /// Defaults, then the config file, then command-line flags
    pub fn resolve_config(&self) -> Result<ResumeConfig> {
        let mut config = ResumeConfig::new();

        if let Some(file) = ResumeConfig::load_file(&self.config)? {
            config = config.apply_file(file);
        }
        if let Some(input) = &self.input {
            config = config.with_input(input.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output(output.clone());
        }
        if let Some(dir) = &self.fonts_dir {
            config = config.with_fonts_dir(dir.clone());
        }
        if self.with_summary {
            config = config.with_summary(true);
        }

        Ok(config)
    }
}

pub fn handle_command(cli: ResumeCli) -> Result<()> {
    let config = cli.resolve_config()?;
    info!(
        "Input: {}, output: {}, fonts: {}",
        config.input_path.display(),
        config.output_path.display(),
        config.fonts.dir.display()
    );

    match cli.command.unwrap_or(ResumeCommand::Generate) {
        ResumeCommand::Generate => {
            let output_path = config.output_path.clone();
            let generator = ResumeGenerator::new(config)?;
            generator.generate()?;
            println!("Resume generated as {}", output_path.display());
        }
        ResumeCommand::Fonts => {
            validate_fonts(config.font_paths())?;
        }
    }

    Ok(())
}
