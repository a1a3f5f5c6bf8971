// src/config.rs
use crate::fonts::FontStyle;
use crate::sections::Section;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "resume.yaml";
pub const DEFAULT_INPUT_FILE: &str = "personal.json";
pub const DEFAULT_OUTPUT_FILE: &str = "resume.pdf";
pub const DEFAULT_PAGE_BREAK_MARGIN: f32 = 15.0;

/// Locations of the three variants of the body font family
#[derive(Debug, Clone, PartialEq)]
pub struct FontPaths {
    pub family: String,
    pub dir: PathBuf,
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
}

impl Default for FontPaths {
    fn default() -> Self {
        Self {
            family: "CMUSerif".to_string(),
            dir: PathBuf::from("."),
            regular: PathBuf::from("cmunrm.ttf"),
            bold: PathBuf::from("cmunbx.ttf"),
            italic: PathBuf::from("cmunti.ttf"),
        }
    }
}

impl FontPaths {
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Full path of one variant; absolute file entries ignore `dir`
    pub fn path_for(&self, style: FontStyle) -> PathBuf {
        let file = match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        };
        self.dir.join(file)
    }
}

#[derive(Debug, Clone)]
pub struct ResumeConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub fonts: FontPaths,
    pub include_summary: bool,
    pub page_break_margin: f32,
    pub root_dir: PathBuf,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeConfig {
    pub fn new() -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            fonts: FontPaths::default(),
            include_summary: false,
            page_break_margin: DEFAULT_PAGE_BREAK_MARGIN,
            root_dir: current_dir,
        }
    }

    pub fn with_input(mut self, path: PathBuf) -> Self {
        self.input_path = path;
        self
    }

    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    pub fn with_fonts_dir(mut self, dir: PathBuf) -> Self {
        self.fonts.dir = dir;
        self
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn with_root_dir(mut self, dir: PathBuf) -> Self {
        self.root_dir = dir;
        self
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn input_path_absolute(&self) -> PathBuf {
        self.absolute_path(&self.input_path)
    }

    pub fn output_path_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_path)
    }

    pub fn font_paths(&self) -> FontPaths {
        self.fonts.clone().with_dir(self.absolute_path(&self.fonts.dir))
    }

    /// Section renderers to run, in order
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Section::DEFAULT_ORDER.to_vec();
        if self.include_summary {
            sections.insert(1, Section::Summary);
        }
        sections
    }

    /// Overlay every setting present in a config file
    pub fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(input) = file.input {
            self.input_path = input;
        }
        if let Some(output) = file.output {
            self.output_path = output;
        }
        if let Some(include) = file.include_summary {
            self.include_summary = include;
        }
        if let Some(margin) = file.page_break_margin {
            self.page_break_margin = margin;
        }
        if let Some(fonts) = file.fonts {
            if let Some(family) = fonts.family {
                self.fonts.family = family;
            }
            if let Some(dir) = fonts.dir {
                self.fonts.dir = dir;
            }
            if let Some(regular) = fonts.regular {
                self.fonts.regular = regular;
            }
            if let Some(bold) = fonts.bold {
                self.fonts.bold = bold;
            }
            if let Some(italic) = fonts.italic {
                self.fonts.italic = italic;
            }
        }
        self
    }

    /// Read an optional YAML config file. A missing file is not an error.
    pub fn load_file(path: &Path) -> Result<Option<ConfigFile>> {
        if !path.exists() {
            info!("Config file not found at {}, using defaults", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(Some(file))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub include_summary: Option<bool>,
    pub page_break_margin: Option<f32>,
    pub fonts: Option<FontsSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FontsSection {
    pub family: Option<String>,
    pub dir: Option<PathBuf>,
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}
