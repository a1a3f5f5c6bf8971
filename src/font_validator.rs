// src/font_validator.rs
use crate::config::FontPaths;
use crate::fonts::FontStyle;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct FontCheck {
    pub style: FontStyle,
    pub path: PathBuf,
    pub family_name: Option<String>,
    pub glyph_count: Option<u16>,
    pub error: Option<String>,
}

impl FontCheck {
    pub fn usable(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct FontValidationResult {
    pub valid: bool,
    pub fonts: Vec<FontCheck>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Lowercase with whitespace removed, so "CMU Serif" and "CMUSerif" compare equal
fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn family_warning(style: FontStyle, reported: Option<&str>, expected: &str) -> Option<String> {
    let Some(reported) = reported else {
        return Some(format!("{} font has no family name", style.label()));
    };

    if normalize_family(reported).contains(&normalize_family(expected)) {
        None
    } else {
        Some(format!(
            "{} font reports family '{}', expected '{}'",
            style.label(),
            reported,
            expected
        ))
    }
}

/// Checks the three font variants before a render needs them
pub struct FontValidator {
    paths: FontPaths,
}

impl FontValidator {
    pub fn new(paths: FontPaths) -> Self {
        Self { paths }
    }

    pub fn validate(&self) -> FontValidationResult {
        info!("Validating font resources for {}...", self.paths.family);

        let mut result = FontValidationResult {
            valid: true,
            fonts: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        };

        for style in FontStyle::ALL {
            let path = self.paths.path_for(style);
            let check = match Self::inspect(&path) {
                Ok((family_name, glyph_count)) => {
                    info!("✓ Font available: {} ({})", style.label(), path.display());
                    if let Some(warning) =
                        family_warning(style, family_name.as_deref(), &self.paths.family)
                    {
                        warn!("{}", warning);
                        result.warnings.push(warning);
                    }
                    FontCheck {
                        style,
                        path,
                        family_name,
                        glyph_count: Some(glyph_count),
                        error: None,
                    }
                }
                Err(e) => {
                    let message = format!("{} font unusable: {:#}", style.label(), e);
                    warn!("{}", message);
                    result.errors.push(message.clone());
                    result.valid = false;
                    FontCheck {
                        style,
                        path,
                        family_name: None,
                        glyph_count: None,
                        error: Some(message),
                    }
                }
            };
            result.fonts.push(check);
        }

        result
    }

    fn inspect(path: &Path) -> Result<(Option<String>, u16)> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;

        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))?;

        let family_name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .find_map(|n| n.to_string());

        Ok((family_name, face.number_of_glyphs()))
    }

    pub fn print_validation_report(&self, result: &FontValidationResult) {
        println!("=== Font Validation Report ===");

        if result.valid {
            println!("✅ Font validation passed");
        } else {
            println!("❌ Font validation failed");
        }

        println!();
        for font in &result.fonts {
            if font.usable() {
                println!(
                    "  • {:<8} {} ({}, {} glyphs)",
                    font.style.label(),
                    font.path.display(),
                    font.family_name.as_deref().unwrap_or("unnamed"),
                    font.glyph_count.unwrap_or_default()
                );
            } else {
                println!("  • {:<8} {} (missing)", font.style.label(), font.path.display());
            }
        }

        if !result.warnings.is_empty() {
            println!("\n⚠️  Warnings:");
            for warning in &result.warnings {
                println!("  • {}", warning);
            }
        }

        if !result.errors.is_empty() {
            println!("\n❌ Errors:");
            for error in &result.errors {
                println!("  • {}", error);
            }
        }
        println!();
    }
}

/// Validate, print the report, and fail when any variant is unusable
pub fn validate_fonts(paths: FontPaths) -> Result<FontValidationResult> {
    let validator = FontValidator::new(paths);
    let result = validator.validate();

    validator.print_validation_report(&result);

    if !result.valid {
        error!("Font validation failed");
        anyhow::bail!("{} of 3 font resources are unusable", result.errors.len());
    }

    if !result.warnings.is_empty() {
        warn!("Font validation completed with warnings");
    } else {
        info!("All font resources available");
    }

    Ok(result)
}
