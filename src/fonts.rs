// src/fonts.rs
//! Font resources and glyph metrics used for text measurement

use crate::config::FontPaths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use ttf_parser::{Face, GlyphId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    pub fn label(&self) -> &'static str {
        match self {
            FontStyle::Regular => "regular",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
        }
    }
}

/// Source of glyph advance widths for the document context.
///
/// Advances are expressed in thousandths of an em, so a caller scales them by
/// `font_size / 1000` to get a width in its own unit.
pub trait TextMeasure {
    /// One advance per `char` of `text`
    fn advances(&self, style: FontStyle, text: &str) -> Vec<f32>;

    fn text_advance(&self, style: FontStyle, text: &str) -> f32 {
        self.advances(style, text).iter().sum()
    }
}

/// A single font file kept in memory for both measurement and embedding
#[derive(Debug, Clone)]
pub struct FontFace {
    path: PathBuf,
    data: Vec<u8>,
    units_per_em: u16,
}

impl FontFace {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;

        let units_per_em = Face::parse(&data, 0)
            .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))?
            .units_per_em();

        debug!("Loaded font {} ({} units/em)", path.display(), units_per_em);

        Ok(Self {
            path: path.to_path_buf(),
            data,
            units_per_em,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn advances(&self, text: &str) -> Vec<f32> {
        // Parsing only reads the table directory; the data was validated in `load`.
        let Ok(face) = Face::parse(&self.data, 0) else {
            return vec![0.0; text.chars().count()];
        };
        let scale = 1000.0 / f32::from(self.units_per_em.max(1));

        text.chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
                f32::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * scale
            })
            .collect()
    }
}

/// The regular, bold and italic variants of one family
#[derive(Debug, Clone)]
pub struct FontSet {
    family: String,
    regular: FontFace,
    bold: FontFace,
    italic: FontFace,
}

impl FontSet {
    /// Load all three variants. Any missing or unreadable file aborts the run.
    pub fn load(paths: &FontPaths) -> Result<Self> {
        info!("Loading font family {}", paths.family);

        let regular = FontFace::load(&paths.path_for(FontStyle::Regular))
            .context("Failed to load regular font")?;
        let bold =
            FontFace::load(&paths.path_for(FontStyle::Bold)).context("Failed to load bold font")?;
        let italic = FontFace::load(&paths.path_for(FontStyle::Italic))
            .context("Failed to load italic font")?;

        Ok(Self {
            family: paths.family.clone(),
            regular,
            bold,
            italic,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn face(&self, style: FontStyle) -> &FontFace {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

impl TextMeasure for FontSet {
    fn advances(&self, style: FontStyle, text: &str) -> Vec<f32> {
        self.face(style).advances(text)
    }
}

/// Every glyph has the same advance, regardless of style
#[cfg(test)]
pub(crate) struct FixedAdvance(pub f32);

#[cfg(test)]
impl TextMeasure for FixedAdvance {
    fn advances(&self, _style: FontStyle, text: &str) -> Vec<f32> {
        vec![self.0; text.chars().count()]
    }
}
