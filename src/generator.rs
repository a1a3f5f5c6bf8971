// src/generator.rs
use crate::config::ResumeConfig;
use crate::document::{DocumentContext, Page, PageGeometry};
use crate::fonts::{FontSet, FontStyle, TextMeasure};
use crate::pdf_writer::{self, DOCUMENT_TITLE};
use crate::sections::Section;
use crate::types::ResumeRecord;
use crate::utils::validate_file_extension;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Lay out every section into a fresh document context
pub fn compose_document<'m>(
    measure: &'m dyn TextMeasure,
    record: &ResumeRecord,
    sections: &[Section],
    page_break_margin: f32,
) -> DocumentContext<'m> {
    let mut ctx = DocumentContext::new(measure, PageGeometry::A4);
    ctx.set_auto_page_break(true, page_break_margin);
    ctx.add_page();
    ctx.set_font(FontStyle::Regular, 12.0);

    for section in sections {
        debug!("Rendering {} section", section.name());
        section.render(&mut ctx, record);
    }

    ctx
}

pub struct ResumeGenerator {
    pub config: ResumeConfig,
}

impl ResumeGenerator {
    pub fn new(config: ResumeConfig) -> Result<Self> {
        let input_path = config.input_path_absolute();
        let output_path = config.output_path_absolute();

        validate_file_extension(&input_path.to_string_lossy(), &["json"])
            .context("Resume data must be a JSON file")?;
        validate_file_extension(&output_path.to_string_lossy(), &["pdf"])
            .context("Output must be a PDF file")?;

        if !input_path.exists() {
            anyhow::bail!("Resume data not found: {}", input_path.display());
        }

        Ok(Self { config })
    }

    /// Render the resume and write the PDF, returning the output path
    pub fn generate(&self) -> Result<PathBuf> {
        let fonts = FontSet::load(&self.config.font_paths())?;
        info!("Using font family {}", fonts.family());
        let record = ResumeRecord::load(&self.config.input_path_absolute())?;
        info!("Loaded resume data from {}", self.config.input_path.display());

        let ctx = compose_document(
            &fonts,
            &record,
            &self.config.sections(),
            self.config.page_break_margin,
        );
        let geometry = *ctx.geometry();
        let pages = ctx.into_pages();
        info!("Composed {} page(s)", pages.len());

        let output_path = self.config.output_path_absolute();
        pdf_writer::write_pdf(&pages, &geometry, &fonts, DOCUMENT_TITLE, &output_path)?;
        Ok(output_path)
    }

    pub fn compose(&self, record: &ResumeRecord, measure: &dyn TextMeasure) -> Vec<Page> {
        compose_document(
            measure,
            record,
            &self.config.sections(),
            self.config.page_break_margin,
        )
        .into_pages()
    }
}

/// Convenience function for a default run with explicit paths
pub fn generate_resume(input: PathBuf, output: PathBuf) -> Result<PathBuf> {
    let config = ResumeConfig::new().with_input(input).with_output(output);
    let generator = ResumeGenerator::new(config)?;
    generator.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FixedAdvance;
    use serde_json::json;

    const MEASURE: FixedAdvance = FixedAdvance(500.0);

    fn full_record() -> ResumeRecord {
        ResumeRecord::from_value(json!({
            "name": "Ada Lovelace",
            "phone": "555-0100",
            "email": "ada@example.com",
            "linkedin": "linkedin.com/in/ada",
            "summary": "Analyst of engines.",
            "education": [{"school": "University of London", "year": "1843", "degree": "Mathematics"}],
            "skills": {"Languages": ["Python", "Go"], "Tools": ["Git"]},
            "experience": [{
                "company": "Analytical Engine Co",
                "title": "Programmer",
                "location": "London",
                "dates": "1842 - 1843",
                "bullets": ["Wrote the first published algorithm"],
            }],
            "projects": [{
                "name": "Note G",
                "dates": "1843",
                "technologies": ["Punched cards"],
                "bullets": ["Computed Bernoulli numbers"],
            }],
        }))
        .unwrap()
    }

    fn all_texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.texts())
            .map(str::to_string)
            .collect()
    }

    fn position(texts: &[String], needle: &str) -> usize {
        texts
            .iter()
            .position(|t| t == needle)
            .unwrap_or_else(|| panic!("{} not rendered", needle))
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let record = full_record();
        let ctx = compose_document(&MEASURE, &record, &Section::DEFAULT_ORDER, 15.0);
        let texts = all_texts(ctx.pages());

        let order: Vec<usize> = ["Ada Lovelace", "Education", "Skills", "Experience", "Projects"]
            .iter()
            .map(|t| position(&texts, t))
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "order was {:?}", order);
        assert!(!texts.iter().any(|t| t == "Summary"));
        assert_eq!(ctx.page_count(), 1);
    }

    #[test]
    fn test_composed_document_uses_a4_geometry() {
        let record = full_record();
        let ctx = compose_document(&MEASURE, &record, &Section::DEFAULT_ORDER, 15.0);
        assert_eq!(*ctx.geometry(), PageGeometry::A4);
    }

    #[test]
    fn test_missing_name_uses_default() {
        let record = ResumeRecord::from_value(json!({})).unwrap();
        let ctx = compose_document(&MEASURE, &record, &Section::DEFAULT_ORDER, 15.0);
        assert_eq!(ctx.pages()[0].texts()[0], "John Doe");
    }

    #[test]
    fn test_summary_toggle_places_summary_after_contact() {
        let config = ResumeConfig::new().with_summary(true);
        let generator = ResumeGenerator { config };
        let texts = all_texts(&generator.compose(&full_record(), &MEASURE));

        let summary = position(&texts, "Summary");
        assert!(summary > position(&texts, "Ada Lovelace"));
        assert!(summary < position(&texts, "Education"));
        assert!(texts.contains(&"Analyst of engines.".to_string()));
    }

    #[test]
    fn test_long_resume_continues_on_next_page() {
        let bullets: Vec<String> = (0..80).map(|i| format!("Achievement number {}", i)).collect();
        let record = ResumeRecord::from_value(json!({
            "experience": [{"company": "Acme", "dates": "2020", "bullets": bullets}],
        }))
        .unwrap();

        let ctx = compose_document(&MEASURE, &record, &Section::DEFAULT_ORDER, 15.0);
        assert_eq!(ctx.page_count(), 2);

        let second = ctx.pages()[1].texts();
        assert!(second.contains(&"- Achievement number 79"));
        assert!(second.contains(&"Projects"));
    }

    #[test]
    fn test_new_rejects_wrong_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("personal.json");
        std::fs::write(&input, "{}").unwrap();

        let config = ResumeConfig::new()
            .with_input(input.clone())
            .with_output(dir.path().join("resume.txt"));
        assert!(ResumeGenerator::new(config).is_err());

        let config = ResumeConfig::new()
            .with_input(dir.path().join("personal.yaml"))
            .with_output(dir.path().join("resume.pdf"));
        assert!(ResumeGenerator::new(config).is_err());

        let config = ResumeConfig::new()
            .with_input(input)
            .with_output(dir.path().join("resume.pdf"));
        assert!(ResumeGenerator::new(config).is_ok());
    }

    #[test]
    fn test_new_requires_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResumeConfig::new()
            .with_input(dir.path().join("personal.json"))
            .with_output(dir.path().join("resume.pdf"));

        let err = ResumeGenerator::new(config).err().map(|e| e.to_string());
        assert!(err.unwrap_or_default().contains("Resume data not found"));
    }

    #[test]
    fn test_generate_fails_without_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("personal.json");
        std::fs::write(&input, r#"{"name": "Ada"}"#).unwrap();

        let config = ResumeConfig::new()
            .with_input(input)
            .with_output(dir.path().join("resume.pdf"))
            .with_fonts_dir(dir.path().to_path_buf());
        let generator = ResumeGenerator::new(config).unwrap();

        assert!(generator.generate().is_err());
        assert!(!dir.path().join("resume.pdf").exists());
    }
}
