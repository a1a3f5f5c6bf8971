// src/sections.rs
//! Section renderers. Each one reads its fields from the record with an
//! inline default and draws into the shared document context.

use crate::document::{Advance, Align, CellWidth, DocumentContext};
use crate::fonts::FontStyle;
use crate::types::ResumeRecord;

const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const NAME_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 5.0;
const HEADING_HEIGHT: f32 = 10.0;
const ENTRY_GAP: f32 = 5.0;

pub const DEFAULT_NAME: &str = "John Doe";
pub const DEFAULT_PHONE: &str = "123-456-7890";
pub const DEFAULT_EMAIL: &str = "johndoe@email.com";
pub const DEFAULT_LINKEDIN: &str = "linkedin.com/in/johndoe";
pub const DEFAULT_SUMMARY: &str = "Highly motivated and results-oriented professional with a strong background in software development and project management. Seeking to leverage skills in a challenging new role.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Contact,
    Summary,
    Education,
    Skills,
    Experience,
    Projects,
}

impl Section {
    pub const DEFAULT_ORDER: [Section; 5] = [
        Section::Contact,
        Section::Education,
        Section::Skills,
        Section::Experience,
        Section::Projects,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
        }
    }

    pub fn render(&self, ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
        match self {
            Section::Contact => render_contact(ctx, record),
            Section::Summary => render_summary(ctx, record),
            Section::Education => render_education(ctx, record),
            Section::Skills => render_skills(ctx, record),
            Section::Experience => render_experience(ctx, record),
            Section::Projects => render_projects(ctx, record),
        }
    }
}

fn heading(ctx: &mut DocumentContext<'_>, title: &str) {
    ctx.set_font(FontStyle::Bold, HEADING_SIZE);
    ctx.cell(CellWidth::Fill, HEADING_HEIGHT, title, Align::Left, Advance::NextLine);
}

fn bullet(ctx: &mut DocumentContext<'_>, text: &str) {
    ctx.multi_cell(CellWidth::Fill, LINE_HEIGHT, &format!("- {}", text), Align::Justify);
}

/// Cell exactly as wide as its text, cursor left at its right edge
fn inline_segment(ctx: &mut DocumentContext<'_>, text: &str) {
    let width = ctx.string_width(text);
    if width > 0.0 {
        ctx.cell(CellWidth::Fixed(width), LINE_HEIGHT, text, Align::Left, Advance::Right);
    }
}

pub fn render_contact(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    ctx.set_font(FontStyle::Bold, NAME_SIZE);
    ctx.cell(
        CellWidth::Fill,
        HEADING_HEIGHT,
        &record.text_or("name", DEFAULT_NAME),
        Align::Center,
        Advance::NextLine,
    );

    ctx.set_font(FontStyle::Regular, BODY_SIZE);
    let phone = record.text_or("phone", DEFAULT_PHONE);
    let email = record.text_or("email", DEFAULT_EMAIL);
    let linkedin = record.text_or("linkedin", DEFAULT_LINKEDIN);
    ctx.cell(
        CellWidth::Fill,
        LINE_HEIGHT,
        &format!("{} | {} | {}", phone, email, linkedin),
        Align::Center,
        Advance::NextLine,
    );
    ctx.ln(Some(10.0));
    ctx.horizontal_rule();
}

/// Not part of the default order; enabled through `include_summary`
pub fn render_summary(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    heading(ctx, "Summary");
    ctx.set_font(FontStyle::Regular, BODY_SIZE);
    ctx.multi_cell(
        CellWidth::Fill,
        LINE_HEIGHT,
        &record.text_or("summary", DEFAULT_SUMMARY),
        Align::Justify,
    );
    ctx.ln(Some(ENTRY_GAP));
}

pub fn render_education(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    heading(ctx, "Education");

    for edu in record.entries("education") {
        // School left, year right, same line
        ctx.set_font(FontStyle::Bold, BODY_SIZE);
        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &edu.text_or("school", ""), Align::Left, Advance::Right);
        ctx.set_font(FontStyle::Regular, BODY_SIZE);
        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &edu.text_or("year", ""), Align::Right, Advance::NextLine);

        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &edu.text_or("degree", ""), Align::Left, Advance::NextLine);
        ctx.ln(Some(ENTRY_GAP));
    }
    ctx.horizontal_rule();
}

pub fn render_skills(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    heading(ctx, "Skills");
    ctx.set_font(FontStyle::Regular, BODY_SIZE);

    let skills_text: String = record
        .skill_categories("skills")
        .iter()
        .map(|(category, items)| format!("{}: {}\n", category, items.join(", ")))
        .collect();
    ctx.multi_cell(CellWidth::Fill, LINE_HEIGHT, skills_text.trim(), Align::Justify);
    ctx.horizontal_rule();
}

pub fn render_experience(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    heading(ctx, "Experience");

    for job in record.entries("experience") {
        let title = job.text_or("title", "");
        let location = job.text_or("location", "");

        ctx.set_font(FontStyle::Bold, BODY_SIZE);
        inline_segment(ctx, &job.text_or("company", ""));

        if !title.is_empty() {
            ctx.set_font(FontStyle::Italic, BODY_SIZE);
            inline_segment(ctx, &format!(", {}", title));
        }

        if !location.is_empty() {
            ctx.set_font(FontStyle::Regular, BODY_SIZE);
            inline_segment(ctx, &format!(" ({})", location));
        }

        ctx.set_font(FontStyle::Regular, BODY_SIZE);
        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &job.text_or("dates", ""), Align::Right, Advance::NextLine);

        for item in job.list("bullets") {
            bullet(ctx, &item);
        }
        ctx.ln(Some(ENTRY_GAP));
    }
    ctx.horizontal_rule();
}

pub fn render_projects(ctx: &mut DocumentContext<'_>, record: &ResumeRecord) {
    heading(ctx, "Projects");

    for project in record.entries("projects") {
        ctx.set_font(FontStyle::Bold, BODY_SIZE);
        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &project.text_or("name", ""), Align::Left, Advance::Right);
        ctx.set_font(FontStyle::Regular, BODY_SIZE);
        ctx.cell(CellWidth::Fill, LINE_HEIGHT, &project.text_or("dates", ""), Align::Right, Advance::NextLine);

        let technologies = project.list("technologies");
        if !technologies.is_empty() {
            ctx.set_font(FontStyle::Italic, BODY_SIZE);
            ctx.cell(
                CellWidth::Fill,
                LINE_HEIGHT,
                &format!("Technologies: {}", technologies.join(", ")),
                Align::Left,
                Advance::NextLine,
            );
        }

        ctx.set_font(FontStyle::Regular, BODY_SIZE);
        for item in project.list("bullets") {
            bullet(ctx, &item);
        }
        ctx.ln(Some(ENTRY_GAP));
    }
    ctx.horizontal_rule();
}
