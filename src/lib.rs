//! Renders a resume described in a JSON file into a fixed-layout PDF.
//!
//! The pipeline is linear: [`types::ResumeRecord`] loads the data,
//! [`sections`] draw each part of the resume into a
//! [`document::DocumentContext`], and [`pdf_writer`] serializes the recorded
//! pages with printpdf. [`generator::ResumeGenerator`] wires the steps
//! together from a [`config::ResumeConfig`].

pub mod cli;
pub mod config;
pub mod document;
pub mod font_validator;
pub mod fonts;
pub mod generator;
pub mod pdf_writer;
pub mod sections;
pub mod types;
pub mod utils;

pub use config::ResumeConfig;
pub use generator::{compose_document, generate_resume, ResumeGenerator};
pub use types::ResumeRecord;
