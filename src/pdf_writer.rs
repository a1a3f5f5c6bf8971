// src/pdf_writer.rs
//! Serializes the recorded pages with printpdf

use crate::document::{DrawOp, Page, PageGeometry, PT_TO_MM};
use crate::fonts::{FontSet, FontStyle};
use anyhow::{Context, Result};
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, Polygon, PolygonRing, WindingOrder};
use printpdf::text::TextItem;
use printpdf::{FontId, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, Rgb, TextMatrix};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DOCUMENT_TITLE: &str = "Resume";

fn mm_to_pt(mm: f32) -> f32 {
    mm / PT_TO_MM
}

/// Top-left millimetres to bottom-left PDF points
fn to_pdf_point(x_mm: f32, y_mm: f32, page_height_mm: f32) -> (f32, f32) {
    (mm_to_pt(x_mm), mm_to_pt(page_height_mm - y_mm))
}

fn black() -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Build the PDF and write it to `path`, creating the parent directory if needed
pub fn write_pdf(
    pages: &[Page],
    geometry: &PageGeometry,
    fonts: &FontSet,
    title: &str,
    path: &Path,
) -> Result<()> {
    let bytes = render_pdf(pages, geometry, fonts, title)?;
    write_output(path, &bytes)?;

    info!("✅ Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(path, bytes).with_context(|| format!("Failed to write PDF: {}", path.display()))
}

pub fn render_pdf(pages: &[Page], geometry: &PageGeometry, fonts: &FontSet, title: &str) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(title);

    let mut font_ids = HashMap::new();
    for style in FontStyle::ALL {
        let face = fonts.face(style);
        let mut warnings = Vec::new();
        let parsed = ParsedFont::from_bytes(face.data(), 0, &mut warnings).ok_or_else(|| {
            anyhow::anyhow!(
                "Failed to embed {} font: {}",
                style.label(),
                face.path().display()
            )
        })?;
        font_ids.insert(style, doc.add_font(&parsed));
    }

    for (index, page) in pages.iter().enumerate() {
        debug!("Serializing page {} ({} ops)", index + 1, page.ops.len());
        let ops = page_ops(page, geometry, &font_ids);
        doc.pages
            .push(PdfPage::new(Mm(geometry.width), Mm(geometry.height), ops));
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!("PDF serialization reported {} warnings", warnings.len());
    }
    Ok(bytes)
}

fn page_ops(page: &Page, geometry: &PageGeometry, fonts: &HashMap<FontStyle, FontId>) -> Vec<Op> {
    let mut ops = vec![
        Op::SetFillColor { col: black() },
        Op::SetOutlineColor { col: black() },
    ];

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                style,
                size_pt,
            } => {
                let Some(font) = fonts.get(style) else {
                    continue;
                };
                let (px, py) = to_pdf_point(*x, *baseline, geometry.height);
                ops.push(Op::StartTextSection);
                ops.push(Op::SetFontSize {
                    size: Pt(*size_pt),
                    font: font.clone(),
                });
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Pt(px), Pt(py)),
                });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.clone())],
                    font: font.clone(),
                });
                ops.push(Op::EndTextSection);
            }
            DrawOp::Line { from, to, width } => {
                let (x1, y1) = to_pdf_point(from.0, from.1, geometry.height);
                let (x2, y2) = to_pdf_point(to.0, to.1, geometry.height);
                ops.push(Op::SetOutlineThickness {
                    pt: Pt(mm_to_pt(*width)),
                });
                ops.push(Op::DrawPolygon {
                    polygon: Polygon {
                        rings: vec![PolygonRing {
                            points: vec![
                                LinePoint {
                                    p: Point { x: Pt(x1), y: Pt(y1) },
                                    bezier: false,
                                },
                                LinePoint {
                                    p: Point { x: Pt(x2), y: Pt(y2) },
                                    bezier: false,
                                },
                            ],
                        }],
                        mode: PaintMode::Stroke,
                        winding_order: WindingOrder::EvenOdd,
                    },
                });
            }
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_mm_to_pt() {
        assert!(close(mm_to_pt(25.4), 72.0));
        assert!(close(mm_to_pt(210.0), 595.2756));
    }

    #[test]
    fn test_points_flip_to_bottom_origin() {
        let (x, y) = to_pdf_point(10.0, 10.0, 297.0);
        assert!(close(x, 28.3465));
        assert!(close(y, mm_to_pt(287.0)));

        let (_, bottom) = to_pdf_point(0.0, 297.0, 297.0);
        assert!(close(bottom, 0.0));
    }

    fn regular_font() -> HashMap<FontStyle, FontId> {
        HashMap::from([(FontStyle::Regular, FontId::new())])
    }

    #[test]
    fn test_text_op_translates_baseline() {
        let page = Page {
            ops: vec![DrawOp::Text {
                x: 10.0,
                baseline: 20.0,
                text: "Ada Lovelace".to_string(),
                style: FontStyle::Regular,
                size_pt: 16.0,
            }],
        };
        let ops = page_ops(&page, &PageGeometry::A4, &regular_font());

        let translate = ops.iter().find_map(|op| match op {
            Op::SetTextMatrix {
                matrix: TextMatrix::Translate(x, y),
            } => Some((x.0, y.0)),
            _ => None,
        });
        let (x, y) = translate.expect("text position");
        assert!(close(x, mm_to_pt(10.0)));
        assert!(close(y, mm_to_pt(277.0)));

        let written = ops.iter().any(|op| match op {
            Op::WriteText { items, .. } => {
                matches!(items.as_slice(), [TextItem::Text(t)] if t == "Ada Lovelace")
            }
            _ => false,
        });
        assert!(written);
    }

    #[test]
    fn test_text_without_embedded_style_is_skipped() {
        let page = Page {
            ops: vec![DrawOp::Text {
                x: 10.0,
                baseline: 20.0,
                text: "Programmer".to_string(),
                style: FontStyle::Italic,
                size_pt: 10.0,
            }],
        };
        let ops = page_ops(&page, &PageGeometry::A4, &regular_font());
        assert!(!ops.iter().any(|op| matches!(op, Op::WriteText { .. })));
    }

    #[test]
    fn test_rule_strokes_between_flipped_endpoints() {
        let page = Page {
            ops: vec![DrawOp::Line {
                from: (10.0, 50.0),
                to: (200.0, 50.0),
                width: 0.2,
            }],
        };
        let ops = page_ops(&page, &PageGeometry::A4, &regular_font());

        let thickness = ops.iter().find_map(|op| match op {
            Op::SetOutlineThickness { pt } => Some(pt.0),
            _ => None,
        });
        assert!(close(thickness.expect("line width"), mm_to_pt(0.2)));

        let polygon = ops.iter().find_map(|op| match op {
            Op::DrawPolygon { polygon } => Some(polygon),
            _ => None,
        });
        let polygon = polygon.expect("rule polygon");
        assert!(matches!(polygon.mode, PaintMode::Stroke));

        let points: Vec<(f32, f32)> = polygon.rings[0]
            .points
            .iter()
            .map(|lp| (lp.p.x.0, lp.p.y.0))
            .collect();
        assert_eq!(points.len(), 2);
        assert!(close(points[0].0, mm_to_pt(10.0)));
        assert!(close(points[1].0, mm_to_pt(200.0)));
        assert!(close(points[0].1, mm_to_pt(247.0)));
        assert!(close(points[1].1, mm_to_pt(247.0)));
    }

    #[test]
    fn test_write_output_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("resume.pdf");

        write_output(&path, b"%PDF-1.3").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.3");
    }

    #[test]
    fn test_write_output_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_output(&blocker.join("resume.pdf"), b"%PDF-1.3").unwrap_err();
        assert!(err.to_string().contains("Failed to"));
    }
}
