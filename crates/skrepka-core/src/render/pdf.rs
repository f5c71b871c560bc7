//! # PDF Backend
//!
//! Assembles laid-out pages into a PDF byte stream with `lopdf`. Objects
//! are built explicitly: catalog, page tree, two Type1 font resources
//! (Helvetica / Helvetica-Bold) and one uncompressed content stream per
//! page. No timestamps, document IDs or compression are emitted, so the
//! same pages always serialize to the same bytes.
//
// TODO: embed a Cyrillic-capable TrueType font and switch text operands
// to UTF-16BE; the built-in Type1 fonts carry no Cyrillic glyph widths.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::RenderError;
use crate::render::layout::{DrawOp, Page, PAGE_HEIGHT, PAGE_WIDTH};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Serializes pages into PDF bytes.
pub(crate) fn assemble(pages: &[Page]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0i64.into(),
                0i64.into(),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

/// Translates one page's draw operations into a content stream. Layout
/// coordinates are top-down; PDF device space has its origin at the
/// bottom-left, so y flips here exactly once.
fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                bold,
                text,
            } => {
                let font = if *bold { FONT_BOLD } else { FONT_REGULAR };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![(*x).into(), flip(*y).into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(text.as_str())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                operations.push(Operation::new("w", vec![(*width).into()]));
                operations.push(Operation::new("m", vec![(*x1).into(), flip(*y1).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), flip(*y2).into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

fn flip(y: f32) -> f32 {
    PAGE_HEIGHT - y
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        Page {
            ops: vec![
                DrawOp::Text {
                    x: 50.0,
                    y: 54.0,
                    size: 14.0,
                    bold: true,
                    text: "СЧЁТ НА ОПЛАТУ № INV-202501-0001".to_string(),
                },
                DrawOp::Line {
                    x1: 50.0,
                    y1: 60.0,
                    x2: 545.28,
                    y2: 60.0,
                    width: 1.0,
                },
            ],
        }
    }

    #[test]
    fn test_output_is_a_pdf() {
        let bytes = assemble(&[sample_page()]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.ends_with(b"%%EOF\n") || bytes.ends_with(b"%%EOF"));
    }

    #[test]
    fn test_identical_pages_serialize_identically() {
        let first = assemble(&[sample_page()]).unwrap();
        let second = assemble(&[sample_page()]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_count_matches() {
        let bytes = assemble(&[sample_page(), sample_page(), sample_page()]).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn test_text_baseline_flips_to_device_space() {
        let content = page_content(&sample_page());
        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        assert_eq!(td.operands[1], Object::Real(PAGE_HEIGHT - 54.0));
    }

    #[test]
    fn test_bold_selects_second_font() {
        let content = page_content(&sample_page());
        let tf = content
            .operations
            .iter()
            .find(|op| op.operator == "Tf")
            .unwrap();
        assert_eq!(tf.operands[0], Object::Name(b"F2".to_vec()));
    }
}
