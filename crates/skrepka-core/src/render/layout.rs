//! # Layout Engine
//!
//! Turns a section list into positioned draw operations, one op list per
//! page. The engine is generic: it understands text flow, tables, rules
//! and signature lines, and nothing about invoices or waybills.
//!
//! Coordinates here are top-down (y grows toward the page bottom, origin
//! at the top-left corner); the PDF backend flips them once. A fresh
//! engine is built per render call and discarded with its pages.
//!
//! Text measurement uses a fixed approximate metric table for Helvetica,
//! so identical input always yields identical positions.

use crate::render::section::{Align, Column, Section, SignatureSlot};

// =============================================================================
// Page Geometry
// =============================================================================

/// A4 portrait, points.
pub(crate) const PAGE_WIDTH: f32 = 595.28;
pub(crate) const PAGE_HEIGHT: f32 = 841.89;

const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 40.0;
const MARGIN_LEFT: f32 = 50.0;
const MARGIN_RIGHT: f32 = 50.0;

const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

const LINE_SPACING: f32 = 1.4;

const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const DETAIL_SIZE: f32 = 9.0;
const TABLE_SIZE: f32 = 9.0;
const CAPTION_SIZE: f32 = 7.0;

const CELL_PAD: f32 = 3.0;
const CELL_VPAD: f32 = 3.0;

// =============================================================================
// Draw Operations
// =============================================================================

/// One positioned drawing instruction. `y` is the text baseline (or the
/// line's vertical position), measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
}

/// The draw operations of one page, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Page {
    pub ops: Vec<DrawOp>,
}

// =============================================================================
// Text Metrics
// =============================================================================

/// Approximate advance width of one character, in units of the font size.
fn char_units(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | 't' | 'f' | 'I' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.30,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        ' ' => 0.30,
        '№' => 0.90,
        '(' | ')' | '[' | ']' | '/' | '-' => 0.35,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_lowercase() => 0.50,
        c if c.is_uppercase() => 0.70,
        _ => 0.54,
    }
}

/// Estimated rendered width of `text` at `size` points.
pub(crate) fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let scale = if bold { 1.06 } else { 1.0 };
    text.chars().map(char_units).sum::<f32>() * size * scale
}

/// Greedy word wrap to `max_width`. Single words wider than the limit are
/// hard-split so no line ever exceeds it.
fn wrap_text(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in split_overlong(word, size, bold, max_width) {
            if current.is_empty() {
                current = piece;
            } else {
                let candidate = format!("{current} {piece}");
                if text_width(&candidate, size, bold) <= max_width {
                    current = candidate;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current = piece;
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_overlong(word: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    if text_width(word, size, bold) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && text_width(&candidate, size, bold) > max_width {
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

// =============================================================================
// Engine
// =============================================================================

/// Lays out `sections` into pages. The entry point builds a fresh engine,
/// runs it once and returns its pages.
pub(crate) fn layout(sections: &[Section]) -> Vec<Page> {
    let mut engine = LayoutEngine::new();
    for section in sections {
        engine.section(section);
    }
    engine.pages
}

struct LayoutEngine {
    pages: Vec<Page>,
    /// Distance from the page top to the next free position.
    cursor: f32,
}

impl LayoutEngine {
    fn new() -> Self {
        LayoutEngine {
            pages: vec![Page::default()],
            cursor: MARGIN_TOP,
        }
    }

    fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = MARGIN_TOP;
    }

    /// Breaks the page when `height` points no longer fit above the
    /// bottom margin.
    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > PAGE_HEIGHT - MARGIN_BOTTOM {
            self.break_page();
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: String) {
        self.page().ops.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            text,
        });
    }

    fn rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.page().ops.push(DrawOp::Line { x1, y1, x2, y2, width });
    }

    /// Flowed text block: wraps to `width`, advances the cursor line by
    /// line, breaking pages as needed.
    fn flow_text(&mut self, text: &str, size: f32, bold: bool, align: Align, x: f32, width: f32) {
        let line_height = size * LINE_SPACING;
        for line in wrap_text(text, size, bold, width) {
            self.ensure_room(line_height);
            let tx = match align {
                Align::Left => x,
                Align::Center => x + (width - text_width(&line, size, bold)) / 2.0,
                Align::Right => x + width - text_width(&line, size, bold),
            };
            let baseline = self.cursor + size;
            self.text(tx, baseline, size, bold, line);
            self.cursor += line_height;
        }
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    fn section(&mut self, section: &Section) {
        match section {
            Section::Header {
                title,
                subtitle,
                date_line,
            } => self.header(title, subtitle.as_deref(), date_line),
            Section::PartyBlock {
                label,
                name,
                details,
            } => self.party_block(label, name, details),
            Section::ReferenceBlock { lines } => {
                for line in lines {
                    self.flow_text(line, BODY_SIZE, false, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
                }
            }
            Section::ItemTable { columns, rows } => self.table(columns, rows),
            Section::TotalsBlock { lines } => self.totals(lines),
            Section::AmountInWords { summary, words } => {
                self.flow_text(summary, DETAIL_SIZE, false, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
                self.cursor += 2.0;
                self.flow_text(words, BODY_SIZE, true, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
            }
            Section::FreeText { label, body } => match label {
                Some(label) => {
                    let composed = format!("{label}: {body}");
                    self.flow_text(&composed, DETAIL_SIZE, false, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
                }
                None => {
                    self.flow_text(body, BODY_SIZE, false, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
                }
            },
            Section::SignatureBlock { slots, paired } => {
                if *paired {
                    self.paired_signatures(slots);
                } else {
                    for slot in slots {
                        self.signature_line(slot);
                    }
                }
            }
            Section::Spacer { points } => {
                self.cursor += points;
            }
        }
    }

    fn header(&mut self, title: &str, subtitle: Option<&str>, date_line: &str) {
        self.flow_text(title, TITLE_SIZE, true, Align::Center, MARGIN_LEFT, CONTENT_WIDTH);
        if let Some(subtitle) = subtitle {
            self.flow_text(subtitle, BODY_SIZE, false, Align::Center, MARGIN_LEFT, CONTENT_WIDTH);
        }
        self.flow_text(date_line, BODY_SIZE, false, Align::Center, MARGIN_LEFT, CONTENT_WIDTH);
        self.cursor += 4.0;
        self.ensure_room(2.0);
        let y = self.cursor;
        self.rule(MARGIN_LEFT, y, PAGE_WIDTH - MARGIN_RIGHT, y, 1.0);
        self.cursor += 4.0;
    }

    fn party_block(&mut self, label: &str, name: &str, details: &[String]) {
        let headline = format!("{label} {name}");
        self.flow_text(&headline, BODY_SIZE, true, Align::Left, MARGIN_LEFT, CONTENT_WIDTH);
        for detail in details {
            self.flow_text(
                detail,
                DETAIL_SIZE,
                false,
                Align::Left,
                MARGIN_LEFT + 12.0,
                CONTENT_WIDTH - 12.0,
            );
        }
    }

    // -------------------------------------------------------------------------
    // Tables
    // -------------------------------------------------------------------------

    fn table(&mut self, columns: &[Column], rows: &[Vec<String>]) {
        self.table_header(columns);
        for row in rows {
            let wrapped: Vec<Vec<String>> = row
                .iter()
                .zip(columns)
                .map(|(cell, col)| {
                    wrap_text(cell, TABLE_SIZE, false, col.width - 2.0 * CELL_PAD)
                })
                .collect();
            let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            let row_height = line_count as f32 * TABLE_SIZE * LINE_SPACING + 2.0 * CELL_VPAD;

            if self.cursor + row_height > PAGE_HEIGHT - MARGIN_BOTTOM {
                self.break_page();
                self.table_header(columns);
            }
            self.table_row(columns, &wrapped, row_height, false);
        }
    }

    /// Draws the header row (bold, centered) with its top border. Called
    /// again on every page the table continues onto.
    fn table_header(&mut self, columns: &[Column]) {
        let wrapped: Vec<Vec<String>> = columns
            .iter()
            .map(|col| wrap_text(col.header, TABLE_SIZE, true, col.width - 2.0 * CELL_PAD))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let height = line_count as f32 * TABLE_SIZE * LINE_SPACING + 2.0 * CELL_VPAD;

        // keep the header and at least one row together
        self.ensure_room(height + TABLE_SIZE * LINE_SPACING + 2.0 * CELL_VPAD);
        let y = self.cursor;
        self.rule(MARGIN_LEFT, y, MARGIN_LEFT + table_width(columns), y, 0.7);
        self.table_row(columns, &wrapped, height, true);
    }

    /// Draws one row: cell text, vertical separators and the bottom
    /// border. Assumes the caller has already made room.
    fn table_row(
        &mut self,
        columns: &[Column],
        wrapped: &[Vec<String>],
        height: f32,
        header: bool,
    ) {
        let top = self.cursor;
        let bottom = top + height;
        let size = TABLE_SIZE;

        let mut x = MARGIN_LEFT;
        self.rule(x, top, x, bottom, 0.7);
        for (col, cell_lines) in columns.iter().zip(wrapped) {
            for (i, line) in cell_lines.iter().enumerate() {
                let align = if header { Align::Center } else { col.align };
                let tx = match align {
                    Align::Left => x + CELL_PAD,
                    Align::Center => x + (col.width - text_width(line, size, header)) / 2.0,
                    Align::Right => x + col.width - CELL_PAD - text_width(line, size, header),
                };
                let baseline = top + CELL_VPAD + size + i as f32 * size * LINE_SPACING;
                self.text(tx, baseline, size, header, line.clone());
            }
            x += col.width;
            self.rule(x, top, x, bottom, 0.7);
        }
        self.rule(MARGIN_LEFT, bottom, MARGIN_LEFT + table_width(columns), bottom, 0.7);
        self.cursor = bottom;
    }

    // -------------------------------------------------------------------------
    // Totals and Signatures
    // -------------------------------------------------------------------------

    fn totals(&mut self, lines: &[(String, String)]) {
        self.cursor += 4.0;
        let label_end = MARGIN_LEFT + CONTENT_WIDTH - 140.0;
        let value_end = MARGIN_LEFT + CONTENT_WIDTH;
        for (i, (label, value)) in lines.iter().enumerate() {
            let bold = i + 1 == lines.len();
            let line_height = BODY_SIZE * LINE_SPACING;
            self.ensure_room(line_height);
            let baseline = self.cursor + BODY_SIZE;
            let lx = label_end - text_width(label, BODY_SIZE, bold);
            let vx = value_end - text_width(value, BODY_SIZE, bold);
            self.text(lx, baseline, BODY_SIZE, bold, label.clone());
            self.text(vx, baseline, BODY_SIZE, bold, value.clone());
            self.cursor += line_height;
        }
    }

    /// Full-width signature line: caption on the left, then two ruled
    /// segments captioned `(подпись)` and `(ФИО)`, the signer's name
    /// printed over the second when known.
    fn signature_line(&mut self, slot: &SignatureSlot) {
        const FIRST_START: f32 = 150.0;
        const FIRST_END: f32 = 300.0;
        const SECOND_START: f32 = 320.0;
        const SECOND_END: f32 = 500.0;
        const BLOCK_HEIGHT: f32 = 36.0;

        self.ensure_room(BLOCK_HEIGHT);
        let baseline = self.cursor + 12.0;

        self.text(MARGIN_LEFT, baseline, BODY_SIZE, false, slot.caption.clone());

        let rule_y = baseline + 2.0;
        self.rule(FIRST_START, rule_y, FIRST_END, rule_y, 0.6);
        let caption = "(подпись)";
        let cx = (FIRST_START + FIRST_END) / 2.0 - text_width(caption, CAPTION_SIZE, false) / 2.0;
        self.text(cx, rule_y + 9.0, CAPTION_SIZE, false, caption.to_string());

        if let Some(name) = &slot.name {
            let nx =
                (SECOND_START + SECOND_END) / 2.0 - text_width(name, BODY_SIZE, false) / 2.0;
            self.text(nx, baseline, BODY_SIZE, false, name.clone());
        }
        self.rule(SECOND_START, rule_y, SECOND_END, rule_y, 0.6);
        let caption = "(ФИО)";
        let cx = (SECOND_START + SECOND_END) / 2.0 - text_width(caption, CAPTION_SIZE, false) / 2.0;
        self.text(cx, rule_y + 9.0, CAPTION_SIZE, false, caption.to_string());

        self.cursor += BLOCK_HEIGHT;
    }

    /// Two-column signature layout for acts: each slot gets a bold
    /// caption, a ruled line with the name alongside.
    fn paired_signatures(&mut self, slots: &[SignatureSlot]) {
        const BLOCK_HEIGHT: f32 = 58.0;
        const RULE_LEN: f32 = 150.0;
        let gap = 20.0;
        let col_width = (CONTENT_WIDTH - gap) / 2.0;
        let columns = [MARGIN_LEFT, MARGIN_LEFT + col_width + gap];

        for pair in slots.chunks(2) {
            self.ensure_room(BLOCK_HEIGHT);
            let top = self.cursor;
            for (slot, x) in pair.iter().zip(columns) {
                self.text(x, top + BODY_SIZE, BODY_SIZE, true, slot.caption.clone());

                let rule_y = top + 42.0;
                self.rule(x, rule_y, x + RULE_LEN, rule_y, 0.6);
                if let Some(name) = &slot.name {
                    self.text(
                        x + RULE_LEN + 6.0,
                        rule_y - 2.0,
                        DETAIL_SIZE,
                        false,
                        format!("/ {name} /"),
                    );
                }
                let caption = "(подпись)";
                let cx = x + RULE_LEN / 2.0 - text_width(caption, CAPTION_SIZE, false) / 2.0;
                self.text(cx, rule_y + 9.0, CAPTION_SIZE, false, caption.to_string());
            }
            self.cursor += BLOCK_HEIGHT;
        }
    }
}

fn table_width(columns: &[Column]) -> f32 {
    columns.iter().map(|c| c.width).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
