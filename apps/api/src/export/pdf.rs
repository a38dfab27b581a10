//! PDF renderer. Lays a `DocumentDefinition` out on Letter pages with printpdf.
//!
//! Line breaking uses static Helvetica width estimates in em units. Exact glyph
//! metrics are not needed: a line that is a few percent short or long still
//! reads fine, and nothing overflows because the estimate errs wide.
//! Rendering is CPU-bound; callers run it inside `spawn_blocking`.

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::export::definition::{Block, BlockKind, DocumentDefinition, PageSetup};
use crate::export::{DocumentRenderer, ExportError};

const PT_TO_MM: f32 = 25.4 / 72.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_SPACING: f32 = 1.35;
const BLOCK_GAP_PT: f32 = 4.0;
const LIST_INDENT_PT: f32 = 14.0;

pub struct PdfRenderer {
    pub title: String,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            title: "Potential Business Ideas".to_string(),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, definition: &DocumentDefinition) -> Result<Vec<u8>, ExportError> {
        let page = definition.page;
        let (doc, first_page, first_layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(page.width_pt * PT_TO_MM),
            Mm(page.height_pt * PT_TO_MM),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;

        let mut cursor = Cursor {
            layer: doc.get_page(first_page).get_layer(first_layer),
            y_pt: page.height_pt - page.margins_pt[1],
            pages: 1,
        };

        for block in &definition.blocks {
            let size = font_size(block.kind);
            let font = if block.bold { &bold } else { &regular };
            let indent = if block.kind == BlockKind::ListItem { LIST_INDENT_PT } else { 0.0 };
            let width_em = (page.text_width_pt() - indent) / size;

            for (i, line) in wrap_block(block, width_em).into_iter().enumerate() {
                let line_height = size * LINE_SPACING;
                if cursor.y_pt - line_height < page.margins_pt[3] {
                    cursor.next_page(&doc, &page);
                }
                cursor.y_pt -= line_height;

                let x_pt = page.margins_pt[0] + if i == 0 { 0.0 } else { indent };
                cursor.layer.use_text(
                    to_winansi(&line),
                    size,
                    Mm(x_pt * PT_TO_MM),
                    Mm(cursor.y_pt * PT_TO_MM),
                    font,
                );
            }
            cursor.y_pt -= BLOCK_GAP_PT;
        }

        doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

struct Cursor {
    layer: PdfLayerReference,
    y_pt: f32,
    pages: u32,
}

impl Cursor {
    fn next_page(&mut self, doc: &PdfDocumentReference, page: &PageSetup) {
        self.pages += 1;
        let (page_index, layer_index) = doc.add_page(
            Mm(page.width_pt * PT_TO_MM),
            Mm(page.height_pt * PT_TO_MM),
            format!("Layer {}", self.pages),
        );
        self.layer = doc.get_page(page_index).get_layer(layer_index);
        self.y_pt = page.height_pt - page.margins_pt[1];
    }
}

fn font_size(kind: BlockKind) -> f32 {
    match kind {
        BlockKind::Heading(1) => 20.0,
        BlockKind::Heading(2) => 16.0,
        BlockKind::Heading(3) => 13.0,
        BlockKind::Heading(_) => 12.0,
        _ => BODY_SIZE_PT,
    }
}

fn wrap_block(block: &Block, width_em: f32) -> Vec<String> {
    let text = match block.kind {
        BlockKind::ListItem => format!("- {}", block.text),
        _ => block.text.clone(),
    };
    wrap_text(&text, width_em, block.bold)
}

/// Greedy word wrap against an em-width budget. Words wider than a whole line
/// are split by character.
pub fn wrap_text(text: &str, width_em: f32, bold: bool) -> Vec<String> {
    let space = char_width(' ', bold);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_width = measure(word, bold);

        if word_width > width_em {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            for c in word.chars() {
                let w = char_width(c, bold);
                if line_width + w > width_em && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(c);
                line_width += w;
            }
            continue;
        }

        let needed = if line.is_empty() { word_width } else { line_width + space + word_width };
        if needed > width_em && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            line_width = needed;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Rendered width of `s` in em units.
pub fn measure(s: &str, bold: bool) -> f32 {
    s.chars().map(|c| char_width(c, bold)).sum()
}

/// Approximate Helvetica advance widths (em). Bold runs about 6% wider.
fn char_width(c: char, bold: bool) -> f32 {
    let base = match c {
        ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.278,
        'f' | 't' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.333,
        'r' => 0.389,
        'm' | 'M' => 0.833,
        'w' | 'W' => 0.722,
        '%' | '@' => 0.889,
        'A'..='Z' => 0.667,
        '0'..='9' | 'a'..='z' | '$' | '#' | '?' | '+' | '=' | '<' | '>' => 0.556,
        c if c.is_ascii() => 0.5,
        // CJK and other wide scripts
        _ => 1.0,
    };
    if bold {
        base * 1.06
    } else {
        base
    }
}

/// The builtin PDF fonts only carry WinAnsi glyphs; anything outside Latin-1
/// is replaced so the file stays readable.
fn to_winansi(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '-',
            c if (c as u32) < 0x100 => c,
            _ => '?',
        })
        .collect()
}
