//! HTML → document definition.
//!
//! Flattens the rendered fragment into an ordered list of text blocks the PDF
//! renderer can lay out: headings, paragraphs, list items and table rows.
//! Styling (colours, gradients) is dropped; structure and text are kept.

use scraper::{ElementRef, Html, Node};
use serde::Serialize;

/// Page geometry in PostScript points (1/72 in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSetup {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Left, top, right, bottom.
    pub margins_pt: [f32; 4],
}

impl PageSetup {
    /// US Letter, portrait, 40pt side margins and 60pt top/bottom margins.
    pub fn letter_portrait() -> Self {
        PageSetup {
            width_pt: 612.0,
            height_pt: 792.0,
            margins_pt: [40.0, 60.0, 40.0, 60.0],
        }
    }

    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - self.margins_pt[0] - self.margins_pt[2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
    TableRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDefinition {
    pub page: PageSetup,
    pub blocks: Vec<Block>,
}

impl DocumentDefinition {
    pub fn from_html(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let mut collector = Collector::default();
        collector.walk(fragment.root_element());
        collector.flush();

        DocumentDefinition {
            page: PageSetup::letter_portrait(),
            blocks: collector.blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Default)]
struct Collector {
    blocks: Vec<Block>,
    inline: String,
    inline_bold: bool,
}

impl Collector {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    if self.inline.trim().is_empty() {
                        self.inline_bold = is_bold_context(element);
                    }
                    self.inline.push_str(text);
                }
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.visit(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            "script" | "style" | "head" | "title" | "noscript" | "template" => {}
            "br" => self.flush(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                let level = name[1..].parse::<u8>().unwrap_or(6);
                self.push(BlockKind::Heading(level), collapse(element.text()), true);
            }
            "li" => {
                self.flush();
                self.push(BlockKind::ListItem, collapse(element.text()), false);
            }
            "tr" => {
                self.flush();
                self.push_row(element);
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "table" | "thead"
            | "tbody" | "tfoot" | "ul" | "ol" | "blockquote" | "caption" | "body" | "html"
            | "hr" => {
                self.flush();
                self.walk(element);
                self.flush();
            }
            _ => self.walk(element),
        }
    }

    fn push_row(&mut self, row: ElementRef<'_>) {
        let cells: Vec<(String, bool)> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .map(|cell| (collapse(cell.text()), cell.value().name() == "th"))
            .collect();

        let bold = !cells.is_empty() && cells.iter().all(|(_, header)| *header);
        let text = cells
            .into_iter()
            .map(|(text, _)| text)
            .collect::<Vec<_>>()
            .join(" | ");
        self.push(BlockKind::TableRow, text, bold);
    }

    fn push(&mut self, kind: BlockKind, text: String, bold: bool) {
        if !text.is_empty() {
            self.blocks.push(Block { kind, text, bold });
        }
    }

    fn flush(&mut self) {
        let text = collapse(std::iter::once(self.inline.as_str()));
        let bold = self.inline_bold;
        self.inline.clear();
        self.inline_bold = false;
        self.push(BlockKind::Paragraph, text, bold);
    }
}

fn is_bold_context(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "b" | "strong" | "th")
}

/// Joins text pieces and collapses whitespace runs the way a browser would.
fn collapse<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in pieces.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
