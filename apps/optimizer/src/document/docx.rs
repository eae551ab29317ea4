//! Minimal OOXML (`.docx`) package writer.
//!
//! Emits just the five parts Word needs: content types, package rels, the
//! document body, a style sheet (Normal, Title, Heading 1, Hyperlink) and the
//! document rels that carry one external relationship per hyperlink.

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::AppError;

const TWIPS_PER_INCH: f32 = 1440.0;
const LINK_COLOR: &str = "0563C1";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

// ────────────────────────────────────────────────────────────────────────────
// Page setup
// ────────────────────────────────────────────────────────────────────────────

/// Paper, margins and base font for a résumé page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSetup {
    pub font: String,
    pub font_size_pt: u8,
    pub page_width_in: f32,
    pub page_height_in: f32,
    pub margin_top_in: f32,
    pub margin_bottom_in: f32,
    pub margin_left_in: f32,
    pub margin_right_in: f32,
}

/// US letter, Calibri 12pt, 0.5" top/bottom and 0.7" left/right margins.
pub fn default_page_setup() -> PageSetup {
    PageSetup {
        font: "Calibri".to_string(),
        font_size_pt: 12,
        page_width_in: 8.5,
        page_height_in: 11.0,
        margin_top_in: 0.5,
        margin_bottom_in: 0.5,
        margin_left_in: 0.7,
        margin_right_in: 0.7,
    }
}

fn twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Content model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Normal,
    Title,
    Heading1,
}

impl ParagraphStyle {
    fn style_id(&self) -> &'static str {
        match self {
            ParagraphStyle::Normal => "Normal",
            ParagraphStyle::Title => "Title",
            ParagraphStyle::Heading1 => "Heading1",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub size_pt: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(Run),
    Hyperlink { url: String, run: Run },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub centered: bool,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Paragraph {
            style,
            centered: false,
            inlines: Vec::new(),
        }
    }

    pub fn blank() -> Self {
        Paragraph::new(ParagraphStyle::Normal)
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn text(mut self, text: impl Into<String>, size_pt: u8) -> Self {
        self.inlines.push(Inline::Text(Run {
            text: text.into(),
            bold: false,
            size_pt: Some(size_pt),
        }));
        self
    }

    pub fn bold(mut self, text: impl Into<String>, size_pt: u8) -> Self {
        self.inlines.push(Inline::Text(Run {
            text: text.into(),
            bold: true,
            size_pt: Some(size_pt),
        }));
        self
    }

    /// `text` is what the reader sees; `url` becomes the relationship target.
    pub fn link(mut self, url: impl Into<String>, text: impl Into<String>, size_pt: u8) -> Self {
        self.inlines.push(Inline::Hyperlink {
            url: url.into(),
            run: Run {
                text: text.into(),
                bold: false,
                size_pt: Some(size_pt),
            },
        });
        self
    }

    /// Visible text, as Word would show it.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(run) | Inline::Hyperlink { run, .. } => run.text.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub page: PageSetup,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(page: PageSetup) -> Self {
        Document {
            page,
            paragraphs: Vec::new(),
        }
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Non-empty paragraph texts in order.
    pub fn visible_lines(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    pub fn hyperlinks(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .flat_map(|p| &p.inlines)
            .filter_map(|inline| match inline {
                Inline::Hyperlink { url, .. } => Some(url.as_str()),
                Inline::Text(_) => None,
            })
            .collect()
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        let cursor = self.write_package(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    fn write_package<W: Write + Seek>(&self, sink: W) -> Result<W, AppError> {
        let links = self.hyperlinks();
        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", content_types_xml()),
            ("_rels/.rels", package_rels_xml()),
            ("word/document.xml", self.document_xml()),
            ("word/styles.xml", styles_xml(&self.page)),
            ("word/_rels/document.xml.rels", document_rels_xml(&links)),
        ];
        for (name, body) in parts {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
        }
        Ok(zip.finish()?)
    }

    // ── XML parts ──────────────────────────────────────────────────────────

    fn document_xml(&self) -> String {
        let mut body = String::new();
        // rId1 is the style sheet; hyperlinks follow in document order.
        let mut next_link = 2;
        for paragraph in &self.paragraphs {
            body.push_str("<w:p><w:pPr>");
            body.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, paragraph.style.style_id()));
            if paragraph.centered {
                body.push_str(r#"<w:jc w:val="center"/>"#);
            }
            body.push_str("</w:pPr>");
            for inline in &paragraph.inlines {
                match inline {
                    Inline::Text(run) => body.push_str(&run_xml(run, &self.page.font, false)),
                    Inline::Hyperlink { run, .. } => {
                        body.push_str(&format!(r#"<w:hyperlink r:id="rId{next_link}" w:history="1">"#));
                        body.push_str(&run_xml(run, &self.page.font, true));
                        body.push_str("</w:hyperlink>");
                        next_link += 1;
                    }
                }
            }
            body.push_str("</w:p>");
        }

        let p = &self.page;
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{NS_MAIN}" xmlns:r="{NS_REL}"><w:body>{body}<w:sectPr><w:pgSz w:w="{w}" w:h="{h}"/><w:pgMar w:top="{top}" w:right="{right}" w:bottom="{bottom}" w:left="{left}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
            w = twips(p.page_width_in),
            h = twips(p.page_height_in),
            top = twips(p.margin_top_in),
            right = twips(p.margin_right_in),
            bottom = twips(p.margin_bottom_in),
            left = twips(p.margin_left_in),
        )
    }
}

/// Run properties in schema order: style, fonts, bold, color, size, underline.
fn run_xml(run: &Run, font: &str, hyperlink: bool) -> String {
    let mut props = String::new();
    if hyperlink {
        props.push_str(r#"<w:rStyle w:val="Hyperlink"/>"#);
    }
    props.push_str(&format!(
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#,
        font = escape(font)
    ));
    if run.bold {
        props.push_str("<w:b/>");
    }
    if hyperlink {
        props.push_str(&format!(r#"<w:color w:val="{LINK_COLOR}"/>"#));
    }
    if let Some(size) = run.size_pt {
        let half_points = u32::from(size) * 2;
        props.push_str(&format!(r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#));
    }
    if hyperlink {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }
    format!(
        r#"<w:r><w:rPr>{props}</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        xml_text(&run.text)
    )
}

/// Escapes `s` for XML after replacing characters XML 1.0 cannot carry
/// (C0 controls other than tab, newline and carriage return) with spaces.
fn xml_text(s: &str) -> String {
    let allowed: String = s
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => c,
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => ' ',
            _ => c,
        })
        .collect();
    escape(allowed.as_str()).into_owned()
}

fn content_types_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#
        .to_string()
}

fn package_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_PKG_REL}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
    )
}

fn document_rels_xml(links: &[&str]) -> String {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    );
    for (i, url) in links.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{REL_HYPERLINK}" Target="{}" TargetMode="External"/>"#,
            i + 2,
            xml_text(url)
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{NS_PKG_REL}">{rels}</Relationships>"#
    )
}

fn styles_xml(page: &PageSetup) -> String {
    let font = escape(page.font.as_str());
    let base = u32::from(page.font_size_pt) * 2;
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{NS_MAIN}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/><w:sz w:val="{base}"/><w:szCs w:val="{base}"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="0"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:after="120"/><w:jc w:val="center"/></w:pPr><w:rPr><w:sz w:val="52"/><w:szCs w:val="52"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="120" w:after="60"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/><w:rPr><w:color w:val="{LINK_COLOR}"/><w:u w:val="single"/></w:rPr></w:style></w:styles>"#
    )
}
