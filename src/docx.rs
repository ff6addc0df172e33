//! Reader for the DOCX container: a zip archive of WordprocessingML parts.
//!
//! Only what title and header extraction need is read: top-level paragraph
//! text of the document body, split into sections at each `w:sectPr`, plus
//! the paragraphs of each section's default header part.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{Paragraph, Section};

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

#[derive(thiserror::Error, Debug)]
enum ReadError {
    #[error("zip: {0}")]
    Zip(#[from] ZipError),
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing {0}")]
    Missing(String),
}

/// Open a DOCX file and return its sections in reading order.
pub fn open(path: &Path) -> Result<Vec<Section>> {
    let file = File::open(path)?;
    let sections = read_sections(BufReader::new(file)).map_err(|e| Error::malformed(path, e))?;
    debug!(path = %path.display(), sections = sections.len(), "opened docx");
    Ok(sections)
}

fn read_sections<R: Read + Seek>(reader: R) -> std::result::Result<Vec<Section>, ReadError> {
    let mut archive = ZipArchive::new(reader)?;
    let document = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| ReadError::Missing(DOCUMENT_PART.to_string()))?;
    let rels = match read_part(&mut archive, DOCUMENT_RELS_PART)? {
        Some(xml) => parse_relationships(&xml)?,
        None => HashMap::new(),
    };

    let mut sections = Vec::new();
    let mut body = Vec::new();
    // A section without its own default header shows the previous one.
    let mut current_header: Vec<Paragraph> = Vec::new();

    for block in scan_part(&document)? {
        match block {
            Block::Paragraph(p) => body.push(p),
            Block::SectionBreak { header_rel } => {
                if let Some(rel_id) = header_rel {
                    current_header = read_header(&mut archive, &rels, &rel_id)?;
                }
                sections.push(Section {
                    header: current_header.clone(),
                    body: std::mem::take(&mut body),
                });
            }
        }
    }
    if !body.is_empty() {
        sections.push(Section {
            header: current_header,
            body,
        });
    }
    Ok(sections)
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<Option<String>, ReadError> {
    let mut part = match archive.by_name(name) {
        Ok(p) => p,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

fn read_header<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rels: &HashMap<String, String>,
    rel_id: &str,
) -> std::result::Result<Vec<Paragraph>, ReadError> {
    let target = rels
        .get(rel_id)
        .ok_or_else(|| ReadError::Missing(format!("relationship {}", rel_id)))?;
    let part_name = resolve_target(target);
    let xml = read_part(archive, &part_name)?.ok_or(ReadError::Missing(part_name))?;
    Ok(scan_part(&xml)?
        .into_iter()
        .filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::SectionBreak { .. } => None,
        })
        .collect())
}

/// Relationship targets are relative to `word/` unless they start at the package root.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

fn parse_relationships(xml: &str) -> std::result::Result<HashMap<String, String>, ReadError> {
    let mut reader = Reader::from_str(xml);
    let mut rels = HashMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rels)
}

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

#[derive(Debug)]
enum Block {
    Paragraph(Paragraph),
    /// End of a section; carries the relationship id of its default header, if any.
    SectionBreak { header_rel: Option<String> },
}

#[derive(Default)]
struct OpenParagraph {
    text: String,
    section_break: Option<Option<String>>,
}

/// Walk one WordprocessingML part and emit its top-level paragraphs and
/// section breaks in order. Paragraphs inside tables and text boxes are skipped.
fn scan_part(xml: &str) -> std::result::Result<Vec<Block>, ReadError> {
    let mut reader = Reader::from_str(xml);
    let mut blocks = Vec::new();

    let mut para: Option<OpenParagraph> = None;
    let mut para_depth = 0usize;
    let mut nested = 0usize; // open w:tbl / w:txbxContent
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut change_depth = 0usize; // open w:pPrChange / w:sectPrChange
    let mut sect: Option<Option<String>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    para_depth += 1;
                    if para_depth == 1 && nested == 0 {
                        para = Some(OpenParagraph::default());
                    }
                }
                b"w:tbl" | b"w:txbxContent" => nested += 1,
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                b"w:pPrChange" | b"w:sectPrChange" => change_depth += 1,
                b"w:sectPr" if change_depth == 0 && nested == 0 => sect = Some(None),
                b"w:headerReference" if change_depth == 0 => header_reference(&e, &mut sect),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if para_depth == 0 && nested == 0 => {
                    blocks.push(Block::Paragraph(Paragraph::default()));
                }
                b"w:sectPr" if change_depth == 0 && nested == 0 => {
                    close_section(None, &mut para, &mut blocks);
                }
                b"w:headerReference" if change_depth == 0 => header_reference(&e, &mut sect),
                name if run_depth > 0 && nested == 0 => {
                    if let Some(p) = para.as_mut() {
                        push_run_char(name, &e, &mut p.text);
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_text && nested == 0 => {
                if let Some(p) = para.as_mut() {
                    p.text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if para_depth == 1 && nested == 0 {
                        if let Some(p) = para.take() {
                            blocks.push(Block::Paragraph(Paragraph::new(p.text)));
                            if let Some(header_rel) = p.section_break {
                                blocks.push(Block::SectionBreak { header_rel });
                            }
                        }
                    }
                    para_depth = para_depth.saturating_sub(1);
                }
                b"w:tbl" | b"w:txbxContent" => nested = nested.saturating_sub(1),
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                b"w:pPrChange" | b"w:sectPrChange" => change_depth = change_depth.saturating_sub(1),
                b"w:sectPr" if change_depth == 0 && nested == 0 => {
                    if let Some(header_rel) = sect.take() {
                        close_section(header_rel, &mut para, &mut blocks);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

fn header_reference(e: &BytesStart, sect: &mut Option<Option<String>>) {
    let Some(current) = sect.as_mut() else {
        return;
    };
    let kind = attr(e, b"w:type").unwrap_or_else(|| "default".to_string());
    if kind == "default" {
        *current = attr(e, b"r:id");
    }
}

/// A `w:sectPr` inside a paragraph ends the section after that paragraph;
/// the body-level one ends the last section.
fn close_section(header_rel: Option<String>, para: &mut Option<OpenParagraph>, blocks: &mut Vec<Block>) {
    match para.as_mut() {
        Some(p) => p.section_break = Some(header_rel),
        None => blocks.push(Block::SectionBreak { header_rel }),
    }
}

fn push_run_char(name: &[u8], e: &BytesStart, text: &mut String) {
    match name {
        b"w:tab" => text.push('\t'),
        b"w:cr" => text.push('\n'),
        b"w:br" => {
            // Page and column breaks do not render as text.
            let kind = attr(e, b"w:type");
            if matches!(kind.as_deref(), None | Some("textWrapping")) {
                text.push('\n');
            }
        }
        b"w:noBreakHyphen" => text.push('-'),
        _ => {}
    }
}
