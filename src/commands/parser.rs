//! Chapter parsing commands
//! The call surface the CLI front end uses: parse, single-facet
//! extraction, batch parsing and validation, with serde DTOs for output

use crate::services::parser::{
    extract_chapter_title, extract_key_terms, extract_references, extract_sections, format_text,
    parse_chapter, ParsedChapter, Reference, ReferenceKind, Section,
};
use crate::utils;
use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parse one chapter from in-memory content
pub fn parse_chapter_document(
    content: &str,
    source_path: Option<String>,
) -> Result<ParsedChapterDto> {
    let mut chapter = parse_chapter(content);

    // Attach the origin of the text
    chapter.metadata.source_path = source_path;

    debug!(
        "parsed chapter '{}': {} sections, {} references, {} key terms",
        chapter.title,
        chapter.metadata.total_sections,
        chapter.metadata.total_references,
        chapter.metadata.total_key_terms
    );

    Ok(chapter.into())
}

/// Read a chapter file and parse it
pub fn extract_chapter_from_file(file_path: &str) -> Result<ParsedChapterDto> {
    let content = utils::read_chapter_file(file_path)?;

    info!("parsing chapter file {}", file_path);
    parse_chapter_document(&content, Some(file_path.to_string()))
}

/// Extract only the titled sections of a chapter
pub fn extract_section_list(content: &str) -> Result<Vec<SectionDto>> {
    let sections = extract_sections(content);
    let dtos: Vec<SectionDto> = sections.into_iter().map(Into::into).collect();
    Ok(dtos)
}

/// Extract only the figure/table references of a chapter
pub fn extract_reference_list(content: &str) -> Result<Vec<ReferenceDto>> {
    let references = extract_references(content);
    let dtos: Vec<ReferenceDto> = references.into_iter().map(Into::into).collect();
    Ok(dtos)
}

/// Extract only the key terms of a chapter
pub fn extract_term_list(content: &str) -> Result<HashMap<String, String>> {
    Ok(extract_key_terms(content))
}

/// Normalize chapter text
pub fn format_chapter_text(content: &str) -> Result<String> {
    Ok(format_text(content))
}

/// Parse several chapters in one call, keeping input order
pub fn parse_multiple_chapters(chapters: Vec<ChapterInput>) -> Result<Vec<ParsedChapterDto>> {
    let mut results = Vec::new();

    for chapter in chapters {
        results.push(parse_chapter_document(
            &chapter.content,
            chapter.source_path,
        )?);
    }

    Ok(results)
}

/// Check chapter text for the structure the app expects.
/// Issues are advisory; only empty text makes the chapter invalid.
pub fn validate_chapter(content: &str) -> Result<ChapterValidationReport> {
    let mut issues = Vec::new();

    let title = extract_chapter_title(content);
    let has_title = !title.is_empty();
    if !has_title {
        issues.push("first line is empty, chapter has no title".to_string());
    }

    let sections = extract_sections(content);
    let has_sections = !sections.is_empty();
    if !has_sections {
        issues.push("no heading lines found, chapter has no sections".to_string());
    }

    let references = extract_references(content);
    let key_terms = extract_key_terms(content);

    Ok(ChapterValidationReport {
        is_valid: !content.trim().is_empty(),
        has_title,
        has_sections,
        section_count: sections.len(),
        reference_count: references.len(),
        key_term_count: key_terms.len(),
        issues,
    })
}

// ==================== DTO types ====================

/// Section DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDto {
    pub title: String,
    pub content: String,
}

impl From<Section> for SectionDto {
    fn from(s: Section) -> Self {
        Self {
            title: s.title,
            content: s.content,
        }
    }
}

/// Reference DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDto {
    pub kind: String,
    pub id: String,
}

impl From<Reference> for ReferenceDto {
    fn from(r: Reference) -> Self {
        Self {
            kind: match r.kind {
                ReferenceKind::Figure => "figure".to_string(),
                ReferenceKind::Table => "table".to_string(),
            },
            id: r.id,
        }
    }
}

/// Parsed chapter DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct ParsedChapterDto {
    pub title: String,
    pub sections: Vec<SectionDto>,
    pub references: Vec<ReferenceDto>,
    pub key_terms: HashMap<String, String>,
    pub body: String,
    pub total_sections: usize,
    pub total_references: usize,
    pub total_key_terms: usize,
    pub source_path: Option<String>,
    pub parsed_at: String,
}

impl From<ParsedChapter> for ParsedChapterDto {
    fn from(c: ParsedChapter) -> Self {
        Self {
            title: c.title,
            sections: c.sections.into_iter().map(Into::into).collect(),
            references: c.references.into_iter().map(Into::into).collect(),
            key_terms: c.key_terms,
            body: c.body,
            total_sections: c.metadata.total_sections,
            total_references: c.metadata.total_references,
            total_key_terms: c.metadata.total_key_terms,
            source_path: c.metadata.source_path,
            parsed_at: c.metadata.parsed_at.to_rfc3339(),
        }
    }
}

/// Chapter input for batch parsing
#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterInput {
    pub content: String,
    pub source_path: Option<String>,
}

/// Chapter validation result
#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterValidationReport {
    pub is_valid: bool,
    pub has_title: bool,
    pub has_sections: bool,
    pub section_count: usize,
    pub reference_count: usize,
    pub key_term_count: usize,
    pub issues: Vec<String>,
}
