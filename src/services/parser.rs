//! Chapter text parsing engine
//! Line-scanning and regex heuristics that turn raw plain-text chapter
//! transcripts into structured content for the learning app

use regex::Regex;
use std::collections::HashMap;

/// Reference kind: an in-text citation points at a figure or a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Figure,
    Table,
}

/// In-text figure/table citation, `id` is the `<major>.<minor>` number
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub id: String,
}

/// Titled block of chapter text delimited by heading lines
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Parsed chapter structure
#[derive(Debug)]
pub struct ParsedChapter {
    pub title: String,
    pub sections: Vec<Section>,
    pub references: Vec<Reference>,
    pub key_terms: HashMap<String, String>,
    pub body: String,
    pub metadata: ChapterMetadata,
}

/// Chapter metadata
#[derive(Debug, Default)]
pub struct ChapterMetadata {
    pub source_path: Option<String>,
    pub total_sections: usize,
    pub total_references: usize,
    pub total_key_terms: usize,
    pub parsed_at: chrono::DateTime<chrono::Utc>,
}

/// Chapter parser configuration
#[derive(Debug, Clone)]
pub struct ChapterParserConfig {
    pub collect_references: bool,
    pub collect_key_terms: bool,
    pub normalize_body: bool,
}

impl ChapterParserConfig {
    pub fn new() -> Self {
        Self {
            collect_references: true,
            collect_key_terms: true,
            normalize_body: true,
        }
    }
}

impl Default for ChapterParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Chapter parser
#[derive(Debug)]
pub struct ChapterParser {
    config: ChapterParserConfig,
}

impl ChapterParser {
    pub fn new() -> Self {
        Self::with_config(ChapterParserConfig::new())
    }

    pub fn with_config(config: ChapterParserConfig) -> Self {
        Self { config }
    }

    /// Run every extraction over one chapter and assemble the result.
    /// Each pass is a fresh derivation from `text`; the parser keeps no
    /// state between calls.
    pub fn parse(&self, text: &str) -> ParsedChapter {
        let title = extract_chapter_title(text);
        let sections = extract_sections(text);
        let references = if self.config.collect_references {
            extract_references(text)
        } else {
            Vec::new()
        };
        let key_terms = if self.config.collect_key_terms {
            extract_key_terms(text)
        } else {
            HashMap::new()
        };
        let body = if self.config.normalize_body {
            format_text(text)
        } else {
            text.to_string()
        };

        let metadata = ChapterMetadata {
            source_path: None,
            total_sections: sections.len(),
            total_references: references.len(),
            total_key_terms: key_terms.len(),
            parsed_at: chrono::Utc::now(),
        };

        ParsedChapter {
            title,
            sections,
            references,
            key_terms,
            body,
            metadata,
        }
    }
}

impl Default for ChapterParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First line of the chapter text, trimmed. An empty first line yields an
/// empty title; no further validation happens here.
pub fn extract_chapter_title(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

/// Split chapter text into titled sections.
///
/// Line 0 is the title line and is skipped. A line opens a new section when
/// it equals its own uppercasing, its trimmed form is non-empty, and it does
/// not start with `FIGURE` or `TABLE` (caption lines are set in caps too).
/// Lines before the first heading belong to no section and are dropped.
///
/// A line with no letters at all passes the uppercase check and counts as a
/// heading; downstream content depends on that boundary, so it stays.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in text.split('\n').skip(1) {
        let upper = line.to_uppercase();
        let is_heading = line == upper
            && !line.trim().is_empty()
            && !upper.starts_with("FIGURE")
            && !upper.starts_with("TABLE");

        if is_heading {
            if let Some(mut section) = current.take() {
                section.content = section.content.trim().to_string();
                sections.push(section);
            }
            current = Some(Section {
                title: line.trim().to_string(),
                content: String::new(),
            });
        } else if let Some(ref mut section) = current {
            section.content.push_str(line);
            section.content.push('\n');
        }
    }

    if let Some(mut section) = current.take() {
        section.content = section.content.trim().to_string();
        sections.push(section);
    }

    sections
}

/// Collect every figure and table citation in the text.
///
/// Two independent passes: all figure matches first (in text order), then
/// all table matches. Callers rely on the grouped order; do not merge the
/// passes into one scan. Repeated citations stay repeated.
pub fn extract_references(text: &str) -> Vec<Reference> {
    let mut references = Vec::new();

    let figure_pattern = Regex::new(r"(?i)figure\s+(\d+\.\d+)").unwrap();
    for cap in figure_pattern.captures_iter(text) {
        if let Some(mat) = cap.get(1) {
            references.push(Reference {
                kind: ReferenceKind::Figure,
                id: mat.as_str().to_string(),
            });
        }
    }

    let table_pattern = Regex::new(r"(?i)table\s+(\d+\.\d+)").unwrap();
    for cap in table_pattern.captures_iter(text) {
        if let Some(mat) = cap.get(1) {
            references.push(Reference {
                kind: ReferenceKind::Table,
                id: mat.as_str().to_string(),
            });
        }
    }

    references
}

/// Normalize chapter text: collapse runs of three or more newlines down to
/// a paragraph break, and put the space back after a period that runs
/// straight into an uppercase letter (line unwrapping tends to eat it).
///
/// Regex-level repair only. Periods before lowercase letters, digits or
/// end of input are left alone.
pub fn format_text(text: &str) -> String {
    let blank_runs = Regex::new(r"\n{3,}").unwrap();
    let collapsed = blank_runs.replace_all(text, "\n\n");

    let missing_space = Regex::new(r"\.([A-Z])").unwrap();
    let spaced = missing_space.replace_all(&collapsed, ". $1");

    spaced.trim().to_string()
}

/// Pull glossary-style term/definition pairs out of the text.
///
/// Every line is checked on its own: a run of letters and spaces, then a
/// single dash or colon, then the definition. A term that appears twice
/// keeps its last definition.
pub fn extract_key_terms(text: &str) -> HashMap<String, String> {
    let mut terms = HashMap::new();

    let term_pattern = Regex::new(r"^([A-Za-z\s]+)[\s]*[-:](.*)").unwrap();
    for line in text.split('\n') {
        if let Some(cap) = term_pattern.captures(line) {
            if let (Some(term), Some(definition)) = (cap.get(1), cap.get(2)) {
                terms.insert(
                    term.as_str().trim().to_string(),
                    definition.as_str().trim().to_string(),
                );
            }
        }
    }

    terms
}

/// Parse one chapter with the default configuration
pub fn parse_chapter(text: &str) -> ParsedChapter {
    ChapterParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_chapter_title() {
        assert_eq!(extract_chapter_title("  The Cell  \nbody"), "The Cell");
        assert_eq!(extract_chapter_title("Photosynthesis"), "Photosynthesis");
    }

    #[test]
    fn test_title_of_empty_and_blank_text() {
        assert_eq!(extract_chapter_title(""), "");
        assert_eq!(extract_chapter_title("\nWHAT IS LIFE\ncontent"), "");
    }

    #[test]
    fn test_extract_sections() {
        let text = "Chapter 1: Cells\nINTRODUCTION\nCells are small.\nVery small.\nSTRUCTURE\nMembranes everywhere.";
        let sections = extract_sections(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "INTRODUCTION");
        assert_eq!(sections[0].content, "Cells are small.\nVery small.");
        assert_eq!(sections[1].title, "STRUCTURE");
        assert_eq!(sections[1].content, "Membranes everywhere.");
    }

    #[test]
    fn test_consecutive_headings_give_empty_section() {
        let text = "Title\nFIRST HEADING\nSECOND HEADING\nsome text";
        let sections = extract_sections(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "FIRST HEADING");
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "some text");
    }

    #[test]
    fn test_lines_before_first_heading_are_dropped() {
        let text = "Title\npreamble paragraph\nmore preamble\nOVERVIEW\nkept";
        let sections = extract_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "OVERVIEW");
        assert_eq!(sections[0].content, "kept");
    }

    #[test]
    fn test_figure_and_table_lines_are_not_headings() {
        let text = "Title\nRESULTS\nFIGURE 2.1 GROWTH CURVE\nTABLE 3.2 SAMPLES\ndata text";
        let sections = extract_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "RESULTS");
        assert_eq!(
            sections[0].content,
            "FIGURE 2.1 GROWTH CURVE\nTABLE 3.2 SAMPLES\ndata text"
        );
    }

    #[test]
    fn test_letterless_line_counts_as_heading() {
        // No letters means the uppercase check passes vacuously.
        let text = "Title\n1.2.3\ncontent under numbers";
        let sections = extract_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "1.2.3");
        assert_eq!(sections[0].content, "content under numbers");
    }

    #[test]
    fn test_no_headings_yields_no_sections() {
        let sections = extract_sections("Title\njust lowercase prose\nmore prose");
        assert!(sections.is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn test_extract_references_grouped_order() {
        let text = "See Figure 1.2 and Table 3.4, then Figure 1.2 again.";
        let references = extract_references(text);

        assert_eq!(references.len(), 3);
        assert_eq!(references[0].kind, ReferenceKind::Figure);
        assert_eq!(references[0].id, "1.2");
        assert_eq!(references[1].kind, ReferenceKind::Figure);
        assert_eq!(references[1].id, "1.2");
        assert_eq!(references[2].kind, ReferenceKind::Table);
        assert_eq!(references[2].id, "3.4");
    }

    #[test]
    fn test_extract_references_case_insensitive() {
        let references = extract_references("see FIGURE 2.10 and table 4.1");
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].id, "2.10");
        assert_eq!(references[1].id, "4.1");
    }

    #[test]
    fn test_format_text() {
        assert_eq!(format_text("A.B\n\n\n\nC"), "A. B\n\nC");
        assert_eq!(format_text("  padded  "), "padded");
    }

    #[test]
    fn test_format_text_leaves_other_periods_alone() {
        assert_eq!(format_text("version 1.2 is out"), "version 1.2 is out");
        assert_eq!(format_text("e.g. lowercase.next"), "e.g. lowercase.next");
        assert_eq!(format_text("ends here."), "ends here.");
    }

    #[test]
    fn test_format_text_is_idempotent() {
        let samples = [
            "A.B\n\n\n\nC",
            "One.Two.Three",
            "para one\n\n\n\n\npara two",
            "",
        ];
        for sample in samples {
            let once = format_text(sample);
            assert_eq!(format_text(&once), once);
        }
    }

    #[test]
    fn test_extract_key_terms_last_definition_wins() {
        let text = "CPU - Central Processing Unit\nRAM: Random Access Memory\nCPU: updated def";
        let terms = extract_key_terms(text);

        assert_eq!(terms.len(), 2);
        assert_eq!(terms["CPU"], "updated def");
        assert_eq!(terms["RAM"], "Random Access Memory");
    }

    #[test]
    fn test_key_term_lines_must_match_pattern() {
        let terms = extract_key_terms(
            "A plain sentence with no delimiter\n42 - not letters\nOsmosis: diffusion of water",
        );
        assert_eq!(terms.len(), 1);
        assert_eq!(terms["Osmosis"], "diffusion of water");
    }

    #[test]
    fn test_parse_chapter_aggregates_everything() {
        let text = "Cell Biology\nINTRODUCTION\nSee Figure 1.1 for the cell.\nOsmosis - water diffusion";
        let chapter = parse_chapter(text);

        assert_eq!(chapter.title, "Cell Biology");
        assert_eq!(chapter.sections.len(), 1);
        assert_eq!(chapter.references.len(), 1);
        assert_eq!(chapter.key_terms["Osmosis"], "water diffusion");
        assert_eq!(chapter.metadata.total_sections, 1);
        assert_eq!(chapter.metadata.total_references, 1);
        assert_eq!(chapter.metadata.total_key_terms, 1);
        assert_eq!(chapter.body, format_text(text));
    }

    #[test]
    fn test_parser_config_toggles() {
        let text = "Title\nSECTION ONE\nFigure 1.1 here\nTerm - def";
        let parser = ChapterParser::with_config(ChapterParserConfig {
            collect_references: false,
            collect_key_terms: false,
            normalize_body: false,
        });
        let chapter = parser.parse(text);

        assert_eq!(chapter.sections.len(), 1);
        assert!(chapter.references.is_empty());
        assert!(chapter.key_terms.is_empty());
        assert_eq!(chapter.body, text);
    }

    #[test]
    fn test_everything_is_total_on_empty_input() {
        assert_eq!(extract_chapter_title(""), "");
        assert!(extract_sections("").is_empty());
        assert!(extract_references("").is_empty());
        assert!(extract_key_terms("").is_empty());
        assert_eq!(format_text(""), "");
    }
}
