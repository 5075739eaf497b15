// chaptext library root
// Chapter text extraction for plain-text curriculum content

pub mod commands;
pub mod services;
pub mod utils;

pub use services::parser::{
    ChapterMetadata,
    ChapterParser,
    ChapterParserConfig,
    ParsedChapter,
    Reference,
    ReferenceKind,
    Section,
    extract_chapter_title,
    extract_sections,
    extract_references,
    format_text,
    extract_key_terms,
    parse_chapter,
};
