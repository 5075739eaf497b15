// Service modules
// Core business logic: the chapter text parsing engine

pub mod parser;

pub use parser::{
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
