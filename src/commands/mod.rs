// Command modules
// The call surface exposed to the CLI front end

pub mod parser;

pub use parser::{
    parse_chapter_document,
    extract_chapter_from_file,
    extract_section_list,
    extract_reference_list,
    extract_term_list,
    format_chapter_text,
    parse_multiple_chapters,
    validate_chapter,
    ChapterInput,
    ChapterValidationReport,
    ParsedChapterDto,
    ReferenceDto,
    SectionDto,
};
