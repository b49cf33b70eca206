//! The research pipeline: sanitize, extract, prompt selection, competitor
//! fan-out, CSV segmentation, and final aggregation.

pub mod csv;
pub mod extract;
pub mod prompts;
pub mod research;
pub mod sanitize;
pub mod scrape;

pub use csv::{analyze_segments, parse_csv, CsvTable};
pub use extract::{parse_structured, Extractor};
pub use prompts::{
    format_competitor_prompt, format_research_prompt, format_segmentation_prompt,
    ANALYST_SYSTEM_PROMPT,
};
pub use research::ResearchPipeline;
pub use sanitize::strip_code_fences;
pub use scrape::{scrape_competitors, scrape_one, CompetitorBatch};
