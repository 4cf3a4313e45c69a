#![allow(dead_code)]

pub mod page_extractor;
pub mod summarizer;
pub mod transcript_source;
