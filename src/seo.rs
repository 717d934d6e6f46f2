//! SEO helpers
//!
//! Thin derivations over the other modules: the meta description is a smart excerpt, keywords
//! are the most frequent content words of the plain text, and [`generate_seo_metadata`]
//! bundles both with the word count and the formatted reading time.

use crate::content::Content;
use crate::html::HtmlSerializer;
use crate::read_time::{calculate_read_time_with, ReadTimeOptions};
use crate::text::{extract_smart_excerpt, extract_smart_excerpt_with};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_DESCRIPTION_LENGTH: usize = 160;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
        "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not",
        "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
        "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordOptions {
    pub max_keywords: usize,
    /// Shorter words are never keywords
    pub min_length: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            max_keywords: 10,
            min_length: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeoOptions {
    pub description_length: usize,
    pub keywords: KeywordOptions,
    pub read_time: ReadTimeOptions,
}

impl Default for SeoOptions {
    fn default() -> Self {
        Self {
            description_length: DEFAULT_DESCRIPTION_LENGTH,
            keywords: KeywordOptions::default(),
            read_time: ReadTimeOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub description: String,
    pub keywords: Vec<String>,
    pub word_count: usize,
    /// Formatted, e.g. `3 min read`
    pub reading_time: String,
}

/// A meta description: the smart excerpt, at most `max` characters plus the ellipsis.
pub fn generate_meta_description<'a>(content: impl Into<Content<'a>>, max: usize) -> String {
    extract_smart_excerpt(content, max)
}

/// The most frequent content words, most frequent first; ties keep their first-seen order.
pub fn extract_keywords<'a>(content: impl Into<Content<'a>>, options: &KeywordOptions) -> Vec<String> {
    keywords_from_text(&content.into().plain_text(), options)
}

fn keywords_from_text(text: &str, options: &KeywordOptions) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    let words = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= options.min_length.max(1))
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .filter(|word| !STOP_WORDS.contains(*word));
    for (position, word) in words.enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked
        .into_iter()
        .take(options.max_keywords)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Description, keywords, word count and formatted reading time in one pass over the content.
pub fn generate_seo_metadata<'a>(content: impl Into<Content<'a>>, options: &SeoOptions) -> SeoMetadata {
    generate_seo_metadata_with(content, options, &HtmlSerializer::new())
}

/// [`generate_seo_metadata`] under the serializer's depth limit, reporting to its sink.
pub fn generate_seo_metadata_with<'a>(
    content: impl Into<Content<'a>>,
    options: &SeoOptions,
    serializer: &HtmlSerializer,
) -> SeoMetadata {
    let content = content.into();
    let text = content.plain_text_with(serializer);
    let read_time = calculate_read_time_with(&content, &options.read_time, serializer);

    SeoMetadata {
        description: extract_smart_excerpt_with(&content, options.description_length, serializer),
        keywords: keywords_from_text(&text, &options.keywords),
        word_count: read_time.words,
        reading_time: read_time.formatted_time,
    }
}
