//! Structural content analysis
//!
//! Counts come from the HTML form of the content (the serialized tree, or the stored HTML as
//! is): one count per opening-tag occurrence. Word and character counts come from the
//! unbounded plain text. The reading time here is the quick `words / 200` figure; the
//! user-facing estimate lives in [`read_time`](crate::read_time).

use crate::content::Content;
use crate::diagnostics::Stage;
use crate::html::HtmlSerializer;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

const WORDS_PER_MINUTE: usize = 200;

static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<p\b").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h[1-6]\b").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a\b").unwrap());
static LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(?:ul|ol)\b").unwrap());
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<pre\b").unwrap());
static TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table\b").unwrap());
static VIDEO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<video\b").unwrap());
static EMBED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<iframe\b").unwrap());

/// Three-tier structural complexity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    /// `score` weighs headings 1, images 2, tables 3, code blocks 3, videos 2, embeds 2.
    ///
    /// Tiers are checked from the top: complex first, then moderate.
    pub fn classify(score: usize, words: usize) -> Self {
        if score > 10 || words > 2000 {
            Complexity::Complex
        } else if score > 5 || words > 800 {
            Complexity::Moderate
        } else {
            Complexity::Simple
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub character_count: usize,
    pub paragraph_count: usize,
    pub heading_count: usize,
    pub image_count: usize,
    pub link_count: usize,
    pub list_count: usize,
    pub code_block_count: usize,
    pub table_count: usize,
    pub video_count: usize,
    pub embed_count: usize,
    /// Whole minutes
    pub reading_time: usize,
    pub has_images: bool,
    pub has_videos: bool,
    pub has_embeds: bool,
    pub has_tables: bool,
    pub has_code: bool,
    pub has_lists: bool,
    pub has_links: bool,
    pub complexity: Complexity,
}

impl ContentAnalysis {
    pub fn complexity_score(&self) -> usize {
        self.heading_count
            + 2 * self.image_count
            + 3 * self.table_count
            + 3 * self.code_block_count
            + 2 * self.video_count
            + 2 * self.embed_count
    }
}

/// Analyze stored content. Empty or unusable input yields the all-zero analysis.
pub fn analyze_content<'a>(content: impl Into<Content<'a>>) -> ContentAnalysis {
    analyze_content_with(content, &HtmlSerializer::new())
}

/// [`analyze_content`] under the serializer's depth limit. A tree the limit rejects is
/// reported to the serializer's sink and analyzed as empty.
pub fn analyze_content_with<'a>(
    content: impl Into<Content<'a>>,
    serializer: &HtmlSerializer,
) -> ContentAnalysis {
    let content = content.into();
    if content.is_empty() {
        return ContentAnalysis::default();
    }

    let text = match content.try_plain_text(serializer.options().max_depth) {
        Ok(text) => text,
        Err(err) => {
            serializer.sink().report(Stage::Extract, &err);
            return ContentAnalysis::default();
        }
    };
    let html = content.to_html_with(serializer);
    let word_count = text.split_whitespace().count();
    let count = |pattern: &Regex| pattern.find_iter(&html).count();

    let mut analysis = ContentAnalysis {
        word_count,
        character_count: text.chars().count(),
        paragraph_count: count(&PARAGRAPH),
        heading_count: count(&HEADING),
        image_count: count(&IMAGE),
        link_count: count(&LINK),
        list_count: count(&LIST),
        code_block_count: count(&CODE_BLOCK),
        table_count: count(&TABLE),
        video_count: count(&VIDEO),
        embed_count: count(&EMBED),
        reading_time: word_count.div_ceil(WORDS_PER_MINUTE).max(1),
        ..ContentAnalysis::default()
    };
    analysis.has_images = analysis.image_count > 0;
    analysis.has_videos = analysis.video_count > 0;
    analysis.has_embeds = analysis.embed_count > 0;
    analysis.has_tables = analysis.table_count > 0;
    analysis.has_code = analysis.code_block_count > 0;
    analysis.has_lists = analysis.list_count > 0;
    analysis.has_links = analysis.link_count > 0;
    analysis.complexity = Complexity::classify(analysis.complexity_score(), word_count);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingSink;
    use crate::html::SerializerOptions;
    use crate::tree::{Document, Node};
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn words(n: usize) -> String {
        vec!["goal"; n].join(" ")
    }

    fn tree(children: Vec<Value>) -> Value {
        json!({ "root": { "children": children } })
    }

    fn image() -> Value {
        json!({ "type": "image", "src": "/img.jpg", "altText": "shot" })
    }

    fn paragraph(text: String) -> Value {
        json!({ "type": "paragraph", "children": [{ "type": "text", "text": text }] })
    }

    #[test]
    fn test_null_is_all_zero() {
        let analysis = analyze_content(&Value::Null);
        assert_eq!(analysis, ContentAnalysis::default());
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.reading_time, 0);
        assert_eq!(analysis.complexity, Complexity::Simple);
    }

    #[test]
    fn test_three_images_six_hundred_words_is_moderate() {
        let value = tree(vec![image(), image(), image(), paragraph(words(600))]);
        let analysis = analyze_content(&value);
        assert_eq!(analysis.image_count, 3);
        assert!(analysis.has_images);
        assert_eq!(analysis.word_count, 600);
        assert_eq!(analysis.paragraph_count, 1);
        assert_eq!(analysis.reading_time, 3);
        assert_eq!(analysis.complexity_score(), 6);
        assert_eq!(analysis.complexity, Complexity::Moderate);
    }

    #[rstest]
    #[case::at_score_boundary(800, Complexity::Simple)]
    #[case::over_word_boundary(801, Complexity::Moderate)]
    fn test_moderate_word_boundary(#[case] word_count: usize, #[case] expected: Complexity) {
        // one image and one empty table: score 5
        let value = tree(vec![
            image(),
            json!({ "type": "table", "children": [] }),
            paragraph(words(word_count)),
        ]);
        let analysis = analyze_content(&value);
        assert_eq!(analysis.complexity_score(), 5);
        assert_eq!(analysis.complexity, expected);
    }

    #[rstest]
    #[case(10, 2000, Complexity::Moderate)]
    #[case(11, 0, Complexity::Complex)]
    #[case(0, 2001, Complexity::Complex)]
    #[case(5, 800, Complexity::Simple)]
    #[case(6, 0, Complexity::Moderate)]
    fn test_classify(#[case] score: usize, #[case] words: usize, #[case] expected: Complexity) {
        assert_eq!(Complexity::classify(score, words), expected);
    }

    #[test]
    fn test_html_input_counts_opening_tags() {
        let html = r#"<h2>Lineups</h2><P>Intro <a href="/a">one</a> <a href="/b">two</a></P>
            <ul><li>x</li></ul><pre><code>y</code></pre><iframe src="/e"></iframe>"#;
        let analysis = analyze_content(html);
        assert_eq!(analysis.heading_count, 1);
        assert_eq!(analysis.paragraph_count, 1);
        assert_eq!(analysis.link_count, 2);
        assert_eq!(analysis.list_count, 1);
        assert_eq!(analysis.code_block_count, 1);
        assert_eq!(analysis.embed_count, 1);
        assert!(analysis.has_links && analysis.has_lists && analysis.has_code && analysis.has_embeds);
        assert!(!analysis.has_videos);
    }

    fn nested_quotes(depth: usize) -> Document {
        let mut node = Node::text("deep");
        for _ in 0..depth {
            node = Node::quote(vec![node]);
        }
        Document::new(vec![node])
    }

    #[test]
    fn test_tree_over_the_limit_is_all_zero() {
        let doc = nested_quotes(10);
        let sink = Arc::new(RecordingSink::default());
        let shallow =
            HtmlSerializer::with_options(SerializerOptions { max_depth: 4 }).with_sink(sink.clone());

        let analysis = analyze_content_with(&doc, &shallow);
        assert_eq!(analysis, ContentAnalysis::default());
        assert_eq!(analysis.reading_time, 0);
        assert_eq!(sink.stages(), vec![Stage::Extract]);
    }

    #[test]
    fn test_configured_limit_reaches_text_and_html() {
        let doc = nested_quotes(300);
        assert_eq!(analyze_content(&doc), ContentAnalysis::default());

        let deep = HtmlSerializer::with_options(SerializerOptions { max_depth: 512 });
        let analysis = analyze_content_with(&doc, &deep);
        assert_eq!(analysis.word_count, 1);
        assert_eq!(analysis.reading_time, 1);
        assert_eq!(analysis.character_count, 4);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ContentAnalysis::default()).unwrap();
        assert_eq!(value["wordCount"], 0);
        assert_eq!(value["hasImages"], false);
        assert_eq!(value["complexity"], "simple");
    }
}
