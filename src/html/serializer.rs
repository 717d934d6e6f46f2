//! Document tree → HTML fragment
//!
//! A recursive walk with one match arm per node kind. The output is a fragment (no `<html>`
//! wrapper) meant to be injected into the article page as is.

use super::writer::HtmlWriter;
use crate::diagnostics::{DiagnosticSink, LogSink, Stage};
use crate::error::{ContentError, ContentResult};
use crate::tree::{
    Alignment, CodeBlockNode, Dimension, Document, EmbedNode, ImageNode, LinkNode, ListKind,
    ListNode, Node, ParagraphNode, TableCellNode, TextFormat, TextNode, TweetNode, VideoNode,
    YouTubeNode, DEFAULT_MAX_DEPTH,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const YOUTUBE_DEFAULT_WIDTH: &str = "560";
const YOUTUBE_DEFAULT_HEIGHT: &str = "315";
const YOUTUBE_DEFAULT_TITLE: &str = "YouTube video";
const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";
const TWEET_BASE: &str = "https://twitter.com/i/status/";
const TWEET_LINK_TEXT: &str = "View tweet";

/// A bare YouTube id, or the id inside a watch / short / embed URL.
static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_-]+|.*(?:[?&]v=|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]+).*)$")
        .unwrap()
});

/// A bare tweet id, or the id inside a status URL.
static TWEET_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+|.*/status(?:es)?/([0-9]+).*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Deepest nesting the serializer accepts before giving up on the document
    pub max_depth: usize,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Renders documents to HTML.
///
/// [`serialize`](Self::serialize) returns the internal `Result`; [`render`](Self::render) is
/// the never-fail variant that reports errors to the sink and yields `""`.
#[derive(Clone)]
pub struct HtmlSerializer {
    options: SerializerOptions,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::with_options(SerializerOptions::default())
    }

    pub fn with_options(options: SerializerOptions) -> Self {
        Self {
            options,
            sink: Arc::new(LogSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    pub fn serialize(&self, doc: &Document) -> ContentResult<String> {
        let mut render = Render {
            writer: HtmlWriter::new(),
            max_depth: self.options.max_depth,
        };
        render.nodes(doc.children(), 1, Scope::Flow)?;
        Ok(render.writer.into_string())
    }

    pub fn render(&self, doc: &Document) -> String {
        self.serialize(doc).unwrap_or_else(|err| {
            self.sink.report(Stage::Serialize, &err);
            String::new()
        })
    }
}

/// What the children of the current node are rendered inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Flow,
    /// Items of a numbered list, which may carry their ordinal
    NumberedList,
    /// Code block contents: text only, no inline formatting
    Code,
}

struct Render {
    writer: HtmlWriter,
    max_depth: usize,
}

impl Render {
    fn nodes(&mut self, nodes: &[Node], depth: usize, scope: Scope) -> ContentResult<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        if depth > self.max_depth {
            return Err(ContentError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        for node in nodes {
            self.node(node, depth, scope)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &Node, depth: usize, scope: Scope) -> ContentResult<()> {
        let next = depth + 1;
        match node {
            Node::Text(text) if scope == Scope::Code => self.writer.text(&text.text),
            Node::Text(text) => self.formatted_text(text),
            Node::Paragraph(paragraph) => self.paragraph(paragraph, next),
            Node::Heading(heading) => {
                let tag = format!("h{}", heading.level);
                self.writer.start_tag(&tag)?;
                self.alignment(heading.alignment)?;
                self.writer.finish_tag()?;
                self.nodes(&heading.children, next, Scope::Flow)?;
                self.writer.end_tag(&tag)
            }
            Node::List(list) => self.list(list, next),
            Node::ListItem(item) => {
                self.writer.start_tag("li")?;
                if scope == Scope::NumberedList {
                    if let Some(value) = item.value {
                        self.writer.attribute("value", &value.to_string())?;
                    }
                }
                self.writer.finish_tag()?;
                self.nodes(&item.children, next, Scope::Flow)?;
                self.writer.end_tag("li")
            }
            Node::Quote(quote) => self.container("blockquote", &quote.children, next),
            Node::Link(link) => self.link(link, next),
            Node::LineBreak if scope == Scope::Code => self.writer.text("\n"),
            Node::LineBreak => self.void("br"),
            Node::HorizontalRule => self.void("hr"),
            Node::Tab => self.writer.text("\t"),
            Node::Image(image) => self.image(image),
            Node::CodeBlock(code) => self.code_block(code, next),
            Node::CodeHighlight(token) => self.writer.text(&token.text),
            Node::Table(table) => self.container("table", &table.children, next),
            Node::TableRow(row) => self.container("tr", &row.children, next),
            Node::TableCell(cell) => self.table_cell(cell, next),
            Node::Video(video) => self.video(video),
            Node::Embed(embed) => self.embed(embed),
            Node::YouTube(youtube) => self.youtube(youtube),
            Node::Tweet(tweet) => self.tweet(tweet),
            Node::Callout(callout) => {
                let class = format!("callout callout-{}", callout.variant.as_str());
                self.writer.start_tag("div")?;
                self.writer.attribute("class", &class)?;
                self.writer.finish_tag()?;
                self.nodes(&callout.children, next, Scope::Flow)?;
                self.writer.end_tag("div")
            }
            Node::Spoiler(spoiler) => {
                self.writer.start_tag("details")?;
                self.writer.attribute("class", "spoiler")?;
                self.writer.finish_tag()?;
                self.writer.start_tag("summary")?;
                self.writer.finish_tag()?;
                self.writer.text(spoiler.summary())?;
                self.writer.end_tag("summary")?;
                self.nodes(&spoiler.children, next, Scope::Flow)?;
                self.writer.end_tag("details")
            }
            Node::Mention(mention) => {
                self.writer.start_tag("span")?;
                self.writer.attribute("class", "mention")?;
                if let Some(user_id) = &mention.user_id {
                    self.writer.attribute("data-user-id", user_id)?;
                }
                self.writer.finish_tag()?;
                self.writer.text(&mention.label())?;
                self.writer.end_tag("span")
            }
            // Newer editor kinds: keep their content, drop the wrapper
            Node::Unknown(unknown) => match &unknown.children {
                Some(children) => self.nodes(children, next, scope),
                None => Ok(()),
            },
        }
    }

    fn void(&mut self, tag: &str) -> ContentResult<()> {
        self.writer.start_tag(tag)?;
        self.writer.finish_tag()
    }

    fn container(&mut self, tag: &str, children: &[Node], depth: usize) -> ContentResult<()> {
        self.writer.start_tag(tag)?;
        self.writer.finish_tag()?;
        self.nodes(children, depth, Scope::Flow)?;
        self.writer.end_tag(tag)
    }

    fn alignment(&mut self, alignment: Alignment) -> ContentResult<()> {
        self.writer
            .attribute("style", &format!("text-align: {};", alignment))
    }

    fn dimension(&mut self, key: &str, dimension: &Option<Dimension>) -> ContentResult<()> {
        match dimension.as_ref().and_then(Dimension::attribute_value) {
            Some(value) => self.writer.attribute(key, &value),
            None => Ok(()),
        }
    }

    fn formatted_text(&mut self, text: &TextNode) -> ContentResult<()> {
        if text.text.is_empty() {
            return Ok(());
        }
        let tags: Vec<&str> = text.format.active().map(format_tag).collect();
        for tag in &tags {
            self.writer.start_tag(tag)?;
            self.writer.finish_tag()?;
        }
        self.writer.text(&text.text)?;
        for tag in tags.iter().rev() {
            self.writer.end_tag(tag)?;
        }
        Ok(())
    }

    fn paragraph(&mut self, paragraph: &ParagraphNode, depth: usize) -> ContentResult<()> {
        self.writer.start_tag("p")?;
        if paragraph.is_blank() {
            // Keeps the empty line visible; left alignment needs no style here
            if paragraph.alignment != Alignment::Left {
                self.alignment(paragraph.alignment)?;
            }
            self.writer.finish_tag()?;
            self.writer.raw("&nbsp;")?;
        } else {
            self.alignment(paragraph.alignment)?;
            self.writer.finish_tag()?;
            self.nodes(&paragraph.children, depth, Scope::Flow)?;
        }
        self.writer.end_tag("p")
    }

    fn list(&mut self, list: &ListNode, depth: usize) -> ContentResult<()> {
        let (tag, scope) = match list.kind {
            ListKind::Number => ("ol", Scope::NumberedList),
            ListKind::Bullet => ("ul", Scope::Flow),
        };
        self.writer.start_tag(tag)?;
        if list.kind == ListKind::Number {
            if let Some(start) = list.start.filter(|start| *start != 1) {
                self.writer.attribute("start", &start.to_string())?;
            }
        }
        self.writer.finish_tag()?;
        self.nodes(&list.children, depth, scope)?;
        self.writer.end_tag(tag)
    }

    fn link(&mut self, link: &LinkNode, depth: usize) -> ContentResult<()> {
        self.writer.start_tag("a")?;
        self.writer.attribute("href", &link.url)?;
        if let Some(target) = &link.target {
            self.writer.attribute("target", target)?;
        }
        match (&link.rel, link.target.as_deref()) {
            (Some(rel), _) => self.writer.attribute("rel", rel)?,
            (None, Some("_blank")) => self.writer.attribute("rel", "noopener noreferrer")?,
            (None, _) => {}
        }
        if let Some(title) = &link.title {
            self.writer.attribute("title", title)?;
        }
        self.writer.finish_tag()?;
        self.nodes(&link.children, depth, Scope::Flow)?;
        self.writer.end_tag("a")
    }

    fn image(&mut self, image: &ImageNode) -> ContentResult<()> {
        self.writer.start_tag("figure")?;
        self.writer.attribute("class", "content-image")?;
        self.writer.finish_tag()?;

        self.writer.start_tag("img")?;
        self.writer.attribute("src", &image.src)?;
        self.writer
            .attribute("alt", image.alt_text.as_deref().unwrap_or_default())?;
        self.dimension("width", &image.width)?;
        self.dimension("height", &image.height)?;
        self.writer.attribute("loading", "lazy")?;
        self.writer.finish_tag()?;

        if let Some(caption) = image.caption.as_deref().filter(|c| !c.trim().is_empty()) {
            self.writer.start_tag("figcaption")?;
            self.writer.finish_tag()?;
            self.writer.text(caption)?;
            self.writer.end_tag("figcaption")?;
        }
        self.writer.end_tag("figure")
    }

    fn code_block(&mut self, code: &CodeBlockNode, depth: usize) -> ContentResult<()> {
        self.writer.start_tag("pre")?;
        self.writer.finish_tag()?;
        self.writer.start_tag("code")?;
        if let Some(language) = code.language.as_deref().filter(|l| !l.trim().is_empty()) {
            self.writer
                .attribute("class", &format!("language-{}", language.trim()))?;
        }
        self.writer.finish_tag()?;
        self.nodes(&code.children, depth, Scope::Code)?;
        self.writer.end_tag("code")?;
        self.writer.end_tag("pre")
    }

    fn table_cell(&mut self, cell: &TableCellNode, depth: usize) -> ContentResult<()> {
        let tag = if cell.header_state.is_header() {
            "th"
        } else {
            "td"
        };
        self.writer.start_tag(tag)?;
        if let Some(span) = cell.col_span.filter(|span| *span > 1) {
            self.writer.attribute("colspan", &span.to_string())?;
        }
        if let Some(span) = cell.row_span.filter(|span| *span > 1) {
            self.writer.attribute("rowspan", &span.to_string())?;
        }
        self.writer.finish_tag()?;
        self.nodes(&cell.children, depth, Scope::Flow)?;
        self.writer.end_tag(tag)
    }

    fn video(&mut self, video: &VideoNode) -> ContentResult<()> {
        self.writer.start_tag("div")?;
        self.writer.attribute("class", "content-video")?;
        self.writer.finish_tag()?;

        self.writer.start_tag("video")?;
        self.writer.attribute("src", &video.src)?;
        self.dimension("width", &video.width)?;
        self.dimension("height", &video.height)?;
        if let Some(poster) = &video.poster {
            self.writer.attribute("poster", poster)?;
        }
        if video.shows_controls() {
            self.writer.flag("controls")?;
        }
        if video.autoplay == Some(true) {
            self.writer.flag("autoplay")?;
        }
        if video.muted == Some(true) {
            self.writer.flag("muted")?;
        }
        if video.looping == Some(true) {
            self.writer.flag("loop")?;
        }
        self.writer.flag("playsinline")?;
        self.writer.end_tag("video")?;
        self.writer.end_tag("div")
    }

    fn embed(&mut self, embed: &EmbedNode) -> ContentResult<()> {
        self.writer.start_tag("div")?;
        self.writer.attribute("class", "content-embed")?;
        self.writer.finish_tag()?;

        self.writer.start_tag("iframe")?;
        self.writer.attribute("src", &embed.url)?;
        if let Some(title) = &embed.title {
            self.writer.attribute("title", title)?;
        }
        self.dimension("width", &embed.width)?;
        self.dimension("height", &embed.height)?;
        self.writer.attribute("frameborder", "0")?;
        self.writer.flag("allowfullscreen")?;
        self.writer.end_tag("iframe")?;
        self.writer.end_tag("div")
    }

    fn youtube(&mut self, youtube: &YouTubeNode) -> ContentResult<()> {
        let Some(id) = youtube.video_id.as_deref().and_then(youtube_id) else {
            log::debug!("youtube node without a usable video id skipped");
            return Ok(());
        };
        let width = youtube
            .width
            .as_ref()
            .and_then(Dimension::attribute_value)
            .unwrap_or_else(|| YOUTUBE_DEFAULT_WIDTH.to_string());
        let height = youtube
            .height
            .as_ref()
            .and_then(Dimension::attribute_value)
            .unwrap_or_else(|| YOUTUBE_DEFAULT_HEIGHT.to_string());

        self.writer.start_tag("div")?;
        self.writer
            .attribute("class", "content-embed content-youtube")?;
        self.writer.finish_tag()?;

        self.writer.start_tag("iframe")?;
        self.writer.attribute("width", &width)?;
        self.writer.attribute("height", &height)?;
        self.writer
            .attribute("src", &format!("{YOUTUBE_EMBED_BASE}{id}"))?;
        self.writer.attribute(
            "title",
            youtube.title.as_deref().unwrap_or(YOUTUBE_DEFAULT_TITLE),
        )?;
        self.writer.attribute("frameborder", "0")?;
        self.writer.attribute("allow", YOUTUBE_ALLOW)?;
        self.writer.flag("allowfullscreen")?;
        self.writer.end_tag("iframe")?;
        self.writer.end_tag("div")
    }

    fn tweet(&mut self, tweet: &TweetNode) -> ContentResult<()> {
        let Some(id) = tweet.tweet_id.as_deref().and_then(tweet_id) else {
            log::debug!("tweet node without a usable id skipped");
            return Ok(());
        };
        self.writer.start_tag("div")?;
        self.writer
            .attribute("class", "content-embed content-twitter")?;
        self.writer.finish_tag()?;

        self.writer.start_tag("blockquote")?;
        self.writer.attribute("class", "twitter-tweet")?;
        self.writer.finish_tag()?;
        self.writer.start_tag("a")?;
        self.writer.attribute("href", &format!("{TWEET_BASE}{id}"))?;
        self.writer.finish_tag()?;
        self.writer.text(TWEET_LINK_TEXT)?;
        self.writer.end_tag("a")?;
        self.writer.end_tag("blockquote")?;
        self.writer.end_tag("div")
    }
}

fn format_tag(flag: TextFormat) -> &'static str {
    match flag {
        TextFormat::BOLD => "strong",
        TextFormat::ITALIC => "em",
        TextFormat::STRIKETHROUGH => "s",
        TextFormat::UNDERLINE => "u",
        TextFormat::CODE => "code",
        TextFormat::SUPERSCRIPT => "sup",
        TextFormat::SUBSCRIPT => "sub",
        _ => "span",
    }
}

fn youtube_id(stored: &str) -> Option<&str> {
    let stored = stored.trim();
    let captures = YOUTUBE_ID.captures(stored)?;
    Some(captures.get(1).map_or(stored, |id| id.as_str()))
}

fn tweet_id(stored: &str) -> Option<&str> {
    let stored = stored.trim();
    let captures = TWEET_ID.captures(stored)?;
    Some(captures.get(1).map_or(stored, |id| id.as_str()))
}

/// The text the serializer emits for a tweet embed, so text extraction can match it.
pub(crate) fn tweet_link_text(tweet: &TweetNode) -> Option<&'static str> {
    tweet
        .tweet_id
        .as_deref()
        .and_then(tweet_id)
        .map(|_| TWEET_LINK_TEXT)
}
