//! Node kinds of the document tree
//!
//! Every node the editor can produce is a variant of the closed [`Node`] enum. Decoding
//! dispatches on the JSON `type` field; both the editor's compact names (`listitem`,
//! `horizontalrule`) and kebab-case names (`list-item`, `horizontal-rule`) are accepted.
//!
//! | Kind | `type` | Children |
//! |------|--------|----------|
//! | Text | `text` | no |
//! | Paragraph | `paragraph` | inline |
//! | Heading | `heading` | inline |
//! | List / ListItem | `list`, `listitem` | items / mixed |
//! | Quote | `quote` | inline |
//! | Link | `link`, `autolink` | inline |
//! | LineBreak, HorizontalRule, Tab | `linebreak`, `horizontalrule`, `tab` | no |
//! | Image, Video, Embed, YouTube, Tweet | `image`, `video`, `embed`, `youtube`, `tweet` | no |
//! | CodeBlock / CodeHighlight | `code`, `code-highlight` | text tokens / no |
//! | Table / TableRow / TableCell | `table`, `tablerow`, `tablecell` | rows / cells / blocks |
//! | Callout, Spoiler | `callout`, `spoiler` | blocks |
//! | Mention | `mention` | no |
//!
//! Anything else decodes to [`Node::Unknown`], which keeps its `children` (if any) so that newer
//! editor versions still render their text. A known kind whose fields do not decode degrades the
//! same way.

use super::de;
use super::format::{Alignment, TextFormat};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(TextNode),
    Paragraph(ParagraphNode),
    Heading(HeadingNode),
    List(ListNode),
    ListItem(ListItemNode),
    Quote(QuoteNode),
    Link(LinkNode),
    LineBreak,
    HorizontalRule,
    Tab,
    Image(ImageNode),
    CodeBlock(CodeBlockNode),
    CodeHighlight(CodeHighlightNode),
    Table(TableNode),
    TableRow(TableRowNode),
    TableCell(TableCellNode),
    Video(VideoNode),
    Embed(EmbedNode),
    YouTube(YouTubeNode),
    Tweet(TweetNode),
    Callout(CalloutNode),
    Spoiler(SpoilerNode),
    Mention(MentionNode),
    Unknown(UnknownNode),
}

impl Node {
    /// Decode one node from its JSON form.
    ///
    /// Only values that are not nodes at all (numbers, strings, arrays, objects with a non-list
    /// `children`) are errors.
    pub fn from_value(value: &Value) -> Result<Node, serde_json::Error> {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let decoded = match kind {
            "text" => TextNode::deserialize(value).map(Node::Text),
            "paragraph" => ParagraphNode::deserialize(value).map(Node::Paragraph),
            "heading" => HeadingNode::deserialize(value).map(Node::Heading),
            "list" => ListNode::deserialize(value).map(Node::List),
            "listitem" | "list-item" => ListItemNode::deserialize(value).map(Node::ListItem),
            "quote" => QuoteNode::deserialize(value).map(Node::Quote),
            "link" | "autolink" => LinkNode::deserialize(value).map(Node::Link),
            "linebreak" | "line-break" => Ok(Node::LineBreak),
            "horizontalrule" | "horizontal-rule" => Ok(Node::HorizontalRule),
            "tab" => Ok(Node::Tab),
            "image" => ImageNode::deserialize(value).map(Node::Image),
            "code" | "code-block" => CodeBlockNode::deserialize(value).map(Node::CodeBlock),
            "code-highlight" => CodeHighlightNode::deserialize(value).map(Node::CodeHighlight),
            "table" => TableNode::deserialize(value).map(Node::Table),
            "tablerow" | "table-row" => TableRowNode::deserialize(value).map(Node::TableRow),
            "tablecell" | "table-cell" => TableCellNode::deserialize(value).map(Node::TableCell),
            "video" => VideoNode::deserialize(value).map(Node::Video),
            "embed" | "iframe" => EmbedNode::deserialize(value).map(Node::Embed),
            "youtube" => YouTubeNode::deserialize(value).map(Node::YouTube),
            "tweet" | "twitter" => TweetNode::deserialize(value).map(Node::Tweet),
            "callout" => CalloutNode::deserialize(value).map(Node::Callout),
            "spoiler" => SpoilerNode::deserialize(value).map(Node::Spoiler),
            "mention" => MentionNode::deserialize(value).map(Node::Mention),
            _ => return UnknownNode::deserialize(value).map(Node::Unknown),
        };

        decoded.or_else(|err| {
            log::debug!("node of kind '{kind}' did not decode ({err}), treating it as unknown");
            UnknownNode::deserialize(value).map(Node::Unknown)
        })
    }

    /// The kind name, as the editor spells it.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::List(_) => "list",
            Node::ListItem(_) => "listitem",
            Node::Quote(_) => "quote",
            Node::Link(_) => "link",
            Node::LineBreak => "linebreak",
            Node::HorizontalRule => "horizontalrule",
            Node::Tab => "tab",
            Node::Image(_) => "image",
            Node::CodeBlock(_) => "code",
            Node::CodeHighlight(_) => "code-highlight",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tablerow",
            Node::TableCell(_) => "tablecell",
            Node::Video(_) => "video",
            Node::Embed(_) => "embed",
            Node::YouTube(_) => "youtube",
            Node::Tweet(_) => "tweet",
            Node::Callout(_) => "callout",
            Node::Spoiler(_) => "spoiler",
            Node::Mention(_) => "mention",
            Node::Unknown(unknown) => unknown.kind.as_deref().unwrap_or(""),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(node) => &node.children,
            Node::Heading(node) => &node.children,
            Node::List(node) => &node.children,
            Node::ListItem(node) => &node.children,
            Node::Quote(node) => &node.children,
            Node::Link(node) => &node.children,
            Node::CodeBlock(node) => &node.children,
            Node::Table(node) => &node.children,
            Node::TableRow(node) => &node.children,
            Node::TableCell(node) => &node.children,
            Node::Callout(node) => &node.children,
            Node::Spoiler(node) => &node.children,
            Node::Unknown(node) => node.children.as_deref().unwrap_or(&[]),
            Node::Text(_)
            | Node::LineBreak
            | Node::HorizontalRule
            | Node::Tab
            | Node::Image(_)
            | Node::CodeHighlight(_)
            | Node::Video(_)
            | Node::Embed(_)
            | Node::YouTube(_)
            | Node::Tweet(_)
            | Node::Mention(_) => &[],
        }
    }

    /// Whether the node renders as a block-level element (or a line break), i.e. its text is
    /// separated from its neighbours.
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            Node::Text(_)
                | Node::Link(_)
                | Node::Tab
                | Node::CodeHighlight(_)
                | Node::Mention(_)
                | Node::Unknown(_)
        )
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(TextNode::new(text))
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph(ParagraphNode {
            alignment: Alignment::Left,
            children,
        })
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Node {
        Node::Heading(HeadingNode {
            level: level.clamp(1, 6),
            alignment: Alignment::Left,
            children,
        })
    }

    pub fn quote(children: Vec<Node>) -> Node {
        Node::Quote(QuoteNode { children })
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Node::from_value(&value).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextNode {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub format: TextFormat,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::PLAIN,
        }
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ParagraphNode {
    #[serde(
        default,
        rename = "alignment",
        alias = "format",
        alias = "align",
        deserialize_with = "de::alignment"
    )]
    pub alignment: Alignment,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ParagraphNode {
    /// A paragraph is blank when nothing in it renders visibly: only whitespace text, line
    /// breaks and tabs.
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(text) => text.is_blank(),
            Node::LineBreak | Node::Tab => true,
            _ => false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawHeading")]
pub struct HeadingNode {
    /// Always within 1..=6
    pub level: u8,
    pub alignment: Alignment,
    pub children: Vec<Node>,
}

#[derive(Deserialize)]
struct RawHeading {
    #[serde(default, deserialize_with = "de::lenient_string")]
    tag: Option<String>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(
        default,
        rename = "alignment",
        alias = "format",
        alias = "align",
        deserialize_with = "de::alignment"
    )]
    alignment: Alignment,
    #[serde(default)]
    children: Vec<Node>,
}

impl From<RawHeading> for HeadingNode {
    fn from(raw: RawHeading) -> Self {
        let from_tag = raw
            .tag
            .as_deref()
            .and_then(|tag| tag.trim().strip_prefix(['h', 'H']))
            .and_then(|digits| digits.parse::<u8>().ok());
        let level = from_tag.or(raw.level).unwrap_or(1).clamp(1, 6);
        HeadingNode {
            level,
            alignment: raw.alignment,
            children: raw.children,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ListKind {
    #[default]
    Bullet,
    Number,
}

impl From<String> for ListKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "number" | "numbered" | "ordered" => ListKind::Number,
            _ => ListKind::Bullet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ListNode {
    #[serde(default, rename = "listType", alias = "kind")]
    pub kind: ListKind,
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ListItemNode {
    #[serde(default)]
    pub value: Option<u32>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct QuoteNode {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkNode {
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub rel: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A width or height as stored by the editor: pixels, or a keyword such as `inherit`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Keyword(String),
}

impl Dimension {
    /// The attribute value to emit, if any. Keywords that mean "no explicit size" yield `None`.
    pub fn attribute_value(&self) -> Option<String> {
        match self {
            Dimension::Pixels(px) if px.is_finite() && *px >= 0.0 => {
                if px.fract() == 0.0 {
                    Some(format!("{}", *px as u64))
                } else {
                    Some(px.to_string())
                }
            }
            Dimension::Pixels(_) => None,
            Dimension::Keyword(keyword) => {
                let keyword = keyword.trim();
                match keyword {
                    "" | "inherit" | "auto" => None,
                    _ => Some(keyword.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ImageNode {
    #[serde(default)]
    pub src: String,
    #[serde(
        default,
        rename = "altText",
        alias = "alt",
        deserialize_with = "de::lenient_string"
    )]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
    /// Only plain-string captions are kept
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeBlockNode {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub language: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A syntax-highlighted token inside a code block. Renders as unformatted text.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeHighlightNode {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableNode {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableRowNode {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Which headers a table cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "u8")]
pub enum HeaderState {
    #[default]
    None,
    Row,
    Column,
    Both,
}

impl From<u8> for HeaderState {
    fn from(bits: u8) -> Self {
        match bits {
            0 => HeaderState::None,
            1 => HeaderState::Row,
            2 => HeaderState::Column,
            _ => HeaderState::Both,
        }
    }
}

impl HeaderState {
    pub fn is_header(self) -> bool {
        self != HeaderState::None
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableCellNode {
    #[serde(default, rename = "headerState")]
    pub header_state: HeaderState,
    #[serde(default, rename = "colSpan")]
    pub col_span: Option<u32>,
    #[serde(default, rename = "rowSpan")]
    pub row_span: Option<u32>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VideoNode {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub controls: Option<bool>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub autoplay: Option<bool>,
    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub muted: Option<bool>,
    #[serde(default, rename = "loop", deserialize_with = "de::lenient_bool")]
    pub looping: Option<bool>,
}

impl VideoNode {
    /// Controls are on unless explicitly switched off.
    pub fn shows_controls(&self) -> bool {
        self.controls != Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EmbedNode {
    #[serde(default, alias = "src", alias = "embedUrl")]
    pub url: String,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct YouTubeNode {
    #[serde(
        default,
        rename = "videoID",
        alias = "videoId",
        alias = "id",
        deserialize_with = "de::lenient_string"
    )]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TweetNode {
    #[serde(
        default,
        rename = "id",
        alias = "tweetID",
        alias = "tweetId",
        deserialize_with = "de::lenient_string"
    )]
    pub tweet_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum CalloutVariant {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl From<String> for CalloutVariant {
    fn from(variant: String) -> Self {
        match variant.as_str() {
            "warning" => CalloutVariant::Warning,
            "error" => CalloutVariant::Error,
            "success" => CalloutVariant::Success,
            _ => CalloutVariant::Info,
        }
    }
}

impl CalloutVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            CalloutVariant::Info => "info",
            CalloutVariant::Warning => "warning",
            CalloutVariant::Error => "error",
            CalloutVariant::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalloutNode {
    #[serde(default)]
    pub variant: CalloutVariant,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpoilerNode {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl SpoilerNode {
    pub const DEFAULT_TITLE: &'static str = "Spoiler";

    pub fn summary(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(Self::DEFAULT_TITLE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MentionNode {
    #[serde(default, alias = "mentionName", alias = "displayName")]
    pub name: String,
    #[serde(default, rename = "userId", deserialize_with = "de::lenient_string")]
    pub user_id: Option<String>,
}

impl MentionNode {
    /// `@name`, without doubling an `@` the editor already stored.
    pub fn label(&self) -> String {
        if self.name.starts_with('@') {
            self.name.clone()
        } else {
            format!("@{}", self.name)
        }
    }
}

/// A node of a kind this model does not know.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UnknownNode {
    #[serde(default, rename = "type", deserialize_with = "de::lenient_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<Node>>,
}
