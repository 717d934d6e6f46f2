//! Reading-time estimation
//!
//! The user-facing "N min read" figure. Minutes are words over the reading rate, scaled by the
//! content type, plus a fixed allowance for each media element found in the HTML form, floored
//! at half a minute.
//!
//!     minutes = words / words_per_minute × content_type multiplier + media
//!
//! | Content type | Time multiplier |
//! |--------------|-----------------|
//! | sports | 1.1 |
//! | technical | 0.8 |
//! | news, general | 1.0 |
//!
//! The reading speed label compares the *effective* rate (words over the final minutes)
//! against fixed thresholds, so media allowances and the content type both move it.

use crate::content::Content;
use crate::html::HtmlSerializer;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

const MINIMUM_MINUTES: f64 = 0.5;
const FAST_WPM: f64 = 250.0;
const SLOW_WPM: f64 = 150.0;

/// Rates used by [`calculate_read_time_range`].
const RANGE_WPM: (u32, u32, u32) = (250, 200, 150);

/// Per-element allowances, in minutes.
static MEDIA_ALLOWANCES: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    [
        (r"(?i)<img\b", 0.2),
        (r"(?i)<video\b|<iframe\b[^>]*(?:youtube|vimeo)", 1.0),
        (r"(?i)<table\b", 0.5),
        (r"(?i)<(?:ul|ol)\b", 0.1),
        (r"(?i)<blockquote\b", 0.2),
        (r"(?i)<pre\b", 0.5),
    ]
    .into_iter()
    .map(|(pattern, minutes)| (Regex::new(pattern).unwrap(), minutes))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    General,
    News,
    Sports,
    Technical,
}

impl ContentType {
    /// Factor applied to the base minutes; the words-per-minute rate itself is left alone.
    pub fn time_multiplier(self) -> f64 {
        match self {
            ContentType::Sports => 1.1,
            ContentType::Technical => 0.8,
            ContentType::News | ContentType::General => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::General => "general",
            ContentType::News => "news",
            ContentType::Sports => "sports",
            ContentType::Technical => "technical",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown content type '{0}' (expected general, news, sports or technical)")]
pub struct UnknownContentType(String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(ContentType::General),
            "news" => Ok(ContentType::News),
            "sports" => Ok(ContentType::Sports),
            "technical" => Ok(ContentType::Technical),
            _ => Err(UnknownContentType(s.to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSpeed {
    Fast,
    Average,
    Slow,
}

impl ReadingSpeed {
    fn from_effective_rate(words_per_minute: f64) -> Self {
        if words_per_minute >= FAST_WPM {
            ReadingSpeed::Fast
        } else if words_per_minute <= SLOW_WPM {
            ReadingSpeed::Slow
        } else {
            ReadingSpeed::Average
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadTimeOptions {
    pub words_per_minute: u32,
    pub content_type: ContentType,
    /// Add the per-element media allowances
    pub include_media: bool,
}

impl Default for ReadTimeOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            content_type: ContentType::General,
            include_media: true,
        }
    }
}

impl ReadTimeOptions {
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadTime {
    pub minutes: f64,
    pub words: usize,
    pub formatted_time: String,
    pub reading_speed: ReadingSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadTimeRange {
    pub fast: ReadTime,
    pub average: ReadTime,
    pub slow: ReadTime,
}

/// Estimate the reading time of stored content.
pub fn calculate_read_time<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
) -> ReadTime {
    calculate_read_time_with(content, options, &HtmlSerializer::new())
}

/// [`calculate_read_time`] under the serializer's depth limit, reporting to its sink.
pub fn calculate_read_time_with<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
    serializer: &HtmlSerializer,
) -> ReadTime {
    estimate(&content.into(), options, serializer)
}

/// [`calculate_read_time`] with the sports time multiplier.
pub fn calculate_sports_read_time<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
) -> ReadTime {
    calculate_read_time(content, &options.with_content_type(ContentType::Sports))
}

/// [`calculate_read_time`] with the news time multiplier.
pub fn calculate_news_read_time<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
) -> ReadTime {
    calculate_read_time(content, &options.with_content_type(ContentType::News))
}

/// The same content at 250, 200 and 150 words per minute.
pub fn calculate_read_time_range<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
) -> ReadTimeRange {
    calculate_read_time_range_with(content, options, &HtmlSerializer::new())
}

pub fn calculate_read_time_range_with<'a>(
    content: impl Into<Content<'a>>,
    options: &ReadTimeOptions,
    serializer: &HtmlSerializer,
) -> ReadTimeRange {
    let content = content.into();
    let (fast, average, slow) = RANGE_WPM;
    let at = |words_per_minute| {
        estimate(
            &content,
            &options.with_words_per_minute(words_per_minute),
            serializer,
        )
    };
    ReadTimeRange {
        fast: at(fast),
        average: at(average),
        slow: at(slow),
    }
}

fn estimate(content: &Content<'_>, options: &ReadTimeOptions, serializer: &HtmlSerializer) -> ReadTime {
    let words = content.plain_text_with(serializer).split_whitespace().count();
    let base = words as f64 / f64::from(options.words_per_minute.max(1));

    let mut minutes = base * options.content_type.time_multiplier();
    if options.include_media {
        minutes += media_minutes(&content.to_html_with(serializer));
    }
    let minutes = minutes.max(MINIMUM_MINUTES);

    ReadTime {
        minutes,
        words,
        formatted_time: format_minutes(minutes),
        reading_speed: ReadingSpeed::from_effective_rate(words as f64 / minutes),
    }
}

fn media_minutes(html: &str) -> f64 {
    MEDIA_ALLOWANCES
        .iter()
        .map(|(pattern, minutes)| pattern.find_iter(html).count() as f64 * minutes)
        .sum()
}

/// `Less than 1 min read`, `1 min read`, or `N min read` with N rounded up.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 1.0 {
        return "Less than 1 min read".to_string();
    }
    match minutes.ceil() as u64 {
        1 => "1 min read".to_string(),
        n => format!("{n} min read"),
    }
}
