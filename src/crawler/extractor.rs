//! Section-aware content extraction
//!
//! Turns a parsed HTML document into heading-delimited sections:
//! - script, style, nav, footer and header subtrees are ignored entirely
//! - the walk starts at `<main>` when present, otherwise at `<body>`
//! - h1/h2/h3 open a new section; p/ul/ol add text to the open one
//! - blocks of 40 characters or fewer are dropped as noise

use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Elements whose whole subtree is ignored
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Non-heading elements that contribute text to a section
const CONTENT_TAGS: &[&str] = &["p", "ul", "ol"];

/// Text blocks must be strictly longer than this many characters
const MIN_BLOCK_CHARS: usize = 40;

/// Heading level that opened a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps an element name to a heading level, if it is one we section on
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading plus the text blocks that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Level of the heading that opened the section
    pub level: HeadingLevel,

    /// Trimmed heading text; may be empty
    pub heading: String,

    /// Text blocks in encounter order, each longer than 40 characters
    pub paragraphs: Vec<String>,
}

impl Section {
    fn open(level: HeadingLevel, heading: String) -> Self {
        Self {
            level,
            heading,
            paragraphs: Vec::new(),
        }
    }

    /// Paragraphs joined with a single space
    pub fn joined_text(&self) -> String {
        self.paragraphs.join(" ")
    }
}

/// Extracts the ordered list of sections from a document
///
/// Content that appears before the first heading is dropped, and a heading
/// with no qualifying text still yields an (empty) section.
///
/// # Example
///
/// ```
/// use campus_harvest::crawler::extract_sections;
/// use scraper::Html;
///
/// let html = Html::parse_document(
///     "<main><h1>Admissions</h1><p>Applications for the fall cohort open in early September.</p></main>",
/// );
/// let sections = extract_sections(&html);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].heading, "Admissions");
/// assert_eq!(sections[0].paragraphs.len(), 1);
/// ```
pub fn extract_sections(document: &Html) -> Vec<Section> {
    let root = match content_root(document) {
        Some(root) => root,
        None => return Vec::new(),
    };

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for element in root.descendants().filter_map(ElementRef::wrap) {
        let name = element.value().name();

        let level = HeadingLevel::from_tag(name);
        if level.is_none() && !CONTENT_TAGS.contains(&name) {
            continue;
        }
        if inside_excluded(element) {
            continue;
        }

        match level {
            Some(level) => {
                if let Some(section) = current.take() {
                    sections.push(section);
                }
                current = Some(Section::open(level, block_text(element)));
            }
            None => {
                let Some(section) = current.as_mut() else {
                    continue;
                };
                let text = block_text(element);
                if text.chars().count() > MIN_BLOCK_CHARS {
                    section.paragraphs.push(text);
                }
            }
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

/// Picks `<main>` when one survives the exclusions, otherwise `<body>`
fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    let main_selector = Selector::parse("main").ok()?;
    let body_selector = Selector::parse("body").ok()?;

    document
        .select(&main_selector)
        .find(|main| !inside_excluded(*main))
        .or_else(|| document.select(&body_selector).next())
}

fn is_excluded(name: &str) -> bool {
    EXCLUDED_TAGS.contains(&name)
}

fn inside_excluded(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_excluded(ancestor.value().name()))
}

/// Whitespace-normalized text of an element, skipping excluded subtrees
fn block_text(element: ElementRef<'_>) -> String {
    let mut fragments = Vec::new();
    collect_text(element, &mut fragments);

    fragments
        .iter()
        .flat_map(|fragment| fragment.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(&**text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_excluded(child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}
