use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::classify::classify;
use super::segment::{IconHint, Segment};

static STRONG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?strong>").expect("valid strong tag regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Spacer,
    Heading,
    Label,
    BulletRow,
    RichText,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Calendar,
    Food,
    Photo,
    Place,
    Money,
    Info,
}

impl Icon {
    pub fn from_hint(hint: IconHint) -> Option<Self> {
        match hint {
            IconHint::Food => Some(Self::Food),
            IconHint::Photo => Some(Self::Photo),
            IconHint::Place => Some(Self::Place),
            IconHint::Money => Some(Self::Money),
            IconHint::Info => Some(Self::Info),
            IconHint::None => None,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Calendar => "📅",
            Self::Food => "🍴",
            Self::Photo => "📷",
            Self::Place => "📍",
            Self::Money => "💲",
            Self::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBlock {
    pub kind: BlockKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub indented: bool,
}

impl DisplayBlock {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            icon: None,
            heading: None,
            text: None,
            indented: false,
        }
    }

    fn with_icon(mut self, icon: Option<Icon>) -> Self {
        self.icon = icon;
        self
    }

    fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

pub fn render(segments: &[Segment]) -> Vec<DisplayBlock> {
    let mut blocks = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Blank => blocks.push(DisplayBlock::new(BlockKind::Spacer)),
            Segment::DayHeader { heading } => blocks.push(
                DisplayBlock::new(BlockKind::Heading)
                    .with_icon(Some(Icon::Calendar))
                    .with_heading(heading),
            ),
            Segment::TimeSlot { heading, body } => {
                let mut block = DisplayBlock::new(BlockKind::Label).with_heading(heading);
                if !body.is_empty() {
                    block = block.with_text(body);
                }
                blocks.push(block);
            }
            Segment::LabeledSection {
                heading,
                body,
                icon_hint,
            } => {
                blocks.push(
                    DisplayBlock::new(BlockKind::Label)
                        .with_icon(Icon::from_hint(*icon_hint))
                        .with_heading(heading),
                );
                if !body.is_empty() {
                    let mut nested = DisplayBlock::new(BlockKind::Text).with_text(body);
                    nested.indented = true;
                    blocks.push(nested);
                }
            }
            Segment::Bullet { body, icon_hint } => blocks.push(
                DisplayBlock::new(BlockKind::BulletRow)
                    .with_icon(Icon::from_hint(*icon_hint))
                    .with_text(body),
            ),
            Segment::Emphasized { body } => {
                blocks.push(DisplayBlock::new(BlockKind::RichText).with_text(body))
            }
            Segment::PlainText { body } => {
                blocks.push(DisplayBlock::new(BlockKind::Text).with_text(body))
            }
        }
    }

    blocks
}

pub fn render_itinerary(text: &str) -> Vec<DisplayBlock> {
    render(&classify(text))
}

/// Terminal rendering: one line per block, markup reduced to its words.
pub fn to_plain_text(blocks: &[DisplayBlock]) -> String {
    let mut lines = Vec::with_capacity(blocks.len());

    for block in blocks {
        let icon = block
            .icon
            .map(|icon| format!("{} ", icon.glyph()))
            .unwrap_or_default();
        let heading = block.heading.as_deref().unwrap_or_default();
        let text = block.text.as_deref().unwrap_or_default();

        let line = match block.kind {
            BlockKind::Spacer => String::new(),
            BlockKind::Heading => format!("{icon}{}", heading.to_uppercase()),
            BlockKind::Label if text.is_empty() => format!("{icon}{heading}:"),
            BlockKind::Label => format!("{icon}{heading}: {text}"),
            BlockKind::BulletRow => format!("  {icon}{text}"),
            BlockKind::RichText => unescape_markup(&STRONG_TAG.replace_all(text, "")),
            BlockKind::Text if block.indented => format!("    {text}"),
            BlockKind::Text => text.to_string(),
        };
        lines.push(line);
    }

    lines.join("\n")
}

fn unescape_markup(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
