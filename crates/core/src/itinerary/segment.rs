use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Blank,
    DayHeader,
    TimeSlot,
    LabeledSection,
    Bullet,
    Emphasized,
    PlainText,
}

/// Pictographic category guessed from keywords in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconHint {
    Food,
    Photo,
    Place,
    Money,
    Info,
    #[default]
    None,
}

/// One classified line of itinerary text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Blank,
    DayHeader {
        heading: String,
    },
    TimeSlot {
        heading: String,
        body: String,
    },
    LabeledSection {
        heading: String,
        body: String,
        icon_hint: IconHint,
    },
    Bullet {
        body: String,
        icon_hint: IconHint,
    },
    /// `body` is escaped markup whose only tags are `<strong>` spans.
    Emphasized {
        body: String,
    },
    PlainText {
        body: String,
    },
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Blank => SegmentKind::Blank,
            Self::DayHeader { .. } => SegmentKind::DayHeader,
            Self::TimeSlot { .. } => SegmentKind::TimeSlot,
            Self::LabeledSection { .. } => SegmentKind::LabeledSection,
            Self::Bullet { .. } => SegmentKind::Bullet,
            Self::Emphasized { .. } => SegmentKind::Emphasized,
            Self::PlainText { .. } => SegmentKind::PlainText,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            Self::DayHeader { heading }
            | Self::TimeSlot { heading, .. }
            | Self::LabeledSection { heading, .. } => Some(heading),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::TimeSlot { body, .. }
            | Self::LabeledSection { body, .. }
            | Self::Bullet { body, .. }
            | Self::Emphasized { body }
            | Self::PlainText { body } => Some(body),
            Self::Blank | Self::DayHeader { .. } => None,
        }
    }

    pub fn icon_hint(&self) -> IconHint {
        match self {
            Self::LabeledSection { icon_hint, .. } | Self::Bullet { icon_hint, .. } => *icon_hint,
            _ => IconHint::None,
        }
    }
}
