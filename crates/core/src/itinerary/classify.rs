use once_cell::sync::Lazy;
use regex::Regex;

use super::segment::{IconHint, Segment, SegmentKind};

static DAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\*\*)?day [0-9]+").expect("valid day header regex"));
static TIME_SLOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(morning|afternoon|evening|night|breakfast|lunch|dinner):")
        .expect("valid time slot regex")
});
static SECTION_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(budget|tips|recommendations|accommodation|transportation|notes|important):")
        .expect("valid section label regex")
});
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*.*\*\*|__.*__").expect("valid emphasis regex"));
static STAR_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid star span regex"));
static UNDERSCORE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.*?)__").expect("valid underscore span regex"));

const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

/// A classification rule: the kind it produces and the matcher that builds it.
pub struct Rule {
    pub kind: SegmentKind,
    apply: fn(&str) -> Option<Segment>,
}

/// Evaluated top to bottom against a non-empty trimmed line; the first hit wins.
pub static RULES: [Rule; 5] = [
    Rule {
        kind: SegmentKind::DayHeader,
        apply: day_header,
    },
    Rule {
        kind: SegmentKind::TimeSlot,
        apply: time_slot,
    },
    Rule {
        kind: SegmentKind::LabeledSection,
        apply: labeled_section,
    },
    Rule {
        kind: SegmentKind::Bullet,
        apply: bullet,
    },
    Rule {
        kind: SegmentKind::Emphasized,
        apply: emphasized,
    },
];

/// Splits `text` on newlines and classifies every line, blank ones included.
pub fn classify(text: &str) -> Vec<Segment> {
    text.split('\n').map(classify_line).collect()
}

pub fn classify_line(line: &str) -> Segment {
    let trimmed = line.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}');
    if trimmed.is_empty() {
        return Segment::Blank;
    }

    RULES
        .iter()
        .find_map(|rule| (rule.apply)(trimmed))
        .unwrap_or_else(|| Segment::PlainText {
            body: trimmed.to_string(),
        })
}

fn day_header(line: &str) -> Option<Segment> {
    if !DAY_HEADER.is_match(line) {
        return None;
    }

    let heading = line
        .chars()
        .filter(|ch| *ch != '*' && *ch != ':')
        .collect::<String>();

    Some(Segment::DayHeader {
        heading: heading.trim().to_string(),
    })
}

fn time_slot(line: &str) -> Option<Segment> {
    if !TIME_SLOT.is_match(line) {
        return None;
    }

    let (heading, body) = split_label(line)?;
    Some(Segment::TimeSlot { heading, body })
}

fn labeled_section(line: &str) -> Option<Segment> {
    if !SECTION_LABEL.is_match(line) {
        return None;
    }

    let (heading, body) = split_label(line)?;
    let icon_hint = section_icon(&heading);
    Some(Segment::LabeledSection {
        heading,
        body,
        icon_hint,
    })
}

fn bullet(line: &str) -> Option<Segment> {
    let mut chars = line.chars();
    let marker = chars.next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }

    let body = chars.as_str().trim().to_string();
    let icon_hint = bullet_icon(&body);
    Some(Segment::Bullet { body, icon_hint })
}

fn emphasized(line: &str) -> Option<Segment> {
    if !EMPHASIS.is_match(line) {
        return None;
    }

    let escaped = escape_markup(line);
    let starred = STAR_SPAN.replace_all(&escaped, "<strong>${1}</strong>");
    let body = UNDERSCORE_SPAN
        .replace_all(&starred, "<strong>${1}</strong>")
        .into_owned();

    Some(Segment::Emphasized { body })
}

/// Heading is the text before the first colon as written, body the trimmed rest.
fn split_label(line: &str) -> Option<(String, String)> {
    let (heading, body) = line.split_once(':')?;
    Some((heading.to_string(), body.trim().to_string()))
}

fn section_icon(heading: &str) -> IconHint {
    let lower = heading.to_lowercase();

    if contains_any(&lower, &["accommodation", "hotel"]) {
        IconHint::Place
    } else if lower.contains("tip") {
        IconHint::Info
    } else if lower.contains("budget") {
        IconHint::Money
    } else {
        IconHint::None
    }
}

fn bullet_icon(body: &str) -> IconHint {
    let lower = body.to_lowercase();

    if contains_any(&lower, &["food", "restaurant", "eat"]) {
        IconHint::Food
    } else if contains_any(&lower, &["photo", "camera", "view"]) {
        IconHint::Photo
    } else {
        IconHint::Place
    }
}

fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
