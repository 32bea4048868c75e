//! # Instruction Steps
//!
//! Recipe instructions arrive as one free-form text blob. Authors number
//! their steps in many ways ("STEP 1", "1.", blank lines, one step per line,
//! or a single run-on paragraph), so [`format_instructions`] tries a cascade
//! of splitting heuristics and keeps the first one that produces more than
//! one segment.
//!
//! The result is approximate. A recipe that mentions "Step 2" in the middle
//! of a sentence, or that packs several actions into one line, will not be
//! segmented the way its author intended. Treat the output as display
//! formatting, never as ground truth.

use once_cell::sync::Lazy;
use regex::Regex;

/// Segments shorter than this (after cleaning) are dropped as artifacts.
const MIN_STEP_CHARS: usize = 10;
/// A lone paragraph longer than this is split at sentence boundaries.
const SENTENCE_SPLIT_THRESHOLD: usize = 300;
/// A step longer than this triggers the transition-word pass.
const MEGA_STEP_THRESHOLD: usize = 500;

const TRANSITIONS: [&str; 14] = [
    "Then", "Next", "After", "Once", "Now", "Meanwhile", "Finally", "Add", "Pour", "Mix", "Cook",
    "Heat", "Place", "Remove",
];

static STEP_MARKERS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\n)\s*STEP\s+\d+:?\s*").ok());
static NUMBERED_LIST: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?:^|\n)\s*\d+\.\s+").ok());
static PARAGRAPHS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\n\s*\n").ok());
static LINES: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\n+").ok());

// Group 1 ends where the next segment begins.
static SENTENCE_END: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\.(\s+)[A-Z]").ok());
static TRANSITION_SPLITS: Lazy<Vec<Regex>> = Lazy::new(|| {
    TRANSITIONS
        .iter()
        .filter_map(|word| Regex::new(&format!(r"(?i)\.(\s+){}\s", word)).ok())
        .collect()
});

static LEADING_STEP: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)^step\s+\d+:?\s*").ok());
static LEADING_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d+\.\s*").ok());
static LEADING_BULLET: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[-•]\s*").ok());
static WHITESPACE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\s+").ok());

/// Splits raw instructions into display steps. Best-effort; see module docs.
pub fn format_instructions(raw: &str) -> Vec<String> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut steps = [&STEP_MARKERS, &NUMBERED_LIST, &PARAGRAPHS, &LINES]
        .into_iter()
        .filter_map(|splitter| Lazy::force(splitter).as_ref())
        .map(|re| split_non_blank(re, normalized))
        .find(|segments| segments.len() > 1)
        .unwrap_or_else(|| vec![normalized.to_string()]);

    if steps.len() == 1 && char_len(&steps[0]) > SENTENCE_SPLIT_THRESHOLD {
        if let Some(re) = SENTENCE_END.as_ref() {
            steps = split_at_boundaries(re, normalized)
                .into_iter()
                .map(|sentence| {
                    if sentence.ends_with('.') {
                        sentence
                    } else {
                        format!("{}.", sentence)
                    }
                })
                .collect();
        }
    }

    let steps: Vec<String> = steps
        .iter()
        .map(|step| clean_step(step))
        .filter(|step| char_len(step) > MIN_STEP_CHARS)
        .collect();

    if steps.len() <= 2 && steps.iter().any(|s| char_len(s) > MEGA_STEP_THRESHOLD) {
        return split_on_transitions(steps);
    }

    steps
}

/// Strips leading "Step n:", "n." and bullet markers and collapses whitespace.
pub fn clean_step(step: &str) -> String {
    let mut cleaned = step.trim().to_string();
    for marker in [&LEADING_STEP, &LEADING_NUMBER, &LEADING_BULLET] {
        if let Some(re) = Lazy::force(marker).as_ref() {
            cleaned = re.replace(&cleaned, "").into_owned();
        }
    }
    if let Some(re) = WHITESPACE.as_ref() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }
    cleaned.trim().to_string()
}

fn split_on_transitions(steps: Vec<String>) -> Vec<String> {
    let mega_step = steps.join(" ");
    let mut best = steps;

    for re in TRANSITION_SPLITS.iter() {
        let attempt = split_at_boundaries(re, &mega_step);
        if attempt.len() > best.len() {
            best = attempt
                .into_iter()
                .filter(|s| char_len(s) > MIN_STEP_CHARS)
                .collect();
        }
    }

    best
}

fn split_non_blank(re: &Regex, text: &str) -> Vec<String> {
    re.split(text)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits before each match, dropping the matched text up to the end of
/// capture group 1 so the following segment keeps its first word.
fn split_at_boundaries(re: &Regex, text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start = 0;

    for caps in re.captures_iter(text) {
        let (Some(whole), Some(gap)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(text[start..whole.start()].trim().to_string());
        start = gap.end();
    }
    segments.push(text[start..].trim().to_string());

    segments.retain(|s| !s.is_empty());
    segments
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
