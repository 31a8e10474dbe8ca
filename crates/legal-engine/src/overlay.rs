//! Annotation overlay
//!
//! Renders risk spans as inline `<span>` markup over the text they were
//! scanned from. Markup is spliced in from the highest offset down, so
//! inserting it never moves an offset that is still waiting to be processed.
//!
//! Output is display-only: scanning annotated markup again is unsupported
//! because the inserted tags invalidate every offset behind them.

use std::collections::BTreeMap;
use std::ops::Range;

use shared_types::{CharMap, Span};
use tracing::{debug, warn};

/// Render `spans` over `text`.
///
/// Spans that fail the positional invariant against `text` are logged and
/// dropped. Nested spans produce nested wrappers. Partially overlapping
/// spans produce crossing tags; that is a known limitation of inline markup
/// and spans are not reordered to hide it.
pub fn annotate(text: &str, spans: &[Span]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let map = CharMap::new(text);
    let mut valid: Vec<(&Span, Range<usize>)> = Vec::with_capacity(spans.len());
    for span in spans {
        match span.byte_range(&map, text) {
            Some(range) => valid.push((span, range)),
            None => warn!(
                start = span.start,
                end = span.end,
                text = %span.text,
                "Discarding span that does not match the annotated text"
            ),
        }
    }

    // Highest start first; sort_by_key is stable so equal starts keep input order
    valid.sort_by_key(|(span, _)| std::cmp::Reverse(span.start));

    // Nesting rank: outer spans open first at a shared position and close last
    let mut open_order: Vec<usize> = (0..valid.len()).collect();
    open_order.sort_by_key(|&i| {
        let span = valid[i].0;
        (span.start, std::cmp::Reverse(span.end), i)
    });
    let mut rank = vec![0; valid.len()];
    for (position, &i) in open_order.iter().enumerate() {
        rank[i] = position;
    }

    let mut closes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut opens: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, (_, range)) in valid.iter().enumerate() {
        opens.entry(range.start).or_default().push(i);
        closes.entry(range.end).or_default().push(i);
    }

    let mut output = text.to_string();
    let mut positions: Vec<usize> = opens.keys().chain(closes.keys()).copied().collect();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();

    for position in positions {
        let mut markup = String::new();

        if let Some(ending) = closes.get_mut(&position) {
            ending.sort_by_key(|&i| std::cmp::Reverse(rank[i]));
            for _ in ending.iter() {
                markup.push_str(CLOSE_TAG);
            }
        }
        if let Some(starting) = opens.get_mut(&position) {
            starting.sort_by_key(|&i| rank[i]);
            for &i in starting.iter() {
                markup.push_str(&open_tag(valid[i].0));
            }
        }

        output.insert_str(position, &markup);
    }

    debug!(spans = valid.len(), dropped = spans.len() - valid.len(), "Annotated text");
    output
}

const CLOSE_TAG: &str = "</span>";

fn open_tag(span: &Span) -> String {
    let category = span.category.css_class();
    let color = escape_attr(&span.color);
    let label = escape_attr(&span.label);
    format!(
        "<span class=\"risk-highlight risk-{category}\" \
         style=\"background-color: {color}20; border-bottom: 2px solid {color};\" \
         data-category=\"{category}\" data-label=\"{label}\" \
         data-confidence=\"{confidence:.2}\" \
         title=\"{label} ({percent}% confidence)\">",
        category = category,
        color = color,
        label = label,
        confidence = span.confidence,
        percent = (span.confidence * 100.0).round() as u32,
    )
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
