//! Plain-text rendering of the projection and the form.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Utc};
use domains::{Projection, Review, Summary, ViewParams};
use services::FormState;

pub const EMPTY_STATE: &str = "No reviews to show.";

const DATE_FORMAT: &str = "%b %d, %Y, %I:%M %p";

pub fn format_date(ts: &DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format(DATE_FORMAT).to_string()
}

/// "3 reviews · avg 4.3 ★★★★☆"
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "{} · avg {} {}",
        summary.label(),
        summary.average_display(),
        summary.average_stars()
    )
}

pub fn controls_line(params: &ViewParams) -> String {
    let search = params.search_text.trim();
    let search = if search.is_empty() { "-" } else { search };
    format!(
        "search: {} · filter: {} · sort: {}",
        search, params.filter, params.sort
    )
}

pub fn review_card(review: &Review, offset: &FixedOffset) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} {}",
        review.name,
        review.rating.stars(),
        format_date(&review.created_at, offset)
    );
    let _ = writeln!(out, "  {}", review.title);
    if !review.message.is_empty() {
        for line in review.message.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    let _ = write!(out, "  id: {}", review.id);
    out
}

pub fn view(projection: &Projection, params: &ViewParams, offset: &FixedOffset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary_line(&projection.summary));
    let _ = writeln!(out, "{}", controls_line(params));
    let _ = writeln!(out);

    if projection.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_STATE);
        return out;
    }

    for review in &projection.visible {
        let _ = writeln!(out, "{}", review_card(review, offset));
        let _ = writeln!(out);
    }
    out
}

pub fn form(form: &FormState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:    {}", form.name);
    let _ = writeln!(out, "title:   {}", form.title);
    let _ = writeln!(out, "message: {} ({} chars)", form.message, form.message_len());
    let _ = writeln!(out, "rating:  {}  {}", form.picker_text(), form.hint().text());
    out
}
