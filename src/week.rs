use std::sync::LazyLock;

use chrono::{Datelike as _, Days, NaiveDate};
use scraper::{Html, Selector};

use crate::cli::PredictArgs;
use crate::render;

/// Known-good anchor: the workbook week of Monday 2024-01-01 is published
/// under id 202024001, and ids are assumed consecutive per calendar week
/// from there. When the remote numbering drifts the prediction starts
/// missing and discovery through the weekly index page takes over; there is
/// no staleness detection for the anchor itself.
pub const ANCHOR_ID: i64 = 202024001;

static ANCHOR_MONDAY: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid anchor date"));

/// A remote page id paired with the Monday it is believed to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekIdentifier {
    pub id: i64,
    pub monday: NaiveDate,
}

/// Predicted id for the week containing `date`. Pure: the Monday on or
/// before `date`, offset in whole weeks from the anchor Monday (negative
/// offsets included), added to the anchor id.
pub fn predict(date: NaiveDate) -> WeekIdentifier {
    let monday = monday_of(date);
    let weeks = monday.signed_duration_since(*ANCHOR_MONDAY).num_days() / 7;
    WeekIdentifier {
        id: ANCHOR_ID + weeks,
        monday,
    }
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Scans a fetched index page for the workbook link and pulls the id out of
/// its address. Label matching is case-tolerant and accepts either the
/// publication name or the meeting name; a well-formed page without the
/// link is an expected outcome, not an error.
pub fn discover_in_index(index_html: &str, monday: NaiveDate) -> Option<WeekIdentifier> {
    let document = Html::parse_document(index_html);
    let links = Selector::parse("a").unwrap();

    for link in document.select(&links) {
        let label = render::normalize_whitespace(&render::plain_text(link)).to_lowercase();
        if !label.contains("apostila") && !label.contains("vida e minist") {
            continue;
        }
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if let Some(id) = identifier_in_href(href) {
            tracing::debug!(id, href, "discovered workbook link in index");
            return Some(WeekIdentifier { id, monday });
        }
    }

    None
}

fn identifier_in_href(href: &str) -> Option<i64> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(today);
    let week = predict(date);
    println!("week of {}: id {}", week.monday, week.id);
    Ok(())
}
