use std::io::Write as _;

use anyhow::Context as _;
use chrono::{Datelike as _, NaiveDate};
use scraper::Html;
use url::Url;

use crate::classify;
use crate::cli::ExtractArgs;
use crate::config::SourceConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::fetch::{FetchOutcome, PageClient};
use crate::formats::{DraftAssignment, templates};
use crate::render;
use crate::walk::{self, Section};
use crate::week::{self, WeekIdentifier};

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let mut config = SourceConfig::from_env()?;
    if let Some(base) = args.base_url.as_deref() {
        config = config.with_base_url(base)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout_secs(secs);
    }

    let date = args.date.unwrap_or_else(week::today);
    let client = PageClient::new(&config)?;
    let drafts = week_content(&client, date).await?;

    let mut stdout = std::io::stdout().lock();
    for draft in &drafts {
        let line = serde_json::to_string(draft).context("serialize draft assignment")?;
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

/// Resolves the week page for `date` and extracts its draft assignments.
///
/// The predicted id is tried first. A missing page falls back to the weekly
/// schedule index, and whatever id the index advertises for the workbook is
/// fetched in its place; only when that trail goes cold does the week count
/// as unavailable.
pub async fn week_content(
    client: &PageClient,
    date: NaiveDate,
) -> ExtractResult<Vec<DraftAssignment>> {
    let predicted = week::predict(date);
    tracing::debug!(id = predicted.id, monday = %predicted.monday, "trying predicted week page");

    match client.fetch_week_page(predicted.id).await? {
        FetchOutcome::Success(html) => return Ok(document_drafts(&html, client.base_url())),
        FetchOutcome::NotFound => {
            tracing::warn!(
                id = predicted.id,
                "predicted week page not found, falling back to the index"
            );
        }
    }

    let iso = predicted.monday.iso_week();
    let index_html = match client.fetch_index_page(iso.year(), iso.week()).await? {
        FetchOutcome::Success(html) => html,
        FetchOutcome::NotFound => return Err(not_found(&predicted)),
    };
    let Some(discovered) = week::discover_in_index(&index_html, predicted.monday) else {
        return Err(not_found(&predicted));
    };
    tracing::info!(
        predicted = predicted.id,
        discovered = discovered.id,
        "index discovery"
    );

    match client.fetch_week_page(discovered.id).await? {
        FetchOutcome::Success(html) => Ok(document_drafts(&html, client.base_url())),
        FetchOutcome::NotFound => Err(not_found(&predicted)),
    }
}

fn not_found(predicted: &WeekIdentifier) -> ExtractError {
    ExtractError::NotFoundAfterFallback {
        monday: predicted.monday,
        predicted_id: predicted.id,
    }
}

/// Parses one week page into draft assignments: walk the part headings,
/// render each content block, classify against the active section's rule
/// table. When the Christian-Life section mentions the closing prayer but
/// no heading classified as one, a synthetic prayer slot is appended.
///
/// Headings no rule matches are dropped, not fatal; a page with no part
/// headings at all yields an empty list.
pub fn document_drafts(html: &str, base: &Url) -> Vec<DraftAssignment> {
    let document = Html::parse_document(html);
    let mut drafts = Vec::new();
    let mut headings = 0usize;
    let mut unmapped = 0usize;
    let mut prayer_mentioned = false;

    for node in walk::headers(&document) {
        headings += 1;
        let content = render::render_content(&node.content, base);
        if node.section == Section::ChristianLife && !prayer_mentioned {
            prayer_mentioned = node.heading.to_lowercase().contains("oração")
                || content.to_lowercase().contains("oração");
        }
        match classify::classify(node.section, &node.heading, &content) {
            Some(draft) => drafts.push(draft),
            None => {
                unmapped += 1;
                tracing::debug!(section = ?node.section, heading = %node.heading, "no rule matched, dropping heading");
            }
        }
    }

    if headings == 0 {
        tracing::warn!("document has no recognizable part headings");
        return drafts;
    }
    if unmapped > 0 {
        tracing::debug!(unmapped, mapped = drafts.len(), "classification summary");
    }

    let has_prayer = drafts
        .iter()
        .any(|draft| draft.part_template_id == templates::ORACAO);
    if !has_prayer && !prayer_mentioned {
        // The mention may sit between the section heading and its first part.
        let lead = walk::section_lead(&document, Section::ChristianLife);
        prayer_mentioned = render::render_content(&lead, base)
            .to_lowercase()
            .contains("oração");
    }
    if prayer_mentioned && !has_prayer {
        drafts.push(DraftAssignment::new(templates::ORACAO));
    }
    drafts
}
