use scraper::{ElementRef, Html, Selector};

use crate::render;

/// The three top-level groupings of a week's meeting parts. `None` covers
/// everything before the first recognized section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Treasures,
    Ministry,
    ChristianLife,
}

impl Section {
    /// Section-level headings are matched by substring, case-insensitive.
    /// Unrecognized section headings leave the current section unchanged.
    fn from_heading(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("tesouros") {
            Some(Self::Treasures)
        } else if lower.contains("ministério") {
            Some(Self::Ministry)
        } else if lower.contains("vida cristã") {
            Some(Self::ChristianLife)
        } else {
            None
        }
    }
}

/// One part-level heading, the section that was active when it appeared,
/// and the sibling content block that belongs to it.
#[derive(Debug, Clone)]
pub struct HeaderNode<'a> {
    pub section: Section,
    pub heading: String,
    pub content: Vec<ElementRef<'a>>,
}

/// Walks part-level headings in document order, each tagged with the
/// section active at that point. Single pass, consumed once.
pub fn headers(document: &Html) -> HeaderWalk<'_> {
    let headings = Selector::parse("h2, h3").unwrap();
    HeaderWalk {
        headings: document.select(&headings).collect::<Vec<_>>().into_iter(),
        section: Section::None,
    }
}

pub struct HeaderWalk<'a> {
    headings: std::vec::IntoIter<ElementRef<'a>>,
    section: Section,
}

impl<'a> Iterator for HeaderWalk<'a> {
    type Item = HeaderNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let heading = self.headings.next()?;

            if heading.value().name() == "h2" {
                if let Some(section) = Section::from_heading(&render::plain_text(heading)) {
                    self.section = section;
                }
                continue;
            }

            let text = render::normalize_whitespace(&render::plain_text(heading));
            if self.section == Section::None {
                tracing::debug!(heading = %text, "part heading before any recognized section, dropping");
                continue;
            }

            return Some(HeaderNode {
                section: self.section,
                heading: text,
                content: collect_content(heading),
            });
        }
    }
}

/// The opening block of one section: its heading element plus the sibling
/// elements before the first part-level heading. The walk attaches this
/// content to no part.
pub fn section_lead(document: &Html, wanted: Section) -> Vec<ElementRef<'_>> {
    let sections = Selector::parse("h2").unwrap();
    document
        .select(&sections)
        .find(|heading| Section::from_heading(&render::plain_text(*heading)) == Some(wanted))
        .map(|heading| {
            let mut lead = vec![heading];
            lead.extend(collect_content(heading));
            lead
        })
        .unwrap_or_default()
}

/// Sibling content following a part heading, up to (but excluding) the next
/// heading of either rank. A sibling that wraps a nested section-level
/// heading is a section boundary in disguise and also ends the block.
fn collect_content(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let nested_section = Selector::parse("h2").unwrap();
    let mut content = Vec::new();

    for sibling in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        let name = element.value().name();
        if name == "h2" || name == "h3" {
            break;
        }
        if element.select(&nested_section).next().is_some() {
            break;
        }
        content.push(element);
    }

    content
}
