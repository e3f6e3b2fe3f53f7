use std::sync::LazyLock;

use regex::Regex;

use crate::formats::{DraftAssignment, templates};
use crate::render;
use crate::walk::Section;

static RE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((\d+)\s*min\.?\)").expect("invalid regex: time"));
static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s*").expect("invalid regex: ordinal"));
static RE_LEITURA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)leitura da bíblia").expect("invalid regex: leitura"));
static RE_DISCURSO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)discurso").expect("invalid regex: discurso"));
static RE_ESTUDO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)estudo bíblico de congregação").expect("invalid regex: estudo")
});

/// Everything a rule may look at: the heading as printed, its lowercased
/// form, the rendered content block, and the already-extracted minutes.
struct RuleInput<'a> {
    heading: &'a str,
    lower: &'a str,
    content: &'a str,
    time: Option<u32>,
}

enum When {
    HeadingContains(&'static str),
    Matches(fn(&RuleInput<'_>) -> bool),
}

impl When {
    fn holds(&self, input: &RuleInput<'_>) -> bool {
        match self {
            Self::HeadingContains(needle) => input.lower.contains(needle),
            Self::Matches(predicate) => predicate(input),
        }
    }
}

/// One classification rule. Each section's rules form an ordered table,
/// evaluated top to bottom, first match wins; the order is part of the
/// contract and reordering changes classification outcomes.
struct Rule {
    template: &'static str,
    when: When,
    build: fn(&'static str, &RuleInput<'_>) -> DraftAssignment,
}

const TREASURES_RULES: &[Rule] = &[
    Rule {
        template: templates::DISCURSO,
        when: When::Matches(numbered_non_reserved_heading),
        build: build_treasures_discourse,
    },
    Rule {
        template: templates::JOIAS,
        when: When::HeadingContains("joias espirituais"),
        build: build_content_part,
    },
    Rule {
        template: templates::LEITURA,
        when: When::HeadingContains("leitura da bíblia"),
        build: build_bible_reading,
    },
];

const MINISTRY_RULES: &[Rule] = &[
    Rule {
        template: templates::INICIANDO,
        when: When::HeadingContains("iniciando conversas"),
        build: build_content_part,
    },
    Rule {
        template: templates::CULTIVANDO,
        when: When::HeadingContains("cultivando o interesse"),
        build: build_content_part,
    },
    Rule {
        template: templates::DISCIPULOS,
        when: When::HeadingContains("fazendo discípulos"),
        build: build_content_part,
    },
    Rule {
        template: templates::CRENCAS,
        when: When::HeadingContains("explicando suas crenças"),
        build: build_content_part,
    },
    Rule {
        template: templates::ESTUDO_BIBLICO,
        when: When::HeadingContains("estudo bíblico"),
        build: build_content_part,
    },
    Rule {
        template: templates::DISCURSO_MINISTERIO,
        when: When::HeadingContains("discurso"),
        build: build_ministry_discourse,
    },
];

const CHRISTIAN_LIFE_RULES: &[Rule] = &[
    Rule {
        template: templates::ESTUDO,
        when: When::HeadingContains("estudo bíblico de congregação"),
        build: build_congregation_study,
    },
    Rule {
        template: templates::NECESSIDADES,
        when: When::Matches(local_needs_slot),
        build: build_local_needs,
    },
    Rule {
        template: templates::ORACAO,
        when: When::Matches(prayer_heading),
        build: build_prayer,
    },
];

/// Maps one walked heading to a draft record. `None` means no rule in the
/// section's table matched; the caller decides how to surface that.
pub fn classify(section: Section, heading: &str, content: &str) -> Option<DraftAssignment> {
    let rules: &[Rule] = match section {
        Section::None => return None,
        Section::Treasures => TREASURES_RULES,
        Section::Ministry => MINISTRY_RULES,
        Section::ChristianLife => CHRISTIAN_LIFE_RULES,
    };

    let lower = heading.to_lowercase();
    let input = RuleInput {
        heading,
        lower: &lower,
        content,
        time: extract_time(heading, content),
    };

    let rule = rules.iter().find(|rule| rule.when.holds(&input))?;
    Some((rule.build)(rule.template, &input))
}

/// Cross-cutting `(N min)` extraction: the heading wins over the content.
fn extract_time(heading: &str, content: &str) -> Option<u32> {
    RE_TIME
        .captures(heading)
        .or_else(|| RE_TIME.captures(content))
        .and_then(|caps| caps[1].parse().ok())
        .filter(|&minutes| minutes > 0)
}

fn numbered_non_reserved_heading(input: &RuleInput<'_>) -> bool {
    RE_ORDINAL.is_match(input.heading)
        && !input.lower.contains("joias")
        && !input.lower.contains("leitura")
}

fn local_needs_slot(input: &RuleInput<'_>) -> bool {
    input.lower.contains("necessidades locais")
        || (input.time.is_some()
            && !input.lower.contains("estudo")
            && !input.lower.contains("cântico")
            && !input.lower.contains("oração"))
}

fn prayer_heading(input: &RuleInput<'_>) -> bool {
    input.lower.contains("oração") || input.lower.contains("comentários finais")
}

fn build_treasures_discourse(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;

    let title = cleaned_title(input.heading);
    draft.theme_title = if title.to_lowercase() == "discurso" {
        // The workbook sometimes labels the slot generically and leaves the
        // actual theme to the first line of the body.
        first_line(input.content)
    } else {
        non_empty(title)
    };
    draft
}

fn build_bible_reading(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;
    draft.observation = tail_after(input.heading, &RE_LEITURA)
        .or_else(|| non_empty(input.content.to_owned()));
    draft
}

/// Parts whose useful detail lives in the body: spiritual gems and all the
/// ministry demonstrations. The rendered content (study-point links
/// included) travels as the observation.
fn build_content_part(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;
    draft.observation = non_empty(input.content.to_owned());
    draft
}

fn build_ministry_discourse(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = build_content_part(template, input);
    draft.theme_title = tail_after(input.heading, &RE_DISCURSO);
    draft
}

fn build_congregation_study(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;
    draft.theme_title = tail_after(input.heading, &RE_ESTUDO);
    draft.observation = non_empty(input.content.to_owned());
    draft
}

fn build_local_needs(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;
    let title = cleaned_title(input.heading);
    if title.to_lowercase() != "necessidades locais" {
        draft.theme_title = non_empty(title);
    }
    draft.observation = non_empty(input.content.to_owned());
    draft
}

fn build_prayer(template: &'static str, input: &RuleInput<'_>) -> DraftAssignment {
    let mut draft = DraftAssignment::new(template);
    draft.time_minutes = input.time;
    draft
}

/// Heading with the leading ordinal and any `(N min)` group removed.
fn cleaned_title(heading: &str) -> String {
    let without_ordinal = RE_ORDINAL.replace(heading, "");
    cleaned_tail(without_ordinal.as_ref())
}

fn cleaned_tail(tail: &str) -> String {
    let without_time = RE_TIME.replace_all(tail, " ");
    trim_separators(&render::normalize_whitespace(&without_time))
}

/// Remainder of the heading after the label's first match, cleaned up. The
/// label regexes fold case themselves, so the match offsets index the
/// heading as printed. Empty tails collapse to `None`.
fn tail_after(heading: &str, label: &Regex) -> Option<String> {
    let found = label.find(heading)?;
    non_empty(cleaned_tail(&heading[found.end()..]))
}

fn trim_separators(text: &str) -> String {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '—' | '|' | '.'))
        .to_owned()
}

fn first_line(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}
