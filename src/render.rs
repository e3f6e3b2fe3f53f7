use scraper::ElementRef;
use url::Url;

pub fn plain_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders a part's content block to plain text, one line per top-level
/// element. Hyperlinks become inline `[visible text](absolute address)`
/// markers, with relative addresses resolved against `base`. The input
/// nodes are only read; identical input renders identically.
pub fn render_content(nodes: &[ElementRef<'_>], base: &Url) -> String {
    let mut blocks = Vec::new();
    for node in nodes {
        let mut raw = String::new();
        render_element(*node, base, &mut raw);
        let block = normalize_whitespace(&raw);
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    blocks.join("\n")
}

fn render_element(element: ElementRef<'_>, base: &Url, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };
        if child_element.value().name() == "a" {
            push_link_marker(child_element, base, out);
        } else {
            render_element(child_element, base, out);
        }
    }
}

fn push_link_marker(link: ElementRef<'_>, base: &Url, out: &mut String) {
    let label = normalize_whitespace(&plain_text(link));
    let Some(href) = link.value().attr("href").filter(|href| !href.is_empty()) else {
        out.push_str(&label);
        return;
    };

    let target = match base.join(href) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::debug!(href, %err, "unresolvable link address, keeping it verbatim");
            href.to_owned()
        }
    };
    out.push_str(&format!("[{label}]({target})"));
}
