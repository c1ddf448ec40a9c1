//! Text rendering of non-script files for the preview overlay

use crate::workspace::{FileRecord, Language};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Elements whose content never shows on a rendered page
const HIDDEN_ELEMENTS: [&str; 4] = ["head", "script", "style", "template"];

/// Elements that start on their own line
const BLOCK_ELEMENTS: [&str; 16] = [
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section", "tr",
    "button", "pre",
];

/// Render a file as preview lines
pub fn render(file: &FileRecord) -> Vec<String> {
    match file.language {
        Language::Markdown => render_markdown(&file.content),
        Language::Markup => render_markup(&file.content),
        _ => file.content.lines().map(str::to_string).collect(),
    }
}

fn render_markdown(source: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut list_depth = 0usize;

    let flush = |lines: &mut Vec<String>, current: &mut String| {
        lines.push(std::mem::take(current));
    };

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current.push_str(&"#".repeat(level as usize));
                current.push(' ');
            }
            Event::Start(Tag::List(_)) => list_depth += 1,
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    lines.push(String::new());
                }
            }
            Event::Start(Tag::Item) => {
                current.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                current.push_str("• ");
            }
            Event::Text(text) | Event::Code(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    current.push_str(first);
                }
                for part in parts {
                    flush(&mut lines, &mut current);
                    current.push_str(part);
                }
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut lines, &mut current),
            Event::End(TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::CodeBlock) => {
                if !current.is_empty() {
                    flush(&mut lines, &mut current);
                }
                if list_depth == 0 {
                    lines.push(String::new());
                }
            }
            Event::End(TagEnd::Item) => {
                if !current.is_empty() {
                    flush(&mut lines, &mut current);
                }
            }
            Event::Rule => {
                lines.push("────────".to_string());
                lines.push(String::new());
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    tidy(lines)
}

fn render_markup(source: &str) -> Vec<String> {
    let mut text = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let tag_start = &rest[open + 1..];
        let Some(close) = tag_start.find('>') else {
            rest = "";
            break;
        };
        let tag = tag_start[..close].trim().to_ascii_lowercase();
        rest = &tag_start[close + 1..];

        let is_closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_string();

        if !is_closing && HIDDEN_ELEMENTS.contains(&name.as_str()) {
            let end_tag = format!("</{}", name);
            rest = match rest.to_ascii_lowercase().find(&end_tag) {
                Some(end) => match rest[end..].find('>') {
                    Some(gt) => &rest[end + gt + 1..],
                    None => "",
                },
                None => "",
            };
            continue;
        }
        if BLOCK_ELEMENTS.contains(&name.as_str()) {
            text.push('\n');
        }
    }
    text.push_str(rest);

    decode_entities(&text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of blank lines and trim blank lines at both ends
fn tidy(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && out.last().map_or(true, |prev| prev.trim().is_empty()) {
            continue;
        }
        out.push(if blank { String::new() } else { line });
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}
