use pulldown_cmark::{Event, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    Heading { level: u8, text: String },
    Bullet(String),
    Numbered { number: u64, text: String },
    Paragraph(String),
    Code(String),
}

/// How a panel turns backend text into display blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Single pass over lines; no nesting.
    Lines,
    /// Full CommonMark parse, for payloads known to be well-formed markdown.
    Markdown,
}

impl Formatter {
    pub fn apply(&self, raw: &str) -> Vec<DisplayBlock> {
        match self {
            Formatter::Lines => format_lines(raw),
            Formatter::Markdown => format_markdown(raw),
        }
    }
}

pub fn format_lines(raw: &str) -> Vec<DisplayBlock> {
    raw.lines().filter_map(format_line).collect()
}

fn format_line(line: &str) -> Option<DisplayBlock> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.starts_with('#') {
        let hashes = line.chars().take_while(|c| *c == '#').count();
        let text = line[hashes..].trim();
        if text.is_empty() {
            return None;
        }
        return Some(DisplayBlock::Heading {
            level: hashes.min(6) as u8,
            text: text.to_string(),
        });
    }

    if let Some(inner) = line
        .strip_prefix("**")
        .and_then(|rest| rest.strip_suffix("**"))
        .map(str::trim)
        .filter(|inner| !inner.is_empty())
    {
        return Some(DisplayBlock::Heading {
            level: 2,
            text: inner.to_string(),
        });
    }

    if line == "-" || line == "*" {
        return None;
    }

    if let Some(item) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        let item = item.trim();
        if item.is_empty() {
            return None;
        }
        return Some(DisplayBlock::Bullet(item.to_string()));
    }

    Some(DisplayBlock::Paragraph(line.to_string()))
}

enum PendingKind {
    Heading(u8),
    Paragraph,
    Bullet,
    Numbered(u64),
    Code,
}

struct Pending {
    kind: PendingKind,
    text: String,
}

impl Pending {
    fn new(kind: PendingKind) -> Self {
        Self {
            kind,
            text: String::new(),
        }
    }

    fn is_item(&self) -> bool {
        matches!(self.kind, PendingKind::Bullet | PendingKind::Numbered(_))
    }

    fn finish(self) -> Option<DisplayBlock> {
        let text = match self.kind {
            PendingKind::Code => self.text.trim_end_matches('\n').to_string(),
            _ => self.text.trim().to_string(),
        };
        if text.is_empty() {
            return None;
        }
        Some(match self.kind {
            PendingKind::Heading(level) => DisplayBlock::Heading { level, text },
            PendingKind::Paragraph => DisplayBlock::Paragraph(text),
            PendingKind::Bullet => DisplayBlock::Bullet(text),
            PendingKind::Numbered(number) => DisplayBlock::Numbered { number, text },
            PendingKind::Code => DisplayBlock::Code(text),
        })
    }
}

/// Parses `raw` as CommonMark. Inline emphasis, links and code spans are
/// flattened to their text.
pub fn format_markdown(raw: &str) -> Vec<DisplayBlock> {
    let mut blocks = Vec::new();
    // Next ordinal for each open list; `None` marks a bullet list.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut pending: Option<Pending> = None;

    let flush = |pending: &mut Option<Pending>, blocks: &mut Vec<DisplayBlock>| {
        if let Some(block) = pending.take().and_then(Pending::finish) {
            blocks.push(block);
        }
    };

    for event in Parser::new(raw) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut pending, &mut blocks);
                pending = Some(Pending::new(PendingKind::Heading(level as u8)));
            }
            Event::Start(Tag::Paragraph) => match pending.as_mut() {
                Some(item) if item.is_item() => {
                    if !item.text.is_empty() {
                        item.text.push(' ');
                    }
                }
                _ => {
                    flush(&mut pending, &mut blocks);
                    pending = Some(Pending::new(PendingKind::Paragraph));
                }
            },
            Event::Start(Tag::List(start)) => {
                flush(&mut pending, &mut blocks);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                flush(&mut pending, &mut blocks);
                let kind = match lists.last_mut() {
                    Some(Some(next)) => {
                        let number = *next;
                        *next += 1;
                        PendingKind::Numbered(number)
                    }
                    _ => PendingKind::Bullet,
                };
                pending = Some(Pending::new(kind));
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut pending, &mut blocks);
                pending = Some(Pending::new(PendingKind::Code));
            }
            Event::Text(text) | Event::Code(text) => pending
                .get_or_insert_with(|| Pending::new(PendingKind::Paragraph))
                .text
                .push_str(&text),
            Event::SoftBreak | Event::HardBreak => {
                if let Some(current) = pending.as_mut() {
                    current.text.push(' ');
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if pending.as_ref().is_some_and(|current| !current.is_item()) {
                    flush(&mut pending, &mut blocks);
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                flush(&mut pending, &mut blocks);
            }
            _ => {}
        }
    }
    flush(&mut pending, &mut blocks);

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> DisplayBlock {
        DisplayBlock::Heading {
            level,
            text: text.to_string(),
        }
    }

    #[test]
    fn formats_heading_and_bullet() {
        assert_eq!(
            format_lines("# Title\n- item one"),
            vec![heading(1, "Title"), DisplayBlock::Bullet("item one".into())]
        );
    }

    #[test]
    fn bold_line_is_a_heading() {
        assert_eq!(
            format_lines("**Verdict**\nThis ticket is a mess"),
            vec![
                heading(2, "Verdict"),
                DisplayBlock::Paragraph("This ticket is a mess".into())
            ]
        );
    }

    #[test]
    fn blank_lines_are_dropped_and_lines_trimmed() {
        assert_eq!(
            format_lines("\n  ### Risks  \n\n   * flaky login\n\nplain words\n   \n"),
            vec![
                heading(3, "Risks"),
                DisplayBlock::Bullet("flaky login".into()),
                DisplayBlock::Paragraph("plain words".into()),
            ]
        );
    }

    #[test]
    fn inline_bold_is_not_a_heading() {
        assert_eq!(
            format_lines("**Given** a user is signed in"),
            vec![DisplayBlock::Paragraph("**Given** a user is signed in".into())]
        );
    }

    #[test]
    fn markers_without_text_are_dropped() {
        assert!(format_lines("#\n- \n*\n##   ").is_empty());
    }

    #[test]
    fn markdown_variant_handles_lists_and_emphasis() {
        let raw = "## Definition of Ready\n\nThe ticket is *mostly* ready.\n\n1. Add acceptance criteria\n2. Link the design\n\n- owner: `Sam`\n- estimate missing\n";
        assert_eq!(
            format_markdown(raw),
            vec![
                heading(2, "Definition of Ready"),
                DisplayBlock::Paragraph("The ticket is mostly ready.".into()),
                DisplayBlock::Numbered {
                    number: 1,
                    text: "Add acceptance criteria".into()
                },
                DisplayBlock::Numbered {
                    number: 2,
                    text: "Link the design".into()
                },
                DisplayBlock::Bullet("owner: Sam".into()),
                DisplayBlock::Bullet("estimate missing".into()),
            ]
        );
    }

    #[test]
    fn markdown_variant_keeps_code_blocks() {
        assert_eq!(
            format_markdown("```\nGiven a cart\nWhen I pay\n```\n"),
            vec![DisplayBlock::Code("Given a cart\nWhen I pay".into())]
        );
    }

    #[test]
    fn markdown_variant_splits_nested_items() {
        assert_eq!(
            format_markdown("- parent\n  - child\n"),
            vec![
                DisplayBlock::Bullet("parent".into()),
                DisplayBlock::Bullet("child".into()),
            ]
        );
    }
}
