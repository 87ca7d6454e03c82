use std::fmt::Write as _;

use crate::domain::card::JiraCard;
use crate::format::DisplayBlock;

pub fn render_blocks(blocks: &[DisplayBlock]) -> String {
    let mut out = String::new();
    for (index, block) in blocks.iter().enumerate() {
        match block {
            DisplayBlock::Heading { level, text } => {
                if index > 0 {
                    out.push('\n');
                }
                let underline = if *level <= 1 { '=' } else { '-' };
                let _ = writeln!(out, "{text}");
                let _ = writeln!(
                    out,
                    "{}",
                    underline.to_string().repeat(text.chars().count())
                );
            }
            DisplayBlock::Bullet(text) => {
                let _ = writeln!(out, "  • {text}");
            }
            DisplayBlock::Numbered { number, text } => {
                let _ = writeln!(out, "  {number}. {text}");
            }
            DisplayBlock::Paragraph(text) => {
                let _ = writeln!(out, "{text}");
            }
            DisplayBlock::Code(code) => {
                for line in code.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }
    out
}

pub fn render_cards(cards: &[&JiraCard]) -> String {
    let key_width = cards
        .iter()
        .map(|card| card.key.len())
        .max()
        .unwrap_or(3)
        .max(3);
    let status_width = cards
        .iter()
        .map(|card| card.status.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:key_width$}  {:status_width$}  {:8}  {:14}  SUMMARY",
        "KEY", "STATUS", "PRIORITY", "TEAM"
    );
    for card in cards {
        let _ = writeln!(
            out,
            "{:key_width$}  {:status_width$}  {:8}  {:14}  {}{}",
            card.key,
            card.status,
            card.priority,
            card.team,
            card.summary,
            card.assignee
                .as_deref()
                .map(|assignee| format!(" ({assignee})"))
                .unwrap_or_default()
        );
    }
    out
}
