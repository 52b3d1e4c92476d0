use std::fmt::Write;

use crate::models::{Center, Project, Tag};

/// Tags shown on a card before collapsing the rest into `+N`.
pub const CARD_VISIBLE_TAGS: usize = 3;
pub const CENTER_PLACEHOLDER: &str = "—";
const DESCRIPTION_PREVIEW_CHARS: usize = 140;

pub fn tag_chip(tag: &Tag, active: bool) -> String {
    let mark = if active { 'x' } else { ' ' };
    format!("[{mark}] {} ({})", tag.name, tag.color_hex)
}

pub fn tag_badges(tags: &[&Tag], limit: usize) -> String {
    let mut out = tags
        .iter()
        .take(limit)
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(" · ");
    let extra = tags.len().saturating_sub(limit);
    if extra > 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "+{extra}");
    }
    out
}

pub fn center_name(center: Option<&Center>) -> &str {
    center.map(|c| c.name.as_str()).unwrap_or(CENTER_PLACEHOLDER)
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

pub fn project_card(project: &Project, center: Option<&Center>, tags: &[&Tag]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", project.name);
    if project.open_for_applications {
        out.push_str("  [Open for applications]");
    }
    out.push('\n');
    let _ = writeln!(out, "  {}", preview(&project.description, DESCRIPTION_PREVIEW_CHARS));
    let _ = writeln!(out, "  Center: {}", center_name(center));
    if !tags.is_empty() {
        let _ = writeln!(out, "  Tags: {}", tag_badges(tags, CARD_VISIBLE_TAGS));
    }
    let _ = writeln!(out, "  Team: {}", project.team_size);
    let _ = writeln!(out, "  id: {}", project.id);
    out
}
