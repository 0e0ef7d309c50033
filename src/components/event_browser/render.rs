//! Turn one page of events into embed content and navigation buttons.

use super::custom_id::{build_custom_id, SessionId};
use super::paginator::{NavAction, Paginator};
use crate::components::ctftime::DisplayEvent;
use poise::serenity_prelude as serenity;
use rust_i18n::t;

const ICONS: [&str; 5] = ["🔥", "🚀", "✨", "🏆", "🔍"];
const COLORS: [u32; 5] = [0xE7_4C_3C, 0x34_98_DB, 0x9B_59_B6, 0xF1_C4_0F, 0x2E_CC_71];

/// Discord embed field limits, in characters
const FIELD_NAME_MAX: usize = 256;
const FIELD_VALUE_MAX: usize = 1024;
/// Longest link target kept in a field value
const URL_MAX: usize = 512;

/// One event as an embed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: String,
    pub value: String,
}

/// Platform-neutral content of one rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub color: u32,
    pub fields: Vec<RenderedField>,
    /// `Page {n}/{total}`
    pub page_label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Render a slice of events for page `page_index` of `total_pages`
pub fn render(events: &[DisplayEvent], page_index: usize, total_pages: usize) -> RenderedPage {
    let fields = events
        .iter()
        .enumerate()
        .map(|(i, event)| render_event(event, ICONS[(page_index + i) % ICONS.len()]))
        .collect();

    let current = page_index + 1;

    RenderedPage {
        title: t!("upcoming_title").to_string(),
        color: COLORS[page_index % COLORS.len()],
        fields,
        page_label: t!("page_indicator", current = current, total = total_pages).to_string(),
        previous_enabled: page_index > 0,
        next_enabled: page_index + 1 < total_pages,
    }
}

/// Render whatever page the paginator currently sits on
pub fn render_paginator(paginator: &Paginator) -> RenderedPage {
    render(
        paginator.current_slice(),
        paginator.index(),
        paginator.total_pages(),
    )
}

fn render_event(event: &DisplayEvent, icon: &str) -> RenderedField {
    let mut value = String::new();
    value.push_str(&format!("**{}:** {}\n", t!("event_start"), event.start));
    value.push_str(&format!("**{}:** {}\n", t!("event_finish"), event.finish));
    if event.url.chars().count() <= URL_MAX {
        value.push_str(&format!("**{}:** [{}]({})\n", t!("event_url"), t!("event_link"), event.url));
    } else {
        // A cut link would point nowhere; show the text instead
        value.push_str(&format!("**{}:** {}\n", t!("event_url"), clamp(&event.url, URL_MAX)));
    }
    value.push_str(&format!(
        "**{}:** {} | **{}:** {} | **{}:** {}",
        t!("event_format"),
        event.format,
        t!("event_participants"),
        event.participants,
        t!("event_weight"),
        event.weight
    ));

    RenderedField {
        name: clamp(&format!("{} {}", icon, event.title), FIELD_NAME_MAX),
        value: clamp(&value, FIELD_VALUE_MAX),
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
fn clamp(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(max.saturating_sub(1)).collect();
    clamped.push('…');
    clamped
}

impl RenderedPage {
    /// Build the Discord embed for this page
    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new()
            .title(&self.title)
            .color(self.color)
            .footer(serenity::CreateEmbedFooter::new(&self.page_label));

        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, false);
        }

        embed
    }

    /// Build the previous/next button row bound to `session_id`
    pub fn to_components(&self, session_id: SessionId) -> Vec<serenity::CreateActionRow> {
        let previous = serenity::CreateButton::new(build_custom_id(NavAction::Previous, session_id))
            .label(t!("button_previous"))
            .style(serenity::ButtonStyle::Secondary)
            .disabled(!self.previous_enabled);

        let next = serenity::CreateButton::new(build_custom_id(NavAction::Next, session_id))
            .label(t!("button_next"))
            .style(serenity::ButtonStyle::Secondary)
            .disabled(!self.next_enabled);

        vec![serenity::CreateActionRow::Buttons(vec![previous, next])]
    }
}
