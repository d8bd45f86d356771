// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::shared_components::{close_ticket_button, open_ticket_button, send_suggestion_button};
use super::timestamp::log_time;
use crate::config::BrandingConfig;
use crate::platform::MessageData;
use chrono::{DateTime, Utc};
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder, ImageSource};
use twilight_validate::embed::EmbedValidationError;

const BLURPLE: u32 = 0x5865f2;
const RED: u32 = 0xe74c3c;
const TICKET_PANEL_COLOR: u32 = 0x4d4dff;

const TICKET_PANEL_TITLE: &str = "Sistema de Tickets";
const TICKET_PANEL_DESCRIPTION: &str = "Presione aquí para abrir soporte.";
const TICKET_LOG_TITLE: &str = "Ticket Cerrado";
const TICKET_LOG_FOOTER: &str = "Sistema de tickets LATAM RUST";
const SUGGESTION_TITLE: &str = "📌 Nueva Sugerencia";
const SUGGESTION_PROMPT: &str = "📝 Para enviar una sugerencia, presiona el botón a continuación.";

fn with_thumbnail(embed: EmbedBuilder, icon_url: &str) -> EmbedBuilder {
	match ImageSource::url(icon_url) {
		Ok(source) => embed.thumbnail(source),
		Err(error) => {
			tracing::warn!(source = ?error, icon_url, "Configured icon URL is invalid; leaving out the thumbnail");
			embed
		}
	}
}

/// A message posted to a registered channel.
pub fn announcement_message(branding: &BrandingConfig, body: &str) -> Result<MessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title(&branding.title)
		.description(body)
		.color(BLURPLE)
		.footer(EmbedFooterBuilder::new(&branding.footer));
	let embed = with_thumbnail(embed, &branding.icon_url).validate()?.build();
	Ok(MessageData::embed(embed))
}

/// The message people press to open a ticket.
pub fn ticket_panel_message(branding: &BrandingConfig) -> Result<MessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title(TICKET_PANEL_TITLE)
		.description(TICKET_PANEL_DESCRIPTION)
		.color(TICKET_PANEL_COLOR);
	let embed = with_thumbnail(embed, &branding.icon_url).validate()?.build();
	Ok(MessageData::embed(embed).with_components(vec![open_ticket_button()]))
}

/// The first message in a new ticket channel, pinging the person who opened it.
pub fn ticket_greeting_message(user_id: Id<UserMarker>) -> MessageData {
	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.users.push(user_id);
	MessageData::text(format!(
		"¡Hola {}, gracias por abrir un ticket!",
		user_id.mention()
	))
	.with_components(vec![close_ticket_button()])
	.with_allowed_mentions(allowed_mentions)
}

pub fn ticket_log_message(
	ticket_channel: Id<ChannelMarker>,
	closed_by: Id<UserMarker>,
	closed_at: &DateTime<Utc>,
) -> Result<MessageData, EmbedValidationError> {
	let description = format!(
		"**Ticket:** {}\n**Cerrado por:** {}\n**Fecha:** {}",
		ticket_channel.mention(),
		closed_by.mention(),
		log_time(closed_at)
	);
	let embed = EmbedBuilder::new()
		.title(TICKET_LOG_TITLE)
		.description(description)
		.color(RED)
		.footer(EmbedFooterBuilder::new(TICKET_LOG_FOOTER))
		.validate()?
		.build();
	Ok(MessageData::embed(embed))
}

pub fn suggestion_prompt_message() -> MessageData {
	MessageData::text(SUGGESTION_PROMPT).with_components(vec![send_suggestion_button()])
}

pub fn suggestion_message(
	branding: &BrandingConfig,
	suggestion: &str,
	author_tag: &str,
) -> Result<MessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title(SUGGESTION_TITLE)
		.description(suggestion)
		.color(BLURPLE)
		.footer(EmbedFooterBuilder::new(format!("📝 Enviado por {}", author_tag)));
	let embed = with_thumbnail(embed, &branding.icon_url).validate()?.build();
	Ok(MessageData::embed(embed))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn announcement_carries_branding() {
		let branding = BrandingConfig::default();
		let message = announcement_message(&branding, "Hola").unwrap();
		let embed = &message.embeds[0];
		assert_eq!(embed.title.as_deref(), Some("[LATAMRUST] VANILLA #1"));
		assert_eq!(embed.description.as_deref(), Some("Hola"));
		assert_eq!(embed.footer.as_ref().map(|footer| footer.text.as_str()), Some(branding.footer.as_str()));
		assert_eq!(
			embed.thumbnail.as_ref().map(|thumbnail| thumbnail.url.as_str()),
			Some(branding.icon_url.as_str())
		);
	}

	#[test]
	fn invalid_icon_is_left_out() {
		let branding = BrandingConfig {
			icon_url: String::from("not a url"),
			..BrandingConfig::default()
		};
		let message = ticket_panel_message(&branding).unwrap();
		assert!(message.embeds[0].thumbnail.is_none());
		assert_eq!(message.components.len(), 1);
	}

	#[test]
	fn log_mentions_channel_and_closer() {
		let closed_at = DateTime::parse_from_rfc3339("2025-01-28T10:20:30Z")
			.unwrap()
			.with_timezone(&Utc);
		let message = ticket_log_message(Id::new(99), Id::new(7), &closed_at).unwrap();
		assert_eq!(
			message.embeds[0].description.as_deref(),
			Some("**Ticket:** <#99>\n**Cerrado por:** <@7>\n**Fecha:** 2025-01-28 10:20:30")
		);
	}
}
