// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening and closing support tickets.
//!
//! A ticket is nothing more than a private text channel named `ticket-<username>`; closing it deletes the channel.

use super::InteractionInvocation;
use crate::discord::state::BotState;
use crate::discord::utils::messages::{ticket_greeting_message, ticket_log_message};
use crate::error::PlatformError;
use crate::platform::{ChannelOverwrite, PermissionGrant, PermissionState, Principal};
use twilight_mention::fmt::Mention;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};

pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";

const NOT_IN_GUILD: &str = "Los tickets solo se pueden abrir dentro del servidor.";
const NOT_A_TICKET: &str = "Este no es un canal de ticket.";
const ALREADY_CLOSING: &str = "Este ticket ya se está cerrando.";
const TICKET_CLOSED: &str = "El ticket ha sido cerrado y eliminado.";

pub fn ticket_channel_name(username: &str) -> String {
	format!("{}{}", TICKET_CHANNEL_PREFIX, username)
}

pub fn is_ticket_channel(channel_name: &str) -> bool {
	channel_name.starts_with(TICKET_CHANNEL_PREFIX)
}

/// Builds the overwrites for a new ticket channel: hidden from everyone, open to the member who opened it and to the
/// support role (when there is one).
pub fn ticket_overwrites(
	guild_id: Id<GuildMarker>,
	member_id: Id<UserMarker>,
	support_role: Option<Id<RoleMarker>>,
) -> Vec<ChannelOverwrite> {
	let everyone_role: Id<RoleMarker> = guild_id.cast();
	let mut overwrites = vec![
		ChannelOverwrite {
			principal: Principal::Role(everyone_role),
			grant: PermissionGrant::hidden(),
		},
		ChannelOverwrite {
			principal: Principal::Member(member_id),
			grant: PermissionGrant {
				view: PermissionState::Allow,
				send: PermissionState::Allow,
				attach: PermissionState::Allow,
			},
		},
	];
	if let Some(role_id) = support_role {
		overwrites.push(ChannelOverwrite {
			principal: Principal::Role(role_id),
			grant: PermissionGrant {
				view: PermissionState::Allow,
				send: PermissionState::Allow,
				attach: PermissionState::Inherit,
			},
		});
	}
	overwrites
}

pub async fn open_ticket(state: &BotState, invocation: &InteractionInvocation) -> Result<(), PlatformError> {
	let platform = state.platform.as_ref();
	let tickets = &state.config.tickets;

	let Some(guild_id) = invocation.guild_id else {
		platform.reply(&invocation.interaction, NOT_IN_GUILD, true).await?;
		return Ok(());
	};

	let category = match platform.find_category(guild_id, &tickets.category_name).await {
		Ok(category) => category,
		Err(error) => {
			tracing::warn!(source = ?error, "Couldn't look up the ticket category; creating the ticket without one");
			None
		}
	};

	let support_role = match platform.role_exists(guild_id, tickets.support_role).await {
		Ok(true) => Some(tickets.support_role),
		Ok(false) => {
			tracing::warn!(
				role = tickets.support_role.get(),
				"Support role doesn't exist; ticket will be visible only to its owner"
			);
			None
		}
		Err(error) => {
			tracing::warn!(source = ?error, "Couldn't look up the support role; leaving it off the ticket");
			None
		}
	};

	let overwrites = ticket_overwrites(guild_id, invocation.user.id, support_role);
	let channel_name = ticket_channel_name(&invocation.user.name);
	let ticket_channel = platform
		.create_text_channel(guild_id, &channel_name, category, &overwrites)
		.await?;
	tracing::info!(channel = ticket_channel.id.get(), user = invocation.user.id.get(), "Opened ticket");

	platform
		.send_message(ticket_channel.id, &ticket_greeting_message(invocation.user.id))
		.await?;
	platform
		.reply(
			&invocation.interaction,
			&format!("Tu ticket ha sido creado: {}", ticket_channel.id.mention()),
			true,
		)
		.await?;

	Ok(())
}

pub async fn close_ticket(state: &BotState, invocation: &InteractionInvocation) -> Result<(), PlatformError> {
	let platform = state.platform.as_ref();

	let Some(channel) = invocation
		.channel
		.as_ref()
		.filter(|channel| is_ticket_channel(&channel.name))
	else {
		platform.reply(&invocation.interaction, NOT_A_TICKET, true).await?;
		return Ok(());
	};

	let Some(closing) = state.closing_tickets.begin(channel.id) else {
		platform.reply(&invocation.interaction, ALREADY_CLOSING, true).await?;
		return Ok(());
	};

	if let Some(guild_id) = invocation.guild_id {
		log_closure(state, guild_id, invocation).await;
	}

	match platform.delete_channel(channel.id).await {
		Ok(()) => closing.closed(),
		Err(error) if error.is_not_found() => {
			closing.closed();
			tracing::debug!(channel = channel.id.get(), "Ticket channel was already deleted");
			if let Err(error) = platform.reply(&invocation.interaction, ALREADY_CLOSING, true).await {
				tracing::debug!(source = ?error, "Couldn't respond about an already-closed ticket");
			}
			return Ok(());
		}
		Err(error) => return Err(error),
	}
	tracing::info!(channel = channel.id.get(), user = invocation.user.id.get(), "Closed ticket");

	// The channel the interaction came from is gone now, so this can fail.
	if let Err(error) = platform.reply(&invocation.interaction, TICKET_CLOSED, true).await {
		tracing::warn!(source = ?error, "Couldn't confirm ticket closure");
	}

	Ok(())
}

/// Posts the closure to the log channel, if the server has one. Never stops the ticket from closing.
async fn log_closure(state: &BotState, guild_id: Id<GuildMarker>, invocation: &InteractionInvocation) {
	let platform = state.platform.as_ref();
	let Some(channel) = &invocation.channel else {
		return;
	};

	let log_channel = match platform
		.find_text_channel(guild_id, &state.config.tickets.log_channel_name)
		.await
	{
		Ok(Some(log_channel)) => log_channel,
		Ok(None) => return,
		Err(error) => {
			tracing::warn!(source = ?error, "Couldn't look up the ticket log channel");
			return;
		}
	};

	let log_message = match ticket_log_message(channel.id, invocation.user.id, &invocation.created_at) {
		Ok(message) => message,
		Err(error) => {
			tracing::warn!(source = ?error, "Couldn't build the ticket log entry");
			return;
		}
	};
	if let Err(error) = platform.send_message(log_channel, &log_message).await {
		tracing::warn!(source = ?error, "Couldn't post the ticket log entry");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ticket_names() {
		assert_eq!(ticket_channel_name("ana"), "ticket-ana");
		assert!(is_ticket_channel("ticket-ana"));
		assert!(!is_ticket_channel("general"));
		assert!(!is_ticket_channel("tickets"));
	}

	#[test]
	fn overwrites_hide_the_channel_from_everyone() {
		let overwrites = ticket_overwrites(Id::new(1), Id::new(2), Some(Id::new(3)));
		assert_eq!(overwrites.len(), 3);
		assert_eq!(overwrites[0].principal, Principal::Role(Id::new(1)));
		assert!(!overwrites[0].grant.can_view());
		assert!(overwrites[1].grant.can_view());
		assert_eq!(overwrites[1].grant.attach, PermissionState::Allow);
		assert_eq!(overwrites[2].principal, Principal::Role(Id::new(3)));
		assert_eq!(overwrites[2].grant.attach, PermissionState::Inherit);
	}

	#[test]
	fn missing_support_role_is_left_out() {
		let overwrites = ticket_overwrites(Id::new(1), Id::new(2), None);
		assert_eq!(overwrites.len(), 2);
	}
}
