// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::args::parse_invocation;
use super::commands::{CommandInvocation, dispatch, find_command};
use super::state::BotState;
use super::utils::permissions::member_permissions;
use crate::platform::MessageData;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;
use twilight_model::guild::Permissions;

/// Runs prefix commands found in chat messages.
pub async fn handle_message(message: &Message, http_client: &Client, bot_state: &BotState) -> miette::Result<()> {
	if message.author.bot {
		return Ok(());
	}

	let Some((command_name, raw_args)) = parse_invocation(&bot_state.config.command_prefix, &message.content) else {
		return Ok(());
	};
	let Some(command) = find_command(command_name) else {
		tracing::debug!(command_name, "Ignoring unknown command");
		return Ok(());
	};

	let caller_permissions = if command.required_permissions.is_empty() {
		Permissions::empty()
	} else {
		match message.guild_id {
			Some(guild_id) => match member_permissions(guild_id, message.author.id, http_client).await {
				Ok(permissions) => permissions,
				Err(error) => {
					tracing::warn!(source = ?error, "Couldn't work out the caller's permissions");
					Permissions::empty()
				}
			},
			None => Permissions::empty(),
		}
	};

	let invocation = CommandInvocation {
		guild_id: message.guild_id,
		channel_id: message.channel_id,
		author_id: message.author.id,
	};
	let reply = dispatch(bot_state, &invocation, command_name, raw_args, caller_permissions).await;

	if let Some(reply) = reply {
		bot_state
			.platform
			.send_message(message.channel_id, &MessageData::text(reply))
			.await
			.into_diagnostic()?;
	}

	Ok(())
}
