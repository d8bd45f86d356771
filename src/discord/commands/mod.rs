// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::error::CommandError;
use args::{ArgShape, ParsedArgs, Trailing, parse_args};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};

pub mod args;
mod create_poll;
mod register_channel;
mod request_suggestion;
mod send_to_channel;
mod ticket_panel;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandKind {
	RegisterChannel,
	SendToChannel,
	CreatePoll,
	ShowTicketPanel,
	RequestSuggestion,
}

#[derive(Debug)]
pub struct CommandDef {
	pub kind: CommandKind,
	pub name: &'static str,
	pub alias: &'static str,
	pub shape: ArgShape,
	/// Permissions the caller must have for the handler to run.
	pub required_permissions: Permissions,
}

pub const COMMANDS: &[CommandDef] = &[
	CommandDef {
		kind: CommandKind::RegisterChannel,
		name: "registrar_canal",
		alias: "register-channel",
		shape: ArgShape {
			positional: &["canal_id"],
			trailing: Trailing::Text("nombre"),
		},
		required_permissions: Permissions::ADMINISTRATOR,
	},
	CommandDef {
		kind: CommandKind::SendToChannel,
		name: "enviar",
		alias: "send-to-channel",
		shape: ArgShape {
			positional: &["nombre"],
			trailing: Trailing::Text("mensaje"),
		},
		required_permissions: Permissions::empty(),
	},
	CommandDef {
		kind: CommandKind::CreatePoll,
		name: "encuesta",
		alias: "create-poll",
		shape: ArgShape {
			positional: &["pregunta"],
			trailing: Trailing::Variadic("opciones"),
		},
		required_permissions: Permissions::empty(),
	},
	CommandDef {
		kind: CommandKind::ShowTicketPanel,
		name: "panel",
		alias: "show-ticket-panel",
		shape: ArgShape::NONE,
		required_permissions: Permissions::ADMINISTRATOR,
	},
	CommandDef {
		kind: CommandKind::RequestSuggestion,
		name: "sugerencia",
		alias: "request-suggestion",
		shape: ArgShape::NONE,
		required_permissions: Permissions::empty(),
	},
];

/// Where and by whom a command was used.
#[derive(Clone, Debug)]
pub struct CommandInvocation {
	pub guild_id: Option<Id<GuildMarker>>,
	pub channel_id: Id<ChannelMarker>,
	pub author_id: Id<UserMarker>,
}

pub fn find_command(command_name: &str) -> Option<&'static CommandDef> {
	COMMANDS
		.iter()
		.find(|command| command.name == command_name || command.alias == command_name)
}

/// Runs the named command and returns the reply to post in the invoking channel, if any.
///
/// Unknown commands are ignored. Failures never escape; they become replies (and log entries when they're not the
/// user's doing).
pub async fn dispatch(
	state: &BotState,
	invocation: &CommandInvocation,
	command_name: &str,
	raw_args: &str,
	caller_permissions: Permissions,
) -> Option<String> {
	let command = find_command(command_name)?;

	match run_command(state, invocation, command, raw_args, caller_permissions).await {
		Ok(reply) => reply,
		Err(error) => {
			if error.is_internal() {
				tracing::error!(source = ?error, command = command.name, "Command failed");
			} else {
				tracing::debug!(%error, command = command.name, "Command rejected");
			}
			Some(error.user_message())
		}
	}
}

async fn run_command(
	state: &BotState,
	invocation: &CommandInvocation,
	command: &CommandDef,
	raw_args: &str,
	caller_permissions: Permissions,
) -> Result<Option<String>, CommandError> {
	if !caller_permissions.contains(command.required_permissions) {
		return Err(CommandError::PermissionDenied);
	}

	let args: ParsedArgs = parse_args(&command.shape, raw_args)
		.map_err(|_| CommandError::Usage(command.shape.usage(&state.config.command_prefix, command.name)))?;

	match command.kind {
		CommandKind::RegisterChannel => register_channel::handle_command(state, args).await,
		CommandKind::SendToChannel => send_to_channel::handle_command(state, args).await,
		CommandKind::CreatePoll => create_poll::handle_command(state, invocation, args).await,
		CommandKind::ShowTicketPanel => ticket_panel::handle_command(state, invocation).await,
		CommandKind::RequestSuggestion => request_suggestion::handle_command(state, invocation).await,
	}
}
