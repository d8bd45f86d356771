// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::CommandInvocation;
use super::args::ParsedArgs;
use crate::discord::state::BotState;
use crate::error::CommandError;
use crate::poll::{build_poll, post_poll};

pub async fn handle_command(
	state: &BotState,
	invocation: &CommandInvocation,
	args: ParsedArgs,
) -> Result<Option<String>, CommandError> {
	let question = args.positional(0).to_string();
	let poll = build_poll(&question, args.trailing)?;
	let embed = poll.embed()?;

	let message_id = post_poll(state.platform.as_ref(), invocation.channel_id, &poll, embed).await?;
	tracing::debug!(message = message_id.get(), options = poll.options.len(), "Posted poll");

	Ok(Some(String::from("Encuesta creada exitosamente.")))
}
