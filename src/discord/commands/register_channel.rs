// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::args::ParsedArgs;
use crate::discord::state::BotState;
use crate::error::CommandError;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

pub async fn handle_command(state: &BotState, args: ParsedArgs) -> Result<Option<String>, CommandError> {
	let raw_channel_id = args.positional(0);
	let name = args.text();

	let channel_id: Id<ChannelMarker> = match raw_channel_id.parse::<u64>().ok().and_then(Id::new_checked) {
		Some(channel_id) => channel_id,
		None => {
			return Err(CommandError::Validation(format!(
				"`{}` no es un ID de canal válido.",
				raw_channel_id
			)));
		}
	};

	state
		.registry
		.register(state.platform.as_ref(), name, channel_id)
		.await?;

	Ok(Some(format!(
		"Canal registrado: **{}** con ID `{}`.",
		name,
		channel_id.get()
	)))
}
