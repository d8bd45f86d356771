// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::args::ParsedArgs;
use crate::discord::state::BotState;
use crate::discord::utils::messages::announcement_message;
use crate::error::CommandError;

pub async fn handle_command(state: &BotState, args: ParsedArgs) -> Result<Option<String>, CommandError> {
	let name = args.positional(0);
	let message = args.text();

	let Some(channel_id) = state.registry.get(name).await else {
		return Err(CommandError::NotFound(format!(
			"No hay ningún canal registrado con el nombre **{}**.",
			name
		)));
	};
	let Some(channel) = state.platform.channel(channel_id).await? else {
		return Err(CommandError::NotFound(String::from("No se pudo encontrar el canal.")));
	};

	let announcement = announcement_message(&state.config.branding, message)?;
	state.platform.send_message(channel.id, &announcement).await?;

	Ok(Some(format!("Mensaje enviado al canal **{}**.", name)))
}
