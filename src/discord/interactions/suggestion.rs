// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{InteractionInvocation, InteractionKind};
use crate::discord::state::BotState;
use crate::discord::utils::messages::suggestion_message;
use crate::error::{PlatformError, TOO_LONG_MESSAGE};
use crate::platform::ModalForm;
use std::collections::HashMap;

/// Custom ID of the text field in the suggestion form.
pub const SUGGESTION_FORM_INPUT: &str = "suggestion";

const EMPTY_SUGGESTION: &str = "❌ La sugerencia no puede estar vacía.";
const MISSING_CHANNEL: &str = "❌ No se encontró el canal de sugerencias.";
const SUGGESTION_SENT: &str = "✅ Sugerencia enviada con éxito!";

pub fn suggestion_form() -> ModalForm {
	ModalForm {
		custom_id: String::from(InteractionKind::SubmitSuggestion.custom_id()),
		title: String::from("Enviar una sugerencia"),
		input_custom_id: String::from(SUGGESTION_FORM_INPUT),
		input_label: String::from("Tu sugerencia"),
	}
}

pub async fn open_form(state: &BotState, invocation: &InteractionInvocation) -> Result<(), PlatformError> {
	state
		.platform
		.open_modal(&invocation.interaction, &suggestion_form())
		.await
}

pub async fn submit(
	state: &BotState,
	invocation: &InteractionInvocation,
	values: &HashMap<String, String>,
) -> Result<(), PlatformError> {
	let platform = state.platform.as_ref();

	let suggestion = values
		.get(SUGGESTION_FORM_INPUT)
		.map(|value| value.trim())
		.unwrap_or_default();
	if suggestion.is_empty() {
		platform.reply(&invocation.interaction, EMPTY_SUGGESTION, true).await?;
		return Ok(());
	}

	let Some(channel) = platform.channel(state.config.suggestion_channel).await? else {
		tracing::warn!(
			channel = state.config.suggestion_channel.get(),
			"Suggestion channel couldn't be resolved"
		);
		platform.reply(&invocation.interaction, MISSING_CHANNEL, true).await?;
		return Ok(());
	};

	let message = match suggestion_message(&state.config.branding, suggestion, &invocation.user.tag) {
		Ok(message) => message,
		Err(error) => {
			tracing::debug!(source = ?error, "Suggestion doesn't fit in an embed");
			platform.reply(&invocation.interaction, TOO_LONG_MESSAGE, true).await?;
			return Ok(());
		}
	};
	platform.send_message(channel.id, &message).await?;
	tracing::info!(user = invocation.user.id.get(), "Forwarded suggestion");

	platform.reply(&invocation.interaction, SUGGESTION_SENT, true).await
}
