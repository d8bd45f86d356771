// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::BotState;
use crate::discord::utils::timestamp::datetime_from_id;
use crate::error::{GENERIC_FAILURE_MESSAGE, PlatformError};
use crate::platform::{ChannelInfo, InteractionRef};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use twilight_model::application::interaction::Interaction;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, UserMarker};
use twilight_model::user::User;

pub mod suggestion;
pub mod ticket;

/// Every button and form the bot reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InteractionKind {
	OpenTicket,
	CloseTicket,
	RequestSuggestion,
	SubmitSuggestion,
}

/// Custom IDs of buttons and forms, and what they mean.
pub const INTERACTION_KINDS: &[(&str, InteractionKind)] = &[
	("create_ticket", InteractionKind::OpenTicket),
	("close_ticket", InteractionKind::CloseTicket),
	("send_suggestion", InteractionKind::RequestSuggestion),
	("suggestion_form", InteractionKind::SubmitSuggestion),
];

impl InteractionKind {
	pub fn from_custom_id(custom_id: &str) -> Option<Self> {
		INTERACTION_KINDS
			.iter()
			.find(|(id, _)| *id == custom_id)
			.map(|(_, kind)| *kind)
	}

	pub fn custom_id(&self) -> &'static str {
		INTERACTION_KINDS
			.iter()
			.find(|(_, kind)| kind == self)
			.map(|(id, _)| *id)
			.unwrap_or_default()
	}

	/// Whether this kind arrives as a form submission rather than a button press.
	pub fn is_modal(&self) -> bool {
		matches!(self, Self::SubmitSuggestion)
	}
}

#[derive(Clone, Debug)]
pub struct InteractionUser {
	pub id: Id<UserMarker>,
	pub name: String,
	/// How the user is named in posts, including the discriminator for accounts that still have one.
	pub tag: String,
}

impl From<&User> for InteractionUser {
	fn from(user: &User) -> Self {
		let tag = if user.discriminator == 0 {
			user.name.clone()
		} else {
			format!("{}#{:04}", user.name, user.discriminator)
		};
		Self {
			id: user.id,
			name: user.name.clone(),
			tag,
		}
	}
}

/// The parts of an interaction the workflows need.
#[derive(Clone, Debug)]
pub struct InteractionInvocation {
	pub interaction: InteractionRef,
	pub guild_id: Option<Id<GuildMarker>>,
	pub channel: Option<ChannelInfo>,
	pub user: InteractionUser,
	pub created_at: DateTime<Utc>,
}

impl InteractionInvocation {
	/// Returns `None` for interactions without a user.
	pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
		let user = InteractionUser::from(interaction.author()?);
		let channel = interaction.channel.as_ref().map(|channel| ChannelInfo {
			id: channel.id,
			name: channel.name.clone().unwrap_or_default(),
			guild_id: channel.guild_id.or(interaction.guild_id),
		});
		Some(Self {
			interaction: InteractionRef {
				id: interaction.id,
				token: interaction.token.clone(),
			},
			guild_id: interaction.guild_id,
			channel,
			user,
			created_at: datetime_from_id(interaction.id).unwrap_or_else(Utc::now),
		})
	}
}

/// Collects the submitted form fields by custom ID.
pub fn modal_values(modal_data: &ModalInteractionData) -> HashMap<String, String> {
	let mut values = HashMap::new();
	for row in modal_data.components.iter() {
		for component in row.components.iter() {
			if let Some(value) = &component.value {
				values.insert(component.custom_id.clone(), value.clone());
			}
		}
	}
	values
}

/// Handles a button press.
pub async fn route_interaction(
	state: &BotState,
	invocation: &InteractionInvocation,
	custom_id: &str,
) -> Result<(), PlatformError> {
	let kind = InteractionKind::from_custom_id(custom_id).filter(|kind| !kind.is_modal());
	let result = match kind {
		Some(InteractionKind::OpenTicket) => ticket::open_ticket(state, invocation).await,
		Some(InteractionKind::CloseTicket) => ticket::close_ticket(state, invocation).await,
		Some(InteractionKind::RequestSuggestion) => suggestion::open_form(state, invocation).await,
		Some(InteractionKind::SubmitSuggestion) | None => {
			tracing::debug!(custom_id, "Ignoring unhandled component interaction");
			return Ok(());
		}
	};
	report_failure(state, invocation, result).await
}

/// Handles a form submission.
pub async fn route_modal_submit(
	state: &BotState,
	invocation: &InteractionInvocation,
	custom_id: &str,
	values: &HashMap<String, String>,
) -> Result<(), PlatformError> {
	let result = match InteractionKind::from_custom_id(custom_id) {
		Some(InteractionKind::SubmitSuggestion) => suggestion::submit(state, invocation, values).await,
		_ => {
			tracing::debug!(custom_id, "Ignoring unhandled modal submission");
			return Ok(());
		}
	};
	report_failure(state, invocation, result).await
}

/// Tells the user something went wrong before passing the error on to be logged. The interaction may already have
/// been answered, in which case the notice is dropped.
async fn report_failure(
	state: &BotState,
	invocation: &InteractionInvocation,
	result: Result<(), PlatformError>,
) -> Result<(), PlatformError> {
	if result.is_err() {
		if let Err(error) = state
			.platform
			.reply(&invocation.interaction, GENERIC_FAILURE_MESSAGE, true)
			.await
		{
			tracing::debug!(source = ?error, "Couldn't send the failure notice");
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn custom_ids_round_trip_through_the_table() {
		for (custom_id, kind) in INTERACTION_KINDS {
			assert_eq!(InteractionKind::from_custom_id(custom_id), Some(*kind));
			assert_eq!(kind.custom_id(), *custom_id);
		}
		assert_eq!(InteractionKind::from_custom_id("setup"), None);
	}

	#[test]
	fn only_the_suggestion_form_is_a_modal() {
		let modals: Vec<InteractionKind> = INTERACTION_KINDS
			.iter()
			.map(|(_, kind)| *kind)
			.filter(InteractionKind::is_modal)
			.collect();
		assert_eq!(modals, [InteractionKind::SubmitSuggestion]);
	}
}
