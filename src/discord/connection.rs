// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::client::DiscordPlatform;
use super::incoming_messages::handle_message;
use super::interactions::{InteractionInvocation, modal_values, route_interaction, route_modal_submit};
use super::state::BotState;
use crate::config::ConfigData;
use crate::registry::ChannelRegistry;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord_token.clone()))
}

pub async fn run_bot(config: Arc<ConfigData>, registry: ChannelRegistry, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

	let mut shard = Shard::new(ShardId::ONE, config.discord_token.clone(), intents);

	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(ResourceType::CHANNEL | ResourceType::GUILD | ResourceType::ROLE)
			.build(),
	);

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	let platform = DiscordPlatform::new(Arc::clone(&http_client), application_id, Arc::clone(&cache));
	let bot_state = Arc::new(BotState::new(Arc::new(platform), registry, config));

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		cache.update(&event);

		tokio::spawn(handle_event(event, Arc::clone(&http_client), Arc::clone(&bot_state)));
	}

	Ok(())
}

async fn handle_event(event: Event, http_client: Arc<Client>, bot_state: Arc<BotState>) {
	let event_result = handle_event_route(event, &http_client, &bot_state).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(event: Event, http_client: &Client, bot_state: &BotState) -> miette::Result<()> {
	tracing::debug!("Incoming gateway message: {:?}", event);
	match event {
		Event::MessageCreate(message) => handle_message(&message, http_client, bot_state).await?,
		Event::InteractionCreate(interaction) => {
			let Some(invocation) = InteractionInvocation::from_interaction(&interaction) else {
				return Ok(());
			};
			match &interaction.data {
				Some(InteractionData::MessageComponent(interaction_data)) => {
					route_interaction(bot_state, &invocation, &interaction_data.custom_id)
						.await
						.into_diagnostic()?;
				}
				Some(InteractionData::ModalSubmit(modal_data)) => {
					let values = modal_values(modal_data);
					route_modal_submit(bot_state, &invocation, &modal_data.custom_id, &values)
						.await
						.into_diagnostic()?;
				}
				_ => (),
			}
		}
		Event::Ready(ready) => {
			tracing::info!(user = %ready.user.name, guilds = ready.guilds.len(), "Discord gateway is ready");
		}
		_ => (),
	}
	Ok(())
}
