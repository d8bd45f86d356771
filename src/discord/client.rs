// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::permissions::discord_overwrite;
use crate::error::PlatformError;
use crate::platform::{ChannelInfo, ChannelOverwrite, InteractionRef, MessageData, ModalForm, Platform};
use async_trait::async_trait;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_http::error::ErrorType;
use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::channel::message::component::{ActionRow, Component, TextInput, TextInputStyle};
use twilight_model::channel::permission_overwrite::PermissionOverwrite;
use twilight_model::channel::{Channel, ChannelType};
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker};
use twilight_util::builder::InteractionResponseDataBuilder;

/// [Platform] backed by the Discord HTTP API, consulting the gateway cache where it can.
pub struct DiscordPlatform {
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: Arc<DefaultInMemoryCache>,
}

impl DiscordPlatform {
	pub fn new(http_client: Arc<Client>, application_id: Id<ApplicationMarker>, cache: Arc<DefaultInMemoryCache>) -> Self {
		Self {
			http_client,
			application_id,
			cache,
		}
	}

	fn cached_channel(&self, channel_id: Id<ChannelMarker>) -> Option<ChannelInfo> {
		self.cache.channel(channel_id).map(|channel| channel_info(&channel))
	}

	fn cached_role_exists(&self, guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Option<bool> {
		self.cache.guild_roles(guild_id).map(|roles| roles.contains(&role_id))
	}

	async fn find_guild_channel(
		&self,
		guild_id: Id<GuildMarker>,
		kind: ChannelType,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError> {
		let channels = self.http_client.guild_channels(guild_id).await?.models().await?;
		Ok(channels
			.iter()
			.find(|channel| channel.kind == kind && channel.name.as_deref() == Some(name))
			.map(|channel| channel.id))
	}

	async fn respond(&self, interaction: &InteractionRef, response: &InteractionResponse) -> Result<(), PlatformError> {
		self.http_client
			.interaction(self.application_id)
			.create_response(interaction.id, &interaction.token, response)
			.await?;
		Ok(())
	}
}

fn channel_info(channel: &Channel) -> ChannelInfo {
	ChannelInfo {
		id: channel.id,
		name: channel.name.clone().unwrap_or_default(),
		guild_id: channel.guild_id,
	}
}

/// Whether the API refused to show the bot something, which it does for channels the bot can't see.
fn is_forbidden(error: &twilight_http::Error) -> bool {
	matches!(error.kind(), ErrorType::Response { status, .. } if status.get() == 403)
}

#[async_trait]
impl Platform for DiscordPlatform {
	async fn channel(&self, channel_id: Id<ChannelMarker>) -> Result<Option<ChannelInfo>, PlatformError> {
		if let Some(channel) = self.cached_channel(channel_id) {
			return Ok(Some(channel));
		}

		let response = match self.http_client.channel(channel_id).await {
			Ok(response) => response,
			Err(error) if is_forbidden(&error) => return Ok(None),
			Err(error) => match PlatformError::from(error) {
				PlatformError::NotFound => return Ok(None),
				error => return Err(error),
			},
		};
		let channel = response.model().await?;
		Ok(Some(channel_info(&channel)))
	}

	async fn find_category(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError> {
		self.find_guild_channel(guild_id, ChannelType::GuildCategory, name).await
	}

	async fn find_text_channel(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError> {
		self.find_guild_channel(guild_id, ChannelType::GuildText, name).await
	}

	async fn role_exists(&self, guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Result<bool, PlatformError> {
		if let Some(exists) = self.cached_role_exists(guild_id, role_id) {
			return Ok(exists);
		}
		let roles = self.http_client.roles(guild_id).await?.models().await?;
		Ok(roles.iter().any(|role| role.id == role_id))
	}

	async fn create_text_channel(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
		category: Option<Id<ChannelMarker>>,
		overwrites: &[ChannelOverwrite],
	) -> Result<ChannelInfo, PlatformError> {
		let overwrites: Vec<PermissionOverwrite> = overwrites.iter().map(discord_overwrite).collect();
		let mut create_channel = self
			.http_client
			.create_guild_channel(guild_id, name)
			.kind(ChannelType::GuildText)
			.permission_overwrites(&overwrites);
		if let Some(category_id) = category {
			create_channel = create_channel.parent_id(category_id);
		}
		let channel = create_channel.await?.model().await?;
		Ok(channel_info(&channel))
	}

	async fn send_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message: &MessageData,
	) -> Result<Id<MessageMarker>, PlatformError> {
		let mut create_message = self
			.http_client
			.create_message(channel_id)
			.embeds(&message.embeds)
			.components(&message.components)
			.allowed_mentions(Some(&message.allowed_mentions));
		if let Some(content) = &message.content {
			create_message = create_message.content(content);
		}
		let message = create_message.await?.model().await?;
		Ok(message.id)
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError> {
		self.http_client.delete_channel(channel_id).await?;
		Ok(())
	}

	async fn add_reaction(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), PlatformError> {
		let reaction = RequestReactionType::Unicode { name: emoji };
		self.http_client
			.create_reaction(channel_id, message_id, &reaction)
			.await?;
		Ok(())
	}

	async fn reply(&self, interaction: &InteractionRef, content: &str, ephemeral: bool) -> Result<(), PlatformError> {
		let mut response_data = InteractionResponseDataBuilder::new().content(content);
		if ephemeral {
			response_data = response_data.flags(MessageFlags::EPHEMERAL);
		}
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response_data.build()),
		};
		self.respond(interaction, &response).await
	}

	async fn open_modal(&self, interaction: &InteractionRef, modal: &ModalForm) -> Result<(), PlatformError> {
		let text_input = Component::TextInput(TextInput {
			custom_id: modal.input_custom_id.clone(),
			label: modal.input_label.clone(),
			max_length: None,
			min_length: Some(1),
			placeholder: None,
			required: Some(true),
			style: TextInputStyle::Paragraph,
			value: None,
		});
		let text_input_row = Component::ActionRow(ActionRow {
			components: vec![text_input],
		});
		let response_data = InteractionResponseDataBuilder::new()
			.custom_id(modal.custom_id.clone())
			.title(modal.title.clone())
			.components(vec![text_input_row])
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::Modal,
			data: Some(response_data),
		};
		self.respond(interaction, &response).await
	}
}
