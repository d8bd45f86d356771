// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The calls the bot makes against the chat platform.
//!
//! Handlers only ever talk to a [Platform]; the Discord implementation lives in
//! [crate::discord::client] and tests substitute an in-memory one.

use crate::error::PlatformError;
use async_trait::async_trait;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, InteractionMarker, MessageMarker, RoleMarker, UserMarker};
use twilight_model::id::Id;

/// The parts of a channel the handlers care about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelInfo {
	pub id: Id<ChannelMarker>,
	pub name: String,
	pub guild_id: Option<Id<GuildMarker>>,
}

/// Contains data necessary to post a message
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageData {
	pub content: Option<String>,
	pub embeds: Vec<Embed>,
	pub components: Vec<Component>,
	pub allowed_mentions: AllowedMentions,
}

impl MessageData {
	pub fn text(content: impl Into<String>) -> Self {
		Self {
			content: Some(content.into()),
			..Self::default()
		}
	}

	pub fn embed(embed: Embed) -> Self {
		Self {
			embeds: vec![embed],
			..Self::default()
		}
	}

	pub fn with_components(mut self, components: Vec<Component>) -> Self {
		self.components = components;
		self
	}

	pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
		self.allowed_mentions = allowed_mentions;
		self
	}
}

/// The state one permission takes in a channel overwrite.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PermissionState {
	Allow,
	Deny,
	#[default]
	Inherit,
}

/// The permissions a ticket channel overwrite can touch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PermissionGrant {
	pub view: PermissionState,
	pub send: PermissionState,
	pub attach: PermissionState,
}

impl PermissionGrant {
	pub fn hidden() -> Self {
		Self {
			view: PermissionState::Deny,
			..Self::default()
		}
	}

	pub fn can_view(&self) -> bool {
		self.view == PermissionState::Allow
	}
}

/// Who a channel overwrite applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Principal {
	Role(Id<RoleMarker>),
	Member(Id<UserMarker>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChannelOverwrite {
	pub principal: Principal,
	pub grant: PermissionGrant,
}

/// Identifies an interaction so it can be responded to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InteractionRef {
	pub id: Id<InteractionMarker>,
	pub token: String,
}

/// A text-entry form shown in response to an interaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModalForm {
	pub custom_id: String,
	pub title: String,
	pub input_custom_id: String,
	pub input_label: String,
}

#[async_trait]
pub trait Platform: Send + Sync {
	/// Resolves a channel by ID. Returns `None` when the channel doesn't exist or isn't visible to the bot.
	async fn channel(&self, channel_id: Id<ChannelMarker>) -> Result<Option<ChannelInfo>, PlatformError>;

	async fn find_category(&self, guild_id: Id<GuildMarker>, name: &str)
	-> Result<Option<Id<ChannelMarker>>, PlatformError>;

	async fn find_text_channel(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError>;

	async fn role_exists(&self, guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Result<bool, PlatformError>;

	async fn create_text_channel(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
		category: Option<Id<ChannelMarker>>,
		overwrites: &[ChannelOverwrite],
	) -> Result<ChannelInfo, PlatformError>;

	async fn send_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message: &MessageData,
	) -> Result<Id<MessageMarker>, PlatformError>;

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError>;

	async fn add_reaction(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), PlatformError>;

	/// Responds to an interaction with a text message, optionally visible only to the invoking user.
	async fn reply(&self, interaction: &InteractionRef, content: &str, ephemeral: bool) -> Result<(), PlatformError>;

	async fn open_modal(&self, interaction: &InteractionRef, modal: &ModalForm) -> Result<(), PlatformError>;
}
