// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker};
use vanilla_bot::config::ConfigData;
use vanilla_bot::discord::interactions::{InteractionInvocation, InteractionUser};
use vanilla_bot::discord::state::BotState;
use vanilla_bot::error::PlatformError;
use vanilla_bot::platform::{ChannelInfo, ChannelOverwrite, InteractionRef, MessageData, ModalForm, Platform};
use vanilla_bot::registry::ChannelRegistry;

pub const GUILD: u64 = 100;
pub const SUPPORT_ROLE: u64 = 200;
pub const SUGGESTION_CHANNEL: u64 = 300;
pub const TICKET_CATEGORY: u64 = 400;
pub const LOG_CHANNEL: u64 = 410;
pub const USER: u64 = 42;

#[derive(Clone, Debug)]
pub struct CreatedChannel {
	pub channel: ChannelInfo,
	pub category: Option<Id<ChannelMarker>>,
	pub overwrites: Vec<ChannelOverwrite>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
	pub content: String,
	pub ephemeral: bool,
}

#[derive(Debug, Default)]
pub struct FakeState {
	pub channels: HashMap<Id<ChannelMarker>, ChannelInfo>,
	pub categories: HashMap<String, Id<ChannelMarker>>,
	pub text_channels: HashMap<String, Id<ChannelMarker>>,
	pub roles: HashSet<Id<RoleMarker>>,
	pub created: Vec<CreatedChannel>,
	pub sent: Vec<(Id<ChannelMarker>, MessageData)>,
	pub reactions: Vec<(Id<ChannelMarker>, Id<MessageMarker>, String)>,
	pub deleted: Vec<Id<ChannelMarker>>,
	pub replies: Vec<Reply>,
	pub modals: Vec<ModalForm>,
	pub fail_sends: bool,
	pub fail_lookups: bool,
	next_id: u64,
}

/// An in-memory [Platform] recording everything the bot does.
#[derive(Debug, Default)]
pub struct FakePlatform {
	state: Mutex<FakeState>,
}

impl FakePlatform {
	pub fn new() -> Self {
		let platform = Self::default();
		{
			let mut state = platform.state();
			state.next_id = 10_000;
		}
		platform
	}

	pub fn state(&self) -> MutexGuard<'_, FakeState> {
		self.state.lock().unwrap()
	}

	pub fn add_channel(&self, channel_id: u64, name: &str) {
		let channel = ChannelInfo {
			id: Id::new(channel_id),
			name: String::from(name),
			guild_id: Some(Id::new(GUILD)),
		};
		self.state().channels.insert(channel.id, channel);
	}

	pub fn add_category(&self, channel_id: u64, name: &str) {
		self.state().categories.insert(String::from(name), Id::new(channel_id));
	}

	pub fn add_text_channel(&self, channel_id: u64, name: &str) {
		self.add_channel(channel_id, name);
		self.state().text_channels.insert(String::from(name), Id::new(channel_id));
	}

	pub fn add_role(&self, role_id: u64) {
		self.state().roles.insert(Id::new(role_id));
	}

	pub fn sent_to(&self, channel_id: u64) -> Vec<MessageData> {
		self.state()
			.sent
			.iter()
			.filter(|(channel, _)| channel.get() == channel_id)
			.map(|(_, message)| message.clone())
			.collect()
	}

	pub fn replies(&self) -> Vec<Reply> {
		self.state().replies.clone()
	}

	fn next_id(&self) -> u64 {
		let mut state = self.state();
		state.next_id += 1;
		state.next_id
	}
}

fn lookup_failure() -> PlatformError {
	PlatformError::Unexpected(String::from("lookup failed"))
}

#[async_trait]
impl Platform for FakePlatform {
	async fn channel(&self, channel_id: Id<ChannelMarker>) -> Result<Option<ChannelInfo>, PlatformError> {
		let state = self.state();
		if state.fail_lookups {
			return Err(lookup_failure());
		}
		Ok(state.channels.get(&channel_id).cloned())
	}

	async fn find_category(
		&self,
		_guild_id: Id<GuildMarker>,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError> {
		let state = self.state();
		if state.fail_lookups {
			return Err(lookup_failure());
		}
		Ok(state.categories.get(name).copied())
	}

	async fn find_text_channel(
		&self,
		_guild_id: Id<GuildMarker>,
		name: &str,
	) -> Result<Option<Id<ChannelMarker>>, PlatformError> {
		let state = self.state();
		if state.fail_lookups {
			return Err(lookup_failure());
		}
		Ok(state.text_channels.get(name).copied())
	}

	async fn role_exists(&self, _guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Result<bool, PlatformError> {
		let state = self.state();
		if state.fail_lookups {
			return Err(lookup_failure());
		}
		Ok(state.roles.contains(&role_id))
	}

	async fn create_text_channel(
		&self,
		guild_id: Id<GuildMarker>,
		name: &str,
		category: Option<Id<ChannelMarker>>,
		overwrites: &[ChannelOverwrite],
	) -> Result<ChannelInfo, PlatformError> {
		let channel = ChannelInfo {
			id: Id::new(self.next_id()),
			name: String::from(name),
			guild_id: Some(guild_id),
		};
		let mut state = self.state();
		state.channels.insert(channel.id, channel.clone());
		state.created.push(CreatedChannel {
			channel: channel.clone(),
			category,
			overwrites: overwrites.to_vec(),
		});
		Ok(channel)
	}

	async fn send_message(
		&self,
		channel_id: Id<ChannelMarker>,
		message: &MessageData,
	) -> Result<Id<MessageMarker>, PlatformError> {
		if self.state().fail_sends {
			return Err(PlatformError::Unexpected(String::from("send failed")));
		}
		let message_id = Id::new(self.next_id());
		self.state().sent.push((channel_id, message.clone()));
		Ok(message_id)
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError> {
		// Lets a concurrent close run while this one is mid-request, as it would against the real API.
		tokio::task::yield_now().await;
		let mut state = self.state();
		if state.channels.remove(&channel_id).is_none() {
			return Err(PlatformError::NotFound);
		}
		state.deleted.push(channel_id);
		Ok(())
	}

	async fn add_reaction(
		&self,
		channel_id: Id<ChannelMarker>,
		message_id: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), PlatformError> {
		self.state()
			.reactions
			.push((channel_id, message_id, String::from(emoji)));
		Ok(())
	}

	async fn reply(&self, _interaction: &InteractionRef, content: &str, ephemeral: bool) -> Result<(), PlatformError> {
		self.state().replies.push(Reply {
			content: String::from(content),
			ephemeral,
		});
		Ok(())
	}

	async fn open_modal(&self, _interaction: &InteractionRef, modal: &ModalForm) -> Result<(), PlatformError> {
		self.state().modals.push(modal.clone());
		Ok(())
	}
}

/// Bot state over the fake platform, with the registry file kept in `dir`.
pub async fn bot_state(platform: &Arc<FakePlatform>, dir: &TempDir) -> BotState {
	let mut config = ConfigData::with_token("test-token");
	config.channels_file = dir.path().join("channels.json");
	config.suggestion_channel = Id::new(SUGGESTION_CHANNEL);
	config.tickets.support_role = Id::new(SUPPORT_ROLE);
	let registry = ChannelRegistry::open(config.channels_file.clone()).await.unwrap();
	let platform: Arc<dyn Platform> = Arc::clone(platform) as Arc<dyn Platform>;
	BotState::new(platform, registry, Arc::new(config))
}

pub fn invocation_in(channel: Option<ChannelInfo>) -> InteractionInvocation {
	let user_id: Id<UserMarker> = Id::new(USER);
	InteractionInvocation {
		interaction: InteractionRef {
			id: Id::new(1),
			token: String::from("token"),
		},
		guild_id: Some(Id::new(GUILD)),
		channel,
		user: InteractionUser {
			id: user_id,
			name: String::from("ana"),
			tag: String::from("ana"),
		},
		created_at: chrono::Utc::now(),
	}
}
