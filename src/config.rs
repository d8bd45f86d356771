// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlValue};
use miette::{IntoDiagnostic, NamedSource, bail};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, RoleMarker};

pub const DEFAULT_CONFIG_PATH: &str = "config.kdl";
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_CHANNELS_FILE: &str = "channels.json";
const DEFAULT_SUPPORT_ROLE: u64 = 1325439150668906549;
const DEFAULT_SUGGESTION_CHANNEL: u64 = 1334340031879446540;
const DEFAULT_TICKET_CATEGORY: &str = "Tickets";
const DEFAULT_LOG_CHANNEL: &str = "ticket-logs";
const DEFAULT_BRAND_TITLE: &str = "[LATAMRUST] VANILLA #1";
const DEFAULT_BRAND_FOOTER: &str = "👉 Recuerda siempre respetar las reglas para disfrutar del servidor.";
const DEFAULT_BRAND_ICON: &str =
	"https://cdn.discordapp.com/attachments/1328162644267499561/1333520754267918459/image.png";

#[derive(Clone, Debug)]
pub struct ConfigData {
	pub discord_token: String,
	pub command_prefix: String,
	pub channels_file: PathBuf,
	pub suggestion_channel: Id<ChannelMarker>,
	pub tickets: TicketConfig,
	pub branding: BrandingConfig,
}

#[derive(Clone, Debug)]
pub struct TicketConfig {
	/// The role that gets access to every ticket channel.
	pub support_role: Id<RoleMarker>,
	/// Name of the category ticket channels are created under, if the server has it.
	pub category_name: String,
	/// Name of the text channel closed tickets are logged to, if the server has it.
	pub log_channel_name: String,
}

/// What announcements and bot-posted embeds look like.
#[derive(Clone, Debug)]
pub struct BrandingConfig {
	pub title: String,
	pub footer: String,
	pub icon_url: String,
}

impl Default for TicketConfig {
	fn default() -> Self {
		Self {
			support_role: Id::new(DEFAULT_SUPPORT_ROLE),
			category_name: String::from(DEFAULT_TICKET_CATEGORY),
			log_channel_name: String::from(DEFAULT_LOG_CHANNEL),
		}
	}
}

impl Default for BrandingConfig {
	fn default() -> Self {
		Self {
			title: String::from(DEFAULT_BRAND_TITLE),
			footer: String::from(DEFAULT_BRAND_FOOTER),
			icon_url: String::from(DEFAULT_BRAND_ICON),
		}
	}
}

impl ConfigData {
	/// Configuration with every setting at its built-in value.
	pub fn with_token(discord_token: impl Into<String>) -> Self {
		Self {
			discord_token: discord_token.into(),
			command_prefix: String::from(DEFAULT_COMMAND_PREFIX),
			channels_file: PathBuf::from(DEFAULT_CHANNELS_FILE),
			suggestion_channel: Id::new(DEFAULT_SUGGESTION_CHANNEL),
			tickets: TicketConfig::default(),
			branding: BrandingConfig::default(),
		}
	}
}

/// Reads the configuration file (which may be absent) and the token from the environment.
pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	let config_file_contents = match read_to_string(config_path).await {
		Ok(contents) => contents,
		Err(error) if error.kind() == ErrorKind::NotFound => {
			tracing::info!(path = config_path, "No configuration file found; using built-in settings");
			String::new()
		}
		Err(error) => return Err(error).into_diagnostic(),
	};
	let env_token = std::env::var(TOKEN_ENV_VAR).ok().filter(|token| !token.is_empty());
	parse_config_document(config_path, &config_file_contents, env_token)
}

/// Builds the configuration from KDL source. A token from the environment takes precedence over the file.
pub fn parse_config_document(
	config_path: &str,
	config_file_contents: &str,
	env_token: Option<String>,
) -> miette::Result<ConfigData> {
	let document: KdlDocument = match config_file_contents.parse() {
		Ok(document) => document,
		Err(error) => {
			let report = miette::Report::new(error)
				.with_source_code(NamedSource::new(config_path, config_file_contents.to_string()));
			return Err(report);
		}
	};

	let file_token = string_setting(&document, "discord-token")?;
	let Some(discord_token) = env_token.or(file_token) else {
		bail!(
			"No Discord token configured; set {} or add a discord-token node to {}",
			TOKEN_ENV_VAR,
			config_path
		);
	};

	let mut config = ConfigData::with_token(discord_token);
	if let Some(prefix) = string_setting(&document, "command-prefix")? {
		if prefix.trim().is_empty() {
			bail!("command-prefix can't be empty");
		}
		config.command_prefix = prefix;
	}
	if let Some(channels_file) = string_setting(&document, "channels-file")? {
		config.channels_file = PathBuf::from(channels_file);
	}
	if let Some(channel) = id_setting(&document, "suggestion-channel")? {
		config.suggestion_channel = channel;
	}
	if let Some(role) = id_setting(&document, "support-role")? {
		config.tickets.support_role = role;
	}
	if let Some(category_name) = string_setting(&document, "ticket-category")? {
		config.tickets.category_name = category_name;
	}
	if let Some(log_channel_name) = string_setting(&document, "log-channel")? {
		config.tickets.log_channel_name = log_channel_name;
	}
	if let Some(title) = string_setting(&document, "brand-title")? {
		config.branding.title = title;
	}
	if let Some(footer) = string_setting(&document, "brand-footer")? {
		config.branding.footer = footer;
	}
	if let Some(icon_url) = string_setting(&document, "brand-icon")? {
		config.branding.icon_url = icon_url;
	}

	Ok(config)
}

fn string_setting(document: &KdlDocument, name: &str) -> miette::Result<Option<String>> {
	match document.get_arg(name) {
		Some(KdlValue::String(value)) => Ok(Some(value.clone())),
		Some(other) => bail!("{} must be a string (got {})", name, other),
		None => Ok(None),
	}
}

fn id_setting<T>(document: &KdlDocument, name: &str) -> miette::Result<Option<Id<T>>> {
	let raw_id = match document.get_arg(name) {
		Some(KdlValue::Integer(value)) => u64::try_from(*value).ok(),
		// Snowflakes are often copied around as strings.
		Some(KdlValue::String(value)) => value.parse().ok(),
		Some(other) => bail!("{} must be an ID (got {})", name, other),
		None => return Ok(None),
	};
	match raw_id.and_then(Id::new_checked) {
		Some(id) => Ok(Some(id)),
		None => bail!("{} is not a valid ID", name),
	}
}
