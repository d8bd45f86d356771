// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named channels that announcements can be posted to.
//!
//! The mapping is kept in memory and mirrored to a JSON file that is rewritten in full on every registration.

use crate::error::PlatformError;
use crate::platform::Platform;
use miette::Diagnostic;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

pub type ChannelMapping = BTreeMap<String, u64>;

pub const UNKNOWN_CHANNEL_MESSAGE: &str = "El canal no existe o el ID no es válido.";

#[derive(Debug, Diagnostic)]
pub enum RegistryError {
	Io { path: PathBuf, source: std::io::Error },
	Parse { path: PathBuf, source: serde_json::Error },
	Serialize(serde_json::Error),
	/// The channel to register doesn't exist on the platform.
	UnknownChannel(u64),
	Platform(PlatformError),
}

impl std::error::Error for RegistryError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			Self::Parse { source, .. } => Some(source),
			Self::Serialize(error) => Some(error),
			Self::Platform(error) => Some(error),
			Self::UnknownChannel(_) => None,
		}
	}
}

impl fmt::Display for RegistryError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io { path, source } => write!(f, "couldn't access {}: {}", path.display(), source),
			Self::Parse { path, source } => write!(f, "couldn't parse {}: {}", path.display(), source),
			Self::Serialize(error) => write!(f, "couldn't serialize channel registry: {}", error),
			Self::UnknownChannel(channel_id) => write!(f, "channel {} does not exist", channel_id),
			Self::Platform(error) => write!(f, "couldn't look up channel: {}", error),
		}
	}
}

/// Reads the mapping from disk. A missing file is an empty mapping; a malformed one is an error.
pub async fn load(path: &Path) -> Result<ChannelMapping, RegistryError> {
	let contents = match fs::read_to_string(path).await {
		Ok(contents) => contents,
		Err(error) if error.kind() == ErrorKind::NotFound => return Ok(ChannelMapping::new()),
		Err(source) => {
			return Err(RegistryError::Io {
				path: path.to_path_buf(),
				source,
			});
		}
	};
	serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
		path: path.to_path_buf(),
		source,
	})
}

/// Writes the full mapping to disk through a temporary sibling file so an interrupted write leaves the previous
/// contents in place.
pub async fn save(path: &Path, channels: &ChannelMapping) -> Result<(), RegistryError> {
	let mut contents = Vec::new();
	let mut serializer = serde_json::Serializer::with_formatter(&mut contents, PrettyFormatter::with_indent(b"    "));
	channels.serialize(&mut serializer).map_err(RegistryError::Serialize)?;

	let temp_path = temp_path_for(path);
	fs::write(&temp_path, &contents).await.map_err(|source| RegistryError::Io {
		path: temp_path.clone(),
		source,
	})?;
	fs::rename(&temp_path, path).await.map_err(|source| RegistryError::Io {
		path: path.to_path_buf(),
		source,
	})
}

fn temp_path_for(path: &Path) -> PathBuf {
	let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
	file_name.push(".tmp");
	path.with_file_name(file_name)
}

/// The channel registry used by the bot. Writes are serialized; lookups see the last successfully saved state.
#[derive(Debug)]
pub struct ChannelRegistry {
	path: PathBuf,
	channels: Mutex<ChannelMapping>,
}

impl ChannelRegistry {
	pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
		let path = path.into();
		let channels = load(&path).await?;
		tracing::info!(path = %path.display(), count = channels.len(), "Loaded channel registry");
		Ok(Self {
			path,
			channels: Mutex::new(channels),
		})
	}

	pub async fn get(&self, name: &str) -> Option<Id<ChannelMarker>> {
		let channels = self.channels.lock().await;
		channels.get(name).copied().and_then(Id::new_checked)
	}

	pub async fn entries(&self) -> ChannelMapping {
		self.channels.lock().await.clone()
	}

	/// Registers `name` for the channel, overwriting any previous registration under that name.
	///
	/// The channel must exist on the platform; otherwise nothing changes and [RegistryError::UnknownChannel] is
	/// returned.
	pub async fn register(
		&self,
		platform: &dyn Platform,
		name: &str,
		channel_id: Id<ChannelMarker>,
	) -> Result<(), RegistryError> {
		let channel = platform.channel(channel_id).await.map_err(RegistryError::Platform)?;
		if channel.is_none() {
			return Err(RegistryError::UnknownChannel(channel_id.get()));
		}

		let mut channels = self.channels.lock().await;
		let mut updated = channels.clone();
		updated.insert(name.to_string(), channel_id.get());
		save(&self.path, &updated).await?;
		*channels = updated;
		tracing::info!(name, channel = channel_id.get(), "Registered channel");

		Ok(())
	}
}
