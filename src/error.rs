// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::poll::PollError;
use crate::registry::RegistryError;
use miette::Diagnostic;
use std::fmt;
use twilight_http::error::{Error, ErrorType};
use twilight_http::response::DeserializeBodyError;
use twilight_validate::embed::EmbedValidationError;

/// Error data for calls made against the platform
#[derive(Debug, Diagnostic)]
pub enum PlatformError {
	/// The platform reported that the requested resource doesn't exist (anymore).
	NotFound,
	Http(Error),
	Deserialize(DeserializeBodyError),
	Unexpected(String),
}

impl PlatformError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound)
	}
}

impl From<Error> for PlatformError {
	fn from(error: Error) -> Self {
		if let ErrorType::Response { status, .. } = error.kind() {
			if status.get() == 404 {
				return Self::NotFound;
			}
		}
		Self::Http(error)
	}
}

impl From<DeserializeBodyError> for PlatformError {
	fn from(error: DeserializeBodyError) -> Self {
		Self::Deserialize(error)
	}
}

impl std::error::Error for PlatformError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Http(error) => Some(error),
			Self::Deserialize(error) => Some(error),
			Self::NotFound | Self::Unexpected(_) => None,
		}
	}
}

impl fmt::Display for PlatformError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotFound => write!(f, "resource not found"),
			Self::Http(error) => write!(f, "HTTP error: {}", error),
			Self::Deserialize(error) => write!(f, "deserialization error: {}", error),
			Self::Unexpected(message) => write!(f, "unexpected platform response: {}", message),
		}
	}
}

/// Everything a command handler can fail with. The first four are answered directly; the rest are logged and
/// answered with a generic failure.
#[derive(Debug, Diagnostic)]
pub enum CommandError {
	/// The arguments didn't match the command's shape. Holds the usage line.
	Usage(String),
	Validation(String),
	NotFound(String),
	PermissionDenied,
	Platform(PlatformError),
	Registry(RegistryError),
}

pub const PERMISSION_DENIED_MESSAGE: &str = "No tienes permisos para usar este comando.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Ocurrió un error al procesar el comando.";
pub const TOO_LONG_MESSAGE: &str = "El mensaje es demasiado largo para publicarse.";

impl CommandError {
	/// The reply shown to the user who triggered the failure.
	pub fn user_message(&self) -> String {
		match self {
			Self::Usage(usage) => format!("Uso: `{}`", usage),
			Self::Validation(message) | Self::NotFound(message) => message.clone(),
			Self::PermissionDenied => String::from(PERMISSION_DENIED_MESSAGE),
			Self::Platform(_) => String::from(GENERIC_FAILURE_MESSAGE),
			Self::Registry(RegistryError::UnknownChannel(_)) => String::from(crate::registry::UNKNOWN_CHANNEL_MESSAGE),
			Self::Registry(_) => String::from(GENERIC_FAILURE_MESSAGE),
		}
	}

	/// Whether the failure is an operator concern rather than a user mistake.
	pub fn is_internal(&self) -> bool {
		match self {
			Self::Platform(_) => true,
			Self::Registry(error) => !matches!(error, RegistryError::UnknownChannel(_)),
			_ => false,
		}
	}
}

impl From<PlatformError> for CommandError {
	fn from(error: PlatformError) -> Self {
		Self::Platform(error)
	}
}

impl From<RegistryError> for CommandError {
	fn from(error: RegistryError) -> Self {
		Self::Registry(error)
	}
}

impl From<PollError> for CommandError {
	fn from(error: PollError) -> Self {
		Self::Validation(error.to_string())
	}
}

impl From<EmbedValidationError> for CommandError {
	fn from(_: EmbedValidationError) -> Self {
		Self::Validation(String::from(TOO_LONG_MESSAGE))
	}
}

impl std::error::Error for CommandError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Platform(error) => Some(error),
			Self::Registry(error) => Some(error),
			_ => None,
		}
	}
}

impl fmt::Display for CommandError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Usage(usage) => write!(f, "usage error: {}", usage),
			Self::Validation(message) => write!(f, "validation error: {}", message),
			Self::NotFound(message) => write!(f, "not found: {}", message),
			Self::PermissionDenied => write!(f, "permission denied"),
			Self::Platform(error) => write!(f, "platform error: {}", error),
			Self::Registry(error) => write!(f, "registry error: {}", error),
		}
	}
}
