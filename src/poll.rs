// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::PlatformError;
use crate::platform::{MessageData, Platform};
use miette::Diagnostic;
use std::fmt;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};
use twilight_validate::embed::EmbedValidationError;

pub const MIN_POLL_OPTIONS: usize = 2;
pub const MAX_POLL_OPTIONS: usize = 10;

/// Markers paired with poll options, in order. Also used as the reactions people vote with.
pub const POLL_MARKERS: [&str; MAX_POLL_OPTIONS] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"];

pub const POLL_TITLE: &str = "📊 Encuesta";
const POLL_COLOR: u32 = 0x2ecc71;
// Fields need a non-empty value, so options get a zero-width space.
const EMPTY_FIELD_VALUE: &str = "\u{200b}";

#[derive(Debug, Diagnostic, Eq, PartialEq)]
pub enum PollError {
	TooFewOptions(usize),
	TooManyOptions(usize),
}

impl std::error::Error for PollError {}

impl fmt::Display for PollError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TooFewOptions(_) => write!(f, "¡Debes proporcionar al menos dos opciones!"),
			Self::TooManyOptions(_) => write!(f, "¡No puedes proporcionar más de 10 opciones!"),
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollOption {
	pub marker: &'static str,
	pub label: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Poll {
	pub question: String,
	pub options: Vec<PollOption>,
}

pub fn build_poll(question: &str, options: Vec<String>) -> Result<Poll, PollError> {
	if options.len() < MIN_POLL_OPTIONS {
		return Err(PollError::TooFewOptions(options.len()));
	}
	if options.len() > MAX_POLL_OPTIONS {
		return Err(PollError::TooManyOptions(options.len()));
	}

	let options = POLL_MARKERS
		.into_iter()
		.zip(options)
		.map(|(marker, label)| PollOption { marker, label })
		.collect();
	Ok(Poll {
		question: question.to_string(),
		options,
	})
}

impl Poll {
	pub fn embed(&self) -> Result<Embed, EmbedValidationError> {
		let mut embed = EmbedBuilder::new()
			.title(POLL_TITLE)
			.description(&self.question)
			.color(POLL_COLOR);
		for option in self.options.iter() {
			let field_name = format!("{} {}", option.marker, option.label);
			embed = embed.field(EmbedFieldBuilder::new(field_name, EMPTY_FIELD_VALUE));
		}
		Ok(embed.validate()?.build())
	}
}

/// Posts the poll and adds one reaction per option in option order, so votes are counted by the platform.
pub async fn post_poll(
	platform: &dyn Platform,
	channel_id: Id<ChannelMarker>,
	poll: &Poll,
	embed: Embed,
) -> Result<Id<MessageMarker>, PlatformError> {
	let message_id = platform.send_message(channel_id, &MessageData::embed(embed)).await?;
	for option in poll.options.iter() {
		platform.add_reaction(channel_id, message_id, option.marker).await?;
	}
	Ok(message_id)
}
