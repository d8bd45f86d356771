// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

/// Ticket channels with a close in progress, and those already closed.
///
/// Events are handled concurrently, so two presses of a close button can race; only the first gets to close. Deleted
/// channel IDs are never reused, so closed channels are remembered for the life of the process.
#[derive(Debug, Default)]
pub struct ClosingTickets {
	channels: Mutex<ClosingChannels>,
}

#[derive(Debug, Default)]
struct ClosingChannels {
	in_progress: HashSet<Id<ChannelMarker>>,
	closed: HashSet<Id<ChannelMarker>>,
}

impl ClosingTickets {
	/// Marks the channel as closing. Returns `None` if it already is or has been closed; otherwise the mark lasts as
	/// long as the guard.
	pub fn begin(&self, channel_id: Id<ChannelMarker>) -> Option<ClosingGuard<'_>> {
		let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
		if channels.closed.contains(&channel_id) || !channels.in_progress.insert(channel_id) {
			return None;
		}
		Some(ClosingGuard {
			tickets: self,
			channel_id,
		})
	}
}

#[derive(Debug)]
pub struct ClosingGuard<'a> {
	tickets: &'a ClosingTickets,
	channel_id: Id<ChannelMarker>,
}

impl ClosingGuard<'_> {
	/// Records that the channel is gone, so later closes are refused outright.
	pub fn closed(self) {
		let mut channels = self.tickets.channels.lock().unwrap_or_else(PoisonError::into_inner);
		channels.closed.insert(self.channel_id);
	}
}

impl Drop for ClosingGuard<'_> {
	fn drop(&mut self) {
		let mut channels = self.tickets.channels.lock().unwrap_or_else(PoisonError::into_inner);
		channels.in_progress.remove(&self.channel_id);
	}
}
