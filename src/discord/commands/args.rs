// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting prefix-command arguments.
//!
//! Words are separated by whitespace; a quoted run (`"like this"`) counts as one word.

use miette::Diagnostic;
use std::fmt;

const QUOTE_PAIRS: [(char, char); 3] = [('"', '"'), ('“', '”'), ('«', '»')];

/// What follows a command's positional arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trailing {
	None,
	/// The rest of the line, as typed. Required.
	Text(&'static str),
	/// Any number of further words.
	Variadic(&'static str),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArgShape {
	pub positional: &'static [&'static str],
	pub trailing: Trailing,
}

impl ArgShape {
	pub const NONE: Self = Self {
		positional: &[],
		trailing: Trailing::None,
	};

	/// Renders the usage line, e.g. `!enviar <nombre> <mensaje...>`.
	pub fn usage(&self, prefix: &str, command_name: &str) -> String {
		let mut usage = format!("{}{}", prefix, command_name);
		for name in self.positional {
			usage = format!("{} <{}>", usage, name);
		}
		match self.trailing {
			Trailing::None => usage,
			Trailing::Text(name) => format!("{} <{}...>", usage, name),
			Trailing::Variadic(name) => format!("{} [{}...]", usage, name),
		}
	}
}

#[derive(Debug, Default, Eq, PartialEq)]
pub struct ParsedArgs {
	pub positional: Vec<String>,
	pub trailing: Vec<String>,
}

impl ParsedArgs {
	pub fn positional(&self, index: usize) -> &str {
		self.positional.get(index).map(String::as_str).unwrap_or_default()
	}

	/// The free-text trailing field of a [Trailing::Text] shape.
	pub fn text(&self) -> &str {
		self.trailing.first().map(String::as_str).unwrap_or_default()
	}
}

#[derive(Debug, Diagnostic, Eq, PartialEq)]
pub enum ArgError {
	Missing(&'static str),
	Unexpected(String),
	UnterminatedQuote,
}

impl std::error::Error for ArgError {}

impl fmt::Display for ArgError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Missing(name) => write!(f, "missing argument {}", name),
			Self::Unexpected(word) => write!(f, "unexpected argument {}", word),
			Self::UnterminatedQuote => write!(f, "unterminated quote"),
		}
	}
}

/// Splits a command name from its arguments. Returns `None` if the message isn't a command.
pub fn parse_invocation<'a>(prefix: &str, content: &'a str) -> Option<(&'a str, &'a str)> {
	let invocation = content.strip_prefix(prefix)?;
	let (name, raw_args) = match invocation.split_once(char::is_whitespace) {
		Some((name, raw_args)) => (name, raw_args),
		None => (invocation, ""),
	};
	if name.is_empty() {
		return None;
	}
	Some((name, raw_args))
}

pub fn parse_args(shape: &ArgShape, raw_args: &str) -> Result<ParsedArgs, ArgError> {
	let mut rest = raw_args.trim_start();
	let mut parsed = ParsedArgs::default();

	for name in shape.positional {
		let Some((word, remaining)) = next_word(rest)? else {
			return Err(ArgError::Missing(*name));
		};
		parsed.positional.push(word);
		rest = remaining.trim_start();
	}

	match shape.trailing {
		Trailing::None => {
			if let Some((word, _)) = next_word(rest)? {
				return Err(ArgError::Unexpected(word));
			}
		}
		Trailing::Text(name) => {
			let text = rest.trim();
			if text.is_empty() {
				return Err(ArgError::Missing(name));
			}
			parsed.trailing.push(text.to_string());
		}
		Trailing::Variadic(_) => {
			while let Some((word, remaining)) = next_word(rest)? {
				parsed.trailing.push(word);
				rest = remaining.trim_start();
			}
		}
	}

	Ok(parsed)
}

/// Reads one word off the front of `input`, which must not start with whitespace.
fn next_word(input: &str) -> Result<Option<(String, &str)>, ArgError> {
	let mut chars = input.chars();
	let Some(first) = chars.next() else {
		return Ok(None);
	};

	if let Some((_, close)) = QUOTE_PAIRS.iter().find(|(open, _)| *open == first) {
		let quoted = &input[first.len_utf8()..];
		let Some(end) = quoted.find(*close) else {
			return Err(ArgError::UnterminatedQuote);
		};
		let word = quoted[..end].to_string();
		return Ok(Some((word, &quoted[end + close.len_utf8()..])));
	}

	let end = input.find(char::is_whitespace).unwrap_or(input.len());
	Ok(Some((input[..end].to_string(), &input[end..])))
}
