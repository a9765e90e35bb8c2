/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::util::number_format::NumberFormat;
use crate::view::messages::Messages;
use crate::view::view_model::ViewSettings;
use anyhow::{anyhow, bail, Error};
use log::LevelFilter;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub format: Option<Format>,
	pub messages: Option<MessageTexts>,
	pub defaults: Option<Defaults>,
	pub logging: Option<Logging>,
}

/// Number convention for amounts and results. Each value is a single
/// character.
#[derive(Debug, Default, Deserialize)]
pub struct Format {
	pub decimal_separator: Option<String>,
	pub group_separator: Option<String>,
	pub alternate_separator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageTexts {
	pub invalid_amount: Option<String>,
	pub unsupported_currency: Option<String>,
	pub out_of_range: Option<String>,
	pub placeholder: Option<String>,
}

/// Currency pair selected when the form opens.
#[derive(Debug, Default, Deserialize)]
pub struct Defaults {
	pub from: Option<String>,
	pub to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Logging {
	/// One of off, error, warn, info, debug, trace
	pub level: Option<String>,
}

impl Config {
	/// Overlays whatever the file specifies on the built-in settings.
	pub fn view_settings(&self) -> Result<ViewSettings, Error> {
		let mut settings = ViewSettings::default();

		if let Some(format) = &self.format {
			let base = settings.format;
			settings.format = NumberFormat::new(
				single_char(&format.decimal_separator, "decimal_separator")?
					.unwrap_or(base.decimal_separator),
				single_char(&format.group_separator, "group_separator")?
					.unwrap_or(base.group_separator),
				single_char(&format.alternate_separator, "alternate_separator")?
					.unwrap_or(base.alternate_separator),
			)?;
		}

		if let Some(texts) = &self.messages {
			let base = Messages::default();
			settings.messages = Messages {
				invalid_amount: texts
					.invalid_amount
					.clone()
					.unwrap_or(base.invalid_amount),
				unsupported_currency: texts
					.unsupported_currency
					.clone()
					.unwrap_or(base.unsupported_currency),
				out_of_range: texts.out_of_range.clone().unwrap_or(base.out_of_range),
				placeholder: texts.placeholder.clone().unwrap_or(base.placeholder),
			};
		}

		if let Some(defaults) = &self.defaults {
			if let Some(from) = &defaults.from {
				settings.default_from = from.clone();
			}
			if let Some(to) = &defaults.to {
				settings.default_to = to.clone();
			}
		}

		Ok(settings)
	}

	pub fn log_level(&self) -> Result<LevelFilter, Error> {
		match self.logging.as_ref().and_then(|l| l.level.as_ref()) {
			None => Ok(LevelFilter::Warn),
			Some(level) => LevelFilter::from_str(level)
				.map_err(|_| anyhow!("invalid log level: {}", level)),
		}
	}
}

fn single_char(value: &Option<String>, key: &str) -> Result<Option<char>, Error> {
	let Some(value) = value else {
		return Ok(None);
	};

	let mut chars = value.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Ok(Some(c)),
		_ => bail!("format.{} must be a single character, got '{}'", key, value),
	}
}
