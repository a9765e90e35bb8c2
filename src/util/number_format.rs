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
use anyhow::{bail, Error};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// The separator convention used both to read amounts typed by the user and
/// to render results. Passed in explicitly; nothing here consults the
/// process locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
	pub decimal_separator: char,
	pub group_separator: char,

	/// Accepted in place of the decimal separator when the text does not
	/// parse under the primary convention.
	pub alternate_separator: char,
}

impl Default for NumberFormat {
	/// Comma for decimals, period for thousands.
	fn default() -> Self {
		Self {
			decimal_separator: ',',
			group_separator: '.',
			alternate_separator: '.',
		}
	}
}

impl NumberFormat {
	pub fn new(
		decimal_separator: char,
		group_separator: char,
		alternate_separator: char,
	) -> Result<Self, Error> {
		for c in [decimal_separator, group_separator, alternate_separator] {
			if c.is_ascii_digit() || c == '-' {
				bail!("'{}' cannot be used as a number separator", c)
			}
		}
		if decimal_separator == group_separator {
			bail!("Decimal and group separators must differ")
		}
		if alternate_separator == decimal_separator {
			bail!("Alternate separator must differ from the decimal separator")
		}

		Ok(Self {
			decimal_separator,
			group_separator,
			alternate_separator,
		})
	}

	/// Parses a non-negative number written in this convention. Group
	/// separators are only accepted between groups of exactly three digits,
	/// so "10.50" is not read as a grouped integer.
	pub fn parse(&self, text: &str) -> Option<Decimal> {
		let mut parts = text.split(self.decimal_separator);
		let integer = parts.next().unwrap_or_default();
		let fraction = parts.next().unwrap_or_default();
		if parts.next().is_some() {
			return None;
		}

		let digits = self.ungroup(integer)?;
		if digits.is_empty() && fraction.is_empty() {
			return None;
		}
		if !fraction.chars().all(|c| c.is_ascii_digit()) {
			return None;
		}

		let normalized = match (digits.is_empty(), fraction.is_empty()) {
			(true, _) => format!("0.{}", fraction),
			(false, true) => digits,
			(false, false) => format!("{}.{}", digits, fraction),
		};

		Decimal::from_str(&normalized).ok()
	}

	/// Strips group separators from the integer part, checking grouping.
	fn ungroup(&self, integer: &str) -> Option<String> {
		let groups: Vec<&str> = integer.split(self.group_separator).collect();

		for (i, group) in groups.iter().enumerate() {
			if !group.chars().all(|c| c.is_ascii_digit()) {
				return None;
			}
			if groups.len() == 1 {
				continue;
			}
			let valid_len = if i == 0 {
				(1..=3).contains(&group.len())
			} else {
				group.len() == 3
			};
			if !valid_len {
				return None;
			}
		}

		Some(groups.concat())
	}

	/// Renders with exactly `places` decimals, grouping the integer part.
	/// Midpoints round away from zero.
	pub fn format(&self, value: Decimal, places: u32) -> String {
		let rounded = value.round_dp_with_strategy(
			places,
			RoundingStrategy::MidpointAwayFromZero,
		);
		let plain = format!("{:.*}", places as usize, rounded.abs());

		let (int_part, frac_part) = match plain.split_once('.') {
			Some((i, f)) => (i.to_string(), f.to_string()),
			None => (plain, String::new()),
		};

		let mut int_str = int_part;
		let mut i = int_str.len() as isize - 3;
		while i > 0 {
			int_str.insert(i as usize, self.group_separator);
			i -= 3;
		}

		let mut out = if frac_part.is_empty() {
			int_str
		} else {
			format!("{}{}{}", int_str, self.decimal_separator, frac_part)
		};

		if rounded.is_sign_negative() && !rounded.is_zero() {
			out.insert(0, '-');
		}
		out
	}
}
