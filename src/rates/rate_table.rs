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
use crate::rates::conversion_error::ConversionError;
use anyhow::{bail, Error};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A fixed table of exchange rates, each currency stored as the number of
/// pivot units one unit of it is worth. Conversions between two non-pivot
/// currencies are routed through the pivot, so N currencies need only N
/// stored rates.
///
/// Immutable once built; share it by reference.
#[derive(Debug, Clone)]
pub struct RateTable {
	pivot: String,
	to_pivot: BTreeMap<String, Decimal>,
}

impl RateTable {
	/// Builds a table from the pivot code and a map of code to value in
	/// pivot units. Every rate must be strictly positive and the pivot must
	/// be present with a value of exactly one.
	pub fn new(
		pivot: &str,
		to_pivot: BTreeMap<String, Decimal>,
	) -> Result<Self, Error> {
		let code_regex = Regex::new(r"^[A-Z]{2,5}$").unwrap();

		if to_pivot.is_empty() {
			bail!("Rate table cannot be empty")
		}

		for (code, rate) in &to_pivot {
			if !code_regex.is_match(code) {
				bail!("Invalid currency code: {}", code)
			}
			if *rate <= Decimal::ZERO {
				bail!("Rate for {} must be positive, got {}", code, rate)
			}
		}

		match to_pivot.get(pivot) {
			None => bail!("Pivot currency {} is missing from the table", pivot),
			Some(rate) if *rate != Decimal::ONE => {
				bail!("Pivot currency {} must have a rate of 1, got {}", pivot, rate)
			},
			Some(_) => {},
		}

		Ok(Self {
			pivot: pivot.to_string(),
			to_pivot,
		})
	}

	/// The built-in table: Brazilian real as pivot, plus dollar and euro.
	pub fn standard() -> Result<Self, Error> {
		Self::new(
			"BRL",
			BTreeMap::from([
				("BRL".to_string(), Decimal::new(100, 2)),
				("USD".to_string(), Decimal::new(560, 2)),
				("EUR".to_string(), Decimal::new(610, 2)),
			]),
		)
	}

	pub fn pivot(&self) -> &str {
		&self.pivot
	}

	/// All known codes in lexicographic order.
	pub fn currencies(&self) -> Vec<String> {
		// BTreeMap keys are already sorted
		self.to_pivot.keys().cloned().collect()
	}

	pub fn supports(&self, code: &str) -> bool {
		self.to_pivot.contains_key(code)
	}

	/// Value of one unit of the given currency in pivot units, if known.
	pub fn rate(&self, code: &str) -> Option<Decimal> {
		self.to_pivot.get(code).copied()
	}

	/// Read-only view of the whole table.
	pub fn rates(&self) -> &BTreeMap<String, Decimal> {
		&self.to_pivot
	}

	/// Converts through the pivot. Returns zero when either currency is
	/// unknown or the result overflows; use try_convert to get an error
	/// instead.
	pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Decimal {
		self.try_convert(amount, from, to)
			.unwrap_or(Decimal::ZERO)
	}

	pub fn try_convert(
		&self,
		amount: Decimal,
		from: &str,
		to: &str,
	) -> Result<Decimal, ConversionError> {
		let from_rate = self
			.rate(from)
			.ok_or_else(|| ConversionError::UnsupportedCurrency(from.to_string()))?;
		let to_rate = self
			.rate(to)
			.ok_or_else(|| ConversionError::UnsupportedCurrency(to.to_string()))?;

		if from == to {
			return Ok(amount);
		}

		amount
			.checked_mul(from_rate)
			.and_then(|in_pivot| in_pivot.checked_div(to_rate))
			.ok_or_else(|| {
				ConversionError::OutOfRange(format!("{} {}", amount, from))
			})
	}
}
