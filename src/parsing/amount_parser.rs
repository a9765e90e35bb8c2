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
use crate::util::number_format::NumberFormat;
use rust_decimal::Decimal;

/// Reads amounts typed into the form. Tolerates either decimal separator:
/// the text is tried under the configured convention first, then again with
/// the alternate separator swapped for the primary one.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmountParser {
	format: NumberFormat,
}

impl AmountParser {
	pub fn new(format: NumberFormat) -> Self {
		Self { format }
	}

	pub fn try_parse(&self, text: &str) -> Option<Decimal> {
		let trimmed = text.trim();
		if trimmed.is_empty() {
			return None;
		}

		self.format.parse(trimmed).or_else(|| {
			let swapped = trimmed.replace(
				self.format.alternate_separator,
				&self.format.decimal_separator.to_string(),
			);
			self.format.parse(&swapped)
		})
	}

	pub fn parse(&self, text: &str) -> Result<Decimal, ConversionError> {
		self.try_parse(text)
			.ok_or_else(|| ConversionError::InvalidAmount(text.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn test_both_separators() {
		let parser = AmountParser::default();
		assert_eq!(parser.try_parse("10,50"), Some(dec!(10.50)));
		assert_eq!(parser.try_parse("10.50"), Some(dec!(10.50)));
		assert_eq!(parser.try_parse("10,50"), parser.try_parse("10.50"));
	}

	#[test]
	fn test_trims_whitespace() {
		let parser = AmountParser::default();
		assert_eq!(parser.try_parse("  5 "), Some(dec!(5)));
		assert_eq!(parser.try_parse("\t1.234,5\n"), Some(dec!(1234.5)));
	}

	#[test]
	fn test_grouped_thousands() {
		let parser = AmountParser::default();
		assert_eq!(parser.try_parse("1.234"), Some(dec!(1234)));
		assert_eq!(parser.try_parse("1.234,56"), Some(dec!(1234.56)));
	}

	#[test]
	fn test_failures() {
		let parser = AmountParser::default();
		assert_eq!(parser.try_parse(""), None);
		assert_eq!(parser.try_parse("   "), None);
		assert_eq!(parser.try_parse("abc"), None);
		assert_eq!(parser.try_parse("1.2.3"), None);
		assert_eq!(parser.try_parse("1,2,3"), None);
		assert_eq!(parser.try_parse("1,234.5"), None);
		assert_eq!(parser.try_parse("-3"), None);
	}

	#[test]
	fn test_parse_error_carries_text() {
		let parser = AmountParser::default();
		assert_eq!(
			parser.parse("abc"),
			Err(ConversionError::InvalidAmount("abc".to_string()))
		);
		assert_eq!(parser.parse("2,5"), Ok(dec!(2.5)));
	}
}
