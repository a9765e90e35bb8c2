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
use crate::rates::rate_table::RateTable;
use crate::reports::table::Table;
use crate::util::number_format::NumberFormat;
use rust_decimal::Decimal;

/// Decimal places shown for rates; more than results, since small inverse
/// rates would otherwise round away.
const RATE_PLACES: u32 = 4;

pub struct RateReporter<'a> {
	rates: &'a RateTable,
	format: NumberFormat,
}

impl<'a> RateReporter<'a> {
	pub fn new(rates: &'a RateTable, format: NumberFormat) -> Self {
		Self { rates, format }
	}

	/// Each currency with its value in the pivot and the pivot's value in
	/// it.
	pub fn table(&self) -> Table {
		let pivot = self.rates.pivot();
		let mut table = Table::new(3);

		let in_pivot = format!("In {}", pivot);
		let per_pivot = format!("Per {}", pivot);
		table.add_header(vec!["Currency", in_pivot.as_str(), per_pivot.as_str()]);
		table.add_separator();

		for (code, rate) in self.rates.rates() {
			let value = self.format.format(*rate, RATE_PLACES);
			let inverse = self.format.format(Decimal::ONE / *rate, RATE_PLACES);
			table.add_row(vec![code.as_str(), value.as_str(), inverse.as_str()]);
		}

		table.right_align(vec![1, 2]);
		table
	}

	pub fn print_all_rates(&self) {
		self.table().print();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_standard_rates() {
		let rates = RateTable::standard().unwrap();
		let reporter = RateReporter::new(&rates, NumberFormat::default());

		assert_eq!(
			reporter.table().render(),
			"Currency | In BRL | Per BRL\n\
			 ---------------------------\n\
			 BRL        1,0000    1,0000\n\
			 EUR        6,1000    0,1639\n\
			 USD        5,6000    0,1786\n"
		);
	}
}
