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
/// Texts written into the result field when there is no number to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
	pub invalid_amount: String,
	pub unsupported_currency: String,
	pub out_of_range: String,

	/// Shown before any conversion and after swap or clear.
	pub placeholder: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			invalid_amount: "Invalid amount.".to_string(),
			unsupported_currency: "Unsupported currency.".to_string(),
			out_of_range: "Amount out of range.".to_string(),
			placeholder: "—".to_string(),
		}
	}
}
