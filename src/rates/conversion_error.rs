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
use thiserror::Error;

/// The ways a conversion request can fail. None is ever surfaced to the
/// consumer of the form as a fault; the view model turns each into result
/// text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
	#[error("Invalid amount: '{0}'")]
	InvalidAmount(String),

	#[error("Currency '{0}' is not supported")]
	UnsupportedCurrency(String),

	/// The result does not fit in a Decimal.
	#[error("Converting {0} is out of range")]
	OutOfRange(String),
}
