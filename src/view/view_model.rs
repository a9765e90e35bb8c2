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
use crate::parsing::amount_parser::AmountParser;
use crate::rates::conversion_error::ConversionError;
use crate::rates::rate_table::RateTable;
use crate::util::number_format::NumberFormat;
use crate::view::command::{Command, CommandSet, RelayCommand};
use crate::view::messages::Messages;
use crate::view::observable::{
	Field, ObservableState, Subscription, ViewState,
};
use log::debug;
use std::rc::Rc;

/// Decimal places shown for both sides of a conversion.
const RESULT_PLACES: u32 = 2;

/// Everything about the form that is configuration rather than state.
#[derive(Clone, Debug)]
pub struct ViewSettings {
	pub format: NumberFormat,
	pub messages: Messages,
	pub default_from: String,
	pub default_to: String,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			format: NumberFormat::default(),
			messages: Messages::default(),
			default_from: "USD".to_string(),
			default_to: "BRL".to_string(),
		}
	}
}

/// Whether the form currently has something to convert. Never stored;
/// derived from the amount text whenever asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
	/// Amount empty or unparsable; Convert is disabled.
	Idle,
	/// Amount parses; Convert is enabled whatever the currencies are.
	Ready,
}

impl Availability {
	pub fn of(amount_text: &str, parser: &AmountParser) -> Self {
		match parser.try_parse(amount_text) {
			Some(_) => Availability::Ready,
			None => Availability::Idle,
		}
	}
}

/// The state and collaborators the command bodies close over.
struct Core {
	state: ObservableState,
	rates: Rc<RateTable>,
	parser: AmountParser,
	format: NumberFormat,
	messages: Messages,
}

impl Core {
	fn can_convert(&self) -> bool {
		Availability::of(&self.state.get(Field::AmountText), &self.parser)
			== Availability::Ready
	}

	fn convert(&self) {
		let snapshot = self.state.snapshot();

		let text = match self.describe_conversion(&snapshot) {
			Ok(text) => text,
			Err(e) => {
				debug!("conversion rejected: {}", e);
				match e {
					ConversionError::InvalidAmount(_) => {
						self.messages.invalid_amount.clone()
					},
					ConversionError::UnsupportedCurrency(_) => {
						self.messages.unsupported_currency.clone()
					},
					ConversionError::OutOfRange(_) => {
						self.messages.out_of_range.clone()
					},
				}
			},
		};

		self.state.set(Field::ResultText, text);
	}

	/// Runs the conversion and renders it, e.g. "100,00 USD = 560,00 BRL".
	fn describe_conversion(
		&self,
		view: &ViewState,
	) -> Result<String, ConversionError> {
		let amount = self.parser.parse(&view.amount_text)?;

		for code in [&view.from, &view.to] {
			if !self.rates.supports(code) {
				return Err(ConversionError::UnsupportedCurrency(code.clone()));
			}
		}

		let result = self.rates.try_convert(amount, &view.from, &view.to)?;

		Ok(format!(
			"{} {} = {} {}",
			self.format.format(amount, RESULT_PLACES),
			view.from,
			self.format.format(result, RESULT_PLACES),
			view.to
		))
	}

	fn swap(&self) {
		let snapshot = self.state.snapshot();
		self.state.set(Field::From, snapshot.to);
		self.state.set(Field::To, snapshot.from);
		self.state.set(Field::ResultText, self.messages.placeholder.as_str());
	}

	fn clear(&self) {
		self.state.set(Field::AmountText, "");
		self.state.set(Field::ResultText, self.messages.placeholder.as_str());
	}
}

/// Presentation logic for the conversion form. Owns the observable state
/// and the rate table, and exposes the three commands. The consumer reads
/// and writes fields, subscribes to changes, and listens on the convert
/// command to know when to re-check whether it is enabled.
pub struct ViewModel {
	core: Rc<Core>,
	currencies: Vec<String>,
	commands: CommandSet,

	/// Re-publishes Convert's availability whenever the amount changes.
	_guard_refresh: Subscription,
}

impl ViewModel {
	pub fn new(rates: Rc<RateTable>, settings: ViewSettings) -> Self {
		let state = ObservableState::new(ViewState {
			amount_text: String::new(),
			from: settings.default_from,
			to: settings.default_to,
			result_text: settings.messages.placeholder.clone(),
		});

		let core = Rc::new(Core {
			state,
			rates: Rc::clone(&rates),
			parser: AmountParser::new(settings.format),
			format: settings.format,
			messages: settings.messages,
		});

		let commands = CommandSet {
			convert: Rc::new(
				RelayCommand::new("convert", {
					let core = Rc::clone(&core);
					move || core.convert()
				})
				.with_guard({
					let core = Rc::clone(&core);
					move || core.can_convert()
				}),
			),
			swap: Rc::new(RelayCommand::new("swap", {
				let core = Rc::clone(&core);
				move || core.swap()
			})),
			clear: Rc::new(RelayCommand::new("clear", {
				let core = Rc::clone(&core);
				move || core.clear()
			})),
		};

		// Weak, so the state's handler list never keeps the command alive
		let convert = Rc::downgrade(&commands.convert);
		let guard_refresh = core.state.subscribe(move |field| {
			if field != Field::AmountText {
				return;
			}
			if let Some(convert) = convert.upgrade() {
				convert.change_can_execute();
			}
		});

		Self {
			currencies: rates.currencies(),
			core,
			commands,
			_guard_refresh: guard_refresh,
		}
	}

	/// A form over the built-in rate table with default settings.
	#[cfg(test)]
	pub fn standard() -> Self {
		Self::new(Rc::new(RateTable::standard().unwrap()), ViewSettings::default())
	}

	/// Shared handle to the observable fields.
	pub fn state(&self) -> &ObservableState {
		&self.core.state
	}

	pub fn subscribe<F: Fn(Field) + 'static>(&self, handler: F) -> Subscription {
		self.core.state.subscribe(handler)
	}

	/// Codes to offer for selection, sorted.
	pub fn currencies(&self) -> &[String] {
		&self.currencies
	}

	pub fn commands(&self) -> &CommandSet {
		&self.commands
	}

	pub fn availability(&self) -> Availability {
		Availability::of(&self.amount_text(), &self.core.parser)
	}

	pub fn amount_text(&self) -> String {
		self.core.state.get(Field::AmountText)
	}

	pub fn set_amount_text(&self, text: impl Into<String>) {
		self.core.state.set(Field::AmountText, text);
	}

	pub fn from(&self) -> String {
		self.core.state.get(Field::From)
	}

	pub fn set_from(&self, code: impl Into<String>) {
		self.core.state.set(Field::From, code);
	}

	pub fn to(&self) -> String {
		self.core.state.get(Field::To)
	}

	pub fn set_to(&self, code: impl Into<String>) {
		self.core.state.set(Field::To, code);
	}

	pub fn result_text(&self) -> String {
		self.core.state.get(Field::ResultText)
	}

	pub fn can_convert(&self) -> bool {
		self.commands.convert.can_execute()
	}

	pub fn convert(&self) {
		self.commands.convert.execute();
	}
}
