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
use crate::parsing::script::Step;
use crate::view::command::Command;
use crate::view::observable::{Field, Subscription};
use crate::view::view_model::ViewModel;
use std::cell::RefCell;
use std::rc::Rc;

/// Drives a ViewModel from script steps the way a form would, recording
/// every notification it receives as a line of text:
///
/// - `> step` for each step applied
/// - `~ Field: "value"` for each field change
/// - `? convert enabled: bool` each time convert's availability is
///   re-published
pub struct Session {
	vm: ViewModel,
	transcript: Rc<RefCell<Vec<String>>>,
	_subscriptions: Vec<Subscription>,
}

impl Session {
	pub fn new(vm: ViewModel) -> Self {
		let transcript = Rc::new(RefCell::new(Vec::new()));

		let field_changes = {
			let sink = Rc::clone(&transcript);
			let state = vm.state().clone();
			vm.subscribe(move |field| {
				let line = format!("~ {}: \"{}\"", field, state.get(field));
				sink.borrow_mut().push(line);
			})
		};

		let availability = {
			let sink = Rc::clone(&transcript);
			vm.commands().convert.subscribe_can_execute_changed(move |cmd| {
				let line =
					format!("? {} enabled: {}", cmd.name(), cmd.can_execute());
				sink.borrow_mut().push(line);
			})
		};

		Self {
			vm,
			transcript,
			_subscriptions: vec![field_changes, availability],
		}
	}

	#[cfg(test)]
	pub fn view_model(&self) -> &ViewModel {
		&self.vm
	}

	pub fn apply(&self, step: &Step) {
		self.record(format!("> {}", step));

		let commands = self.vm.commands();
		match step {
			Step::Amount(text) => self.vm.set_amount_text(text.as_str()),
			Step::From(code) => self.vm.set_from(code.as_str()),
			Step::To(code) => self.vm.set_to(code.as_str()),
			Step::Convert | Step::Swap | Step::Clear => {
				// these steps print as the command's name
				if let Some(command) = commands.get(&step.to_string()) {
					command.execute();
				}
			},
			Step::Show => self.show(),
		}
	}

	/// Applies every step and returns the transcript produced.
	pub fn run(&self, steps: &[Step]) -> Vec<String> {
		for step in steps {
			self.apply(step);
		}
		self.take_output()
	}

	pub fn take_output(&self) -> Vec<String> {
		std::mem::take(&mut *self.transcript.borrow_mut())
	}

	fn show(&self) {
		let state = self.vm.state().snapshot();
		for field in Field::ALL {
			self.record(format!("  {} = \"{}\"", field, state.get(field)));
		}

		let enabled = if self.vm.can_convert() {
			"enabled"
		} else {
			"disabled"
		};
		self.record(format!("  convert = {}", enabled));
		self.record(format!("  state = {:?}", self.vm.availability()));
		self.record(format!("  currencies = {}", self.vm.currencies().join(", ")));
	}

	fn record(&self, line: String) {
		self.transcript.borrow_mut().push(line);
	}
}
