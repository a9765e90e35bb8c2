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
use crate::view::observable::Subscription;
use log::debug;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// An action the form can trigger. The guard only advises the consumer
/// whether to offer the action; execute() runs regardless.
pub trait Command {
	fn can_execute(&self) -> bool {
		true
	}

	fn execute(&self);
}

type Listener = dyn Fn(&RelayCommand);

/// A command built from closures. Whoever owns the state the guard reads
/// must call change_can_execute() when that state changes, so listeners can
/// re-query availability.
pub struct RelayCommand {
	name: &'static str,
	action: Box<dyn Fn()>,
	guard: Option<Box<dyn Fn() -> bool>>,
	listeners: RefCell<Vec<Weak<Listener>>>,
}

impl RelayCommand {
	pub fn new(name: &'static str, action: impl Fn() + 'static) -> Self {
		Self {
			name,
			action: Box::new(action),
			guard: None,
			listeners: RefCell::new(Vec::new()),
		}
	}

	pub fn with_guard(mut self, guard: impl Fn() -> bool + 'static) -> Self {
		self.guard = Some(Box::new(guard));
		self
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Registers interest in availability changes. The listener receives the
	/// command so it can call can_execute() itself.
	pub fn subscribe_can_execute_changed<F: Fn(&RelayCommand) + 'static>(
		&self,
		listener: F,
	) -> Subscription {
		let listener = Rc::new(listener);
		let erased: Rc<Listener> = listener.clone();
		self.listeners.borrow_mut().push(Rc::downgrade(&erased));
		Subscription::hold(listener)
	}

	/// Tells listeners that can_execute() may now answer differently.
	pub fn change_can_execute(&self) {
		let listeners: Vec<Rc<Listener>> = {
			let mut listeners = self.listeners.borrow_mut();
			listeners.retain(|w| w.strong_count() > 0);
			listeners.iter().filter_map(Weak::upgrade).collect()
		};

		for listener in listeners {
			(*listener)(self);
		}
	}
}

impl Command for RelayCommand {
	fn can_execute(&self) -> bool {
		self.guard.as_ref().map_or(true, |guard| guard())
	}

	fn execute(&self) {
		debug!("executing {}", self.name);
		(self.action)();
	}
}

impl fmt::Debug for RelayCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RelayCommand")
			.field("name", &self.name)
			.field("guarded", &self.guard.is_some())
			.finish()
	}
}

/// The three actions the conversion form offers.
#[derive(Debug, Clone)]
pub struct CommandSet {
	pub convert: Rc<RelayCommand>,
	pub swap: Rc<RelayCommand>,
	pub clear: Rc<RelayCommand>,
}

impl CommandSet {
	/// Looks a command up by name.
	pub fn get(&self, name: &str) -> Option<&Rc<RelayCommand>> {
		[&self.convert, &self.swap, &self.clear]
			.into_iter()
			.find(|c| c.name() == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn test_unguarded_defaults_to_enabled() {
		let ran = Rc::new(Cell::new(0));
		let counter = Rc::clone(&ran);
		let cmd = RelayCommand::new("swap", move || counter.set(counter.get() + 1));

		assert!(cmd.can_execute());
		cmd.execute();
		cmd.execute();
		assert_eq!(ran.get(), 2);
	}

	#[test]
	fn test_guard_is_queried_fresh() {
		let enabled = Rc::new(Cell::new(false));
		let flag = Rc::clone(&enabled);
		let cmd = RelayCommand::new("convert", || {}).with_guard(move || flag.get());

		assert!(!cmd.can_execute());
		enabled.set(true);
		assert!(cmd.can_execute());
	}

	#[test]
	fn test_execute_ignores_guard() {
		let ran = Rc::new(Cell::new(false));
		let flag = Rc::clone(&ran);
		let cmd = RelayCommand::new("convert", move || flag.set(true))
			.with_guard(|| false);

		cmd.execute();
		assert!(ran.get());
	}

	#[test]
	fn test_change_notifies_live_listeners() {
		let cmd = RelayCommand::new("convert", || {}).with_guard(|| true);
		let seen = Rc::new(RefCell::new(Vec::new()));

		let sink = Rc::clone(&seen);
		let sub = cmd.subscribe_can_execute_changed(move |c| {
			sink.borrow_mut().push((c.name(), c.can_execute()))
		});

		cmd.change_can_execute();
		assert_eq!(*seen.borrow(), vec![("convert", true)]);

		drop(sub);
		cmd.change_can_execute();
		assert_eq!(seen.borrow().len(), 1);
	}

	#[test]
	fn test_listeners_called_in_order() {
		let cmd = RelayCommand::new("convert", || {});
		let order = Rc::new(RefCell::new(Vec::new()));

		let first = Rc::clone(&order);
		let _a = cmd.subscribe_can_execute_changed(move |_| {
			first.borrow_mut().push("a")
		});
		let second = Rc::clone(&order);
		let _b = cmd.subscribe_can_execute_changed(move |_| {
			second.borrow_mut().push("b")
		});

		cmd.change_can_execute();
		cmd.change_can_execute();
		assert_eq!(*order.borrow(), vec!["a", "b", "a", "b"]);
	}

	#[test]
	fn test_command_set_lookup() {
		let set = CommandSet {
			convert: Rc::new(RelayCommand::new("convert", || {})),
			swap: Rc::new(RelayCommand::new("swap", || {})),
			clear: Rc::new(RelayCommand::new("clear", || {})),
		};
		assert_eq!(set.get("swap").map(|c| c.name()), Some("swap"));
		assert!(set.get("undo").is_none());
	}
}
