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
//! Observable form state.
//!
//! Holds the four fields of the conversion form and broadcasts every change
//! to registered handlers. Single-threaded: state and subscriber list live in
//! `Rc<RefCell<..>>`, and handlers are held as `Weak` references so that
//! dropping a [`Subscription`] unregisters it.
//!
//! Invariants:
//!
//! 1. Setting a field to its current value is a no-op: nothing is stored and
//!    nobody is notified.
//! 2. A change notifies each live handler exactly once, in registration
//!    order.
//! 3. No borrow is held while handlers run, so a handler may read or set
//!    fields re-entrantly.

use log::trace;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// The observable fields of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	AmountText,
	From,
	To,
	ResultText,
}

impl Field {
	pub const ALL: [Field; 4] =
		[Field::AmountText, Field::From, Field::To, Field::ResultText];

	/// Logical property name carried by notifications.
	pub fn name(&self) -> &'static str {
		match self {
			Field::AmountText => "AmountText",
			Field::From => "From",
			Field::To => "To",
			Field::ResultText => "ResultText",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Plain snapshot of the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	pub amount_text: String,
	pub from: String,
	pub to: String,
	pub result_text: String,
}

impl ViewState {
	pub fn get(&self, field: Field) -> &str {
		match field {
			Field::AmountText => &self.amount_text,
			Field::From => &self.from,
			Field::To => &self.to,
			Field::ResultText => &self.result_text,
		}
	}

	fn slot_mut(&mut self, field: Field) -> &mut String {
		match field {
			Field::AmountText => &mut self.amount_text,
			Field::From => &mut self.from,
			Field::To => &mut self.to,
			Field::ResultText => &mut self.result_text,
		}
	}
}

type Handler = dyn Fn(Field);

struct Inner {
	state: RefCell<ViewState>,
	subscribers: RefCell<Vec<Weak<Handler>>>,
}

/// Shared handle to the form state. Clones refer to the same state.
#[derive(Clone)]
pub struct ObservableState {
	inner: Rc<Inner>,
}

/// Keeps a handler registered; dropping it unsubscribes. The registry only
/// holds a weak reference, so this guard is the handler's sole owner.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
	_handler: Rc<dyn Any>,
}

impl Subscription {
	pub(crate) fn hold<T: Any>(handler: Rc<T>) -> Self {
		Self { _handler: handler }
	}
}

impl ObservableState {
	pub fn new(initial: ViewState) -> Self {
		Self {
			inner: Rc::new(Inner {
				state: RefCell::new(initial),
				subscribers: RefCell::new(Vec::new()),
			}),
		}
	}

	pub fn get(&self, field: Field) -> String {
		self.inner.state.borrow().get(field).to_string()
	}

	pub fn snapshot(&self) -> ViewState {
		self.inner.state.borrow().clone()
	}

	/// Stores the value and notifies subscribers, unless the field already
	/// holds an equal value. Returns whether anything changed.
	pub fn set(&self, field: Field, value: impl Into<String>) -> bool {
		let value = value.into();
		{
			let mut state = self.inner.state.borrow_mut();
			let slot = state.slot_mut(field);
			if *slot == value {
				return false;
			}
			*slot = value;
		}

		self.notify(field);
		true
	}

	/// Registers a handler called with the field name after every change.
	pub fn subscribe<F: Fn(Field) + 'static>(&self, handler: F) -> Subscription {
		let handler = Rc::new(handler);
		let erased: Rc<Handler> = handler.clone();
		self.inner.subscribers.borrow_mut().push(Rc::downgrade(&erased));
		Subscription::hold(handler)
	}

	fn notify(&self, field: Field) {
		// Snapshot first so handlers can subscribe or set without tripping
		// over the RefCell.
		let handlers: Vec<Rc<Handler>> = {
			let mut subscribers = self.inner.subscribers.borrow_mut();
			subscribers.retain(|w| w.strong_count() > 0);
			subscribers.iter().filter_map(Weak::upgrade).collect()
		};

		trace!("{} changed, notifying {} handler(s)", field, handlers.len());
		for handler in handlers {
			(*handler)(field);
		}
	}
}

impl fmt::Debug for ObservableState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObservableState")
			.field("state", &*self.inner.state.borrow())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}
