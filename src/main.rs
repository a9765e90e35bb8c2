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
use crate::parsing::filesystem::Filesystem;
use crate::parsing::script::ScriptParser;
use crate::rates::rate_table::RateTable;
use crate::reports::rate_reporter::RateReporter;
use crate::session::runner::Session;
use crate::util::logger::init_logger;
use crate::view::view_model::ViewModel;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use std::rc::Rc;

mod config;
mod parsing;
mod rates;
mod reports;
mod session;
mod util;
mod view;

#[derive(Parser)]
#[command(
	name = "cambio",
	version = "0.1",
	about = "Currency conversion with a fixed rate table"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// For convert: AMOUNT [FROM TO]
	#[arg(required = false)]
	terms: Vec<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Session script to run ("-" for stdin, the default)
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/cambio/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Log debug output to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		match self.command {
			Directive::Convert => {
				if self.terms.len() != 1 && self.terms.len() != 3 {
					bail!("Usage: cambio convert AMOUNT [FROM TO]")
				}
			},
			Directive::Rates | Directive::Session => {
				if !self.terms.is_empty() {
					bail!("Unexpected arguments: {}", self.terms.join(" "))
				}
			},
		}

		if self.file.is_some() && self.command != Directive::Session {
			bail!("-f only applies to the session command")
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
enum Directive {
	Convert, // one-off conversion
	Rates,   // print the rate table
	Session, // run a form session script
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;

	let level = if args.verbose {
		LevelFilter::Debug
	} else {
		config.log_level()?
	};
	init_logger(level);

	let settings = config.view_settings()?;
	let rates = Rc::new(RateTable::standard()?);
	debug!("running {:?} with pivot {}", args.command, rates.pivot());

	match args.command {
		Directive::Convert => {
			let vm = ViewModel::new(rates, settings);
			convert_once(&vm, &args.terms);
			println!("{}", vm.result_text());
		},
		Directive::Rates => {
			let reporter = RateReporter::new(&rates, settings.format);
			reporter.print_all_rates();
		},
		Directive::Session => {
			let source = fs.read_script(args.file.as_deref().unwrap_or("-"))?;
			let steps = ScriptParser::new().parse(&source)?;

			let session = Session::new(ViewModel::new(rates, settings));
			for line in session.run(&steps) {
				println!("{}", line);
			}
		},
	}

	Ok(())
}

/// Fills the form from AMOUNT [FROM TO] and presses convert.
fn convert_once(vm: &ViewModel, terms: &[String]) {
	if let [_, from, to] = terms {
		vm.set_from(from.as_str());
		vm.set_to(to.as_str());
	}
	if let Some(amount) = terms.first() {
		vm.set_amount_text(amount.as_str());
	}

	debug!("converting {:?} from {} to {}", vm.amount_text(), vm.from(), vm.to());
	vm.convert();
}
