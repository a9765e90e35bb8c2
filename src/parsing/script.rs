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
use anyhow::{bail, Error};
use regex::Regex;
use std::fmt;

/// One line of a session script: a field edit or a command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
	Amount(String),
	From(String),
	To(String),
	Convert,
	Swap,
	Clear,
	Show,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Step::Amount(text) => write!(f, "amount \"{}\"", text),
			Step::From(code) => write!(f, "from {}", code),
			Step::To(code) => write!(f, "to {}", code),
			Step::Convert => write!(f, "convert"),
			Step::Swap => write!(f, "swap"),
			Step::Clear => write!(f, "clear"),
			Step::Show => write!(f, "show"),
		}
	}
}

pub struct ScriptParser {
	token_regex: Regex,
}

impl ScriptParser {
	pub fn new() -> Self {
		// A token is either a double-quoted string (quotes dropped, contents
		// kept verbatim) or a run of non-whitespace.
		let re = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
		Self { token_regex: re }
	}

	/// Parses a whole script. Blank lines and anything after '#' are
	/// ignored.
	pub fn parse(&self, source: &str) -> Result<Vec<Step>, Error> {
		let mut steps = Vec::new();

		for (i, line) in source.lines().enumerate() {
			let l = line.split('#').next().unwrap_or_default().trim();
			if l.is_empty() {
				continue;
			}

			steps.push(self.parse_line(l, i + 1)?);
		}

		Ok(steps)
	}

	fn parse_line(&self, line: &str, line_no: usize) -> Result<Step, Error> {
		let tokens: Vec<&str> = self
			.token_regex
			.captures_iter(line)
			.filter_map(|c| c.get(1).or_else(|| c.get(2)))
			.map(|m| m.as_str())
			.collect();

		let (verb, args) = match tokens.split_first() {
			Some((verb, args)) => (*verb, args),
			None => bail!("Empty step (line {})", line_no),
		};

		let step = match (verb, args) {
			("amount", []) => Step::Amount(String::new()),
			("amount", [text]) => Step::Amount(text.to_string()),
			("from", [code]) => Step::From(code.to_string()),
			("to", [code]) => Step::To(code.to_string()),
			("convert", []) => Step::Convert,
			("swap", []) => Step::Swap,
			("clear", []) => Step::Clear,
			("show", []) => Step::Show,
			_ => bail!("Invalid step (line {}): {}", line_no, line),
		};

		Ok(step)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_steps() {
		let parser = ScriptParser::new();
		let steps = parser
			.parse(
				"# a comment\n\
				 amount 10,50\n\
				 \n\
				 from EUR   # trailing comment\n\
				 to USD\n\
				 convert\n\
				 swap\n\
				 clear\n\
				 show\n",
			)
			.unwrap();

		assert_eq!(
			steps,
			vec![
				Step::Amount("10,50".to_string()),
				Step::From("EUR".to_string()),
				Step::To("USD".to_string()),
				Step::Convert,
				Step::Swap,
				Step::Clear,
				Step::Show,
			]
		);
	}

	#[test]
	fn test_quoted_amount_keeps_whitespace() {
		let parser = ScriptParser::new();
		assert_eq!(
			parser.parse("amount \"   \"").unwrap(),
			vec![Step::Amount("   ".to_string())]
		);
		assert_eq!(
			parser.parse("amount \"\"").unwrap(),
			vec![Step::Amount(String::new())]
		);
		assert_eq!(
			parser.parse("amount").unwrap(),
			vec![Step::Amount(String::new())]
		);
	}

	#[test]
	fn test_invalid_steps() {
		let parser = ScriptParser::new();
		assert!(parser.parse("undo").is_err());
		assert!(parser.parse("from").is_err());
		assert!(parser.parse("to USD EUR").is_err());
		assert!(parser.parse("convert now").is_err());

		let err = parser.parse("swap\nbogus").unwrap_err();
		assert!(err.to_string().contains("line 2"));
	}

	#[test]
	fn test_display_round_trips() {
		let parser = ScriptParser::new();
		let step = Step::Amount("1 000".to_string());
		assert_eq!(parser.parse(&step.to_string()).unwrap(), vec![step]);
	}
}
