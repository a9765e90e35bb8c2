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
use std::fs;
use std::process::{Command, Output};

const CONFIG: &str = "tests/test_data/config.toml";

/// Dynamically collects test cases from a given directory.
fn collect_test_cases(subfolder: &str) -> Vec<(String, String)> {
	let dir_path = format!("tests/test_data/{}", subfolder);

	let mut test_cases = vec![];

	if let Ok(entries) = fs::read_dir(&dir_path) {
		let mut inputs = vec![];
		let mut outputs = vec![];

		for entry in entries.flatten() {
			let file_name =
				entry.file_name().into_string().unwrap_or_default();
			if file_name.ends_with("_in.txt") {
				inputs.push(file_name);
			} else if file_name.ends_with("_out.txt") {
				outputs.push(file_name);
			}
		}

		inputs.sort();
		outputs.sort();

		// Pair inputs with corresponding outputs
		for input_file in inputs {
			let output_file = input_file.replace("_in.txt", "_out.txt");
			if outputs.contains(&output_file) {
				test_cases.push((input_file, output_file));
			}
		}
	}

	test_cases
}

#[test]
fn test_integration_sessions() {
	let test_cases = collect_test_cases("session");
	assert!(!test_cases.is_empty());
	execute("session", test_cases, true, CONFIG);
}

#[test]
fn test_integration_english_format() {
	let test_cases = collect_test_cases("english");
	execute("english", test_cases, true, "tests/test_data/config_en.toml");
}

#[test]
fn test_integration_should_fail() {
	let test_cases = collect_test_cases("failures");
	execute("failures", test_cases, false, CONFIG);
}

#[test]
fn test_integration_convert() {
	let cases = [
		(vec!["100", "USD", "EUR"], "100,00 USD = 91,80 EUR"),
		(vec!["100", "USD", "BRL"], "100,00 USD = 560,00 BRL"),
		(vec!["10", "BRL", "BRL"], "10,00 BRL = 10,00 BRL"),
		(vec!["10.50"], "10,50 USD = 58,80 BRL"),
		(vec!["abc"], "Invalid amount."),
		(vec!["5", "XXX", "BRL"], "Unsupported currency."),
		(
			vec!["79228162514264337593543950335", "EUR", "BRL"],
			"Amount out of range.",
		),
	];

	for (terms, expected) in cases {
		let args = [vec!["convert"], terms.clone(), vec!["--config", CONFIG]]
			.concat();
		let output = run(&args);

		assert!(
			output.status.success(),
			"convert {:?} failed: {}",
			terms,
			String::from_utf8_lossy(&output.stderr)
		);
		assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
	}
}

#[test]
fn test_integration_convert_usage() {
	let output = run(&["convert", "1", "USD", "--config", CONFIG]);
	assert!(!output.status.success());
}

#[test]
fn test_integration_rates() {
	let output = run(&["rates", "--config", CONFIG]);
	assert!(output.status.success());

	let expected = "\
Currency | In BRL | Per BRL
---------------------------
BRL        1,0000    1,0000
EUR        6,1000    0,1639
USD        5,6000    0,1786";
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected);
}

#[test]
fn test_integration_bad_config() {
	let output = run(&["rates", "--config", "tests/test_data/bad_config.toml"]);
	assert!(!output.status.success());

	let output = run(&["rates", "--config", "tests/test_data/missing.toml"]);
	assert!(!output.status.success());
}

fn run(args: &[&str]) -> Output {
	let mut all_args = vec!["run", "--quiet", "--"];
	all_args.extend_from_slice(args);

	Command::new("cargo")
		.args(all_args)
		.output()
		.expect("Failed to execute process")
}

fn execute(
	subfolder: &str,
	test_cases: Vec<(String, String)>,
	should_succeed: bool,
	config: &str,
) {
	for (input_file, expected_output_file) in test_cases {
		println!("running for {}...", input_file);

		let loc = format!("{}/{}/{}", "tests/test_data", subfolder, input_file);
		let output = run(&["session", "-f", loc.as_str(), "--config", config]);

		if !should_succeed {
			assert!(
				!output.status.success(),
				"{} unexpectedly succeeded!",
				input_file
			);
			continue;
		}

		assert!(
			output.status.success(),
			"{} failed processing: {}",
			input_file,
			String::from_utf8_lossy(&output.stderr)
		);

		let stdout = String::from_utf8_lossy(&output.stdout);

		let expected_output = fs::read_to_string(format!(
			"{}/{}/{}",
			"tests/test_data", subfolder, expected_output_file
		))
		.expect("Failed to read expected output file");

		assert_eq!(
			stdout.trim(),
			expected_output.trim(),
			"Output did not match for {}; expected:\n{}\ngot:\n{}",
			input_file,
			expected_output.trim(),
			stdout.trim()
		);
	}
}
