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
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct Filesystem {
	default_config: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self {
			default_config: home_dir()
				.map(|home| home.join(".config/cambio/config.toml")),
		}
	}

	/// Reads a session script; "-" means standard input.
	pub fn read_script(&self, file_path: &str) -> Result<String, Error> {
		let mut content = String::new();

		if file_path == "-" {
			std::io::stdin().read_to_string(&mut content)?;
		} else {
			File::open(Path::new(file_path))
				.map_err(|e| anyhow!("failed to open {}: {}", file_path, e))?
				.read_to_string(&mut content)?;
		}

		Ok(content)
	}

	/// Fetches the config from the given path, or the default path if none.
	/// A missing default config is created empty; a missing custom config
	/// is an error.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => match &self.default_config {
				Some(p) => p.clone(),
				None => bail!("Unable to determine home directory"),
			},
			Some(p) => PathBuf::from(p),
		};

		if !config_path.exists() {
			if custom_config_path.is_some() {
				bail!("config file not found: {}", config_path.display())
			}
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(&config_path)?;
		}

		let content = fs::read_to_string(&config_path)?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scratch_file(name: &str, content: &str) -> String {
		let path = std::env::temp_dir()
			.join(format!("cambio-{}-{}", std::process::id(), name));
		fs::write(&path, content).unwrap();
		path.to_string_lossy().to_string()
	}

	#[test]
	fn test_custom_config() {
		let path = scratch_file(
			"config.toml",
			"[defaults]\nfrom = \"EUR\"\nto = \"USD\"\n",
		);
		let config = Filesystem::new().get_config(Some(&path)).unwrap();
		let defaults = config.defaults.unwrap();
		assert_eq!(defaults.from.as_deref(), Some("EUR"));
		assert_eq!(defaults.to.as_deref(), Some("USD"));
	}

	#[test]
	fn test_missing_custom_config() {
		let path = "/nonexistent/cambio/config.toml".to_string();
		assert!(Filesystem::new().get_config(Some(&path)).is_err());
	}

	#[test]
	fn test_malformed_config() {
		let path = scratch_file("broken.toml", "[defaults\nfrom = ");
		let err = Filesystem::new().get_config(Some(&path)).unwrap_err();
		assert!(err.to_string().starts_with("failed to parse config"));
	}

	#[test]
	fn test_read_script() {
		let path = scratch_file("script.txt", "amount 5\nconvert\n");
		let content = Filesystem::new().read_script(&path).unwrap();
		assert_eq!(content, "amount 5\nconvert\n");
		assert!(Filesystem::new().read_script("/nonexistent/script").is_err());
	}
}
