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
use chrono::Local;
use log::LevelFilter;
use std::sync::Once;

/// Routes log records to stderr so they never mix with report output on
/// stdout. Only the first call has any effect.
pub fn init_logger(level: LevelFilter) {
	static INIT_LOGGER: Once = Once::new();

	INIT_LOGGER.call_once(|| {
		let result = fern::Dispatch::new()
			.format(|out, message, record| {
				out.finish(format_args!(
					"[{}][{}][{}] {}",
					Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
					record.level(),
					record.target(),
					message
				))
			})
			.level(LevelFilter::Warn)
			.level_for("cambio", level)
			.chain(std::io::stderr())
			.apply();

		if let Err(e) = result {
			eprintln!("failed to initialize logging: {}", e);
		}
	})
}
