extern crate ansi_term;
extern crate env_logger;
extern crate log;
extern crate time;

use ansi_term::Colour as Color;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;

fn strftime() -> String {
	time::strftime("%Y-%m-%d %H:%M:%S %Z", &time::now()).unwrap_or_default()
}

pub trait LogFormatter: Send + Sync + 'static {
	fn format(&self, log_record: &Record) -> String;
}

pub struct DateLogFormatter;

impl LogFormatter for DateLogFormatter {
	fn format(&self, record: &Record) -> String {
		let timestamp = strftime();
		format!("{} {} {} {}", timestamp, record.level(), record.target(), record.args())
	}
}

pub struct DateAndColorLogFormatter;

impl LogFormatter for DateAndColorLogFormatter {
	fn format(&self, record: &Record) -> String {
		let timestamp = strftime();
		format!(
			"{} {} {} {}",
			Color::Black.bold().paint(timestamp),
			record.level(),
			Color::Fixed(8).paint(record.target()),
			record.args()
		)
	}
}

/// Installs the global logger. `RUST_LOG` directives are applied after `filters`.
pub fn init<T>(filters: &str, formatter: T)
where
	T: LogFormatter,
{
	let mut builder = Builder::new();

	let filters = match env::var("RUST_LOG") {
		Ok(env_filters) => format!("{},{}", filters, env_filters),
		Err(_) => filters.into(),
	};

	builder.parse_filters(&filters);
	builder.format(move |buf, record| writeln!(buf, "{}", formatter.format(record)));
	builder.init();
}

#[cfg(test)]
mod tests {
	use super::{DateAndColorLogFormatter, DateLogFormatter, LogFormatter};
	use log::{Level, Record};

	#[test]
	fn test_date_log_formatter() {
		let line = DateLogFormatter.format(
			&Record::builder()
				.args(format_args!("auxpow rejected"))
				.level(Level::Warn)
				.target("verification")
				.build(),
		);
		assert!(line.ends_with(" WARN verification auxpow rejected"));
	}

	#[test]
	fn test_color_log_formatter_keeps_message() {
		let line = DateAndColorLogFormatter.format(
			&Record::builder()
				.args(format_args!("auxpow rejected"))
				.level(Level::Debug)
				.target("verification")
				.build(),
		);
		assert!(line.contains("DEBUG"));
		assert!(line.ends_with("auxpow rejected"));
	}
}
