//! auxpow-rs client.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate env_logger;

extern crate chain;
extern crate logs;
extern crate network;
extern crate primitives;
extern crate serialization as ser;
extern crate verification;

mod commands;
mod config;

pub const LOG_INFO: &str = "info";

fn main() {
	if let Err(err) = run() {
		error!("{}", err);
		std::process::exit(1);
	}
}

fn run() -> Result<(), String> {
	let yaml = load_yaml!("cli.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();
	let cfg = config::parse(&matches)?;

	if !cfg.quiet {
		if cfg!(windows) {
			logs::init(LOG_INFO, logs::DateLogFormatter);
		} else {
			logs::init(LOG_INFO, logs::DateAndColorLogFormatter);
		}
	} else {
		env_logger::init();
	}

	match matches.subcommand() {
		("check", Some(check_matches)) => commands::check(&cfg, check_matches),
		("template", Some(template_matches)) => commands::template(&cfg, template_matches),
		("params", Some(params_matches)) => commands::params(&cfg, params_matches),
		_ => commands::params(&cfg, &clap::ArgMatches::default()),
	}
}
