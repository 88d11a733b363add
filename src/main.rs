use log::warn;
use std::env;
use std::process::ExitCode;
use tunet::auth::{login, LoginOutcome};
use tunet::config::ClientConfig;
use tunet::units::format_bytes;
use tunet::usage::query_usage;

// Exit codes: 0 success, 1 transient failure ("try again later"),
// 2 incorrect password or usage error. The original client always exited 0;
// see DESIGN.md for the rationale behind the change.
const EXIT_TRANSIENT: u8 = 1;
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    run(&args[1..])
}

fn run(args: &[String]) -> ExitCode {
    let mut rest = args;

    let mut config = ClientConfig::default();
    if rest.first().map(String::as_str) == Some("--config") {
        let Some(path) = rest.get(1) else {
            eprintln!("--config requires a path");
            return ExitCode::from(EXIT_REJECTED);
        };
        match ClientConfig::load(path) {
            Ok(loaded) => config = loaded,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                return ExitCode::from(EXIT_REJECTED);
            }
        }
        rest = &rest[2..];
    }

    match rest.first().map(String::as_str) {
        Some("login") => {
            let Some(user_name) = rest.get(1) else {
                println!("Please provide user name!");
                return ExitCode::from(EXIT_REJECTED);
            };
            run_login(&config, user_name)
        }
        Some("query") => run_query(&config),
        _ => {
            print_usage();
            ExitCode::from(EXIT_REJECTED)
        }
    }
}

fn run_login(config: &ClientConfig, user_name: &str) -> ExitCode {
    let password = match rpassword::prompt_password(format!("Enter password for {user_name}: ")) {
        Ok(password) => password,
        Err(e) => {
            eprintln!("Failed to read password: {e}");
            return ExitCode::from(EXIT_TRANSIENT);
        }
    };

    match login(config, user_name, &password) {
        Ok(LoginOutcome::Success) => {
            println!("Login successful!");
            ExitCode::SUCCESS
        }
        Ok(LoginOutcome::IncorrectPassword) => {
            println!("Incorrect password!");
            ExitCode::from(EXIT_REJECTED)
        }
        Err(e) => {
            warn!("login failed: {e}");
            println!("Login failed. Please try again later.");
            ExitCode::from(EXIT_TRANSIENT)
        }
    }
}

fn run_query(config: &ClientConfig) -> ExitCode {
    match query_usage(config) {
        Ok(report) => {
            println!("Month usage: {}", format_bytes(report.month_usage));
            println!("Current in: {}", format_bytes(report.current_in));
            println!("Current out: {}", format_bytes(report.current_out));
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("query failed: {e}");
            println!("Query failed. Please try again later.");
            ExitCode::from(EXIT_TRANSIENT)
        }
    }
}

fn print_usage() {
    println!("Usage: tunet [--config <path>] <command> [argument]");
    println!("Commands:");
    println!("  login <username>    log in to the campus network");
    println!("  query               show current traffic usage");
}
