// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Viesti CLI - call console backend endpoints from the terminal
//!
//! Configuration is read from `VIESTI_*` environment variables.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::{Map, Value};

use viesti::{Client, ClientConfig, Credentials, MemorySession, Payload, RequestConfig, SessionState};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("viesti=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "get" => {
            if args.len() < 3 {
                eprintln!("Usage: viesti get <path> [key=value ...]");
                return ExitCode::from(1);
            }
            run_get(&args[2], &args[3..]).await
        }
        "post" => {
            if args.len() < 3 {
                eprintln!("Usage: viesti post <path> [json]");
                return ExitCode::from(1);
            }
            run_post(&args[2], args.get(3).map(String::as_str)).await
        }
        "login" => {
            if args.len() < 4 {
                eprintln!("Usage: viesti login <account> <password>");
                return ExitCode::from(1);
            }
            run_login(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("viesti {}", viesti::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

const USAGE: &str = r#"Viesti - Request layer for the customer console backend

USAGE:
    viesti <COMMAND> [ARGS]

COMMANDS:
    get <path> [key=value ...]    GET an endpoint with query parameters
    post <path> [json]            POST an endpoint with an optional JSON body
    login <account> <password>    Log in and print the user profile
    help                          Show this help message
    version                       Show version information

ENVIRONMENT:
    VIESTI_API_BASE_PATH          Backend base URL (required)
    VIESTI_REQUEST_TIMEOUT_MS     Request timeout in milliseconds (default 60000)
    VIESTI_SUCCESS_CODE           Envelope success code (default 0)
    VIESTI_TRANSFORM_REQUEST_DATA Convert multipart-declared bodies to form data (default true)
    VIESTI_USE_MOCK               Paths carry the mock prefix; it is stripped from
                                  cancellation keys only (default false)
    VIESTI_MOCK_PREFIX            Mock path prefix (default /mock)
    VIESTI_TOKEN                  Token to send with requests
    RUST_LOG                      Log filter, e.g. viesti=debug

EXAMPLES:
    viesti get /tel/customer/list page=1 size=10
    viesti post /tel/sop/updateTaskStatus '{"id": 3, "status": true}'
    viesti login admin secret
"#;

fn print_usage() {
    print!("{}", USAGE);
}

/// Client with a session seeded from `VIESTI_TOKEN`
fn build_client() -> anyhow::Result<(Client, Arc<MemorySession>)> {
    let config = ClientConfig::from_env().context("Invalid configuration")?;
    let session = Arc::new(MemorySession::new());
    if let Ok(token) = env::var("VIESTI_TOKEN") {
        session.set_token(token);
    }
    let client = Client::builder(config)
        .session(session.clone())
        .build()
        .context("Failed to create client")?;
    Ok((client, session))
}

/// Parse `key=value` arguments; values that look like JSON scalars stay typed
fn parse_params(args: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut params = Map::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected key=value, got {:?}", arg);
        };
        if key.is_empty() {
            bail!("Empty parameter name in {:?}", arg);
        }
        let value = serde_json::from_str::<Value>(value)
            .ok()
            .filter(|v| !v.is_object() && !v.is_array())
            .unwrap_or_else(|| Value::String(value.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

fn print_payload(payload: Payload) {
    match payload {
        Payload::Json(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", value),
        },
        Payload::Blob(bytes) => println!("<{} bytes>", bytes.len()),
    }
}

fn report(err: &viesti::Error) -> ExitCode {
    eprintln!("Request failed: {}", err);
    if let Some(code) = err.business_code() {
        eprintln!("Business code: {}", code);
    }
    if err.is_auth_expired() {
        return ExitCode::from(3);
    }
    ExitCode::from(2)
}

async fn run_get(path: &str, raw_params: &[String]) -> ExitCode {
    let params = match parse_params(raw_params) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };
    let (client, _) = match build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let config = match RequestConfig::new(path).params(&params) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid parameters: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.get(config).await {
        Ok(payload) => {
            print_payload(payload);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn run_post(path: &str, body: Option<&str>) -> ExitCode {
    let (client, _) = match build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let mut config = RequestConfig::new(path);
    if let Some(body) = body {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Body is not valid JSON: {}", e);
                return ExitCode::from(1);
            }
        };
        config = match config.data(&value) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Invalid body: {}", e);
                return ExitCode::from(1);
            }
        };
    }

    match client.post(config).await {
        Ok(payload) => {
            print_payload(payload);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn run_login(account: &str, password: &str) -> ExitCode {
    let (client, session) = match build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    match session
        .login(&client, Credentials::new(account, password))
        .await
    {
        Ok(profile) => {
            println!("Logged in as {}", profile.display_name());
            if let Some(corporation) = &profile.corporation {
                println!("Corporation: {}", corporation);
            }
            println!("Token: {}", session.token());
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_typed() {
        let params = parse_params(&[
            "page=1".to_string(),
            "name=a b".to_string(),
            "flag=true".to_string(),
        ])
        .unwrap();
        assert_eq!(params["page"], Value::from(1));
        assert_eq!(params["name"], Value::from("a b"));
        assert_eq!(params["flag"], Value::from(true));
    }

    #[test]
    fn test_parse_params_rejects_bare_word() {
        assert!(parse_params(&["page".to_string()]).is_err());
        assert!(parse_params(&["=1".to_string()]).is_err());
    }

    #[test]
    fn test_usage_lists_every_setting() {
        use viesti::config::env;

        for var in [
            env::API_BASE_PATH,
            env::REQUEST_TIMEOUT_MS,
            env::SUCCESS_CODE,
            env::TRANSFORM_REQUEST_DATA,
            env::USE_MOCK,
            env::MOCK_PREFIX,
        ] {
            assert!(USAGE.contains(var), "usage is missing {}", var);
        }
    }
}
