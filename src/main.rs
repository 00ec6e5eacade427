// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! easyhttp CLI
//!
//! Issues one request through the default facade and prints the response.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use easyhttp::http::VERBS;
use easyhttp::{Facade, Http, RequestOptions, Response};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("easyhttp=info".parse().expect("static directive parses")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("easyhttp {}", easyhttp::VERSION);
            ExitCode::SUCCESS
        }
        verb if VERBS.contains(&verb.to_ascii_lowercase().as_str()) => {
            if args.len() < 3 {
                eprintln!("Usage: easyhttp {} <url> [json-body]", verb);
                return ExitCode::from(1);
            }
            match send(verb, &args[2], args.get(3).map(String::as_str)).await {
                Ok(response) => report(&response),
                Err(e) => {
                    eprintln!("Request failed: {:#}", e);
                    ExitCode::from(1)
                }
            }
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"easyhttp - send one HTTP request and inspect the response

USAGE:
    easyhttp <VERB> <url> [json-body]

VERBS:
    get, head, delete, options, post, put, patch

OPTIONS:
    help            Show this help message
    version         Show version information

EXAMPLES:
    easyhttp get https://httpbin.org/json
    easyhttp post https://httpbin.org/post '{{"name":"aino"}}'

Set RUST_LOG=easyhttp=debug to log request timing.
"#
    );
}

async fn send(verb: &str, url: &str, body: Option<&str>) -> anyhow::Result<Response> {
    let mut options = RequestOptions::new();
    if let Some(body) = body {
        let json: serde_json::Value =
            serde_json::from_str(body).context("request body is not valid JSON")?;
        options = options.json(&json)?;
    }

    let response = Http::call(verb, url, options)
        .await
        .with_context(|| format!("{} {}", verb.to_ascii_uppercase(), url))?;
    Ok(response)
}

fn report(response: &Response) -> ExitCode {
    println!(
        "{} {} ({}ms)",
        response.status(),
        response.url(),
        response.response_time_ms()
    );

    let mut headers: Vec<_> = response.headers().into_iter().collect();
    headers.sort();
    for (name, values) in headers {
        println!("{}: {}", name, values.join(", "));
    }
    println!();

    if response.json().is_null() {
        println!("{}", response);
    } else {
        match serde_json::to_string_pretty(response.json()) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", response),
        }
    }

    match response.throw_if_error() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}
