//! Interactive Vietnamese chat demo
//!
//! Reads lines from stdin, prints the detected intent, its entities and the
//! response. Settings come from `config/` and `VIET_INTENT__*` variables;
//! `VIET_INTENT_ENV` selects the environment file.
//!
//! Run with: cargo run -p viet-intent-text-processing --example chat_demo

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use viet_intent_config::{load_settings, Settings};
use viet_intent_text_processing::{DetectionResult, IntentEngine};

const EXIT_WORDS: &[&str] = &["quit", "exit", "thoát", "thoat"];

fn main() -> anyhow::Result<()> {
    let env = std::env::var("VIET_INTENT_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing(&settings);

    let engine = if settings.model.path.is_some() || settings.model.load_defaults {
        IntentEngine::from_settings(&settings).context("invalid engine settings")?
    } else {
        IntentEngine::with_default_intents()
    };
    for warning in engine.load_warnings() {
        tracing::warn!("{}", warning);
    }
    tracing::info!(intents = engine.len(), "Engine ready");

    println!("Chatbot tiếng Việt. Gõ 'thoát' để kết thúc.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            println!("Tạm biệt!");
            break;
        }

        let result = engine.detect(input);
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &DetectionResult) {
    println!("  intent:     {} ({:.2})", result.intent, result.confidence);
    if let Some(guess) = &result.best_guess {
        println!("  best guess: {} ({:.2})", guess.intent, guess.confidence);
    }

    let mut names: Vec<&String> = result.entities.keys().collect();
    names.sort();
    for name in names {
        let entity = &result.entities[name];
        match &entity.unit {
            Some(unit) => println!("  {}: {} {}", name, entity.value, unit),
            None => println!("  {}: {}", name, entity.value),
        }
    }

    let response = if result.is_unknown() {
        "Xin lỗi, tôi chưa hiểu ý bạn.".to_string()
    } else {
        render(&result.response_template)
    };
    println!("{}", response);
}

/// Fill the placeholders the built-in responses use
fn render(template: &str) -> String {
    template.replace("{time}", &chrono::Local::now().format("%H:%M").to_string())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("viet_intent={},warn", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().with_writer(io::stderr).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}
