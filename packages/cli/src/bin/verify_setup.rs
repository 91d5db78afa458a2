//! Setup verification for the extraction pipelines.
//!
//! Checks credentials, the sample image, and the local Ollama endpoint,
//! then prints a pass/fail summary. Exits non-zero if any check fails.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use hsds::{
    OllamaClient, DEFAULT_IMAGE_PATH, DEFAULT_LOCAL_MODEL, DEFAULT_OCR_MODEL,
    LOCAL_MODEL_ENV_VAR, OCR_MODEL_ENV_VAR,
};

#[derive(Parser)]
#[command(
    name = "verify-setup",
    about = "Check that the HSDS extraction tools are ready to run"
)]
struct Args {}

fn mark(ok: bool) -> colored::ColoredString {
    if ok {
        "✓".bright_green()
    } else {
        "✗".bright_red()
    }
}

fn check(label: &str, ok: bool) -> bool {
    println!("{} {label}", mark(ok));
    ok
}

#[tokio::main]
async fn main() -> ExitCode {
    hsds_cli::init();
    let _ = Args::parse();

    hsds_cli::print_banner("HSDS Extraction Setup Verification");
    let mut results: Vec<bool> = Vec::new();

    println!("\n--- Remote extraction (hsds-extract) ---");
    let has_key = std::env::var("OPENAI_API_KEY").map_or(false, |v| !v.is_empty());
    results.push(check("OPENAI_API_KEY is set", has_key));
    if !has_key {
        println!("  Set it in a .env file or export it in your shell.");
    }

    println!("\n--- Sample input ---");
    let sample_exists = Path::new(DEFAULT_IMAGE_PATH).exists();
    results.push(check(
        &format!("Default flyer image exists ({DEFAULT_IMAGE_PATH})"),
        sample_exists,
    ));
    if !sample_exists {
        println!("  Pass an image path explicitly, or place one at the default path.");
    }

    println!("\n--- Local extraction (hsds-extract-ocr) ---");
    let ollama = OllamaClient::from_env();
    let reachable = ollama.is_available().await;
    results.push(check(
        &format!("Ollama API is reachable at {}", ollama.endpoint()),
        reachable,
    ));

    if reachable {
        let ocr_model =
            std::env::var(OCR_MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_OCR_MODEL.to_string());
        let local_model =
            std::env::var(LOCAL_MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOCAL_MODEL.to_string());

        match ollama.list_models().await {
            Ok(models) => {
                for wanted in [&ocr_model, &local_model] {
                    // Tags usually carry a version suffix (e.g. ":latest"),
                    // so match on the name prefix.
                    let present = models.iter().any(|m| m.starts_with(wanted.as_str()));
                    results.push(check(&format!("Model '{wanted}' is available"), present));
                    if !present {
                        println!("  Run: ollama pull {wanted}");
                    }
                }
            }
            Err(e) => {
                results.push(check(&format!("Model list readable ({e})"), false));
            }
        }
    } else {
        println!("  Make sure Ollama is running: ollama serve");
    }

    let passed = results.iter().filter(|&&ok| ok).count();
    let total = results.len();

    hsds_cli::print_banner("VERIFICATION SUMMARY");
    println!("\nPassed: {passed}/{total} checks");

    if passed == total {
        println!(
            "\n{} All checks passed. You're ready to run an extraction.",
            mark(true)
        );
        println!("\nNext steps:");
        println!("  hsds-extract [image]            remote extraction");
        println!("  hsds-extract-ocr [image] [mode] local OCR variant");
        ExitCode::SUCCESS
    } else {
        println!(
            "\n{} Some checks failed. Address the issues above and re-run.",
            mark(false)
        );
        ExitCode::FAILURE
    }
}
