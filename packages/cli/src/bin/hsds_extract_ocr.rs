//! Local-model variant: OCR the flyer on a local Ollama endpoint, then run
//! structured extraction on the text with a local LLM. No remote API key
//! needed — just Ollama running with the two models pulled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use hsds::{
    ocr_text_path, render_summary, resolve_image_path, write_json, write_text, FlyerImage,
    OcrMode, OllamaClient, DEFAULT_LOCAL_MODEL, DEFAULT_OCR_MODEL, DEFAULT_OUTPUT_PATH,
    LOCAL_MODEL_ENV_VAR, OCR_MODEL_ENV_VAR,
};

/// How much of the OCR text to echo to the console.
const PREVIEW_CHARS: usize = 500;

#[derive(Parser)]
#[command(
    name = "hsds-extract-ocr",
    about = "Extract HSDS data from a flyer using local OCR + a local LLM"
)]
struct Args {
    /// Path to the flyer image (defaults to the bundled sample)
    image: Option<PathBuf>,

    /// OCR speed/quality preset: tiny, small, base, or gundam
    mode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    hsds_cli::init();
    let args = Args::parse();

    let mode = match args.mode.as_deref() {
        None => OcrMode::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid mode '{raw}'. Using 'tiny' instead.");
            OcrMode::Tiny
        }),
    };

    let image_path = resolve_image_path(args.image);

    let ollama = OllamaClient::from_env();
    let ocr_model =
        std::env::var(OCR_MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_OCR_MODEL.to_string());
    let local_model =
        std::env::var(LOCAL_MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOCAL_MODEL.to_string());

    hsds_cli::print_banner("HSDS Flyer Extraction (local OCR)");
    println!("Endpoint:    {}", ollama.endpoint());
    println!("OCR model:   {ocr_model} (mode: {mode})");
    println!("Local model: {local_model}");

    println!("\nLoading image from: {}", image_path.display());
    let image = FlyerImage::from_path(&image_path)
        .with_context(|| format!("cannot load flyer image {}", image_path.display()))?;

    println!("\nRunning OCR...");
    let ocr = ollama
        .ocr_image(&ocr_model, &image, mode)
        .await
        .context("OCR pass failed")?;

    println!(
        "OCR finished in {:.1}s ({} characters)",
        ocr.elapsed.as_secs_f32(),
        ocr.text.len()
    );

    // Truncate at a char boundary so multibyte text can't split a slice.
    let mut preview_end = PREVIEW_CHARS.min(ocr.text.len());
    while !ocr.text.is_char_boundary(preview_end) {
        preview_end -= 1;
    }
    println!("\nFirst {PREVIEW_CHARS} characters:\n{}", &ocr.text[..preview_end]);

    let text_path = ocr_text_path(mode.label());
    write_text(&ocr.text, &text_path).context("cannot save OCR text")?;
    println!("\nFull OCR text saved to: {}", text_path.display());

    println!("\nExtracting HSDS data from OCR text...\n");
    let data = ollama
        .extract_from_text(&local_model, &ocr.text)
        .await
        .context("local extraction failed")?;

    print!("{}", render_summary(&data));

    let output_path = Path::new(DEFAULT_OUTPUT_PATH);
    write_json(&data, output_path).context("cannot write extraction output")?;

    println!(
        "\nHSDS data saved to: {}",
        output_path.display().to_string().bright_green()
    );
    println!("\n{}", "Extraction complete.".bright_green().bold());

    Ok(())
}
