//! Extract HSDS data from a community services flyer image.
//!
//! One optional positional argument: the image path. Needs
//! `OPENAI_API_KEY` in the environment or a `.env` file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use hsds::{
    render_summary, resolve_image_path, write_json, FlyerExtractor, FlyerImage,
    DEFAULT_OUTPUT_PATH,
};

#[derive(Parser)]
#[command(
    name = "hsds-extract",
    about = "Extract HSDS data from a community services flyer image"
)]
struct Args {
    /// Path to the flyer image (defaults to the bundled sample)
    image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    hsds_cli::init();
    let args = Args::parse();

    // Credential check first: fail fast before touching the image.
    let extractor =
        FlyerExtractor::from_env().context("OpenAI configuration is incomplete")?;

    let image_path = resolve_image_path(args.image);

    println!("Loading image from: {}", image_path.display());
    let image = FlyerImage::from_path(&image_path)
        .with_context(|| format!("cannot load flyer image {}", image_path.display()))?;

    println!("\nExtracting HSDS data from flyer...");
    println!("This may take a moment while the model reads the image...\n");

    let data = extractor
        .extract(&image)
        .await
        .context("extraction failed")?;

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
