use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use noice::convert_bytes;

/// Convert an image to the compact indexed-color Noice format.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path (any format the image crate decodes)
    input: PathBuf,

    /// Output .noice path
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let bytes = fs::read(&args.input)
        .with_context(|| format!("unable to read {}", args.input.display()))?;
    let conversion = convert_bytes(&bytes)
        .with_context(|| format!("unable to convert {}", args.input.display()))?;

    for entry in &conversion.palette.entries {
        let c = entry.color;
        println!("{:02x}{:02x}{:02x} {:02x} {}", c.r, c.g, c.b, c.a, entry.popularity);
    }

    if conversion.dropped_pixels > 0 {
        for c in &conversion.dropped_sample {
            eprintln!(
                "Warning - ignored #{:02x}{:02x}{:02x} alpha {:02x}",
                c.r, c.g, c.b, c.a
            );
        }
        eprintln!(
            "Warning - color table full, {} pixels not counted",
            conversion.dropped_pixels
        );
    }

    fs::write(&args.output, &conversion.data)
        .with_context(|| format!("unable to write {}", args.output.display()))?;

    Ok(())
}
