// src/main.rs

//! Renders a line of text with a bitmap font and writes it to a PNG.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use sprite_font::{Align, BitmapFont, Font, FontOptions, RenderOptions, Rgb, DEFAULT_CHAR};

/// Render text with a sprite-sheet font
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the font descriptor (JSON)
    descriptor: PathBuf,

    /// Text to render; a literal `\n` starts a new line
    text: String,

    /// Output image
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Glyph height in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Foreground color: name, `#RRGGBB` or `0xRRGGBB`
    #[arg(short, long, value_parser = Rgb::parse)]
    color: Option<Rgb>,

    /// Character and line spacing as `H,V`
    #[arg(long, value_parser = parse_spacing)]
    spacing: Option<(u32, u32)>,

    /// Row alignment: LEFT, RIGHT or CENTER
    #[arg(short, long, default_value = "LEFT")]
    align: String,

    /// Substitute for characters the font lacks
    #[arg(long, default_value_t = DEFAULT_CHAR)]
    default_char: char,
}

fn parse_spacing(value: &str) -> Result<(u32, u32)> {
    let (h, v) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("expected H,V, got {:?}", value))?;
    Ok((h.trim().parse()?, v.trim().parse()?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    let mut options = FontOptions::new(&args.descriptor).with_default_char(args.default_char);
    options.size = args.size;
    options.spacing = args.spacing;

    let font = Font::load(&options)
        .with_context(|| format!("Failed to load font {}", args.descriptor.display()))?;

    let text = args.text.replace("\\n", "\n");
    let mut render_options = RenderOptions::new().with_align(Align::parse(&args.align));
    render_options.color = args.color;

    let rendered = font.render(&text, &render_options).context("Failed to render text")?;
    rendered
        .surface
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        "Wrote {} ({}x{})",
        args.output.display(),
        rendered.rect.width,
        rendered.rect.height
    );
    Ok(())
}
