//! Sampling CLI command handlers

use std::path::Path;

use crate::cli::commands::{load_config, SampleArgs};
use crate::error::Result;
use crate::theme::color::{appearance_directive, Rgb};
use crate::theme::sampler::sample_dominant;
use crate::theme::surface::ImageSurface;

/// Handle `tint sample`
pub fn handle_sample(args: SampleArgs, config_path: &Path) -> Result<()> {
    let offset = match args.offset {
        Some(offset) => offset,
        None => load_config(config_path)?.status_bar_inset,
    };

    let surface = ImageSurface::open(&args.image)?;
    let color = sample_dominant(&surface, offset)?;

    println!("Dominant color: {}", color);
    print_directive(color);
    Ok(())
}

/// Handle `tint appearance`
pub fn handle_appearance(color: &str) -> Result<()> {
    let color: Rgb = color.parse()?;
    print_directive(color);
    Ok(())
}

fn print_directive(color: Rgb) {
    let appearance = appearance_directive(color);
    println!("Luminance:      {:.3}", color.luminance());
    println!("Appearance:     {} ({})", appearance, appearance.display_name());
}
