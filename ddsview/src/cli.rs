use std::path::PathBuf;

use clap::Parser;

use crate::capture::ImageFileFormat;

#[derive(Parser, Debug)]
#[command(name = "ddsview", version, about = "Interactive DDS texture viewer for Direct3D 11")]
pub struct Args {
    /// DDS texture to load at startup. Press O in the viewer to pick another.
    pub texture: Option<PathBuf>,

    /// Initial client width of the window.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial client height of the window.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// MSAA sample count for the swapchain. Falls back to 1 when the
    /// device does not support the requested count.
    #[arg(long, default_value_t = 1)]
    pub samples: u32,

    /// HLSL file to compile instead of the bundled shaders/ddsview.hlsl.
    #[arg(long)]
    pub shader: Option<PathBuf>,

    /// Encoding for F12 screenshots.
    #[arg(long, value_enum, default_value_t = ImageFileFormat::Png)]
    pub screenshot_format: ImageFileFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_sample() {
        let args = Args::try_parse_from(["ddsview"]).unwrap();
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 600);
        assert_eq!(args.samples, 1);
        assert_eq!(args.screenshot_format, ImageFileFormat::Png);
        assert!(args.texture.is_none());
    }

    #[test]
    fn texture_and_options_parse() {
        let args = Args::try_parse_from([
            "ddsview",
            "seafloor.dds",
            "--samples",
            "4",
            "--screenshot-format",
            "bmp",
        ])
        .unwrap();
        assert_eq!(args.texture.as_deref(), Some(std::path::Path::new("seafloor.dds")));
        assert_eq!(args.samples, 4);
        assert_eq!(args.screenshot_format, ImageFileFormat::Bmp);
    }
}
