use anyhow::Result;
use clap::Parser;
use png_icon_gen::icon_gen::{self, Options, Palette, DEFAULT_OUTPUT};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "png-icon-gen",
    about = "Generate the 32x32 development placeholder icon"
)]
struct Args {
    /// Output PNG file. The parent directory must exist; an existing file is overwritten.
    #[clap(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Color of the glyph (CSS color format) [default: #ffffff]
    #[clap(long, value_name = "COLOR")]
    foreground: Option<String>,

    /// Color of the background (CSS color format) [default: #0064c8]
    #[clap(long, value_name = "COLOR")]
    background: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = Options {
        output: args.output,
        palette: Palette::from_css(args.foreground.as_deref(), args.background.as_deref())?,
    };

    icon_gen::generate_icon(&options)
}
