// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "bubble-field")]
#[command(about = "Interactive bubble field viewer", long_about = None)]
pub struct Cli {
    /// Disable the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Equirectangular HDR environment map
    #[arg(long, default_value = "assets/chinese_garden_4k.hdr")]
    pub environment: String,
}
