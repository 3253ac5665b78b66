// What you SEE now:
// • Three 1920x1080 PNGs appear in `mosaic_textures/` (normal, masked, reverse).
// • A 1280x720 window opens: the masked mosaic sits on top of a background that
//   either flips between normal/reverse (--mode cycle) or scrolls through them
//   (--mode scroll).
// • SPACE pauses/resumes. In scroll mode + and - change the speed. ESC quits.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use mosaic_texture::config::{self, ViewerConfig, ViewerMode};
use mosaic_texture::generator::{self, OutputPaths};
use mosaic_texture::viewer::Viewer;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "mosaic-texture", version, about = "Generate 1920x1080 mosaic textures and preview them")]
struct Cli {
    /// Texture to repeat (asked for interactively when omitted)
    #[arg(value_name = "TEXTURE")]
    texture: Option<PathBuf>,

    /// Mask whose alpha or luminance cuts the normal mosaic
    #[arg(value_name = "MASK")]
    mask: Option<PathBuf>,

    /// How the background moves in the viewer
    #[arg(short, long, value_enum, default_value_t = ViewerMode::Cycle)]
    mode: ViewerMode,

    /// Where the PNGs are written
    #[arg(short, long, value_name = "DIR", default_value = config::OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Generate only; do not open the viewer
    #[arg(long)]
    no_view: bool,

    /// Draw a status line in the viewer
    #[arg(long)]
    hud: bool,

    /// Viewer frame rate
    #[arg(long, default_value_t = config::FRAME_RATE)]
    fps: u32,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("mosaic_texture={level}").parse().context("log directive")?);
    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    println!("=== Mosaic texture generator {}x{} ===", config::OUTPUT_WIDTH, config::OUTPUT_HEIGHT);

    // Both paths come from the command line, or both are asked for.
    let (texture, mask) = match (cli.texture.clone(), cli.mask.clone()) {
        (Some(t), Some(m)) => (t, m),
        _ => (prompt_path("Path to texture file: ")?, prompt_path("Path to mask file (PNG): ")?),
    };

    let (mosaics, paths) = match generator::generate(&texture, &mask, &cli.output_dir) {
        Ok(done) => done,
        Err(e) => {
            // User-facing failure: explain, wait, leave without output.
            println!("\nError: {e}");
            wait_for_enter("Press Enter to exit...")?;
            return Ok(());
        }
    };
    println!("All textures created in '{}'", paths.dir.display());

    if !cli.no_view {
        let viewer_config = ViewerConfig {
            mode: cli.mode,
            frame_rate: cli.fps,
            show_hud: cli.hud,
            ..ViewerConfig::default()
        };
        let (normal, reverse, masked) = mosaics.for_viewer();
        drop(mosaics);
        let mut viewer = Viewer::new(viewer_config, &normal, &reverse, &masked);
        viewer.run().context("viewer")?;
        info!("demo finished");
    }

    print_summary(&paths);
    Ok(())
}

fn print_summary(paths: &OutputPaths) {
    println!("\nCreated files ({}x{}):", config::OUTPUT_WIDTH, config::OUTPUT_HEIGHT);
    println!("  • {} - normal mosaic", config::NORMAL_FILE);
    println!("  • {} - mosaic cut by the mask", config::MASKED_FILE);
    println!("  • {} - reverse mosaic", config::REVERSE_FILE);
    let location = std::fs::canonicalize(&paths.dir).unwrap_or_else(|_| paths.dir.clone());
    println!("\nOutput directory:\n  {}", location.display());
}

/// Ask for a path on stdin; quotes and surrounding blanks are dropped
/// so drag-and-dropped paths work.
fn prompt_path(question: &str) -> Result<PathBuf> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("reading path from stdin")?;
    Ok(clean_path(&line))
}

fn clean_path(raw: &str) -> PathBuf {
    Path::new(raw.trim().trim_matches(|c| c == '"' || c == '\'')).to_path_buf()
}

fn wait_for_enter(message: &str) -> Result<()> {
    print!("{message}");
    io::stdout().flush()?;
    let mut sink = String::new();
    io::stdin().lock().read_line(&mut sink)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaned_paths_lose_quotes_and_blanks() {
        assert_eq!(clean_path("  \"my tex.png\"\n"), PathBuf::from("my tex.png"));
        assert_eq!(clean_path("'m.png'"), PathBuf::from("m.png"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["mosaic-texture", "t.png", "m.png"]);
        assert_eq!(cli.mode, ViewerMode::Cycle);
        assert_eq!(cli.output_dir, PathBuf::from("mosaic_textures"));
        assert!(!cli.no_view);

        let cli = Cli::parse_from(["mosaic-texture", "--mode", "scroll", "--no-view"]);
        assert_eq!(cli.mode, ViewerMode::Scroll);
        assert!(cli.texture.is_none());
    }
}
