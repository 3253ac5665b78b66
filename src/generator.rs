// Texture generation: load the inputs, build the three variants, write them out.
// Nothing is written until all three images exist in memory, and a failed
// write removes whatever this run already put on disk.

use crate::compositor::apply_mask;
use crate::config::{MASKED_FILE, NORMAL_FILE, OUTPUT_HEIGHT, OUTPUT_WIDTH, REVERSE_FILE};
use crate::error::{Error, Result};
use crate::tiler::{TileOrder, tile};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Decoded inputs.
pub struct Inputs {
    pub texture: DynamicImage,
    pub mask: DynamicImage,
}

/// The three generated images.
pub struct Mosaics {
    pub normal: RgbImage,
    pub masked: RgbaImage,
    pub reverse: RgbImage,
}

/// Where each output ended up.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub normal: PathBuf,
    pub masked: PathBuf,
    pub reverse: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            normal: dir.join(NORMAL_FILE),
            masked: dir.join(MASKED_FILE),
            reverse: dir.join(REVERSE_FILE),
        }
    }
}

/// Check both paths exist, then decode them.
///
/// # Errors
///
/// [`Error::FileNotFound`] for a missing path (texture checked first),
/// [`Error::DecodeFailure`] for a file that is not a readable image.
pub fn load_inputs(texture: &Path, mask: &Path) -> Result<Inputs> {
    for (role, path) in [("texture", texture), ("mask", mask)] {
        if !path.exists() {
            return Err(Error::FileNotFound { role, path: path.to_path_buf() });
        }
    }
    let texture_img = open_image("texture", texture)?;
    let mask_img = open_image("mask", mask)?;

    info!(
        texture = %file_name(texture), size = ?(texture_img.width(), texture_img.height()),
        mask = %file_name(mask), mask_size = ?(mask_img.width(), mask_img.height()),
        "inputs loaded"
    );
    Ok(Inputs { texture: texture_img, mask: mask_img })
}

fn open_image(role: &'static str, path: &Path) -> Result<DynamicImage> {
    let fail = |source| Error::DecodeFailure { role, path: path.to_path_buf(), source };
    // Sniff the content rather than trusting the extension.
    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| fail(image::ImageError::IoError(e)))?
        .decode()
        .map_err(fail)
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Build normal, masked and reverse mosaics at the fixed output size.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] when the mask cannot provide opacity.
pub fn build_mosaics(inputs: &Inputs) -> Result<Mosaics> {
    let size = (OUTPUT_WIDTH, OUTPUT_HEIGHT);
    let normal = tile(&inputs.texture, size, TileOrder::Forward);
    let masked = apply_mask(&normal, &inputs.mask)?;
    let reverse = tile(&inputs.texture, size, TileOrder::Reverse);
    Ok(Mosaics { normal, masked, reverse })
}

/// Write all three mosaics as PNG into `dir`, creating it if needed.
///
/// # Errors
///
/// [`Error::CreateDir`] or [`Error::Encode`]; on an encode failure the files
/// written so far in this call are removed again.
pub fn save_mosaics(mosaics: &Mosaics, dir: &Path) -> Result<OutputPaths> {
    fs::create_dir_all(dir).map_err(|source| Error::CreateDir { path: dir.to_path_buf(), source })?;
    let paths = OutputPaths::in_dir(dir);

    let jobs: [(&Path, &dyn Fn(&Path) -> image::ImageResult<()>); 3] = [
        (paths.normal.as_path(), &|p: &Path| mosaics.normal.save_with_format(p, ImageFormat::Png)),
        (paths.masked.as_path(), &|p: &Path| mosaics.masked.save_with_format(p, ImageFormat::Png)),
        (paths.reverse.as_path(), &|p: &Path| mosaics.reverse.save_with_format(p, ImageFormat::Png)),
    ];

    let mut written: Vec<&Path> = Vec::with_capacity(jobs.len());
    for (path, save) in jobs {
        if let Err(source) = save(path) {
            for done in written {
                if let Err(e) = fs::remove_file(done) {
                    warn!(path = %done.display(), error = %e, "could not remove partial output");
                }
            }
            return Err(Error::Encode { path: path.to_path_buf(), source });
        }
        info!(path = %path.display(), "written");
        written.push(path);
    }
    Ok(paths)
}

/// Load, build and persist in one go.
///
/// # Errors
///
/// Any error from [`load_inputs`], [`build_mosaics`] or [`save_mosaics`].
pub fn generate(texture: &Path, mask: &Path, dir: &Path) -> Result<(Mosaics, OutputPaths)> {
    let inputs = load_inputs(texture, mask)?;
    info!(width = OUTPUT_WIDTH, height = OUTPUT_HEIGHT, "building mosaics");
    let mosaics = build_mosaics(&inputs)?;
    let paths = save_mosaics(&mosaics, dir)?;
    Ok((mosaics, paths))
}

impl Mosaics {
    /// Owned copies in the form the viewer takes: (normal, reverse, masked).
    pub fn for_viewer(&self) -> (DynamicImage, DynamicImage, DynamicImage) {
        (
            DynamicImage::ImageRgb8(self.normal.clone()),
            DynamicImage::ImageRgb8(self.reverse.clone()),
            DynamicImage::ImageRgba8(self.masked.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_use_fixed_names() {
        let paths = OutputPaths::in_dir(Path::new("out"));
        assert_eq!(paths.normal, Path::new("out/mosaic_normal_1920x1080.png"));
        assert_eq!(paths.masked, Path::new("out/mosaic_with_mask_1920x1080.png"));
        assert_eq!(paths.reverse, Path::new("out/mosaic_reverse_1920x1080.png"));
    }

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name(Path::new("a/b/tex.png")), "tex.png");
    }
}
