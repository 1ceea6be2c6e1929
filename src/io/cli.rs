//! Command-line interface for converting images and directories into emoji mosaics

use crate::algorithm::composer::MosaicComposer;
use crate::io::configuration::{DEFAULT_ICON_SIZE, DEFAULT_SPRITE_SHEET, validate_icon_size};
use crate::io::error::{MosaicError, Result};
use crate::io::image::{is_mosaic_output, is_supported_image, load_image, output_path, save_canvas};
use crate::io::progress::ProgressManager;
use crate::spatial::tiles::TileCatalog;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "emoji-mosaic")]
#[command(
    author,
    version,
    about = "Transform an image into a similar image made of emojis"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Image to convert, or a directory of images
    #[arg(short, long = "image", value_name = "TARGET")]
    pub image: PathBuf,

    /// Sprite sheet holding the emoji icons
    #[arg(short, long = "emoji", value_name = "PATH", default_value = DEFAULT_SPRITE_SHEET)]
    pub emoji: PathBuf,

    /// Edge length of every emoji in the sprite sheet, in pixels
    #[arg(
        short,
        long = "sprite-size",
        value_name = "PIXELS",
        default_value_t = DEFAULT_ICON_SIZE,
        allow_negative_numbers = true
    )]
    pub sprite_size: i64,

    /// Directory for the converted images (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Converts every requested image against a single sprite sheet catalog
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The icon size is validated before anything is read from disk, and the
    /// sprite sheet catalog is extracted once for the whole batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the icon size is invalid, the sprite sheet cannot
    /// be loaded, the target is not an image or directory, or any image fails
    /// to convert. Processing stops at the first failure.
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let icon_size = validate_icon_size(self.cli.sprite_size)?;

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let sprite_sheet = load_image(&self.cli.emoji)?.to_rgba8();
        let catalog = TileCatalog::extract(&sprite_sheet, icon_size)?;
        log::info!(
            "Loaded {} icons of {icon_size}x{icon_size} from '{}'",
            catalog.len(),
            self.cli.emoji.display()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let composer = MosaicComposer::from_catalog(&catalog);
        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            written.push(self.process_file(&composer, catalog.len(), file)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.image;
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| MosaicError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| MosaicError::FileSystem {
                        path: target.clone(),
                        operation: "read directory entry",
                        source: e,
                    })?
                    .path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !is_mosaic_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            // Missing targets fail the same way an unreadable image does
            load_image(target).map(|_| vec![target.clone()])
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output = self.output_path(input_path);
        if output.exists() {
            log::warn!(
                "Skipping '{}' (output '{}' exists)",
                input_path.display(),
                output.display()
            );
            false
        } else {
            true
        }
    }

    fn process_file(
        &self,
        composer: &MosaicComposer<'_>,
        tile_count: usize,
        input_path: &Path,
    ) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output = self.output_path(input_path);

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let source = load_image(input_path)?;
        let plan = composer.plan_with_progress(&source, |completed, total| {
            if let Some(ref pm) = self.progress_manager {
                pm.update_rows(completed, total);
            }
        })?;
        let canvas = composer.render(&plan)?;

        // Only a fully composed canvas reaches the destination
        save_canvas(&canvas, &output)?;

        let used = plan.distinct_tiles();
        log::info!(
            "Wrote '{}' ({}x{}, {used} of {tile_count} icons used) in {:.2?}",
            output.display(),
            canvas.width(),
            canvas.height(),
            start_time.elapsed()
        );

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(output)
    }

    fn output_path(&self, input_path: &Path) -> PathBuf {
        output_path(input_path, self.cli.destination.as_deref())
    }
}
