//! Tests for block matching, compositing and the alpha paste mask

#[cfg(test)]
mod tests {
    use crate::support::{BLUE, GREEN, RED, TRANSPARENT, sheet, solid};
    use emoji_mosaic::algorithm::composer::{
        MosaicComposer, blend_channel, compose, paste_masked,
    };
    use emoji_mosaic::analysis::signature::signature;
    use emoji_mosaic::spatial::TileCatalog;
    use emoji_mosaic::MosaicError;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn primary_catalog(icon_size: u32) -> TileCatalog {
        TileCatalog::extract(&sheet(icon_size, 1, 3, &[BLUE, RED, GREEN]), icon_size).unwrap()
    }

    // Left half opaque blue, right half transparent
    fn half_transparent_tile(icon_size: u32) -> RgbaImage {
        RgbaImage::from_fn(icon_size, icon_size, |x, _| {
            if x < icon_size / 2 {
                Rgba(BLUE)
            } else {
                Rgba(TRANSPARENT)
            }
        })
    }

    // Tests a solid red source picks the red icon for every block
    // Verified by selecting the farthest icon
    #[test]
    fn test_solid_red_source_selects_red_icon() {
        let catalog = primary_catalog(4);
        let composer = MosaicComposer::from_catalog(&catalog);
        let source = DynamicImage::ImageRgba8(solid(16, 12, RED));

        let plan = composer.plan(&source).unwrap();
        assert_eq!(plan.assignments().dim(), (3, 4));
        assert!(plan.assignments().iter().all(|&index| index == 1));

        let canvas = composer.render(&plan).unwrap();
        assert!(canvas.pixels().all(|pixel| *pixel == Rgb([255, 0, 0])));
    }

    // Tests the canvas is truncated to whole icons
    // Verified by sizing the canvas from the source dimensions
    #[test]
    fn test_canvas_dimensions_are_block_aligned() {
        let catalog = primary_catalog(5);
        let composer = MosaicComposer::from_catalog(&catalog);

        for (width, height) in [(5, 5), (23, 17), (50, 49)] {
            let source = DynamicImage::ImageRgba8(solid(width, height, GREEN));
            let canvas = composer.compose(&source).unwrap();
            assert_eq!(
                canvas.dimensions(),
                (width - width % 5, height - height % 5)
            );
        }
    }

    // Tests transparent icon pixels keep the white background
    // Verified by pasting without the alpha mask
    #[test]
    fn test_transparent_pixels_keep_background() {
        let tiles = vec![half_transparent_tile(4)];
        let signatures: Vec<_> = tiles.iter().map(signature).collect();
        let source = DynamicImage::ImageRgba8(solid(8, 4, RED));

        let canvas = compose(&source, 4, &tiles, &signatures).unwrap();

        assert_eq!(canvas.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(3, 3), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(4, 1), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(7, 2), &Rgb([255, 255, 255]));
    }

    // Tests a custom background shows through transparent pixels
    // Verified by ignoring the configured background
    #[test]
    fn test_custom_background() {
        let tiles = vec![half_transparent_tile(2)];
        let signatures: Vec<_> = tiles.iter().map(signature).collect();
        let composer = MosaicComposer::new(2, &tiles, &signatures)
            .unwrap()
            .with_background(Rgb([0, 0, 0]));

        let canvas = composer
            .compose(&DynamicImage::ImageRgba8(solid(2, 2, RED)))
            .unwrap();

        assert_eq!(canvas.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(composer.icon_size(), 2);
    }

    // Tests the paste mask blends partially transparent pixels
    // Verified by overwriting regardless of alpha
    #[test]
    fn test_paste_masked_blending() {
        let mut canvas = RgbImage::from_pixel(3, 1, Rgb([255, 255, 255]));
        let mut tile = RgbaImage::new(3, 1);
        tile.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        tile.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        tile.put_pixel(2, 0, Rgba([0, 0, 0, 128]));

        paste_masked(&mut canvas, &tile, 0, 0);

        assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(2, 0), &Rgb([127, 127, 127]));
    }

    // Tests pixels beyond the canvas edge are skipped
    // Verified by removing the bounds check
    #[test]
    fn test_paste_masked_clips_at_edge() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        paste_masked(&mut canvas, &solid(2, 2, RED), 1, 1);

        assert_eq!(canvas.get_pixel(1, 1), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    // Tests channel blending endpoints and rounding
    // Verified by truncating instead of rounding
    #[test]
    fn test_blend_channel() {
        assert_eq!(blend_channel(200, 100, 0), 100);
        assert_eq!(blend_channel(200, 100, 255), 200);
        assert_eq!(blend_channel(255, 0, 128), 128);
        assert_eq!(blend_channel(0, 255, 128), 127);
    }

    // Tests repeated composition is byte-identical
    // Verified by breaking ties by a changing counter
    #[test]
    fn test_composition_is_deterministic() {
        let catalog = primary_catalog(3);
        let source = DynamicImage::ImageRgba8(RgbaImage::from_fn(31, 20, |x, y| {
            Rgba([(x * 8) as u8, (y * 12) as u8, ((x + y) * 5) as u8, 255])
        }));

        let composer = MosaicComposer::from_catalog(&catalog);
        let first = composer.compose(&source).unwrap();
        let second = composer.compose(&source).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }

    // Tests sources smaller than one icon are rejected
    // Verified by padding undersized sources
    #[test]
    fn test_undersized_source_is_invalid_input() {
        let catalog = primary_catalog(8);
        let composer = MosaicComposer::from_catalog(&catalog);

        let narrow = DynamicImage::ImageRgba8(solid(7, 40, RED));
        let short = DynamicImage::ImageRgba8(solid(40, 7, RED));

        assert!(composer.compose(&narrow).unwrap_err().is_invalid_input());
        assert!(composer.compose(&short).unwrap_err().is_invalid_input());
    }

    // Tests configuration is rejected before the source is examined
    // Verified by validating the source dimensions first
    #[test]
    fn test_invalid_configuration() {
        let (tiles, signatures) = primary_catalog(2).into_parts();
        let tiny = DynamicImage::ImageRgba8(solid(1, 1, RED));

        assert!(compose(&tiny, 0, &tiles, &signatures).unwrap_err().is_config());
        assert!(compose(&tiny, 2, &tiles, &signatures[1..]).unwrap_err().is_config());
        assert!(compose(&tiny, 2, &[], &[]).unwrap_err().is_config());
        assert!(compose(&tiny, 3, &tiles, &signatures).unwrap_err().is_config());
    }

    // Tests sources without alpha are treated as opaque
    // Verified by skipping the RGBA conversion
    #[test]
    fn test_rgb_source_is_normalized() {
        let catalog = primary_catalog(2);
        let composer = MosaicComposer::from_catalog(&catalog);
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([0, 250, 5])));

        let plan = composer.plan(&source).unwrap();
        assert!(plan.assignments().iter().all(|&index| index == 2));
    }

    // Tests row progress is reported once per block row
    // Verified by reporting per block
    #[test]
    fn test_plan_progress_reporting() {
        let catalog = primary_catalog(2);
        let composer = MosaicComposer::from_catalog(&catalog);
        let source = DynamicImage::ImageRgba8(solid(6, 8, BLUE));

        let mut reports = Vec::new();
        let plan = composer
            .plan_with_progress(&source, |done, total| reports.push((done, total)))
            .unwrap();

        assert_eq!(reports, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert_eq!(plan.grid().rows(), 4);
        assert_eq!(plan.grid().cols(), 3);
    }

    // Tests tile usage statistics over a two-color source
    // Verified by counting rows instead of blocks
    #[test]
    fn test_tile_usage() {
        let catalog = primary_catalog(2);
        let composer = MosaicComposer::from_catalog(&catalog);
        let source = DynamicImage::ImageRgba8(RgbaImage::from_fn(6, 2, |x, _| {
            if x < 4 { Rgba(RED) } else { Rgba(GREEN) }
        }));

        let plan = composer.plan(&source).unwrap();

        assert_eq!(plan.tile_usage(catalog.len()), vec![0, 2, 1]);
        assert_eq!(plan.distinct_tiles(), 2);
        assert_eq!(plan.tile_at(0, 2), Some(2));
        assert_eq!(plan.tile_at(1, 0), None);
    }

    // Tests rendering rejects plans that do not fit the composer
    // Verified by clamping out-of-range tile indices
    #[test]
    fn test_render_rejects_foreign_plan() {
        let large = primary_catalog(2);
        let plan = MosaicComposer::from_catalog(&large)
            .plan(&DynamicImage::ImageRgba8(solid(2, 2, GREEN)))
            .unwrap();

        let single = TileCatalog::extract(&solid(2, 2, RED), 2).unwrap();
        let err = MosaicComposer::from_catalog(&single)
            .render(&plan)
            .unwrap_err();
        assert!(matches!(
            err,
            MosaicError::InvalidTileIndex {
                index: 2,
                max_tiles: 1
            }
        ));

        let other_size = primary_catalog(1);
        assert!(
            MosaicComposer::from_catalog(&other_size)
                .render(&plan)
                .unwrap_err()
                .is_config()
        );
    }
}
