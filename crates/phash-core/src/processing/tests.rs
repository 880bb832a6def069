#[allow(clippy::module_inception)]
#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, Luma};

    use crate::processing::{
        distance, extract_fingerprint, preprocess, Fingerprint, PHashCalculator, WorkingGrid,
    };
    use crate::test_utils::pattern_gray_image;

    fn hash_gray(img: GrayImage) -> Fingerprint {
        PHashCalculator::new()
            .fingerprint_image(&DynamicImage::ImageLuma8(img))
            .unwrap()
    }

    #[test]
    fn test_horizontal_ramp() {
        let ramp = GrayImage::from_fn(32, 32, |x, _| Luma([(x * 8) as u8]));
        // DC set, negative odd harmonics along x clear bits in rows 1, 3, 5 and 7
        assert_eq!(hash_gray(ramp), Fingerprint(0xff7f_ff7f_ff7f_ff7f));
    }

    #[test]
    fn test_vertical_ramp() {
        let ramp = GrayImage::from_fn(32, 32, |_, y| Luma([(y * 8) as u8]));
        assert_eq!(hash_gray(ramp), Fingerprint(0xaaff_ffff_ffff_ffff));
    }

    #[test]
    fn test_ramps_are_dissimilar() {
        let horizontal = hash_gray(GrayImage::from_fn(32, 32, |x, _| Luma([(x * 8) as u8])));
        let vertical = hash_gray(GrayImage::from_fn(32, 32, |_, y| Luma([(y * 8) as u8])));
        assert_eq!(distance(horizontal, vertical), 8);
    }

    #[test]
    fn test_pattern_fingerprint() {
        assert_eq!(
            hash_gray(pattern_gray_image()),
            Fingerprint(0x8747_383c_c7ef_efc7)
        );
    }

    #[test]
    fn test_brightness_shift_is_tolerated() {
        let original = pattern_gray_image();
        let brighter = GrayImage::from_fn(32, 32, |x, y| {
            Luma([original.get_pixel(x, y)[0].saturating_add(10)])
        });

        assert!(distance(hash_gray(original), hash_gray(brighter)) < 5);
    }

    #[test]
    fn test_sparse_noise_is_tolerated() {
        let original = pattern_gray_image();
        let mut noisy = original.clone();
        for (x, y, pixel) in noisy.enumerate_pixels_mut() {
            if (x * 7 + y * 13) % 17 == 0 {
                pixel[0] = pixel[0].saturating_sub(6);
            }
        }

        assert!(distance(hash_gray(original), hash_gray(noisy)) < 5);
    }

    #[test]
    fn test_checkerboard_is_dissimilar() {
        let checker = GrayImage::from_fn(32, 32, |x, y| {
            if ((x / 8) + (y / 8)) % 2 == 0 {
                Luma([200])
            } else {
                Luma([30])
            }
        });

        assert!(distance(hash_gray(pattern_gray_image()), hash_gray(checker)) > 5);
    }

    #[test]
    fn test_all_white_fingerprint() {
        let white = GrayImage::from_pixel(32, 32, Luma([255]));
        let grid = preprocess(&DynamicImage::ImageLuma8(white), 0).unwrap();
        assert_eq!(grid, WorkingGrid::from_fn(|_, _| 255.0));

        let calculator = PHashCalculator::new();
        let freq = calculator.transform(&grid);
        let mut ac_total = 0.0;
        for u in 0..8 {
            for v in 0..8 {
                if (u, v) != (0, 0) {
                    assert!(freq.get(u, v).abs() < 1e-9);
                    ac_total += freq.get(u, v);
                }
            }
        }
        // The AC terms are rounding residue, not zeros, and they decide the 63 lower bits
        assert!((ac_total / 63.0).abs() < 1e-9);
        assert_eq!(
            calculator.fingerprint_grid(&grid),
            Fingerprint(0xd7e6_cf37_ef36_5fb7)
        );
    }

    #[test]
    fn test_upscaling_uniform_image_changes_nothing() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 6, Luma([90])));

        let plain = PHashCalculator::new().fingerprint_image(&img).unwrap();
        let upscaled = PHashCalculator::new()
            .with_min_width(64)
            .fingerprint_image(&img)
            .unwrap();
        assert_eq!(plain, upscaled);
    }

    #[test]
    fn test_upscaled_small_image_is_deterministic() {
        let small = GrayImage::from_fn(12, 9, |x, y| Luma([(x * 20 + y) as u8]));
        let img = DynamicImage::ImageLuma8(small);
        let calculator = PHashCalculator::new().with_min_width(64);

        let first = calculator.fingerprint_image(&img).unwrap();
        assert_eq!(calculator.fingerprint_image(&img).unwrap(), first);
        // Bright overall, so the DC coefficient clears the threshold
        assert_eq!(first.as_u64() >> 63, 1);
    }

    #[test]
    fn test_min_width_ignored_for_wide_images() {
        let img = DynamicImage::ImageLuma8(pattern_gray_image());
        let plain = PHashCalculator::new().fingerprint_image(&img).unwrap();
        let guarded = PHashCalculator::new()
            .with_min_width(16)
            .fingerprint_image(&img)
            .unwrap();
        assert_eq!(plain, guarded);
    }

    #[test]
    fn test_extract_matches_calculator() {
        let calculator = PHashCalculator::new();
        let grid = WorkingGrid::from_fn(|x, y| ((x * y) % 200) as f64);
        assert_eq!(
            calculator.fingerprint_grid(&grid),
            extract_fingerprint(&calculator.transform(&grid))
        );
    }
}
