//! Property-based invariants for the color and contrast utilities.
//!
//! Verifies:
//! 1. Hex -> HSL -> hex reproduces every channel within 1
//! 2. normalize_color_to_hex is idempotent for hex and rgb() input
//! 3. Contrast ratio is symmetric and bounded by [1, 21]
//! 4. A color against itself has ratio 1
//! 5. is_light agrees with the better of black and white text
//! 6. adjust_lightness keeps lightness within [0, 100]
//! 7. adjust_for_contrast never makes a pair worse

use proptest::prelude::*;
use spexop_theme::{
    adjust_for_contrast, adjust_lightness, calculate_contrast_ratio, contrast_ratio, hex_to_hsl,
    hex_to_rgb, hsl_to_hex, is_light, normalize_color_to_hex, Rgb,
};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn arb_hex() -> impl Strategy<Value = String> {
    (arb_rgb(), any::<bool>()).prop_map(|(rgb, lower)| {
        let hex = rgb.to_hex();
        if lower {
            hex.to_lowercase()
        } else {
            hex
        }
    })
}

fn arb_color_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_hex(),
        arb_rgb().prop_map(|c| format!("rgb({}, {}, {})", c.r, c.g, c.b)),
        (arb_rgb(), 0u8..=100).prop_map(|(c, a)| format!(
            "rgba({} {} {} / {})",
            c.r,
            c.g,
            c.b,
            a as f64 / 100.0
        )),
        Just("hsl(217, 91%, 60%)".to_string()),
        Just("rebeccapurple".to_string()),
        Just("transparent".to_string()),
        "[a-z#(),. ]{0,12}",
    ]
}

fn channel_distance(a: Rgb, b: Rgb) -> u8 {
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Conversion and normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hsl_round_trip(hex in arb_hex()) {
        let hsl = hex_to_hsl(&hex).unwrap();
        let back = hsl_to_hex(hsl.h, hsl.s, hsl.l);
        let distance = channel_distance(hex_to_rgb(&hex).unwrap(), hex_to_rgb(&back).unwrap());
        prop_assert!(distance <= 1, "{} -> {:?} -> {}", hex, hsl, back);
    }

    #[test]
    fn normalization_is_idempotent(input in arb_color_literal()) {
        let once = normalize_color_to_hex(&input);
        prop_assert_eq!(normalize_color_to_hex(&once), once.clone(), "input: {}", input);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Contrast
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contrast_is_symmetric_and_bounded(a in arb_hex(), b in arb_hex()) {
        let ab = calculate_contrast_ratio(&a, &b).unwrap();
        let ba = calculate_contrast_ratio(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ab), "{} vs {}: {}", a, b, ab);
    }

    #[test]
    fn contrast_with_self_is_one(c in arb_rgb()) {
        prop_assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn light_colors_prefer_black_text(c in arb_rgb()) {
        let black = contrast_ratio(c, Rgb::BLACK);
        let white = contrast_ratio(c, Rgb::WHITE);
        prop_assume!((black - white).abs() > 1e-9);
        prop_assert_eq!(is_light(&c.to_hex()).unwrap(), black > white);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7. Lightness adjustments
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lightness_stays_in_range(hex in arb_hex(), delta in -200.0f64..200.0) {
        let adjusted = adjust_lightness(&hex, delta).unwrap();
        let hsl = hex_to_hsl(&adjusted).unwrap();
        prop_assert!((0.0..=100.0).contains(&hsl.l));
    }

    #[test]
    fn contrast_adjustment_never_regresses(
        fg in arb_rgb(),
        bg in arb_rgb(),
        target in 1.0f64..21.0,
    ) {
        let before = contrast_ratio(fg, bg);
        let adjusted = adjust_for_contrast(fg, bg, target);
        prop_assert!(adjusted.ratio >= before);
        prop_assert_eq!(adjusted.ratio, contrast_ratio(adjusted.color, bg));
        if adjusted.met_target {
            prop_assert!(adjusted.ratio >= target);
        }
    }
}
