use hueglobe::utils::{ParseColorError, Sample, hsl_to_rgb, hue_gradient, rgb_to_hex};
use more_asserts::{assert_ge, assert_le};

/// HSL to RGB the way a textbook writes it, with hue in degrees
fn reference_hsl(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h * 360.0 / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp {
        hp if hp < 1.0 => (c, x, 0.0),
        hp if hp < 2.0 => (x, c, 0.0),
        hp if hp < 3.0 => (0.0, c, x),
        hp if hp < 4.0 => (0.0, x, c),
        hp if hp < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}

#[test]
fn test_hex_scenarios() {
    assert_eq!(Sample::new(255, 0, 0).to_hex(), "#ff0000");
    assert_eq!(Sample::new(0, 0, 0).to_hex(), "#000000");
    assert_eq!(Sample::new(16, 16, 16).to_hex(), "#101010");
}

#[test]
fn test_hex_channel_boundaries() {
    assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    assert_eq!(rgb_to_hex(255, 255, 255), "#ffffff");
    assert_eq!(rgb_to_hex(1, 10, 15), "#010a0f");
}

#[test]
fn test_hex_round_trip() {
    for r in (0..=255u8).step_by(17) {
        for g in [0u8, 1, 127, 128, 254, 255] {
            for b in [0u8, 9, 10, 200] {
                let sample = Sample::new(r, g, b);
                let hex = sample.to_hex();

                assert_eq!(hex.len(), 7);
                assert!(hex.starts_with('#'));
                assert!(hex[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
                assert_eq!(Sample::from_hex(&hex).unwrap(), sample);
            }
        }
    }
}

#[test]
fn test_parse_hex_rejects_garbage() {
    assert!(Sample::from_hex("ff0000").is_err());
    assert!(Sample::from_hex("#ff00").is_err());
    assert!(Sample::from_hex("#ff00000").is_err());
    assert!(Sample::from_hex("#gg0000").is_err());
    assert!(Sample::from_hex("#ää00").is_err());
    assert!(matches!(
        Sample::from_hex("#+f+f+f"),
        Err(ParseColorError::InvalidDigit { .. })
    ));
    assert!(matches!(
        Sample::from_hex("#gg0000"),
        Err(ParseColorError::InvalidDigit { .. })
    ));
}

#[test]
fn test_css_rgb() {
    assert_eq!(Sample::new(255, 0, 16).to_css_rgb(), "rgb(255, 0, 16)");
    assert_eq!(Sample::from_u32(0x404040), Sample::new(64, 64, 64));
}

#[test]
fn test_hue_gradient_primaries() {
    assert_eq!(Sample::from_unorm(hue_gradient(0.0)), Sample::new(255, 0, 0));
    assert_eq!(Sample::from_unorm(hue_gradient(1.0 / 3.0)), Sample::new(0, 255, 0));
    assert_eq!(Sample::from_unorm(hue_gradient(2.0 / 3.0)), Sample::new(0, 0, 255));
    assert_eq!(Sample::from_unorm(hue_gradient(1.0)), Sample::new(255, 0, 0));
}

#[test]
fn test_hue_gradient_matches_reference() {
    const EPS: f32 = 1e-5;

    for i in 0..=1000 {
        let u = i as f32 / 1000.0;
        let ours = hue_gradient(u);
        let (r, g, b) = reference_hsl(u, 1.0, 0.5);

        assert!((ours.x - r).abs() < EPS, "red differs at u = {u}");
        assert!((ours.y - g).abs() < EPS, "green differs at u = {u}");
        assert!((ours.z - b).abs() < EPS, "blue differs at u = {u}");

        for channel in ours.iter() {
            assert_ge!(*channel, -EPS);
            assert_le!(*channel, 1.0 + EPS);
        }
    }
}

#[test]
fn test_sector_boundaries() {
    // exactly on k/6 the strict comparison moves on to the sector starting there
    let yellow = hsl_to_rgb(1.0 / 6.0, 1.0, 0.5);
    assert_eq!(Sample::from_unorm(yellow), Sample::new(255, 255, 0));

    let cyan = hsl_to_rgb(3.0 / 6.0, 1.0, 0.5);
    assert_eq!(Sample::from_unorm(cyan), Sample::new(0, 255, 255));

    let magenta = hsl_to_rgb(5.0 / 6.0, 1.0, 0.5);
    assert_eq!(Sample::from_unorm(magenta), Sample::new(255, 0, 255));

    // past the last boundary the fallback sector wraps back towards red
    let late = hsl_to_rgb(0.99, 1.0, 0.5);
    assert_eq!(late.x, 1.0);
    assert_eq!(late.y, 0.0);
}

#[test]
fn test_grey_when_unsaturated() {
    let grey = hsl_to_rgb(0.42, 0.0, 0.25);
    assert_eq!(Sample::from_unorm(grey), Sample::new(64, 64, 64));
}
