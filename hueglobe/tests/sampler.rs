use hueglobe::output::{ColorOutput, OutputPolicy};
use hueglobe::rendering::{SampleCoord, decode_pixel, is_supported};
use hueglobe::utils::Sample;
use wgpu::TextureFormat;

#[test]
fn test_center_is_floored() {
    assert_eq!(SampleCoord::center(201, 201), SampleCoord::new(100, 100));
    assert_eq!(SampleCoord::center(200, 200), SampleCoord::new(100, 100));
    assert_eq!(SampleCoord::center(1, 1), SampleCoord::new(0, 0));
    assert_eq!(SampleCoord::center(800, 601).y, 300);
}

#[test]
fn test_rows_count_from_the_bottom() {
    let coord = SampleCoord::center(200, 200);
    assert_eq!(coord.texture_row(200), Some(99));

    assert_eq!(SampleCoord::new(0, 0).texture_row(10), Some(9));
    assert_eq!(SampleCoord::new(0, 10).texture_row(10), None);
}

#[test]
fn test_odd_heights_sample_the_middle_row() {
    // the middle row is the same from either end
    let coord = SampleCoord::center(201, 201);
    assert_eq!(coord.texture_row(201), Some(100));
}

#[test]
fn test_decode_drops_alpha() {
    let sample = decode_pixel([255, 0, 16, 0], TextureFormat::Rgba8Unorm).unwrap();
    assert_eq!(sample, Sample::new(255, 0, 16));
    assert!(is_supported(TextureFormat::Bgra8UnormSrgb));
    assert!(!is_supported(TextureFormat::Depth32Float));
}

#[test]
fn test_output_policies() {
    let sample = Sample::new(16, 16, 16);

    assert_eq!(OutputPolicy::Hex.format(sample), "#101010");
    assert_eq!(OutputPolicy::Background.format(sample), "rgb(16, 16, 16)");
    assert_eq!(OutputPolicy::default(), OutputPolicy::Hex);

    let output = ColorOutput::new(Sample::new(255, 0, 0), OutputPolicy::Hex);
    assert_eq!(output.text, "#ff0000");
}
