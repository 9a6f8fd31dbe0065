macro_rules! test_shader {
    ($fn_name:ident, $name:literal => $path:literal) => {
        #[test]
        fn $fn_name() {
            use crate::utils::validate_wgsl_source;

            let shader = include_str!($path);
            if let Err(e) = validate_wgsl_source(shader) {
                panic!("{} ({}) is invalid: {e}", $name, $path);
            }
        }
    };
}

test_shader!(hue_gradient, "Hue Gradient Shader" => "hue_gradient.wgsl");
test_shader!(composite, "Canvas Composite Shader" => "composite.wgsl");

#[test]
fn hue_gradient_keeps_strict_sector_comparisons() {
    let source = include_str!("hue_gradient.wgsl");

    for k in 1..=5 {
        let comparison = format!("h < {k}.0 / 6.0");
        assert!(source.contains(&comparison), "missing `{comparison}`");
    }
    assert!(!source.contains("<="));
}
