use naga::front::wgsl;
use naga::valid::{Capabilities, ModuleInfo, ValidationFlags, Validator};
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum ShaderValidError {
    #[snafu(display("Failed to parse WGSL: {source}"))]
    Parse { source: wgsl::ParseError },

    #[snafu(display("WGSL module is invalid: {source}"))]
    Validation {
        source: naga::WithSpan<naga::valid::ValidationError>,
    },
}

pub fn validate_wgsl_source(shader: &str) -> Result<ModuleInfo, ShaderValidError> {
    let module = wgsl::parse_str(shader).context(ParseSnafu)?;
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator.validate(&module).context(ValidationSnafu)
}
