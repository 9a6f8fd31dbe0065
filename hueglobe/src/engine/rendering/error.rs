use crate::rendering::{ReadbackError, StateError};
use snafu::Snafu;
use wgpu::SurfaceError;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Unable to get frame: {source}"))]
    Surface { source: SurfaceError },

    #[snafu(display("Error with the render state: {source}"))]
    State { source: StateError },

    #[snafu(display("Couldn't sample the canvas: {source}"))]
    Readback { source: ReadbackError },
}
