//! Single pixel readback from the canvas.
//!
//! Coordinates follow the GL convention the widget's sampling was defined in: the origin is the
//! bottom left pixel. wgpu textures start at the top left, so the row is flipped before copying.

use crate::utils::Sample;
use crossbeam_channel::bounded;
use snafu::{ResultExt, Snafu, ensure};
use wgpu::{
    Buffer, BufferDescriptor, BufferUsages, COPY_BYTES_PER_ROW_ALIGNMENT, CommandEncoder, Device,
    Extent3d, MapMode, Origin3d, PollError, PollType, TexelCopyBufferInfo, TexelCopyBufferLayout,
    TexelCopyTextureInfo, Texture, TextureAspect, TextureFormat,
};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum ReadbackError {
    #[snafu(display("Pixel ({x}, {y}) is outside of the {width}x{height} canvas"))]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[snafu(display("Unsupported texture format {format:?} for readback"))]
    UnsupportedFormat { format: TextureFormat },

    #[snafu(display("Failed to map readback buffer: {source:?}"))]
    Map { source: wgpu::BufferAsyncError },

    #[snafu(display("Device failed while waiting for the readback: {source}"))]
    Poll { source: PollError },

    #[snafu(display("Failed to map readback buffer: channel closed"))]
    MapChannelClosed,
}

/// A pixel position with the origin in the bottom left corner
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SampleCoord {
    pub x: u32,
    pub y: u32,
}

impl SampleCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        SampleCoord { x, y }
    }

    /// `(floor(W / 2), floor(H / 2))`
    pub const fn center(width: u32, height: u32) -> Self {
        SampleCoord::new(width / 2, height / 2)
    }

    /// The texture row this coordinate lands on, counting from the top
    pub fn texture_row(&self, height: u32) -> Option<u32> {
        (self.y < height).then(|| height - 1 - self.y)
    }

    /// Top-left based texel origin for a copy out of a `width` x `height` texture
    pub fn texture_origin(&self, width: u32, height: u32) -> Result<Origin3d, ReadbackError> {
        let Some(row) = self.texture_row(height).filter(|_| self.x < width) else {
            return OutOfBoundsErr {
                x: self.x,
                y: self.y,
                width,
                height,
            }
            .fail();
        };

        Ok(Origin3d {
            x: self.x,
            y: row,
            z: 0,
        })
    }
}

pub fn is_supported(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Bgra8UnormSrgb
    )
}

/// Turns the four bytes of one texel into a [`Sample`]. Alpha is dropped, no gamma conversion.
pub fn decode_pixel(texel: [u8; 4], format: TextureFormat) -> Result<Sample, ReadbackError> {
    match format {
        TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => Ok(Sample::from_rgba(texel)),
        TextureFormat::Bgra8Unorm | TextureFormat::Bgra8UnormSrgb => {
            Ok(Sample::new(texel[2], texel[1], texel[0]))
        }
        format => UnsupportedFormatErr { format }.fail(),
    }
}

/// Owns the staging buffer one pixel is copied into every frame.
pub struct PixelReadback {
    buffer: Buffer,
}

impl PixelReadback {
    /// Copies only ever cover one row, but the row pitch still has to be aligned.
    pub const ROW_PITCH: u32 = COPY_BYTES_PER_ROW_ALIGNMENT;

    pub fn new(device: &Device) -> Self {
        let buffer = device.create_buffer(&BufferDescriptor {
            label: Some("Pixel Readback Buffer"),
            size: Self::ROW_PITCH as u64,
            usage: BufferUsages::COPY_DST | BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        PixelReadback { buffer }
    }

    /// Records the copy of the pixel at `coord`. Has to be submitted after the draw that
    /// produced the pixel, either in the same encoder or a later one.
    pub fn encode_copy(
        &self,
        encoder: &mut CommandEncoder,
        texture: &Texture,
        coord: SampleCoord,
    ) -> Result<(), ReadbackError> {
        let format = texture.format();
        ensure!(is_supported(format), UnsupportedFormatErr { format });

        let size = texture.size();
        let origin = coord.texture_origin(size.width, size.height)?;

        encoder.copy_texture_to_buffer(
            TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin,
                aspect: TextureAspect::All,
            },
            TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(Self::ROW_PITCH),
                    rows_per_image: Some(1),
                },
            },
            Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    /// Blocks until the submitted copy landed and decodes it.
    pub fn resolve(&self, device: &Device, format: TextureFormat) -> Result<Sample, ReadbackError> {
        let slice = self.buffer.slice(0..4);
        let (tx, rx) = bounded(1);
        slice.map_async(MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        device
            .poll(PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .context(PollErr)?;

        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(ReadbackError::Map { source }),
            Err(_) => return MapChannelClosedErr.fail(),
        }

        let mut texel = [0u8; 4];
        {
            let data = slice.get_mapped_range();
            texel.copy_from_slice(&data[..4]);
        }
        self.buffer.unmap();

        decode_pixel(texel, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_flips_rows() {
        let origin = SampleCoord::new(3, 0).texture_origin(10, 10).unwrap();
        assert_eq!((origin.x, origin.y), (3, 9));

        let origin = SampleCoord::new(0, 9).texture_origin(10, 10).unwrap();
        assert_eq!(origin.y, 0);
    }

    #[test]
    fn origin_rejects_outside_pixels() {
        assert!(matches!(
            SampleCoord::new(10, 0).texture_origin(10, 10),
            Err(ReadbackError::OutOfBounds { .. })
        ));
        assert!(SampleCoord::center(0, 0).texture_origin(0, 0).is_err());
    }

    #[test]
    fn bgra_is_swizzled() {
        let sample = decode_pixel([0x30, 0x20, 0x10, 0xff], TextureFormat::Bgra8Unorm).unwrap();
        assert_eq!(sample, Sample::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn poll_failures_are_reported() {
        let error = ReadbackError::Poll {
            source: PollError::Timeout,
        };
        assert!(error.to_string().starts_with("Device failed"));
    }

    #[test]
    fn float_formats_are_rejected() {
        assert!(decode_pixel([0; 4], TextureFormat::Rgba16Float).is_err());
    }
}
