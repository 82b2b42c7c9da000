use std::fmt;

use tracing::{debug, warn};

use crate::avc::extract_aspect_ratio;
use crate::codec::VideoCodec;
use crate::limits::MAX_DIMENSION;
use crate::stream::{StreamDescriptor, StreamType};

/// Raw demuxed parameters for a video stream, before aspect-ratio
/// resolution. Pixel geometry of zero means "not supplied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStreamParams {
    pub track_id: u32,
    pub time_scale: u32,
    pub duration: u64,
    pub codec: VideoCodec,
    pub codec_string: String,
    pub language: String,
    pub width: u16,
    pub height: u16,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub trick_play_rate: i16,
    pub nalu_length_size: u8,
    pub extra_data: Vec<u8>,
    pub is_encrypted: bool,
}

/// Which path produced the stored pixel aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectSource {
    /// Caller supplied both values.
    Explicit,
    /// Recovered from the embedded decoder configuration record.
    Derived,
    /// Assumed 1:1 after extraction failed or did not apply.
    Defaulted,
}

/// A resolved, always-positive pixel aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelAspect {
    pub width: u32,
    pub height: u32,
    pub source: AspectSource,
}

/// Resolve the pixel aspect ratio for a stream.
///
/// Precedence: explicit nonzero values win untouched; otherwise an H.264
/// stream's extra data is searched for an embedded SAR; otherwise 1:1.
/// Best effort and total: a malformed configuration record only selects
/// the fallback, it never surfaces as an error.
pub fn resolve_pixel_aspect(
    codec: VideoCodec,
    pixel_width: u32,
    pixel_height: u32,
    extra_data: &[u8],
) -> PixelAspect {
    if pixel_width > 0 && pixel_height > 0 {
        return PixelAspect {
            width: pixel_width,
            height: pixel_height,
            source: AspectSource::Explicit,
        };
    }
    if codec == VideoCodec::H264 && !extra_data.is_empty() {
        if let Some((width, height)) = extract_aspect_ratio(extra_data) {
            return PixelAspect { width, height, source: AspectSource::Derived };
        }
        debug!("failed to extract sar_width and sar_height");
    }
    warn!("SAR is not extracted successfully, assuming 1:1");
    PixelAspect { width: 1, height: 1, source: AspectSource::Defaulted }
}

/// Descriptive metadata for one video elementary stream.
///
/// Immutable after construction. Construction is total: nonsensical
/// geometry is stored as-is and reported through [`VideoDescriptor::is_valid`],
/// while a missing pixel aspect ratio is resolved (see
/// [`resolve_pixel_aspect`]) so that both stored values are always
/// strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDescriptor {
    stream: StreamDescriptor,
    codec: VideoCodec,
    width: u16,
    height: u16,
    pixel_width: u32,
    pixel_height: u32,
    trick_play_rate: i16,
    nalu_length_size: u8,
    aspect_source: AspectSource,
}

impl VideoDescriptor {
    pub fn new(params: VideoStreamParams) -> Self {
        let aspect = resolve_pixel_aspect(
            params.codec,
            params.pixel_width,
            params.pixel_height,
            &params.extra_data,
        );
        let stream = StreamDescriptor::new(
            StreamType::Video,
            params.track_id,
            params.time_scale,
            params.duration,
            params.codec_string,
            params.language,
            params.extra_data,
            params.is_encrypted,
        );
        Self {
            stream,
            codec: params.codec,
            width: params.width,
            height: params.height,
            pixel_width: aspect.width,
            pixel_height: aspect.height,
            trick_play_rate: params.trick_play_rate,
            nalu_length_size: params.nalu_length_size,
            aspect_source: aspect.source,
        }
    }

    /// Shared stream fields (track id, timing, codec string, language,
    /// extra data, encryption flag).
    pub fn stream(&self) -> &StreamDescriptor {
        &self.stream
    }

    pub fn track_id(&self) -> u32 {
        self.stream.track_id()
    }

    pub fn time_scale(&self) -> u32 {
        self.stream.time_scale()
    }

    pub fn duration(&self) -> u64 {
        self.stream.duration()
    }

    pub fn codec_string(&self) -> &str {
        self.stream.codec_string()
    }

    pub fn language(&self) -> &str {
        self.stream.language()
    }

    pub fn extra_data(&self) -> &[u8] {
        self.stream.extra_data()
    }

    pub fn is_encrypted(&self) -> bool {
        self.stream.is_encrypted()
    }

    pub fn codec(&self) -> VideoCodec {
        self.codec
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel aspect ratio numerator; strictly positive.
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Pixel aspect ratio denominator; strictly positive.
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Which path produced the stored pixel aspect ratio. Callers that
    /// cannot tolerate an assumed 1:1 can reject
    /// [`AspectSource::Defaulted`] streams.
    pub fn pixel_aspect_source(&self) -> AspectSource {
        self.aspect_source
    }

    pub fn trick_play_rate(&self) -> i16 {
        self.trick_play_rate
    }

    pub fn nalu_length_size(&self) -> u8 {
        self.nalu_length_size
    }

    /// True when the descriptor can drive packaging output: a known
    /// codec, sane bounded dimensions, and a NAL length prefix the
    /// downstream framer supports (1, 2 or 4 bytes; 3 is not).
    pub fn is_valid(&self) -> bool {
        self.codec != VideoCodec::Unknown
            && self.width > 0
            && self.width <= MAX_DIMENSION
            && self.height > 0
            && self.height <= MAX_DIMENSION
            && (self.nalu_length_size <= 2 || self.nalu_length_size == 4)
    }
}

impl fmt::Display for VideoDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} codec: {}\n width: {}\n height: {}\n pixel_width: {}\n \
             pixel_height: {}\n trick_play_rate: {}\n nalu_length_size: {}\n",
            self.stream,
            self.codec,
            self.width,
            self.height,
            self.pixel_width,
            self.pixel_height,
            self.trick_play_rate,
            self.nalu_length_size,
        )
    }
}
