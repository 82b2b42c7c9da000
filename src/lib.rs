//! Video elementary stream descriptors for media packaging.
//!
//! A demuxer constructs a [`VideoDescriptor`] per discovered video
//! track; manifest generation later queries validity and codec strings.
//! Missing pixel aspect ratios are recovered from an embedded H.264
//! decoder configuration record, falling back to 1:1.

pub mod bits;
pub use bits::{mask, BitReader};

pub mod limits;

pub mod codec;
pub use codec::{codec_string, VideoCodec};

pub mod stream;
pub use stream::{StreamDescriptor, StreamType};

pub mod video;
pub use video::{
    resolve_pixel_aspect, AspectSource, PixelAspect, VideoDescriptor, VideoStreamParams,
};

pub mod avc;
