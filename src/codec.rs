use std::fmt;

use tracing::{debug, warn};

/// Video codec families recognized by the packaging pipeline.
///
/// The set is closed; anything a demuxer cannot classify is `Unknown`.
/// `Unknown` streams render and pass through, but never validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCodec {
    H264,
    Vc1,
    Mpeg2,
    Mpeg4,
    Theora,
    Vp8,
    Vp9,
    Unknown,
}

impl VideoCodec {
    /// Display name used in diagnostic renderings.
    pub const fn name(self) -> &'static str {
        match self {
            VideoCodec::H264 => "H264",
            VideoCodec::Vc1 => "VC1",
            VideoCodec::Mpeg2 => "MPEG2",
            VideoCodec::Mpeg4 => "MPEG4",
            VideoCodec::Theora => "Theora",
            VideoCodec::Vp8 => "VP8",
            VideoCodec::Vp9 => "VP9",
            VideoCodec::Unknown => "UnknownVideoCodec",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == VideoCodec::Unknown {
            debug!("rendering unknown video codec sentinel");
        }
        f.write_str(self.name())
    }
}

/// Return the codec string suitable for the `codecs` attribute of a
/// manifest (DASH/HLS), so players can select a decoder without probing
/// the bitstream.
///
/// For H.264 the string is `avc1.` followed by the lowercase hex of the
/// three bytes `profile`, `compatible_profiles`, `level`, in that order.
/// Players parse this structurally; byte order and case are part of the
/// contract. Unsupported codecs degrade to `"unknown"` so manifest
/// generation can proceed with a placeholder.
pub fn codec_string(
    codec: VideoCodec,
    profile: u8,
    compatible_profiles: u8,
    level: u8,
) -> String {
    match codec {
        VideoCodec::Vp8 => "vp8".to_string(),
        VideoCodec::Vp9 => "vp9".to_string(),
        VideoCodec::H264 => {
            format!("avc1.{profile:02x}{compatible_profiles:02x}{level:02x}")
        }
        other => {
            warn!(codec = other.name(), "no codec string mapping for codec");
            "unknown".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::h264(VideoCodec::H264, "H264")]
    #[case::vc1(VideoCodec::Vc1, "VC1")]
    #[case::mpeg2(VideoCodec::Mpeg2, "MPEG2")]
    #[case::mpeg4(VideoCodec::Mpeg4, "MPEG4")]
    #[case::theora(VideoCodec::Theora, "Theora")]
    #[case::vp8(VideoCodec::Vp8, "VP8")]
    #[case::vp9(VideoCodec::Vp9, "VP9")]
    #[case::unknown(VideoCodec::Unknown, "UnknownVideoCodec")]
    fn test_codec_names(#[case] codec: VideoCodec, #[case] want: &str) {
        assert_eq!(codec.name(), want);
        assert_eq!(codec.to_string(), want);
    }

    #[rstest]
    #[case::high_profile(0x64, 0x00, 0x1f, "avc1.64001f")]
    #[case::baseline(0x42, 0xe0, 0x1f, "avc1.42e01f")]
    #[case::main_profile(0x4d, 0x40, 0x28, "avc1.4d4028")]
    fn test_avc1_codec_string(
        #[case] profile: u8,
        #[case] compat: u8,
        #[case] level: u8,
        #[case] want: &str,
    ) {
        assert_eq!(codec_string(VideoCodec::H264, profile, compat, level), want);
    }

    #[test]
    fn test_vp_codec_strings_ignore_profile_bytes() {
        assert_eq!(codec_string(VideoCodec::Vp8, 0xff, 0xff, 0xff), "vp8");
        assert_eq!(codec_string(VideoCodec::Vp9, 0x64, 0x00, 0x1f), "vp9");
    }

    #[rstest]
    #[case::unknown(VideoCodec::Unknown)]
    #[case::theora(VideoCodec::Theora)]
    #[case::mpeg2(VideoCodec::Mpeg2)]
    fn test_unsupported_codec_string(#[case] codec: VideoCodec) {
        assert_eq!(codec_string(codec, 0, 0, 0), "unknown");
    }
}
