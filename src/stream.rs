use std::fmt;

/// Elementary stream kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    Audio,
    Video,
}

impl StreamType {
    pub const fn name(self) -> &'static str {
        match self {
            StreamType::Audio => "Audio",
            StreamType::Video => "Video",
        }
    }
}

/// Fields shared by every elementary stream discovered by a demuxer.
///
/// Immutable after construction; codec-specific descriptors compose this
/// base and append their own fields to its rendering. The track id is an
/// opaque caller-supplied identifier, uniqueness is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    stream_type: StreamType,
    track_id: u32,
    time_scale: u32,
    duration: u64,
    codec_string: String,
    language: String,
    extra_data: Vec<u8>,
    is_encrypted: bool,
}

impl StreamDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stream_type: StreamType,
        track_id: u32,
        time_scale: u32,
        duration: u64,
        codec_string: String,
        language: String,
        extra_data: Vec<u8>,
        is_encrypted: bool,
    ) -> Self {
        Self {
            stream_type,
            track_id,
            time_scale,
            duration,
            codec_string,
            language,
            extra_data,
            is_encrypted,
        }
    }

    pub fn stream_type(&self) -> StreamType {
        self.stream_type
    }

    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn codec_string(&self) -> &str {
        &self.codec_string
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Codec-specific configuration record, e.g. an
    /// AVCDecoderConfigurationRecord. May be empty.
    pub fn extra_data(&self) -> &[u8] {
        &self.extra_data
    }

    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.duration as f64 / f64::from(self.time_scale);
        write!(
            f,
            "type: {}\n codec_string: {}\n time_scale: {}\n duration: {} \
             ({seconds:.1} seconds)\n language: {}\n is_encrypted: {}\n",
            self.stream_type.name(),
            self.codec_string,
            self.time_scale,
            self.duration,
            self.language,
            self.is_encrypted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StreamDescriptor {
        StreamDescriptor::new(
            StreamType::Video,
            1,
            90000,
            180000,
            "avc1.64001f".to_string(),
            "eng".to_string(),
            vec![1, 2, 3],
            false,
        )
    }

    #[test]
    fn test_accessors() {
        let s = base();
        assert_eq!(s.stream_type(), StreamType::Video);
        assert_eq!(s.track_id(), 1);
        assert_eq!(s.time_scale(), 90000);
        assert_eq!(s.duration(), 180000);
        assert_eq!(s.codec_string(), "avc1.64001f");
        assert_eq!(s.language(), "eng");
        assert_eq!(s.extra_data(), &[1, 2, 3]);
        assert!(!s.is_encrypted());
    }

    #[test]
    fn test_display() {
        let want = "type: Video\n codec_string: avc1.64001f\n time_scale: 90000\n \
                    duration: 180000 (2.0 seconds)\n language: eng\n is_encrypted: false\n";
        assert_eq!(base().to_string(), want);
    }
}
