pub mod decconf;
pub mod nalu;
pub mod sps;

pub use decconf::{extract_aspect_ratio, DecoderConfig, DecoderConfigError};
pub use nalu::NaluType;
pub use sps::{parse_sps_nalu, Sps};
