use std::io::Cursor;

use crate::bits::BitReader;

use super::NaluType;

/// Extended Sample Aspect Ratio code in the VUI.
const EXTENDED_SAR: u32 = 255;

/// Profiles that carry the chroma format and scaling list fields.
const EXTENDED_PROFILES: [u8; 13] =
    [100, 110, 122, 244, 44, 83, 86, 118, 128, 138, 139, 134, 135];

/// The slice of an AVC Sequence Parameter Set needed for stream
/// description: codec string bytes, frame geometry, and the sample
/// aspect ratio from the VUI. Parsing stops once the aspect ratio is
/// reached; the remaining VUI fields are never consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sps {
    pub profile: u8,
    pub profile_compatibility: u8,
    pub level: u8,
    pub parameter_set_id: u32,
    pub chroma_format_idc: u32,
    pub frame_mbs_only_flag: bool,
    pub width: u32,
    pub height: u32,
    pub sar_width: u32,
    pub sar_height: u32,
}

impl Sps {
    /// Sample aspect ratio, present only when both values are positive.
    pub fn sample_aspect_ratio(&self) -> Option<(u32, u32)> {
        if self.sar_width > 0 && self.sar_height > 0 {
            Some((self.sar_width, self.sar_height))
        } else {
            None
        }
    }
}

/// Parse an SPS NAL unit including its header byte.
///
/// Returns `None` for anything that is not a well formed SPS. All fields
/// up to and including the VUI aspect ratio are consumed in bitstream
/// order; scaling lists are skipped, not stored.
pub fn parse_sps_nalu(nalu: &[u8]) -> Option<Sps> {
    if nalu.is_empty() || NaluType::from_header_byte(nalu[0]) != NaluType::Sps {
        return None;
    }
    let rbsp = remove_emulation_prevention_bytes(&nalu[1..]);
    let mut r = BitReader::new(Cursor::new(rbsp));

    let profile = r.read(8) as u8;
    let profile_compatibility = r.read(8) as u8;
    let level = r.read(8) as u8;
    let parameter_set_id = read_ue(&mut r);

    let mut chroma_format_idc = if profile == 138 { 0 } else { 1 };
    if EXTENDED_PROFILES.contains(&profile) {
        chroma_format_idc = read_ue(&mut r);
        if chroma_format_idc == 3 {
            let _separate_colour_plane_flag = r.read_flag();
        }
        let _bit_depth_luma_minus8 = read_ue(&mut r);
        let _bit_depth_chroma_minus8 = read_ue(&mut r);
        let _qpprime_y_zero_transform_bypass_flag = r.read_flag();
        let seq_scaling_matrix_present_flag = r.read_flag();
        if seq_scaling_matrix_present_flag {
            let nr_lists = if chroma_format_idc == 3 { 12 } else { 8 };
            for i in 0..nr_lists {
                if r.read_flag() {
                    skip_scaling_list(&mut r, if i < 6 { 16 } else { 64 });
                }
            }
        }
    }

    let _log2_max_frame_num_minus4 = read_ue(&mut r);
    let pic_order_cnt_type = read_ue(&mut r);
    match pic_order_cnt_type {
        0 => {
            let _log2_max_pic_order_cnt_lsb_minus4 = read_ue(&mut r);
        }
        1 => {
            let _delta_pic_order_always_zero_flag = r.read_flag();
            let _offset_for_non_ref_pic = read_se(&mut r);
            let _offset_for_top_to_bottom_field = read_se(&mut r);
            let nr_frames = read_ue(&mut r);
            for _ in 0..nr_frames {
                let _offset_for_ref_frame = read_se(&mut r);
            }
        }
        _ => {}
    }
    let _num_ref_frames = read_ue(&mut r);
    let _gaps_in_frame_num_value_allowed_flag = r.read_flag();

    let pic_width_in_mbs_minus1 = read_ue(&mut r);
    let pic_height_in_map_units_minus1 = read_ue(&mut r);
    let mut width = pic_width_in_mbs_minus1.checked_add(1)?.checked_mul(16)?;
    let mut height = pic_height_in_map_units_minus1.checked_add(1)?.checked_mul(16)?;

    let frame_mbs_only_flag = r.read_flag();
    if !frame_mbs_only_flag {
        let _mb_adaptive_frame_field_flag = r.read_flag();
        height = height.checked_mul(2)?;
    }
    let _direct_8x8_inference_flag = r.read_flag();

    let frame_cropping_flag = r.read_flag();
    if frame_cropping_flag {
        let frame_mbs_only = u32::from(frame_mbs_only_flag);
        let (crop_unit_x, crop_unit_y) = match chroma_format_idc {
            0 | 3 => (1, 2 - frame_mbs_only),
            1 => (2, 2 * (2 - frame_mbs_only)),
            2 => (2, 2 - frame_mbs_only),
            _ => return None,
        };
        let crop_left = read_ue(&mut r);
        let crop_right = read_ue(&mut r);
        let crop_top = read_ue(&mut r);
        let crop_bottom = read_ue(&mut r);
        let crop_x = crop_left.checked_add(crop_right)?.checked_mul(crop_unit_x)?;
        let crop_y = crop_top.checked_add(crop_bottom)?.checked_mul(crop_unit_y)?;
        width = width.checked_sub(crop_x)?;
        height = height.checked_sub(crop_y)?;
    }

    let mut sar_width = 0;
    let mut sar_height = 0;
    let vui_parameters_present_flag = r.read_flag();
    if vui_parameters_present_flag {
        let aspect_ratio_info_present_flag = r.read_flag();
        if aspect_ratio_info_present_flag {
            let aspect_ratio_idc = r.read(8);
            if aspect_ratio_idc == EXTENDED_SAR {
                sar_width = r.read(16);
                sar_height = r.read(16);
            } else if let Some((w, h)) = sar_from_idc(aspect_ratio_idc) {
                sar_width = w;
                sar_height = h;
            }
        }
    }

    if r.acc_error().is_some() {
        return None;
    }

    Some(Sps {
        profile,
        profile_compatibility,
        level,
        parameter_set_id,
        chroma_format_idc,
        frame_mbs_only_flag,
        width,
        height,
        sar_width,
        sar_height,
    })
}

/// Table E-1 of the AVC specification, indices 1 through 16.
fn sar_from_idc(idc: u32) -> Option<(u32, u32)> {
    const TABLE: [(u32, u32); 16] = [
        (1, 1),
        (12, 11),
        (10, 11),
        (16, 11),
        (40, 33),
        (24, 11),
        (20, 11),
        (32, 11),
        (80, 33),
        (18, 11),
        (15, 11),
        (64, 33),
        (160, 99),
        (4, 3),
        (3, 2),
        (2, 1),
    ];
    if idc == 0 || idc > 16 {
        return None;
    }
    Some(TABLE[(idc - 1) as usize])
}

fn skip_scaling_list<R: std::io::Read>(r: &mut BitReader<R>, size: u32) {
    let mut last_scale = 8i32;
    let mut next_scale = 8i32;
    for _ in 0..size {
        if next_scale != 0 {
            let delta = read_se(r);
            next_scale = (last_scale + delta + 256) % 256;
        }
        if next_scale != 0 {
            last_scale = next_scale;
        }
    }
}

fn read_ue<R: std::io::Read>(r: &mut BitReader<R>) -> u32 {
    let mut leading = 0u32;
    while r.read(1) == 0 {
        if r.acc_error().is_some() {
            return 0;
        }
        leading += 1;
        if leading > 31 {
            return 0;
        }
    }
    let prefix = (1u32 << leading) - 1;
    let suffix = if leading > 0 { r.read(leading) } else { 0 };
    prefix + suffix
}

fn read_se<R: std::io::Read>(r: &mut BitReader<R>) -> i32 {
    let ue = read_ue(r) as i32;
    if ue % 2 == 1 {
        (ue + 1) / 2
    } else {
        -(ue / 2)
    }
}

fn remove_emulation_prevention_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut zero_count = 0u8;
    for &b in data {
        if zero_count == 2 && b == 0x03 {
            zero_count = 0;
            continue;
        }
        out.push(b);
        if b == 0 {
            zero_count += 1;
        } else {
            zero_count = 0;
        }
    }
    out
}
