use crate::config::{CHANNELS, DATA_SAMPLE_RATE_HZ, SAMPLE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }
}

/// PCM layout negotiated once against the output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate_hz: u32,
    pub channel_count: u8,
    pub bits_per_sample: u8,
    pub sample_type: SampleType,
    pub byte_order: ByteOrder,
}

impl AudioFormat {
    /// 44.1 kHz, mono, 16-bit signed, little-endian.
    pub fn target() -> Self {
        Self {
            sample_rate_hz: DATA_SAMPLE_RATE_HZ,
            channel_count: CHANNELS,
            bits_per_sample: SAMPLE_SIZE,
            sample_type: SampleType::Signed,
            byte_order: ByteOrder::Little,
        }
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.bits_per_sample as usize / 8
    }

    pub fn frame_bytes(&self) -> usize {
        self.channel_count as usize * self.bytes_per_sample()
    }

    /// Whole frames covering `duration_us` at this rate, `None` on overflow.
    pub fn frames_for(&self, duration_us: u64) -> Option<u64> {
        (self.sample_rate_hz as u64)
            .checked_mul(duration_us)
            .map(|product| product / 1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_cd_rate_mono_s16le() {
        let format = AudioFormat::target();
        assert_eq!(format.sample_rate_hz, 44100);
        assert_eq!(format.channel_count, 1);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_type, SampleType::Signed);
        assert_eq!(format.byte_order, ByteOrder::Little);
        assert_eq!(format.frame_bytes(), 2);
    }

    #[test]
    fn frame_bytes_scales_with_channels() {
        let format = AudioFormat {
            channel_count: 2,
            bits_per_sample: 8,
            ..AudioFormat::target()
        };
        assert_eq!(format.frame_bytes(), 2);
        assert_eq!(format.frames_for(500_000), Some(22050));
    }

    #[test]
    fn frame_count_overflow_is_reported() {
        let format = AudioFormat::target();
        assert_eq!(format.frames_for(u64::MAX), None);
        assert_eq!(format.frames_for(500_000_000_000_000), None);
        assert_eq!(format.frames_for(u64::MAX / 44100), Some(u64::MAX / 44100 * 44100 / 1_000_000));
    }
}
