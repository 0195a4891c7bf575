use cpal::traits::{DeviceTrait, HostTrait};
use cpal::SampleFormat;
use log::{debug, info, warn};
use crate::error::{Result, ToneError};
use crate::format::{AudioFormat, ByteOrder, SampleType};

/// One output configuration range reported by a device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputCandidate {
    pub channels: u16,
    pub min_sample_rate: u32,
    pub max_sample_rate: u32,
    pub sample_format: SampleFormat,
}

impl From<cpal::SupportedStreamConfigRange> for OutputCandidate {
    fn from(range: cpal::SupportedStreamConfigRange) -> Self {
        Self {
            channels: range.channels(),
            min_sample_rate: range.min_sample_rate().0,
            max_sample_rate: range.max_sample_rate().0,
            sample_format: range.sample_format(),
        }
    }
}

fn pcm_layout(sample_format: SampleFormat) -> Option<(u8, SampleType)> {
    match sample_format {
        SampleFormat::I8 => Some((8, SampleType::Signed)),
        SampleFormat::U8 => Some((8, SampleType::Unsigned)),
        SampleFormat::I16 => Some((16, SampleType::Signed)),
        SampleFormat::U16 => Some((16, SampleType::Unsigned)),
        _ => None,
    }
}

fn distance(target: &AudioFormat, candidate: &OutputCandidate) -> (u8, u16, u32) {
    let layout_rank = match pcm_layout(candidate.sample_format) {
        Some((bits, sample_type)) if bits == target.bits_per_sample && sample_type == target.sample_type => 0,
        Some((16, _)) => 1,
        Some(_) => 2,
        None => 3,
    };
    let channels = candidate.channels.abs_diff(target.channel_count as u16);
    let rate = target
        .sample_rate_hz
        .clamp(candidate.min_sample_rate, candidate.max_sample_rate.max(candidate.min_sample_rate))
        .abs_diff(target.sample_rate_hz);
    (layout_rank, channels, rate)
}

/// Picks the candidate closest to `target` and the format that goes with it.
/// Integer candidates dictate width and signedness; float ones keep the
/// target encoding and are converted when rendered.
pub fn nearest_format(
    target: &AudioFormat,
    candidates: &[OutputCandidate],
) -> Option<(AudioFormat, SampleFormat)> {
    let candidate = candidates
        .iter()
        .filter(|candidate| candidate.channels > 0)
        .min_by_key(|candidate| distance(target, candidate))?;

    let mut format = AudioFormat {
        sample_rate_hz: target
            .sample_rate_hz
            .clamp(candidate.min_sample_rate, candidate.max_sample_rate.max(candidate.min_sample_rate)),
        channel_count: u8::try_from(candidate.channels).unwrap_or(u8::MAX),
        ..*target
    };
    if let Some((bits, sample_type)) = pcm_layout(candidate.sample_format) {
        format.bits_per_sample = bits;
        format.sample_type = sample_type;
        format.byte_order = ByteOrder::native();
    }
    Some((format, candidate.sample_format))
}

pub struct ApplicationSettings {
    device: cpal::Device,
    format: AudioFormat,
    sample_format: SampleFormat,
}

impl ApplicationSettings {
    pub fn get_device(&self) -> &cpal::Device {
        &self.device
    }

    pub fn get_format(&self) -> AudioFormat {
        self.format
    }

    pub fn get_sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    pub fn get_device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "unknown device".to_string())
    }
}

pub struct Settings;

impl Settings {
    /// Default output device, negotiated against the target format.
    pub fn get_default_settings() -> Result<ApplicationSettings> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| ToneError::DeviceUnavailable("no output device available".to_string()))?;
        Self::negotiate(device, AudioFormat::target())
    }

    pub fn negotiate(device: cpal::Device, target: AudioFormat) -> Result<ApplicationSettings> {
        let candidates: Vec<OutputCandidate> = device
            .supported_output_configs()
            .map_err(|e| ToneError::DeviceUnavailable(e.to_string()))?
            .map(OutputCandidate::from)
            .collect();
        debug!("SETTINGS: Device offers {} output configurations", candidates.len());

        let (format, sample_format) = nearest_format(&target, &candidates).ok_or_else(|| {
            ToneError::DeviceUnavailable("device reports no output configurations".to_string())
        })?;
        if format != target {
            warn!("SETTINGS: Default format not supported - trying to use nearest");
        }
        info!("SETTINGS: Negotiated {:?} on a {} device stream", format, sample_format);

        Ok(ApplicationSettings {
            device,
            format,
            sample_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(channels: u16, min: u32, max: u32, sample_format: SampleFormat) -> OutputCandidate {
        OutputCandidate {
            channels,
            min_sample_rate: min,
            max_sample_rate: max,
            sample_format,
        }
    }

    #[test]
    fn exact_support_keeps_the_target() {
        let candidates = [
            candidate(2, 8000, 96000, SampleFormat::F32),
            candidate(1, 8000, 96000, SampleFormat::I16),
        ];
        let (format, sample_format) = nearest_format(&AudioFormat::target(), &candidates).unwrap();
        assert_eq!(sample_format, SampleFormat::I16);
        assert_eq!(format.sample_rate_hz, 44100);
        assert_eq!(format.channel_count, 1);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_type, SampleType::Signed);
    }

    #[test]
    fn integer_layouts_win_over_float() {
        let candidates = [
            candidate(1, 44100, 44100, SampleFormat::F32),
            candidate(2, 48000, 48000, SampleFormat::U8),
        ];
        let (format, sample_format) = nearest_format(&AudioFormat::target(), &candidates).unwrap();
        assert_eq!(sample_format, SampleFormat::U8);
        assert_eq!(format.bits_per_sample, 8);
        assert_eq!(format.sample_type, SampleType::Unsigned);
        assert_eq!(format.sample_rate_hz, 48000);
        assert_eq!(format.channel_count, 2);
    }

    #[test]
    fn float_only_device_keeps_sixteen_bit_encoding() {
        let candidates = [candidate(2, 48000, 48000, SampleFormat::F32)];
        let (format, sample_format) = nearest_format(&AudioFormat::target(), &candidates).unwrap();
        assert_eq!(sample_format, SampleFormat::F32);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_type, SampleType::Signed);
        assert_eq!(format.byte_order, ByteOrder::Little);
        assert_eq!(format.channel_count, 2);
    }

    #[test]
    fn closer_channel_count_and_rate_break_ties() {
        let candidates = [
            candidate(6, 44100, 44100, SampleFormat::I16),
            candidate(2, 22050, 22050, SampleFormat::I16),
            candidate(2, 32000, 48000, SampleFormat::I16),
        ];
        let (format, _) = nearest_format(&AudioFormat::target(), &candidates).unwrap();
        assert_eq!(format.channel_count, 2);
        assert_eq!(format.sample_rate_hz, 44100);
    }

    #[test]
    fn no_candidates_means_no_format() {
        assert!(nearest_format(&AudioFormat::target(), &[]).is_none());
    }
}
