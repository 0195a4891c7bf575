use std::f64::consts::PI;
use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use log::{debug, info};
use crate::config::MAX_TONE_DURATION_US;
use crate::error::{Result, ToneError};
use crate::format::{AudioFormat, ByteOrder, SampleType};

/// One press worth of tone: what to play and how much of it to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRequest {
    pub frequency_hz: u32,
    pub duration_us: u64,
}

impl ToneRequest {
    pub fn new(frequency_hz: u32, duration_us: u64) -> Self {
        Self { frequency_hz, duration_us }
    }
}

/// How a single phase value is laid out in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    U8,
    I8,
    U16(ByteOrder),
    I16(ByteOrder),
}

impl SampleEncoding {
    pub fn for_format(format: &AudioFormat) -> Result<Self> {
        match (format.bits_per_sample, format.sample_type) {
            (8, SampleType::Unsigned) => Ok(SampleEncoding::U8),
            (8, SampleType::Signed) => Ok(SampleEncoding::I8),
            (16, SampleType::Unsigned) => Ok(SampleEncoding::U16(format.byte_order)),
            (16, SampleType::Signed) => Ok(SampleEncoding::I16(format.byte_order)),
            (bits, sample_type) => Err(ToneError::UnsupportedFormat(
                format!("no quantization rule for {}-bit {:?} samples", bits, sample_type),
            )),
        }
    }

    /// Bytes per encoded sample
    pub fn width(&self) -> usize {
        match self {
            SampleEncoding::U8 | SampleEncoding::I8 => 1,
            SampleEncoding::U16(_) | SampleEncoding::I16(_) => 2,
        }
    }

    /// Integer code for a phase value in [-1, 1].
    pub fn quantize(&self, x: f64) -> i32 {
        match self {
            SampleEncoding::U8 => ((1.0 + x) / 2.0 * 255.0).round() as u8 as i32,
            SampleEncoding::I8 => (x * 127.0).round() as i8 as i32,
            SampleEncoding::U16(_) => ((1.0 + x) / 2.0 * 65535.0).round() as u16 as i32,
            SampleEncoding::I16(_) => (x * 32767.0).round() as i16 as i32,
        }
    }

    /// Writes the code for `x` into `out`, which must be `width()` bytes long.
    pub fn encode(&self, x: f64, out: &mut [u8]) {
        let code = self.quantize(x);
        match self {
            SampleEncoding::U8 => out[0] = code as u8,
            SampleEncoding::I8 => out[0] = code as i8 as u8,
            SampleEncoding::U16(ByteOrder::Little) => LittleEndian::write_u16(out, code as u16),
            SampleEncoding::U16(ByteOrder::Big) => BigEndian::write_u16(out, code as u16),
            SampleEncoding::I16(ByteOrder::Little) => LittleEndian::write_i16(out, code as i16),
            SampleEncoding::I16(ByteOrder::Big) => BigEndian::write_i16(out, code as i16),
        }
    }

    /// Inverse of `encode`, normalised back to [-1, 1] for device rendering.
    pub fn decode(&self, bytes: &[u8]) -> f32 {
        let value = match self {
            SampleEncoding::U8 => bytes[0] as f32 / 255.0 * 2.0 - 1.0,
            SampleEncoding::I8 => bytes[0] as i8 as f32 / 127.0,
            SampleEncoding::U16(order) => {
                let code = match order {
                    ByteOrder::Little => LittleEndian::read_u16(bytes),
                    ByteOrder::Big => BigEndian::read_u16(bytes),
                };
                code as f32 / 65535.0 * 2.0 - 1.0
            }
            SampleEncoding::I16(order) => {
                let code = match order {
                    ByteOrder::Little => LittleEndian::read_i16(bytes),
                    ByteOrder::Big => BigEndian::read_i16(bytes),
                };
                code as f32 / 32767.0
            }
        };
        value.clamp(-1.0, 1.0)
    }
}

/// Fixed PCM content for one tone. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformBuffer {
    data: Vec<u8>,
}

impl WaveformBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for WaveformBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

pub struct WaveformGenerator {
    format: AudioFormat,
    encoding: SampleEncoding,
}

impl WaveformGenerator {
    pub fn new(format: AudioFormat) -> Result<Self> {
        let encoding = SampleEncoding::for_format(&format)?;
        debug!("SINE: Generator ready for {:?} using {:?}", format, encoding);
        Ok(Self { format, encoding })
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }

    pub fn generate(&self, request: &ToneRequest) -> Result<WaveformBuffer> {
        if request.frequency_hz == 0 {
            return Err(ToneError::InvalidRequest("frequency must be above 0 Hz".to_string()));
        }
        if request.duration_us == 0 {
            return Err(ToneError::InvalidRequest("duration must be above 0 us".to_string()));
        }
        if request.duration_us > MAX_TONE_DURATION_US {
            return Err(ToneError::InvalidRequest(format!(
                "duration of {} us exceeds the {} us limit",
                request.duration_us, MAX_TONE_DURATION_US
            )));
        }

        let frame_bytes = self.format.frame_bytes();
        if frame_bytes == 0 {
            return Err(ToneError::UnsupportedFormat("format has no channels".to_string()));
        }
        let length = self
            .format
            .frames_for(request.duration_us)
            .and_then(|frames| usize::try_from(frames).ok())
            .and_then(|frames| frames.checked_mul(frame_bytes))
            .ok_or_else(|| {
                ToneError::InvalidRequest(format!("{} us does not fit in memory", request.duration_us))
            })?;
        if length % frame_bytes != 0 {
            return Err(ToneError::UnsupportedFormat(format!(
                "buffer of {} bytes is not a multiple of {}-byte frames",
                length, frame_bytes
            )));
        }

        let mut data = vec![0u8; length];
        let sample_rate = self.format.sample_rate_hz as usize;
        let frequency = request.frequency_hz as f64;
        let width = self.encoding.width();

        // The phase wraps on the output sample rate, not on the tone period
        for (sample_index, frame) in data.chunks_exact_mut(frame_bytes).enumerate() {
            let clock = (sample_index % sample_rate) as f64 / sample_rate as f64;
            let x = (2.0 * PI * frequency * clock).sin();
            for channel in frame.chunks_exact_mut(width) {
                self.encoding.encode(x, channel);
            }
        }

        info!("SINE: Generated {} bytes of {} Hz tone", length, request.frequency_hz);
        Ok(WaveformBuffer { data })
    }
}
