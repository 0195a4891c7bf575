// ============================================
//                  Scope/Imports
// ============================================
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use log::{debug, error, info, warn};
use crate::error::{Result, ToneError};
use crate::format::AudioFormat;
use crate::settings::ApplicationSettings;
use crate::sine::SampleEncoding;
use crate::sink::{AudioSink, OutputDevice, SinkState};
use crate::stream::PlaybackStream;

// ============================================
//       Output Device
// Hands out one cpal sink per tone session on
// the negotiated default device.
// ============================================
pub struct CpalOutput {
    settings: ApplicationSettings,
}

impl CpalOutput {
    pub fn new(settings: ApplicationSettings) -> Self {
        info!("AUDIO: Default output device: {}", settings.get_device_name());
        Self { settings }
    }

    pub fn settings(&self) -> &ApplicationSettings {
        &self.settings
    }
}

impl OutputDevice for CpalOutput {
    type Sink = CpalSink;

    fn open_sink(&self, format: &AudioFormat) -> Result<CpalSink> {
        let encoding = SampleEncoding::for_format(format)?;
        let config = cpal::StreamConfig {
            channels: format.channel_count as u16,
            sample_rate: cpal::SampleRate(format.sample_rate_hz),
            buffer_size: cpal::BufferSize::Default,
        };
        debug!("AUDIO: Opening sink with config {:?}", config);
        Ok(CpalSink {
            device: self.settings.get_device().clone(),
            config,
            sample_format: self.settings.get_sample_format(),
            encoding,
            stream: None,
            source: None,
            status: SinkStatus::new(),
        })
    }
}

// ============================================
//            Sink Status
// The stream error callback raises the fault
// flag from the device thread; a faulted sink
// reads as Idle until it is started again.
// ============================================
struct SinkStatus {
    state: SinkState,
    faulted: Arc<AtomicBool>,
}

impl SinkStatus {
    fn new() -> Self {
        Self {
            state: SinkState::Stopped,
            faulted: Arc::new(AtomicBool::new(false)),
        }
    }

    fn fault_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.faulted)
    }

    fn set(&mut self, state: SinkState) {
        self.state = state;
    }

    fn clear_fault(&self) {
        self.faulted.store(false, Ordering::Relaxed);
    }

    fn current(&self) -> SinkState {
        if self.faulted.load(Ordering::Relaxed) {
            SinkState::Idle
        } else {
            self.state
        }
    }
}

// ============================================
//            Device Sink
// ============================================
pub struct CpalSink {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: SampleFormat,
    encoding: SampleEncoding,
    stream: Option<cpal::Stream>,
    source: Option<Arc<Mutex<PlaybackStream>>>,
    status: SinkStatus,
}

impl CpalSink {
    fn build_stream<T>(&self, source: Arc<Mutex<PlaybackStream>>) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let encoding = self.encoding;
        let width = encoding.width();
        let faulted = self.status.fault_flag();
        let mut bytes: Vec<u8> = Vec::new();

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    bytes.resize(data.len() * width, 0);
                    let filled = match source.lock() {
                        Ok(mut stream) => stream.read(&mut bytes),
                        Err(_) => 0,
                    };
                    if filled < bytes.len() {
                        data.fill(T::EQUILIBRIUM);
                        return;
                    }
                    for (sample, chunk) in data.iter_mut().zip(bytes.chunks_exact(width)) {
                        *sample = T::from_sample(encoding.decode(chunk));
                    }
                },
                move |err| {
                    error!("SINK: An error occurred on the output audio stream: {}", err);
                    faulted.store(true, Ordering::Relaxed);
                },
                None,
            )
            .map_err(|e| match e {
                cpal::BuildStreamError::DeviceNotAvailable => ToneError::DeviceUnavailable(e.to_string()),
                _ => ToneError::StreamCreate(e.to_string()),
            })
    }
}

impl AudioSink for CpalSink {
    fn start(&mut self, source: PlaybackStream) -> Result<()> {
        if self.stream.is_some() {
            self.stop();
        }
        self.status.clear_fault();

        let source = Arc::new(Mutex::new(source));
        let stream = match self.sample_format {
            SampleFormat::I8 => self.build_stream::<i8>(Arc::clone(&source)),
            SampleFormat::U8 => self.build_stream::<u8>(Arc::clone(&source)),
            SampleFormat::I16 => self.build_stream::<i16>(Arc::clone(&source)),
            SampleFormat::U16 => self.build_stream::<u16>(Arc::clone(&source)),
            SampleFormat::I32 => self.build_stream::<i32>(Arc::clone(&source)),
            SampleFormat::F32 => self.build_stream::<f32>(Arc::clone(&source)),
            SampleFormat::F64 => self.build_stream::<f64>(Arc::clone(&source)),
            sample_format => Err(ToneError::UnsupportedFormat(format!(
                "device sample format '{sample_format}'"
            ))),
        }?;

        stream.play().map_err(|e| ToneError::Playback(e.to_string()))?;
        info!("SINK: Output stream started ({})", self.sample_format);
        self.stream = Some(stream);
        self.source = Some(source);
        self.status.set(SinkState::Active);
        Ok(())
    }

    fn suspend(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            return;
        };
        match stream.pause() {
            Ok(()) => self.status.set(SinkState::Suspended),
            Err(e) => {
                warn!("SINK: Unable to suspend output stream: {}", e);
                self.status.set(SinkState::Idle);
            }
        }
    }

    fn resume(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            return;
        };
        match stream.play() {
            Ok(()) => self.status.set(SinkState::Active),
            Err(e) => {
                warn!("SINK: Unable to resume output stream: {}", e);
                self.status.set(SinkState::Idle);
            }
        }
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                debug!("SINK: Unable to pause output stream: {}", e);
            }
            // Dropping the stream releases the device
            drop(stream);
        }
        if let Some(source) = self.source.take() {
            if let Ok(mut source) = source.lock() {
                source.stop();
            }
        }
        self.status.set(SinkState::Stopped);
    }

    fn state(&self) -> SinkState {
        self.status.current()
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        self.stop();
    }
}
