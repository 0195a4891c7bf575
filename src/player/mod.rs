use log::{debug, error, info};
use crate::bands::{Band, OctaveStep};
use crate::error::Result;
use crate::format::AudioFormat;
use crate::sine::{ToneRequest, WaveformGenerator};
use crate::sink::{toggle_suspend_resume, AudioSink, OutputDevice, SinkState, ToggleAction};
use crate::stream::PlaybackStream;

/// The one tone currently owned by the controller. The sink owns the stream.
struct Session<S> {
    request: ToneRequest,
    sink: S,
}

/// Turns button presses into tone sessions, one at a time.
pub struct PlaybackController<D: OutputDevice> {
    device: D,
    format: AudioFormat,
    duration_us: u64,
    session: Option<Session<D::Sink>>,
}

impl<D: OutputDevice> PlaybackController<D> {
    pub fn new(device: D, format: AudioFormat, duration_us: u64) -> Self {
        Self {
            device,
            format,
            duration_us,
            session: None,
        }
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    pub fn current_request(&self) -> Option<ToneRequest> {
        self.session.as_ref().map(|session| session.request)
    }

    pub fn sink_state(&self) -> Option<SinkState> {
        self.session.as_ref().map(|session| session.sink.state())
    }

    pub fn press(&mut self, band: Band, step: OctaveStep) -> Result<()> {
        let frequency_hz = band.frequency(step);
        debug!("PLAYER: {} pressed ({} Hz)", band.button(step), frequency_hz);
        self.press_frequency(frequency_hz)
    }

    /// Same sequence as a button press, for a frequency off the panel.
    pub fn press_frequency(&mut self, frequency_hz: u32) -> Result<()> {
        self.play(ToneRequest::new(frequency_hz, self.duration_us))?;
        self.toggle();
        Ok(())
    }

    pub fn release(&mut self, band: Band, step: OctaveStep) -> ToggleAction {
        debug!("PLAYER: {} released", band.button(step));
        self.toggle()
    }

    /// Replaces the current session with a new one for `request` and applies
    /// the first toggle. On error nothing is left playing.
    fn play(&mut self, request: ToneRequest) -> Result<()> {
        self.stop();

        let session = self.open_session(request).map_err(|e| {
            error!("PLAYER: Failed to start {} Hz tone: {}", request.frequency_hz, e);
            e
        })?;
        self.session = Some(session);
        info!("PLAYER: Playing {} Hz", request.frequency_hz);

        self.toggle();
        Ok(())
    }

    fn open_session(&self, request: ToneRequest) -> Result<Session<D::Sink>> {
        let generator = WaveformGenerator::new(self.format)?;
        let buffer = generator.generate(&request)?;
        let mut stream = PlaybackStream::new(buffer);
        stream.start()?;

        let mut sink = self.device.open_sink(&self.format)?;
        sink.start(stream)?;
        Ok(Session { request, sink })
    }

    pub fn toggle(&mut self) -> ToggleAction {
        match self.session.as_mut() {
            Some(session) => {
                let action = toggle_suspend_resume(&mut session.sink);
                debug!("PLAYER: Toggle -> {:?}", action);
                action
            }
            None => ToggleAction::Ignored,
        }
    }

    /// Stops and drops the current session, if any.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.sink.stop();
            debug!("PLAYER: Released {} Hz session", session.request.frequency_hz);
        }
    }
}

impl<D: OutputDevice> Drop for PlaybackController<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
