use crate::error::Result;
use crate::format::AudioFormat;
use crate::stream::PlaybackStream;

/// Observable state of an output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    Stopped,
    Active,
    Suspended,
    /// Nothing to render or the device went away
    Idle,
}

/// What a toggle request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Resumed,
    Suspended,
    Ignored,
}

/// Something that pulls bytes from a stream and renders them.
pub trait AudioSink {
    /// Takes ownership of an opened stream and begins pulling from it.
    fn start(&mut self, source: PlaybackStream) -> Result<()>;

    fn suspend(&mut self);

    fn resume(&mut self);

    /// Stops rendering and releases the stream. Safe to call twice.
    fn stop(&mut self);

    fn state(&self) -> SinkState;
}

/// Hands out a fresh sink for each playback session.
pub trait OutputDevice {
    type Sink: AudioSink;

    fn open_sink(&self, format: &AudioFormat) -> Result<Self::Sink>;
}

/// Suspend an active sink, resume a suspended or stopped one, leave an idle
/// one alone.
pub fn toggle_suspend_resume<S: AudioSink + ?Sized>(sink: &mut S) -> ToggleAction {
    match sink.state() {
        SinkState::Suspended | SinkState::Stopped => {
            sink.resume();
            ToggleAction::Resumed
        }
        SinkState::Active => {
            sink.suspend();
            ToggleAction::Suspended
        }
        SinkState::Idle => ToggleAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        state: Option<SinkState>,
        resumes: usize,
        suspends: usize,
        stops: usize,
    }

    impl AudioSink for CountingSink {
        fn start(&mut self, _source: PlaybackStream) -> Result<()> {
            Ok(())
        }

        fn suspend(&mut self) {
            self.suspends += 1;
        }

        fn resume(&mut self) {
            self.resumes += 1;
        }

        fn stop(&mut self) {
            self.stops += 1;
        }

        fn state(&self) -> SinkState {
            self.state.unwrap_or(SinkState::Stopped)
        }
    }

    fn toggled(state: SinkState) -> (ToggleAction, CountingSink) {
        let mut sink = CountingSink { state: Some(state), ..Default::default() };
        let action = toggle_suspend_resume(&mut sink);
        (action, sink)
    }

    #[test]
    fn suspended_sink_is_resumed_once() {
        let (action, sink) = toggled(SinkState::Suspended);
        assert_eq!(action, ToggleAction::Resumed);
        assert_eq!((sink.resumes, sink.suspends, sink.stops), (1, 0, 0));
    }

    #[test]
    fn active_sink_is_suspended_once() {
        let (action, sink) = toggled(SinkState::Active);
        assert_eq!(action, ToggleAction::Suspended);
        assert_eq!((sink.resumes, sink.suspends, sink.stops), (0, 1, 0));
    }

    #[test]
    fn stopped_sink_is_rearmed() {
        let (action, sink) = toggled(SinkState::Stopped);
        assert_eq!(action, ToggleAction::Resumed);
        assert_eq!((sink.resumes, sink.suspends), (1, 0));
    }

    #[test]
    fn idle_sink_is_untouched() {
        let (action, sink) = toggled(SinkState::Idle);
        assert_eq!(action, ToggleAction::Ignored);
        assert_eq!((sink.resumes, sink.suspends, sink.stops), (0, 0, 0));
    }
}
