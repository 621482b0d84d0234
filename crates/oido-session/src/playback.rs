//! Playback cycle state machine.
//!
//! The original tool chained playback cycles through buffer-completion
//! callbacks. Here the loop is an explicit state machine:
//!
//! ```text
//! Idle ──start──▶ PlayingReference ──ended──▶ PlayingVariable
//!                        ▲                          │
//!                        └──────────ended───────────┘
//! ```
//!
//! Transitions are driven by [`PlaybackLoop::buffer_ended`] events from the
//! audio-output collaborator. Cancellation is cooperative: a
//! [`StopHandle`] sets a flag, the machine reports `Stopping` while the
//! in-flight buffer plays out, and the next completion event lands in
//! `Idle`. There is no mid-buffer abort.
//!
//! A failed filter design or normalization for one band skips that cycle
//! with a warning: the reference is resubmitted, the calibration curve is
//! untouched, and the loop keeps running.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use oido_cal::{CalibrationCurve, REFERENCE_FREQ, frequency_of, reference_gain, tone_gain};
use oido_core::Noise;

use crate::condition::condition;
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Destination for fully processed, gain-applied sample buffers.
///
/// The audio-output collaborator seam: device scheduling, clocks and
/// completion callbacks live behind it. Object-safe so embeddings can pick
/// a backend at runtime.
pub trait AudioSink {
    /// Hands a buffer to the output device for playback.
    fn submit(&mut self, samples: Vec<f64>, sample_rate: u32);
}

/// Where the playback loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No cycle running.
    Idle,
    /// The fixed 500 Hz anchor tone is in flight.
    PlayingReference,
    /// The user-adjustable band tone is in flight.
    PlayingVariable,
    /// Stop requested; the in-flight buffer is playing out.
    Stopping,
}

/// Cooperative cancellation flag.
///
/// Clone freely; all clones share one flag. Safe to set from another
/// thread while the loop itself stays single-threaded.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests a stop; observed at the next cycle boundary.
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once a stop has been requested and not yet absorbed.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// The reference/variable alternation loop.
///
/// Owns the shared noise buffer and the conditioned reference tone for one
/// play session; both are created once per [`PlaybackLoop::start`] and
/// reused across cycles, so the anchor never re-randomizes mid-session.
pub struct PlaybackLoop<S: AudioSink> {
    config: SessionConfig,
    sink: S,
    state: PlaybackState,
    stop: StopHandle,
    noise: Vec<f64>,
    reference: Vec<f64>,
}

impl<S: AudioSink> PlaybackLoop<S> {
    /// Creates an idle loop over `sink`.
    pub fn new(config: SessionConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            state: PlaybackState::Idle,
            stop: StopHandle::default(),
            noise: Vec::new(),
            reference: Vec::new(),
        }
    }

    /// A handle that can request a cooperative stop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current state; reports [`PlaybackState::Stopping`] while a stop
    /// request waits for the in-flight buffer.
    pub fn state(&self) -> PlaybackState {
        match self.state {
            PlaybackState::PlayingReference | PlaybackState::PlayingVariable
                if self.stop.is_requested() =>
            {
                PlaybackState::Stopping
            }
            state => state,
        }
    }

    /// Starts a play session with fresh noise.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_with(&mut Noise::new())
    }

    /// Starts a play session drawing noise from `source`.
    ///
    /// Generates the shared noise buffer, conditions the 500 Hz reference
    /// once, submits it, and enters `PlayingReference`. A no-op unless the
    /// loop is idle.
    ///
    /// # Errors
    ///
    /// Propagates conditioning failures for the reference tone; the loop
    /// stays idle in that case.
    pub fn start_with(&mut self, source: &mut Noise) -> Result<(), SessionError> {
        if self.state != PlaybackState::Idle {
            debug!("start ignored: loop already running");
            return Ok(());
        }

        self.stop.clear();
        self.noise = source.generate(self.config.tone_duration, self.config.sample_rate);
        self.reference = condition(&self.noise, REFERENCE_FREQ, &self.config)?.samples;

        self.submit_reference();
        self.state = PlaybackState::PlayingReference;
        info!(sample_rate = self.config.sample_rate, "playback started");
        Ok(())
    }

    /// Advances the machine on a buffer-completion event.
    ///
    /// `band` and the trim read from `curve` are snapshotted here, at the
    /// top of the cycle, so a UI adjustment mid-buffer applies to the next
    /// cycle as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Curve`] for an out-of-range band. Per-band
    /// DSP failures do not surface as errors: the cycle is skipped with a
    /// warning and the loop continues on the reference tone.
    pub fn buffer_ended(
        &mut self,
        band: usize,
        curve: &CalibrationCurve,
    ) -> Result<PlaybackState, SessionError> {
        if self.stop.is_requested() || self.state == PlaybackState::Idle {
            // The in-flight buffer has played out; the loop exits here.
            // Stray completions arriving while already idle are inert:
            // they must not absorb a pending stop request.
            if self.state != PlaybackState::Idle {
                self.state = PlaybackState::Idle;
                self.stop.clear();
                info!("playback stopped");
            }
            return Ok(PlaybackState::Idle);
        }

        match self.state {
            PlaybackState::PlayingReference => {
                let freq = frequency_of(band)?;
                let trim = curve.get(band)?;
                match condition(&self.noise, freq, &self.config) {
                    Ok(conditioned) => {
                        let gain = tone_gain(band, trim, self.config.gain_mode())?;
                        let samples: Vec<f64> =
                            conditioned.samples.iter().map(|s| s * gain).collect();
                        self.sink.submit(samples, self.config.sample_rate as u32);
                        self.state = PlaybackState::PlayingVariable;
                    }
                    Err(err) => {
                        warn!(%err, band, freq, "skipping cycle, band tone failed");
                        self.submit_reference();
                    }
                }
            }
            PlaybackState::PlayingVariable => {
                self.submit_reference();
                self.state = PlaybackState::PlayingReference;
            }
            // Both handled by the stop check above.
            PlaybackState::Idle | PlaybackState::Stopping => {}
        }

        Ok(self.state)
    }

    fn submit_reference(&mut self) {
        let gain = reference_gain();
        let samples: Vec<f64> = self.reference.iter().map(|s| s * gain).collect();
        self.sink.submit(samples, self.config.sample_rate as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every submitted buffer's length and peak gain-scaled level.
    #[derive(Default, Clone)]
    struct RecordingSink {
        buffers: Rc<RefCell<Vec<Vec<f64>>>>,
    }

    impl AudioSink for RecordingSink {
        fn submit(&mut self, samples: Vec<f64>, _sample_rate: u32) {
            self.buffers.borrow_mut().push(samples);
        }
    }

    fn quick_config() -> SessionConfig {
        // Short buffers keep the state machine tests fast
        SessionConfig {
            tone_duration: 0.1,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_start_submits_reference() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);

        playback.start_with(&mut Noise::with_seed(1)).unwrap();

        assert_eq!(playback.state(), PlaybackState::PlayingReference);
        assert_eq!(buffers.borrow().len(), 1);
        assert_eq!(buffers.borrow()[0].len(), 4800);
    }

    #[test]
    fn test_cycle_alternates_tones() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);
        let curve = CalibrationCurve::new();

        playback.start_with(&mut Noise::with_seed(1)).unwrap();
        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::PlayingVariable);
        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::PlayingReference);

        // reference, variable, reference
        assert_eq!(buffers.borrow().len(), 3);
    }

    #[test]
    fn test_stop_is_cooperative() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);
        let curve = CalibrationCurve::new();

        playback.start_with(&mut Noise::with_seed(1)).unwrap();
        let stop = playback.stop_handle();
        stop.request_stop();

        // In-flight buffer still playing; machine reports Stopping
        assert_eq!(playback.state(), PlaybackState::Stopping);

        // Completion event lands in Idle without submitting more audio
        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::Idle);
        assert_eq!(buffers.borrow().len(), 1);

        // A later stray completion stays Idle
        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::Idle);
    }

    #[test]
    fn test_failed_band_skips_cycle_and_continues() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);
        let mut curve = CalibrationCurve::new();
        curve.set(20, 3.0).unwrap();
        let before = curve.clone();

        playback.start_with(&mut Noise::with_seed(1)).unwrap();

        // Band 27 is 16 kHz: fine at 48 kHz. Force a failure instead with
        // a sample rate where the top band violates Nyquist.
        playback.config.sample_rate = 32000.0;
        let state = playback.buffer_ended(27, &curve).unwrap();

        // Cycle skipped: still on the reference, a reference buffer was
        // resubmitted, and the curve is untouched
        assert_eq!(state, PlaybackState::PlayingReference);
        assert_eq!(buffers.borrow().len(), 2);
        assert_eq!(curve, before);

        // The loop is still alive for other bands
        playback.config.sample_rate = 48000.0;
        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::PlayingVariable);
    }

    #[test]
    fn test_stray_completion_while_idle_is_inert() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);
        let curve = CalibrationCurve::new();

        // Stop requested before anything is playing
        let stop = playback.stop_handle();
        stop.request_stop();

        let state = playback.buffer_ended(15, &curve).unwrap();
        assert_eq!(state, PlaybackState::Idle);
        // The stray event neither submitted audio nor absorbed the flag
        assert!(stop.is_requested());
        assert_eq!(buffers.borrow().len(), 0);

        // Starting a session clears the stale request
        playback.start_with(&mut Noise::with_seed(3)).unwrap();
        assert!(!stop.is_requested());
        assert_eq!(playback.state(), PlaybackState::PlayingReference);
    }

    #[test]
    fn test_out_of_range_band_is_an_error() {
        let mut playback = PlaybackLoop::new(quick_config(), RecordingSink::default());
        let curve = CalibrationCurve::new();
        playback.start_with(&mut Noise::with_seed(1)).unwrap();

        let err = playback.buffer_ended(28, &curve).unwrap_err();
        assert!(matches!(err, SessionError::Curve(_)));
    }

    #[test]
    fn test_start_while_running_is_a_no_op() {
        let sink = RecordingSink::default();
        let buffers = sink.buffers.clone();
        let mut playback = PlaybackLoop::new(quick_config(), sink);

        playback.start_with(&mut Noise::with_seed(1)).unwrap();
        playback.start_with(&mut Noise::with_seed(2)).unwrap();

        assert_eq!(buffers.borrow().len(), 1);
    }
}
