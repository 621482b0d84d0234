//! End-to-end pipeline tests: noise through conditioning through the
//! playback state machine, at real session dimensions.

use std::cell::RefCell;
use std::rc::Rc;

use oido_cal::CalibrationCurve;
use oido_core::{Noise, level, linear_to_db};
use oido_session::{AudioSink, PlaybackLoop, PlaybackState, SessionConfig, condition};

#[derive(Default, Clone)]
struct RecordingSink {
    buffers: Rc<RefCell<Vec<Vec<f64>>>>,
}

impl AudioSink for RecordingSink {
    fn submit(&mut self, samples: Vec<f64>, _sample_rate: u32) {
        self.buffers.borrow_mut().push(samples);
    }
}

#[test]
fn one_second_tone_hits_level_targets() {
    let config = SessionConfig::default();
    let noise = Noise::with_seed(0xBEEF).generate(config.tone_duration, config.sample_rate);

    let conditioned = condition(&noise, 1000.0, &config).unwrap();
    assert_eq!(conditioned.samples.len(), 48000);

    let w = config.declick_samples;
    let interior = &conditioned.samples[w..conditioned.samples.len() - w];
    let rms_db = linear_to_db(level::rms(interior));
    assert!(
        (rms_db - config.target_rms_db).abs() < 0.01,
        "interior RMS {rms_db} dB"
    );

    let crest = conditioned.diagnostics.crest_factor_db;
    assert!(crest.is_finite() && crest > 0.0, "crest {crest} dB");
    assert_eq!(conditioned.diagnostics.nan_count, 0);
}

#[test]
fn every_band_conditions_at_default_rate() {
    let config = SessionConfig::default();
    let noise = Noise::with_seed(7).generate(config.tone_duration, config.sample_rate);

    for band in 0..oido_cal::BAND_COUNT {
        let freq = oido_cal::frequency_of(band).unwrap();
        let conditioned = condition(&noise, freq, &config).unwrap();
        assert_eq!(
            conditioned.diagnostics.nan_count, 0,
            "band {band} ({freq} Hz) produced non-finite samples"
        );
    }
}

#[test]
fn playback_sequence_alternates_and_stops() {
    let config = SessionConfig {
        tone_duration: 0.1,
        ..SessionConfig::default()
    };
    let sink = RecordingSink::default();
    let buffers = sink.buffers.clone();
    let mut playback = PlaybackLoop::new(config, sink);
    let curve = CalibrationCurve::new();

    playback.start_with(&mut Noise::with_seed(42)).unwrap();
    assert_eq!(playback.state(), PlaybackState::PlayingReference);

    // Three full cycles on band 15
    for _ in 0..3 {
        assert_eq!(
            playback.buffer_ended(15, &curve).unwrap(),
            PlaybackState::PlayingVariable
        );
        assert_eq!(
            playback.buffer_ended(15, &curve).unwrap(),
            PlaybackState::PlayingReference
        );
    }
    // start + 3 * (variable + reference)
    assert_eq!(buffers.borrow().len(), 7);

    // Reference buffers are byte-identical across cycles: the shared
    // noise never re-randomizes mid-session
    assert_eq!(buffers.borrow()[0], buffers.borrow()[2]);
    assert_eq!(buffers.borrow()[2], buffers.borrow()[4]);

    playback.stop_handle().request_stop();
    assert_eq!(playback.state(), PlaybackState::Stopping);
    assert_eq!(
        playback.buffer_ended(15, &curve).unwrap(),
        PlaybackState::Idle
    );
    assert_eq!(buffers.borrow().len(), 7, "no audio after stop");
}

#[test]
fn restart_after_stop_generates_fresh_session() {
    let config = SessionConfig {
        tone_duration: 0.1,
        ..SessionConfig::default()
    };
    let sink = RecordingSink::default();
    let buffers = sink.buffers.clone();
    let mut playback = PlaybackLoop::new(config, sink);
    let curve = CalibrationCurve::new();

    playback.start_with(&mut Noise::with_seed(1)).unwrap();
    playback.stop_handle().request_stop();
    playback.buffer_ended(0, &curve).unwrap();

    playback.start_with(&mut Noise::with_seed(2)).unwrap();
    assert_eq!(playback.state(), PlaybackState::PlayingReference);
    assert_eq!(buffers.borrow().len(), 2);
    // Different seed, different noise, different reference
    assert_ne!(buffers.borrow()[0], buffers.borrow()[1]);
}
