//! Oido calibration session.
//!
//! Ties the DSP primitives of `oido-core` and the band-indexed domain of
//! `oido-cal` into the runnable calibration pipeline:
//!
//! - [`condition`] - render one band tone: filter, de-click, measure,
//!   normalize to the target RMS
//! - [`SessionConfig`] - TOML-loadable processing constants
//! - [`PlaybackLoop`] - explicit state machine alternating reference and
//!   variable tones through an [`AudioSink`], with cooperative stop
//! - [`Session`] - owns the per-session calibration curve and config
//!
//! The pipeline is single-threaded and synchronous; every unit of work is
//! one bounded, fixed-duration buffer. The one concession to threaded
//! embeddings is the [`StopHandle`], an atomic flag a UI thread may set.

pub mod condition;
pub mod config;
pub mod error;
pub mod playback;
pub mod session;

pub use condition::{Conditioned, Diagnostics, condition};
pub use config::SessionConfig;
pub use error::SessionError;
pub use playback::{AudioSink, PlaybackLoop, PlaybackState, StopHandle};
pub use session::{BandView, Session};
