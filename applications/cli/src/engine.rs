//! Headless audio engine
//!
//! `ClockEngine` performs the real decode handoff (the stream is probed and
//! a decoder built with symphonia) but produces no sound: position advances
//! with the clock and `Ended` fires when the stream's length has elapsed.

use flac_playback::{AudioEngine, AudioResource, EventSink, PlaybackError, Result};
use std::io::Cursor;
use std::time::Duration;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Stream facts gathered during the handoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: usize,
    pub duration: Option<Duration>,
}

/// Probe `bytes` and make sure a decoder can be built for them
pub fn probe_stream(bytes: Vec<u8>) -> std::result::Result<StreamInfo, String> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("flac");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Failed to probe stream: {}", e))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No audio tracks found".to_string())?;
    let params = &track.codec_params;

    symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(|e| format!("Failed to create decoder: {}", e))?;

    let sample_rate = params.sample_rate.unwrap_or(44_100);
    let duration = params
        .n_frames
        .filter(|_| sample_rate > 0)
        .map(|frames| Duration::from_secs_f64(frames as f64 / f64::from(sample_rate)));

    Ok(StreamInfo {
        sample_rate,
        channels: params.channels.map_or(2, |c| c.count()),
        duration,
    })
}

/// Engine that validates streams and keeps time without audio output
#[derive(Debug, Default)]
pub struct ClockEngine;

impl ClockEngine {
    pub fn new() -> Self {
        Self
    }
}

impl AudioEngine for ClockEngine {
    fn create(
        &mut self,
        bytes: Vec<u8>,
        volume: f32,
        sink: EventSink,
    ) -> Result<Box<dyn AudioResource>> {
        let info = probe_stream(bytes).map_err(PlaybackError::Engine)?;
        tracing::debug!(
            "Stream {}: {} Hz, {} channels, {:?}",
            sink.handle(),
            info.sample_rate,
            info.channels,
            info.duration
        );
        Ok(Box::new(ClockResource::new(info.duration, volume, sink)))
    }
}

/// A loaded stream whose playhead is driven by the clock
pub struct ClockResource {
    sink: EventSink,
    duration: Option<Duration>,
    volume: f32,

    /// Position when the clock last (re)started
    base: Duration,
    started_at: Option<Instant>,
    end_timer: Option<JoinHandle<()>>,
}

impl ClockResource {
    pub fn new(duration: Option<Duration>, volume: f32, sink: EventSink) -> Self {
        Self {
            sink,
            duration,
            volume,
            base: Duration::ZERO,
            started_at: None,
            end_timer: None,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn clamp(&self, position: Duration) -> Duration {
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    /// Start the clock from `base` and schedule the end notification
    fn run_clock(&mut self) {
        self.cancel_timer();
        self.started_at = Some(Instant::now());

        if let Some(duration) = self.duration {
            let remaining = duration.saturating_sub(self.base);
            let sink = self.sink.clone();
            self.end_timer = Some(tokio::spawn(async move {
                tokio::time::sleep(remaining).await;
                sink.ended();
            }));
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
    }
}

impl AudioResource for ClockResource {
    fn play(&mut self) -> Result<()> {
        if !self.is_running() {
            self.run_clock();
        }
        self.sink.started();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.base = self.position();
        self.started_at = None;
        self.cancel_timer();
        self.sink.paused();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.cancel_timer();
        self.started_at = None;
        self.base = Duration::ZERO;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.base = self.clamp(position);
        if self.is_running() {
            self.run_clock();
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume;
        Ok(())
    }

    fn position(&self) -> Duration {
        let elapsed = self.started_at.map_or(Duration::ZERO, |at| at.elapsed());
        self.clamp(self.base + elapsed)
    }
}

impl Drop for ClockResource {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
