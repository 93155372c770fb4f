//! Frame timing: delta time, measured frame rate and frame pacing.
//!
//! Timestamps are milliseconds, as handed to `requestAnimationFrame` callbacks.

use std::collections::VecDeque;

/// Frames averaged for the measured frame rate.
const FPS_SAMPLES: usize = 10;
/// Longest frame fed to the simulation, in seconds.
const MAX_DT: f64 = 0.25;
/// Delta reported for the first frame when uncapped.
const DEFAULT_FRAME_SECS: f64 = 1.0 / 60.0;
/// Slack so a frame arriving a hair early on a 60 Hz display still counts.
const PACING_TOLERANCE_MS: f64 = 1.0;

/// Tracks accepted frames and paces the loop to a target rate.
#[derive(Clone, Debug)]
pub struct FrameClock {
	/// Minimum spacing between frames; zero when uncapped.
	interval_ms: f64,
	start: Option<f64>,
	last: Option<f64>,
	/// Earliest timestamp the next frame may run at.
	next_deadline: Option<f64>,
	durations: VecDeque<f64>,
}

impl FrameClock {
	/// Clock pacing to `target_fps`; zero disables pacing.
	pub fn new(target_fps: u32) -> Self {
		let interval_ms = if target_fps == 0 {
			0.0
		} else {
			1000.0 / target_fps as f64
		};
		Self {
			interval_ms,
			start: None,
			last: None,
			next_deadline: None,
			durations: VecDeque::with_capacity(FPS_SAMPLES),
		}
	}

	/// Whether enough time has passed to run another frame.
	///
	/// Frames are measured against a running deadline rather than the last
	/// accepted frame, so displays whose refresh period doesn't divide the
	/// interval still average the target rate.
	pub fn ready(&self, now: f64) -> bool {
		match self.next_deadline {
			Some(deadline) => now >= deadline - PACING_TOLERANCE_MS,
			None => true,
		}
	}

	fn advance_deadline(&mut self, now: f64) {
		if self.interval_ms <= 0.0 {
			return;
		}
		// Falling behind by more than one interval drops the backlog instead
		// of bursting to catch up.
		self.next_deadline = Some(match self.next_deadline {
			Some(deadline) => (deadline + self.interval_ms).max(now - self.interval_ms),
			None => now + self.interval_ms,
		});
	}

	/// Accepts a frame at `now` and returns the elapsed time in seconds.
	///
	/// The first frame has nothing to measure against and reports one nominal
	/// frame, so particles spawned on it get a non-zero fade-in step.
	pub fn tick(&mut self, now: f64) -> f64 {
		self.advance_deadline(now);
		let Some(last) = self.last.replace(now) else {
			self.start = Some(now);
			return self.nominal_dt();
		};

		let duration = (now - last).max(0.0);
		if self.durations.len() == FPS_SAMPLES {
			self.durations.pop_front();
		}
		self.durations.push_back(duration);

		(duration / 1000.0).min(MAX_DT)
	}

	fn nominal_dt(&self) -> f64 {
		if self.interval_ms > 0.0 {
			self.interval_ms / 1000.0
		} else {
			DEFAULT_FRAME_SECS
		}
	}

	/// Average frame rate over recent frames, `0.0` until enough are recorded.
	pub fn fps(&self) -> f64 {
		if self.durations.len() < FPS_SAMPLES {
			return 0.0;
		}
		let total: f64 = self.durations.iter().sum();
		if total <= 0.0 {
			return 0.0;
		}
		1000.0 * self.durations.len() as f64 / total
	}

	/// Milliseconds since the first accepted frame.
	pub fn elapsed_ms(&self, now: f64) -> f64 {
		self.start.map_or(0.0, |start| now - start)
	}
}
