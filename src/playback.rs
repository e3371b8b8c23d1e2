use std::time::Duration;

// ---------------------------------------------------------------------------
// Animation playback
// ---------------------------------------------------------------------------

/// Current animation frame plus Play/Pause state.
///
/// Frames are 1-based; with zero frames the index stays at 1 and playback
/// never starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    frame: usize,
    frame_count: usize,
    playing: bool,
    elapsed: Duration,
    interval: Duration,
}

impl Playback {
    pub fn new(frame_count: usize, interval: Duration) -> Self {
        Self {
            frame: 1,
            frame_count,
            playing: false,
            elapsed: Duration::ZERO,
            interval,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Back to frame 1, paused. Called whenever the chart is rebuilt.
    pub fn reset(&mut self, frame_count: usize) {
        self.frame = 1;
        self.frame_count = frame_count;
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    /// Continue from the current frame; from the last frame, start over.
    pub fn play(&mut self) {
        if self.frame_count <= 1 {
            return;
        }
        if self.frame >= self.frame_count {
            self.frame = 1;
        }
        self.elapsed = Duration::ZERO;
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    /// Jump to a frame, clamped to the valid range.
    pub fn seek(&mut self, frame: usize) {
        self.frame = frame.clamp(1, self.frame_count.max(1));
        self.elapsed = Duration::ZERO;
    }

    /// Advance by `dt` of wall time. Returns `true` when the frame changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed += dt;
        let mut changed = false;
        while self.elapsed >= self.interval && self.frame < self.frame_count {
            self.elapsed -= self.interval;
            self.frame += 1;
            changed = true;
        }
        if self.frame >= self.frame_count {
            self.playing = false;
            self.elapsed = Duration::ZERO;
        }
        changed
    }

    /// Time left until the next frame while playing.
    pub fn until_next_frame(&self) -> Option<Duration> {
        self.playing
            .then(|| self.interval.saturating_sub(self.elapsed))
    }
}
