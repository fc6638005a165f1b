// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Frame-rate sampling over the host frame scheduler.

use std::sync::{Arc, Mutex, Weak};

use easel_core::host::FrameScheduler;
use easel_core::utils::lock;

/// Default sampling window, in milliseconds.
pub const DEFAULT_FPS_WINDOW_MS: f64 = 1000.0;

#[derive(Debug, Default)]
struct SamplerState {
    running: bool,
    generation: u64,
    frames: u32,
    window_start: Option<f64>,
    readings: Vec<f64>,
}

#[derive(Debug)]
struct SamplerInner {
    scheduler: Option<Arc<dyn FrameScheduler>>,
    window_ms: f64,
    state: Mutex<SamplerState>,
}

impl SamplerInner {
    /// Requests the next frame for the sampling run `generation`.
    fn request(self: &Arc<Self>, generation: u64) {
        let Some(scheduler) = self.scheduler.as_ref() else {
            return;
        };
        let weak: Weak<SamplerInner> = Arc::downgrade(self);
        let requested = scheduler.request_frame(Box::new(move |timestamp| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame(generation, timestamp);
            }
        }));
        if requested.is_err() {
            log::trace!("FPS sampler could not request a frame; sampling stops.");
            let mut state = lock(&self.state);
            if state.generation == generation {
                state.running = false;
            }
        }
    }

    fn on_frame(self: &Arc<Self>, generation: u64, timestamp: f64) {
        {
            let mut state = lock(&self.state);
            // Frames requested by an earlier run end that run's chain.
            if !state.running || state.generation != generation {
                return;
            }
            match state.window_start {
                None => state.window_start = Some(timestamp),
                Some(start) => {
                    state.frames += 1;
                    let elapsed = timestamp - start;
                    if elapsed >= self.window_ms {
                        let fps = f64::from(state.frames) * 1000.0 / elapsed;
                        state.readings.push(fps);
                        state.frames = 0;
                        state.window_start = Some(timestamp);
                    }
                }
            }
        }
        self.request(generation);
    }
}

/// Counts delivered frames and turns them into frames-per-second readings.
///
/// Each delivered frame requests the next one until [`FpsSampler::stop`].
/// One reading is taken per elapsed window, measured on the frame timestamps.
/// Without a frame scheduler no frame is ever delivered and no reading is taken.
#[derive(Debug, Clone)]
pub struct FpsSampler {
    inner: Arc<SamplerInner>,
}

impl FpsSampler {
    /// Creates a stopped sampler.
    pub fn new(scheduler: Option<Arc<dyn FrameScheduler>>, window_ms: f64) -> Self {
        Self {
            inner: Arc::new(SamplerInner {
                scheduler,
                window_ms: if window_ms > 0.0 { window_ms } else { DEFAULT_FPS_WINDOW_MS },
                state: Mutex::new(SamplerState::default()),
            }),
        }
    }

    /// Clears previous readings and starts sampling.
    ///
    /// A restart begins a new generation, so a frame still in flight from the
    /// previous run is ignored instead of starting a second chain.
    pub fn start(&self) {
        let generation = {
            let mut state = lock(&self.inner.state);
            if state.running {
                return;
            }
            let generation = state.generation.wrapping_add(1);
            *state = SamplerState {
                running: true,
                generation,
                ..SamplerState::default()
            };
            generation
        };
        self.inner.request(generation);
    }

    /// Stops sampling. An incomplete window produces no reading.
    pub fn stop(&self) {
        lock(&self.inner.state).running = false;
    }

    /// Returns `true` between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        lock(&self.inner.state).running
    }

    /// All readings taken so far.
    pub fn readings(&self) -> Vec<f64> {
        lock(&self.inner.state).readings.clone()
    }

    /// Mean of the readings, `None` if there are none.
    pub fn average(&self) -> Option<f64> {
        let state = lock(&self.inner.state);
        if state.readings.is_empty() {
            return None;
        }
        Some(state.readings.iter().sum::<f64>() / state.readings.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use easel_core::host::FramePump;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn pump_frames(pump: &FramePump, from: u32, to: u32) {
        for frame in from..to {
            pump.pump(f64::from(frame) * FRAME_MS);
        }
    }

    #[test]
    fn sixty_hertz_frames_read_sixty_fps() {
        let pump = Arc::new(FramePump::new());
        let sampler = FpsSampler::new(Some(pump.clone()), 1000.0);

        sampler.start();
        pump_frames(&pump, 0, 185);
        sampler.stop();

        let readings = sampler.readings();
        assert_eq!(readings.len(), 3);
        for reading in readings {
            assert_relative_eq!(reading, 60.0, epsilon = 0.5);
        }
        assert_relative_eq!(sampler.average().unwrap(), 60.0, epsilon = 0.5);
    }

    #[test]
    fn stop_ends_rescheduling() {
        let pump = Arc::new(FramePump::new());
        let sampler = FpsSampler::new(Some(pump.clone()), 1000.0);

        sampler.start();
        pump_frames(&pump, 0, 3);
        sampler.stop();
        assert!(!sampler.is_running());

        // The frame requested before stop is delivered and not renewed.
        pump_frames(&pump, 3, 5);
        assert_eq!(pump.pending(), 0);
    }

    #[test]
    fn short_run_has_no_reading() {
        let pump = Arc::new(FramePump::new());
        let sampler = FpsSampler::new(Some(pump.clone()), 1000.0);

        sampler.start();
        pump_frames(&pump, 0, 10);
        sampler.stop();

        assert!(sampler.readings().is_empty());
        assert_eq!(sampler.average(), None);
    }

    #[test]
    fn restart_runs_a_single_frame_chain() {
        let pump = Arc::new(FramePump::new());
        let sampler = FpsSampler::new(Some(pump.clone()), 1000.0);

        sampler.start();
        pump.pump(0.0);
        sampler.stop();
        sampler.start();
        // The request left over from the first run plus the new one.
        assert_eq!(pump.pending(), 2);

        pump_frames(&pump, 1, 63);
        assert_eq!(pump.pending(), 1);
        let readings = sampler.readings();
        assert_eq!(readings.len(), 1);
        assert_relative_eq!(readings[0], 60.0, epsilon = 0.5);

        sampler.stop();
        pump_frames(&pump, 63, 65);
        assert_eq!(pump.pending(), 0);
    }

    #[test]
    fn no_scheduler_means_no_readings() {
        let sampler = FpsSampler::new(None, 1000.0);
        sampler.start();
        sampler.stop();
        assert_eq!(sampler.average(), None);
    }
}
