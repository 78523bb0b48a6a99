use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::particle_settings::{
    MORPH_DURATION_MS, MORPH_FINAL_RADIUS, MORPH_INITIAL_SPREAD, MORPH_PARTICLE_COUNT,
    MORPH_POINT_SIZE,
};
use crate::engine::animation::easing::{ease_in_out_sine, linear_progress};
use crate::engine::particles::buffer::{ParticleBuffer, generate_shell};

/// Tunables for the scatter-to-shell transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    pub particle_count: usize,
    /// Extra radius at the start of the transition (`R0`).
    pub initial_spread: f32,
    /// Shell radius the cloud settles on (`R1`).
    pub final_radius: f32,
    pub duration_ms: u64,
    pub point_size: f32,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            particle_count: MORPH_PARTICLE_COUNT,
            initial_spread: MORPH_INITIAL_SPREAD,
            final_radius: MORPH_FINAL_RADIUS,
            duration_ms: MORPH_DURATION_MS,
            point_size: MORPH_POINT_SIZE,
        }
    }
}

impl MorphSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Shell radius for eased progress `t`.
///
/// Additive, not a blend between the two radii: starts at
/// `initial_spread + final_radius` and lands exactly on `final_radius`.
pub fn morph_radius(initial_spread: f32, final_radius: f32, t: f32) -> f32 {
    initial_spread * (1.0 - t) + final_radius
}

/// Progress of the single morph episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphState {
    pub start_time: Duration,
    pub elapsed: Duration,
    pub progress: f32,
    pub done: bool,
}

/// Owns the morph cloud buffer and steps it from scatter to shell.
///
/// Positions are re-randomised on every step rather than following fixed
/// per-particle paths. Once the eased value reaches 1 the field is terminal.
#[derive(Component, Debug, Clone)]
pub struct MorphField {
    settings: MorphSettings,
    state: Option<MorphState>,
    buffer: Option<ParticleBuffer>,
}

impl MorphField {
    pub fn new(settings: MorphSettings) -> Self {
        Self {
            settings,
            state: None,
            buffer: None,
        }
    }

    pub fn settings(&self) -> &MorphSettings {
        &self.settings
    }

    pub fn state(&self) -> Option<&MorphState> {
        self.state.as_ref()
    }

    /// Latest generated buffer; `None` until the first step.
    pub fn buffer(&self) -> Option<&ParticleBuffer> {
        self.buffer.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_some_and(|state| state.done)
    }

    /// Begin the episode at `now`. A field only ever runs once; later calls
    /// return `false`.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.state.is_some() {
            return false;
        }
        self.state = Some(MorphState {
            start_time: now,
            elapsed: Duration::ZERO,
            progress: 0.0,
            done: false,
        });
        info!(
            "Morph field started: {} particles over {} ms",
            self.settings.particle_count, self.settings.duration_ms
        );
        true
    }

    /// Run one animation step at `now`, replacing the whole buffer.
    /// Returns the new buffer, or `None` when not started or already complete.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> Option<&ParticleBuffer> {
        let state = self.state.as_mut()?;
        if state.done {
            return None;
        }

        state.elapsed = now.saturating_sub(state.start_time);
        // Never step backwards, even if the host clock does.
        state.progress = linear_progress(state.elapsed, self.settings.duration()).max(state.progress);
        let t = ease_in_out_sine(state.progress);
        let radius = morph_radius(self.settings.initial_spread, self.settings.final_radius, t);

        let next = generate_shell(rng, self.settings.particle_count, radius);
        match self.buffer.as_mut() {
            Some(buffer) => {
                buffer.replace_with(next);
            }
            None => self.buffer = Some(next),
        }

        if t >= 1.0 {
            state.done = true;
            info!("Morph field settled at radius {:.1}", radius);
        }

        self.buffer.as_ref()
    }
}
