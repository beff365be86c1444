//! Lock-free handoff between the simulation thread and the audio render
//! thread.
//!
//! The collision handler and the render callback never share a lock: the
//! only crossing state is [`ImpactShared`], a fixed set of atomics.  The
//! trigger is a single slot holding the *latest* pending tone — a new
//! collision overwrites an unconsumed one (last write wins), and the render
//! callback drains the slot exactly once per tick.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// A pitch/loudness pair derived from one collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Oscillator frequency in Hz.
    pub frequency: f32,
    /// Output gain in [0, 1].
    pub amplitude: f32,
}

/// The empty-slot sentinel.  A published word always carries a strictly
/// positive amplitude in its low half, so the all-zero pattern can never be
/// a real payload.
const TRIGGER_EMPTY: u64 = 0;

/// Atomics shared between the simulation thread and the render thread.
///
/// Held behind an `Arc`: one handle lives in the Bevy world, the other is
/// moved into the audio stream callback.
pub struct ImpactShared {
    /// Single-slot pending trigger: `(frequency_bits << 32) | amplitude_bits`.
    trigger: AtomicU64,
    /// Cleared when the emitting entity is despawned; the render callback
    /// treats a cleared flag as a silent early return, never a fault.
    alive: AtomicBool,
    /// Master output gain (f32 bits).
    volume: AtomicU32,
}

impl ImpactShared {
    pub fn new(volume: f32) -> Self {
        Self {
            trigger: AtomicU64::new(TRIGGER_EMPTY),
            alive: AtomicBool::new(true),
            volume: AtomicU32::new(volume.clamp(0.0, 1.0).to_bits()),
        }
    }

    /// Publish a tone for the next render tick, overwriting any unconsumed
    /// one.  Non-finite or non-positive-amplitude tones are dropped — they
    /// could collide with the empty sentinel or wedge the oscillator.
    pub fn publish(&self, tone: Tone) {
        if !tone.frequency.is_finite() || !tone.amplitude.is_finite() || tone.amplitude <= 0.0 {
            return;
        }
        let word = (u64::from(tone.frequency.to_bits()) << 32) | u64::from(tone.amplitude.to_bits());
        self.trigger.store(word, Ordering::Release);
    }

    /// Drain the pending trigger, if any.  Called once at the start of every
    /// render tick; the Acquire pairs with the Release in [`Self::publish`].
    pub fn take_trigger(&self) -> Option<Tone> {
        let word = self.trigger.swap(TRIGGER_EMPTY, Ordering::Acquire);
        if word == TRIGGER_EMPTY {
            return None;
        }
        Some(Tone {
            frequency: f32::from_bits((word >> 32) as u32),
            amplitude: f32::from_bits(word as u32),
        })
    }

    /// Mark the emitting entity as gone.  Idempotent; render ticks arriving
    /// after this produce silence.
    pub fn retire(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }
}
