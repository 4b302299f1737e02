// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named animations advanced by an external tick.

use smallvec::SmallVec;

use crate::Easing;

/// Frames reported by a single [`Animator::tick`].
pub type Frames<K> = SmallVec<[Frame<K>; 4]>;

/// Interpolation between two scalar values over a fixed duration.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    /// Value at `started_at`.
    pub from: f64,
    /// Value once `duration_ms` has elapsed.
    pub to: f64,
    /// Length of the tween in milliseconds.
    pub duration_ms: f64,
    /// Curve applied to linear progress.
    pub easing: Easing,
    /// Host time at which the tween was started.
    pub started_at: f64,
}

impl Tween {
    /// Samples the tween at `now`.
    ///
    /// Returns the value and whether the tween has finished. A finished tween
    /// always reports exactly `to`.
    #[must_use]
    pub fn sample(&self, now: f64) -> (f64, bool) {
        let elapsed = now - self.started_at;
        if elapsed >= self.duration_ms {
            return (self.to, true);
        }
        let k = elapsed.max(0.0) / self.duration_ms;
        (self.from + (self.to - self.from) * self.easing.apply(k), false)
    }
}

/// Something the owner of an [`Animator`] must apply after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Frame<K> {
    /// A running tween produced an intermediate value.
    Update {
        /// Animation key.
        key: K,
        /// Eased value for this tick.
        value: f64,
    },
    /// A tween reached its end. The entry has already been removed.
    Complete {
        /// Animation key.
        key: K,
        /// The tween's exact end value.
        value: f64,
    },
    /// A driven animation should advance by `dt` milliseconds.
    ///
    /// Driven animations never finish on their own; the owner calls
    /// [`Animator::stop`] once it decides the motion is over.
    Drive {
        /// Animation key.
        key: K,
        /// Milliseconds since the previous tick of this entry.
        dt: f64,
    },
}

impl<K: Copy> Frame<K> {
    /// Key of the animation that produced this frame.
    pub fn key(&self) -> K {
        match *self {
            Self::Update { key, .. } | Self::Complete { key, .. } | Self::Drive { key, .. } => key,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Motion {
    Tween(Tween),
    Driven { last_tick: f64 },
}

#[derive(Clone, Copy, Debug)]
struct Entry<K> {
    key: K,
    motion: Motion,
}

/// Set of named animations, at most one per key.
///
/// `Animator` performs no scheduling of its own. The host calls
/// [`Animator::tick`] once per display frame for as long as
/// [`Animator::is_empty`] is `false`, and the owner applies the returned
/// [`Frame`]s to its own state.
#[derive(Clone, Debug)]
pub struct Animator<K> {
    entries: SmallVec<[Entry<K>; 4]>,
}

impl<K> Default for Animator<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> Animator<K> {
    /// Creates an empty animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a tween under `key`, replacing any animation already registered
    /// under that key.
    pub fn start(&mut self, key: K, from: f64, to: f64, duration_ms: f64, easing: Easing, now: f64) {
        self.register(
            key,
            Motion::Tween(Tween {
                from,
                to,
                duration_ms,
                easing,
                started_at: now,
            }),
        );
    }

    /// Registers a driven animation under `key`, replacing any animation
    /// already registered under that key.
    pub fn drive(&mut self, key: K, now: f64) {
        self.register(key, Motion::Driven { last_tick: now });
    }

    fn register(&mut self, key: K, motion: Motion) {
        if self.stop(key) {
            log::trace!("animation {key:?} restarted");
        }
        self.entries.push(Entry { key, motion });
    }

    /// Removes the animation under `key` without completing it.
    ///
    /// Returns `true` if an animation was removed.
    pub fn stop(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before != self.entries.len()
    }

    /// Removes every animation without completing any of them.
    pub fn stop_all(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if an animation is registered under `key`.
    #[must_use]
    pub fn is_active(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Returns `true` if no animation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the tween registered under `key`, if any.
    #[must_use]
    pub fn tween(&self, key: K) -> Option<&Tween> {
        self.entries.iter().find_map(|e| match &e.motion {
            Motion::Tween(t) if e.key == key => Some(t),
            _ => None,
        })
    }

    /// Advances every animation to `now`.
    ///
    /// Frames are reported in registration order. Tweens that reached their
    /// end are removed before this returns.
    pub fn tick(&mut self, now: f64) -> Frames<K> {
        let mut frames = Frames::new();
        self.entries.retain(|entry| match &mut entry.motion {
            Motion::Tween(tween) => {
                let (value, done) = tween.sample(now);
                let key = entry.key;
                if done {
                    frames.push(Frame::Complete { key, value });
                    false
                } else {
                    frames.push(Frame::Update { key, value });
                    true
                }
            }
            Motion::Driven { last_tick } => {
                frames.push(Frame::Drive {
                    key: entry.key,
                    dt: now - *last_tick,
                });
                *last_tick = now;
                true
            }
        });
        frames
    }
}
