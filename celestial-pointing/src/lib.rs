//! Device pointing for a sky viewer.
//!
//! Turns an observer's location, the (possibly simulated) time and raw phone
//! orientation sensors into the direction in the sky the phone is facing.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`engine`] | [`PointingEngine`]: frames, throttled recompute, listeners |
//! | [`pointing`] | [`Pointing`], [`PointingSnapshot`], [`PointingListener`] |
//! | [`sensor`] | [`SensorSample`] and the rotation-vector conversion |
//! | [`view`] | [`ViewDirectionMode`] |
//! | [`declination`] | [`DeclinationProvider`] and its implementations |
//! | [`config`] | [`EngineConfig`] loaded from TOML |
//!
//! Clocks (including time travel) live in `celestial_time::clock`; the engine
//! reads whichever one it is given.
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod declination;
pub mod engine;
pub mod error;
pub mod pointing;
pub mod sensor;
pub mod view;

pub use config::EngineConfig;
pub use declination::{DeclinationProvider, DipoleDeclination, FixedDeclination, ZeroDeclination};
pub use engine::PointingEngine;
pub use error::{Error, Result};
pub use pointing::{Pointing, PointingListener, PointingSnapshot};
pub use sensor::{rotation_matrix_from_vector, PhoneAxes, SensorSample};
pub use view::ViewDirectionMode;
