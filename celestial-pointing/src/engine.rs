//! The pointing engine: where in the sky is the phone looking?
//!
//! Three frames are involved:
//!
//! | Frame | Axes |
//! |-------|------|
//! | Celestial | +X to (RA 0°, Dec 0°), +Y to (RA 90°, Dec 0°), +Z to the north celestial pole |
//! | Phone | +x across the short side, +y along the long side, +z out of the screen |
//! | Local | North, Up, East at the observer |
//!
//! The engine expresses the local axes in both the celestial and the phone
//! frame. With `C` the matrix whose columns are the local axes in celestial
//! coordinates and `P` the one whose columns are the same axes in phone
//! coordinates, the phone-to-celestial transformation is `T = C · P⁻¹`, and
//! since `P` is orthonormal `P⁻¹` is built directly from rows.
//!
//! The celestial half depends only on location and time and changes slowly, so
//! it is recomputed at most once per update interval unless an input that
//! invalidates it (location, clock, declination source) changes. The phone half
//! is recomputed on every pointing request.
//!
//! Compass readings point to magnetic North. Rather than rotate the phone
//! axes, the engine rotates the celestial North/East pair about the zenith by
//! the magnetic declination.

use crate::config::EngineConfig;
use crate::declination::{DeclinationProvider, DipoleDeclination};
use crate::pointing::{Pointing, PointingListener, PointingSnapshot};
use crate::sensor::{SensorSample, DEFAULT_ROTATION_VECTOR};
use crate::view::ViewDirectionMode;
use celestial_core::{geocentric_coords, LatLong, RaDec, RotationMatrix3, Vector3};
use celestial_time::{zenith_ra_dec, ClockSource, FixedClock, RealClock};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Below this squared length the celestial pole is considered to be at the zenith.
const POLE_EPSILON: f64 = 1e-24;

/// Local axes in celestial coordinates.
#[derive(Debug, Clone, Copy)]
struct CelestialAxes {
    true_north: Vector3,
    up: Vector3,
    true_east: Vector3,
    /// Columns: magnetic North, Up, magnetic East.
    magnetic: RotationMatrix3,
}

impl Default for CelestialAxes {
    fn default() -> Self {
        Self {
            true_north: Vector3::x_axis(),
            up: Vector3::y_axis(),
            true_east: Vector3::z_axis(),
            magnetic: RotationMatrix3::identity(),
        }
    }
}

impl CelestialAxes {
    fn compute(zenith: &RaDec, declination: f64) -> Self {
        let up = geocentric_coords(zenith);
        let true_north = horizontal_north(up, zenith);
        let true_east = true_north.cross(&up);

        let magnetic_north = RotationMatrix3::rotation_about_axis(declination, up) * true_north;
        let magnetic_east = magnetic_north.cross(&up);

        Self {
            true_north,
            up,
            true_east,
            magnetic: RotationMatrix3::from_columns(magnetic_north, up, magnetic_east),
        }
    }
}

/// The celestial pole projected onto the horizon plane, normalized.
///
/// At a geographic pole the projection vanishes; the limit approaching the
/// pole along the observer's meridian is used instead.
fn horizontal_north(up: Vector3, zenith: &RaDec) -> Vector3 {
    // Rejection of +Z from unit `up`, with 1 - up.z² written as up.x² + up.y²
    // so the result keeps full precision close to the poles.
    let north = Vector3::new(-up.x * up.z, -up.y * up.z, up.x * up.x + up.y * up.y);
    if north.magnitude_squared() > POLE_EPSILON {
        return north.normalize();
    }
    let toward = if zenith.dec > 0.0 {
        zenith.ra + 180.0
    } else {
        zenith.ra
    };
    geocentric_coords(&RaDec::new(toward, 0.0))
}

/// Computes the device's pointing in celestial coordinates.
///
/// Feed it location, time and sensor readings; read back a [`Pointing`], the
/// phone-to-celestial transformation matrix, or the cardinal directions.
///
/// ```
/// use celestial_core::{LatLong, Vector3};
/// use celestial_pointing::{PointingEngine, ZeroDeclination};
///
/// let mut engine = PointingEngine::new();
/// engine.set_magnetic_declination_calculator(Some(Box::new(ZeroDeclination)));
/// engine.set_location(LatLong::new(0.0, 0.0)?);
/// engine.set_time(946_728_000_000); // 2000-01-01T12:00:00Z
///
/// // Same reading as the initial sample: Up along -y, North along -z.
/// engine.set_phone_sensor_values(Vector3::new(0.0, -1.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
///
/// let pointing = engine.pointing();
/// assert!((pointing.line_of_sight.z - 1.0).abs() < 1e-12);
/// # Ok::<(), celestial_core::AstroError>(())
/// ```
pub struct PointingEngine {
    config: EngineConfig,
    location: LatLong,
    clock: Arc<dyn ClockSource>,
    field_of_view: f64,
    view_mode: ViewDirectionMode,
    auto_update: bool,
    declination: Option<Box<dyn DeclinationProvider>>,
    sample: SensorSample,
    celestial: CelestialAxes,
    celestial_updated_at: i64,
    phone_up: Vector3,
    phone_axes_inverse: RotationMatrix3,
    transformation: RotationMatrix3,
    pointing: Pointing,
    version: u64,
    listeners: Arc<[Arc<dyn PointingListener>]>,
}

impl Default for PointingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PointingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointingEngine")
            .field("location", &self.location)
            .field("field_of_view", &self.field_of_view)
            .field("view_mode", &self.view_mode)
            .field("auto_update", &self.auto_update)
            .field("sample", &self.sample)
            .field("celestial_updated_at", &self.celestial_updated_at)
            .field("pointing", &self.pointing)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl PointingEngine {
    /// An engine on the system clock with dipole declination and default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_parts(
            config,
            Arc::new(RealClock::new()),
            Some(Box::new(DipoleDeclination::new())),
        )
    }

    /// An engine with an explicit clock and declination source.
    ///
    /// The celestial axes are computed once before returning.
    pub fn from_parts(
        config: EngineConfig,
        clock: Arc<dyn ClockSource>,
        declination: Option<Box<dyn DeclinationProvider>>,
    ) -> Self {
        let sample = SensorSample::default();
        let phone_up = match sample {
            SensorSample::TwoVector { acceleration, .. } => -acceleration,
            SensorSample::RotationVector(_) => Vector3::z_axis(),
        };
        let mut engine = Self {
            location: LatLong::null_island(),
            clock,
            field_of_view: config.field_of_view,
            view_mode: config.view_direction_mode,
            auto_update: config.auto_update_pointing,
            declination,
            sample,
            celestial: CelestialAxes::default(),
            celestial_updated_at: -1,
            phone_up,
            phone_axes_inverse: RotationMatrix3::identity(),
            transformation: RotationMatrix3::identity(),
            pointing: Pointing {
                field_of_view: config.field_of_view,
                ..Pointing::default()
            },
            version: 0,
            listeners: Arc::from(Vec::new()),
            config,
        };
        engine.update_celestial_axes(true);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Inputs ---

    pub fn set_location(&mut self, location: LatLong) {
        self.location = location;
        self.update_celestial_axes(true);
    }

    pub fn set_clock(&mut self, clock: Arc<dyn ClockSource>) {
        self.clock = clock;
        self.update_celestial_axes(true);
    }

    /// Pins the engine to `time_millis` by installing a [`FixedClock`].
    pub fn set_time(&mut self, time_millis: i64) {
        self.set_clock(Arc::new(FixedClock::new(time_millis)));
    }

    /// Replaces the declination source; `None` disables magnetic correction.
    pub fn set_magnetic_declination_calculator(
        &mut self,
        calculator: Option<Box<dyn DeclinationProvider>>,
    ) {
        self.declination = calculator;
        self.update_celestial_axes(true);
    }

    /// Accepts an accelerometer and magnetometer reading in phone coordinates.
    ///
    /// Readings shorter than the configured tolerance (squared length) or
    /// containing non-finite components are dropped and the previous sample is
    /// kept. So are readings where gravity and the field are so close to
    /// parallel that no horizontal North can be recovered: the squared length
    /// of the cross product of the two unit vectors must also reach the
    /// tolerance. Returns whether the reading was accepted.
    pub fn set_phone_sensor_values(&mut self, acceleration: Vector3, magnetic_field: Vector3) -> bool {
        let tolerance = self.config.sensor_tolerance;
        let usable = |v: &Vector3| v.is_finite() && v.magnitude_squared() >= tolerance;
        if !usable(&acceleration) || !usable(&magnetic_field) {
            warn!(%acceleration, %magnetic_field, "invalid sensor values, ignoring");
            return false;
        }
        let spread = acceleration
            .normalize()
            .cross(&magnetic_field.normalize())
            .magnitude_squared();
        if spread < tolerance {
            warn!(%acceleration, %magnetic_field, "gravity parallel to magnetic field, ignoring");
            return false;
        }
        self.sample = SensorSample::TwoVector {
            acceleration,
            magnetic_field,
        };
        true
    }

    /// Accepts a rotation-vector reading `[x, y, z, w, ..]`.
    ///
    /// At most the first four values are copied over the current rotation
    /// vector; shorter input leaves the remaining components unchanged. When
    /// the previous sample came from accelerometer and magnetometer, the
    /// components start from `[1, 0, 0, 0]`.
    pub fn set_phone_sensor_rotation_vector(&mut self, values: &[f64]) {
        let mut rotation = match self.sample {
            SensorSample::RotationVector(current) => current,
            SensorSample::TwoVector { .. } => DEFAULT_ROTATION_VECTOR,
        };
        let n = values.len().min(rotation.len());
        rotation[..n].copy_from_slice(&values[..n]);
        self.sample = SensorSample::RotationVector(rotation);
    }

    pub fn set_field_of_view(&mut self, degrees: f64) {
        self.field_of_view = degrees;
        self.pointing.field_of_view = degrees;
    }

    pub fn set_view_direction_mode(&mut self, mode: ViewDirectionMode) {
        self.view_mode = mode;
    }

    /// When disabled, pointing requests return the last published pointing
    /// without consulting the sensors.
    pub fn set_auto_update_pointing(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }

    // --- Pointing ---

    /// Recomputes the pointing if auto-update is on, then returns it.
    pub fn pointing(&mut self) -> Pointing {
        self.calculate_pointing();
        self.pointing
    }

    /// Overwrites the pointing by hand (e.g. while the user drags the sky)
    /// and notifies listeners. The transformation matrix is left untouched.
    pub fn set_pointing(&mut self, line_of_sight: Vector3, perpendicular: Vector3) {
        self.pointing.line_of_sight = line_of_sight;
        self.pointing.perpendicular = perpendicular;
        self.publish();
    }

    /// Phone-to-celestial matrix: `celestial = T · phone`.
    ///
    /// Goes through the same auto-update guard as [`pointing`](Self::pointing),
    /// so with auto-update off it reflects the last sensor-driven computation,
    /// not a pointing installed with [`set_pointing`](Self::set_pointing).
    pub fn transformation_matrix(&mut self) -> RotationMatrix3 {
        self.calculate_pointing();
        self.transformation
    }

    /// The last published state, without recomputing anything.
    pub fn snapshot(&self) -> PointingSnapshot {
        PointingSnapshot {
            pointing: self.pointing,
            transformation: self.transformation,
            version: self.version,
        }
    }

    // --- Cardinal directions (celestial frame, true North) ---

    pub fn north(&mut self) -> Vector3 {
        self.update_celestial_axes(false);
        self.celestial.true_north
    }

    pub fn south(&mut self) -> Vector3 {
        -self.north()
    }

    pub fn east(&mut self) -> Vector3 {
        self.update_celestial_axes(false);
        self.celestial.true_east
    }

    pub fn west(&mut self) -> Vector3 {
        -self.east()
    }

    pub fn zenith(&mut self) -> Vector3 {
        self.update_celestial_axes(false);
        self.celestial.up
    }

    pub fn nadir(&mut self) -> Vector3 {
        -self.zenith()
    }

    // --- Listeners ---

    /// Registers a listener; adding the same `Arc` twice has no effect.
    pub fn add_pointing_listener(&mut self, listener: Arc<dyn PointingListener>) {
        if self.listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        let mut updated = self.listeners.to_vec();
        updated.push(listener);
        self.listeners = updated.into();
    }

    pub fn remove_pointing_listener(&mut self, listener: &Arc<dyn PointingListener>) {
        if !self.listeners.iter().any(|l| same_listener(l, listener)) {
            return;
        }
        let remaining: Vec<_> = self
            .listeners
            .iter()
            .filter(|l| !same_listener(l, listener))
            .cloned()
            .collect();
        self.listeners = remaining.into();
    }

    pub fn pointing_listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Pass-through state ---

    pub fn time_millis(&self) -> i64 {
        self.clock.time_in_millis_since_epoch()
    }

    /// Current engine time; `None` if the clock is outside chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.time_millis())
    }

    pub fn clock(&self) -> &Arc<dyn ClockSource> {
        &self.clock
    }

    pub fn location(&self) -> LatLong {
        self.location
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn view_direction_mode(&self) -> ViewDirectionMode {
        self.view_mode
    }

    pub fn is_auto_update_pointing(&self) -> bool {
        self.auto_update
    }

    /// Declination currently applied, in degrees; 0 without a provider.
    pub fn magnetic_correction(&self) -> f64 {
        self.declination.as_ref().map_or(0.0, |p| p.declination())
    }

    /// Up in phone coordinates, as of the last pointing computation.
    pub fn phone_up_direction(&self) -> Vector3 {
        self.phone_up
    }

    pub fn sensor_sample(&self) -> SensorSample {
        self.sample
    }

    /// Clock time of the last celestial-axis computation.
    pub fn celestial_updated_at(&self) -> i64 {
        self.celestial_updated_at
    }

    // --- Computation ---

    fn calculate_pointing(&mut self) {
        if !self.auto_update {
            return;
        }

        self.update_celestial_axes(false);
        self.update_phone_axes();

        self.transformation = self.celestial.magnetic * self.phone_axes_inverse;

        let look = self.transformation * self.view_mode.pointing_in_phone_coords();
        let up = self.transformation * self.view_mode.screen_up_in_phone_coords();
        self.pointing = Pointing::new(look, up, self.field_of_view);

        self.publish();
    }

    fn update_celestial_axes(&mut self, force: bool) {
        let now = self.clock.time_in_millis_since_epoch();
        let interval = u64::try_from(self.config.celestial_update_interval_ms).unwrap_or(0);
        if !force && now.abs_diff(self.celestial_updated_at) < interval {
            return;
        }
        self.celestial_updated_at = now;

        if let Some(provider) = self.declination.as_mut() {
            provider.set_location_and_time(&self.location, now);
        }
        let declination = self.magnetic_correction();
        let zenith = zenith_ra_dec(now, &self.location);

        self.celestial = CelestialAxes::compute(&zenith, declination);
        debug!(
            time_millis = now,
            forced = force,
            location = %self.location,
            zenith = %zenith,
            declination,
            "recomputed celestial axes"
        );
    }

    fn update_phone_axes(&mut self) {
        let axes = self.sample.phone_axes();
        self.phone_up = axes.up;
        self.phone_axes_inverse = axes.inverse_matrix();
    }

    fn publish(&mut self) {
        self.version += 1;
        let listeners = Arc::clone(&self.listeners);
        for listener in listeners.iter() {
            listener.on_pointing_changed(&self.pointing);
        }
    }
}

fn same_listener(a: &Arc<dyn PointingListener>, b: &Arc<dyn PointingListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
