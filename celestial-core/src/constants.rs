pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

/// Mean sidereal angle at J2000.0 on the Greenwich meridian, in degrees.
pub const GMST_AT_J2000_DEG: f64 = 280.461;

/// Mean sidereal rotation per solar day, in degrees.
pub const SIDEREAL_DEG_PER_DAY: f64 = 360.98564737;
