//! Spacecraft resources: initial states and engine parameter-name helpers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::celestial::CelestialBody;
use super::coordsys::CoordinateSystem;
use super::epoch::Epoch;

/// Initial orbital state of a spacecraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum State {
    Cartesian(CartesianState),
    Keplerian(KeplerianState),
    ModifiedKeplerian(ModifiedKeplerianState),
}

impl State {
    fn script(&self, name: &str) -> String {
        match self {
            Self::Cartesian(s) => s.script(name),
            Self::Keplerian(s) => s.script(name),
            Self::ModifiedKeplerian(s) => s.script(name),
        }
    }
}

/// Position (km) and velocity (km/s) components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl CartesianState {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, vx: f64, vy: f64, vz: f64) -> Self {
        Self { x, y, z, vx, vy, vz }
    }

    fn script(&self, name: &str) -> String {
        format!(
            "GMAT {name}.DisplayStateType = Cartesian;\n\
             GMAT {name}.X = {};\n\
             GMAT {name}.Y = {};\n\
             GMAT {name}.Z = {};\n\
             GMAT {name}.VX = {};\n\
             GMAT {name}.VY = {};\n\
             GMAT {name}.VZ = {};",
            self.x, self.y, self.z, self.vx, self.vy, self.vz
        )
    }
}

/// Classical orbital elements (km / degrees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeplerianState {
    /// Semi-major axis
    pub sma: f64,
    /// Eccentricity
    pub ecc: f64,
    /// Inclination
    pub inc: f64,
    /// Right ascension of the ascending node
    pub raan: f64,
    /// Argument of periapsis
    pub aop: f64,
    /// True anomaly
    pub ta: f64,
}

impl KeplerianState {
    #[must_use]
    pub fn new(sma: f64, ecc: f64, inc: f64, raan: f64, aop: f64, ta: f64) -> Self {
        Self { sma, ecc, inc, raan, aop, ta }
    }

    /// Orbit starting at periapsis (true anomaly 0).
    #[must_use]
    pub fn periapsis(sma: f64, ecc: f64, inc: f64, raan: f64, aop: f64) -> Self {
        Self::new(sma, ecc, inc, raan, aop, 0.0)
    }

    /// Orbit starting at apoapsis (true anomaly 180).
    #[must_use]
    pub fn apoapsis(sma: f64, ecc: f64, inc: f64, raan: f64, aop: f64) -> Self {
        Self::new(sma, ecc, inc, raan, aop, 180.0)
    }

    /// Eccentric anomaly (degrees) corresponding to the true anomaly.
    #[must_use]
    pub fn eccentric_anomaly(&self) -> f64 {
        let scale = ((1.0 + self.ecc) / (1.0 - self.ecc)).sqrt();
        let lhs = (self.ta.to_radians() / 2.0).tan() / scale;
        lhs.atan().to_degrees() * 2.0
    }

    /// Magnitude of the position vector at the current true anomaly (km).
    #[must_use]
    pub fn r_mag(&self) -> f64 {
        self.sma * (1.0 - self.ecc * self.eccentric_anomaly().to_radians().cos())
    }

    fn script(&self, name: &str) -> String {
        format!(
            "GMAT {name}.DisplayStateType = Keplerian;\n\
             GMAT {name}.SMA = {};\n\
             GMAT {name}.ECC = {};\n\
             GMAT {name}.INC = {};\n\
             GMAT {name}.RAAN = {};\n\
             GMAT {name}.AOP = {};\n\
             GMAT {name}.TA = {};",
            self.sma, self.ecc, self.inc, self.raan, self.aop, self.ta
        )
    }
}

/// Orbit expressed as periapsis/apoapsis radii plus angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedKeplerianState {
    pub radper: f64,
    pub radapo: f64,
    pub inc: f64,
    pub raan: f64,
    pub aop: f64,
    pub ta: f64,
}

impl ModifiedKeplerianState {
    /// Fails if the apoapsis radius is below the periapsis radius.
    pub fn new(
        radper: f64,
        radapo: f64,
        inc: f64,
        raan: f64,
        aop: f64,
        ta: f64,
    ) -> Result<Self, ConfigError> {
        if radapo < radper {
            return Err(ConfigError::InvalidOrbitShape { radper, radapo });
        }
        Ok(Self { radper, radapo, inc, raan, aop, ta })
    }

    fn script(&self, name: &str) -> String {
        format!(
            "GMAT {name}.DisplayStateType = Keplerian;\n\
             GMAT {name}.RadApo = {};\n\
             GMAT {name}.RadPer = {};\n\
             GMAT {name}.INC = {};\n\
             GMAT {name}.RAAN = {};\n\
             GMAT {name}.AOP = {};\n\
             GMAT {name}.TA = {};",
            self.radapo, self.radper, self.inc, self.raan, self.aop, self.ta
        )
    }
}

/// Builds engine parameter names for a spacecraft relative to a body, e.g.
/// `Sat1.Luna.Periapsis`. These are plain strings consumed by stop
/// conditions, achieve goals, and report field lists.
#[derive(Debug, Clone)]
pub struct BodyRelative {
    prefix: String,
}

impl BodyRelative {
    fn new(craft: &str, body: &str) -> Self {
        Self {
            prefix: format!("{craft}.{body}."),
        }
    }

    #[must_use]
    pub fn periapsis(&self) -> String {
        format!("{}Periapsis", self.prefix)
    }

    #[must_use]
    pub fn apoapsis(&self) -> String {
        format!("{}Apoapsis", self.prefix)
    }

    #[must_use]
    pub fn rmag(&self) -> String {
        format!("{}RMAG", self.prefix)
    }

    #[must_use]
    pub fn sma(&self) -> String {
        format!("{}SMA", self.prefix)
    }

    #[must_use]
    pub fn ecc(&self) -> String {
        format!("{}ECC", self.prefix)
    }

    #[must_use]
    pub fn apoapsis_radius(&self) -> String {
        format!("{}RadApo", self.prefix)
    }

    #[must_use]
    pub fn periapsis_radius(&self) -> String {
        format!("{}RadPer", self.prefix)
    }

    #[must_use]
    pub fn orbit_period(&self) -> String {
        format!("{}OrbitPeriod", self.prefix)
    }

    #[must_use]
    pub fn beta_angle(&self) -> String {
        format!("{}BetaAngle", self.prefix)
    }

    #[must_use]
    pub fn c3_energy(&self) -> String {
        format!("{}C3Energy", self.prefix)
    }

    #[must_use]
    pub fn energy(&self) -> String {
        format!("{}Energy", self.prefix)
    }

    /// Magnitude of the angular momentum vector.
    #[must_use]
    pub fn h_mag(&self) -> String {
        format!("{}HMAG", self.prefix)
    }

    #[must_use]
    pub fn incoming_c3_energy(&self) -> String {
        format!("{}IncomingC3Energy", self.prefix)
    }

    #[must_use]
    pub fn incoming_periapsis_radius(&self) -> String {
        format!("{}IncomingRadPer", self.prefix)
    }

    /// Planetodetic latitude (degrees).
    #[must_use]
    pub fn latitude(&self) -> String {
        format!("{}Latitude", self.prefix)
    }

    /// Planetodetic longitude (degrees).
    #[must_use]
    pub fn longitude(&self) -> String {
        format!("{}Longitude", self.prefix)
    }

    /// Local sidereal time from the body's inertial x-axis (degrees).
    #[must_use]
    pub fn local_sidereal_time(&self) -> String {
        format!("{}LST", self.prefix)
    }

    /// Scalar velocity at apoapsis (km/s).
    #[must_use]
    pub fn apoapsis_velocity(&self) -> String {
        format!("{}VelApoapsis", self.prefix)
    }

    /// Scalar velocity at periapsis (km/s).
    #[must_use]
    pub fn periapsis_velocity(&self) -> String {
        format!("{}VelPeriapsis", self.prefix)
    }
}

/// A vehicle with an initial state, epoch, and reference frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    pub name: String,
    pub state: State,
    pub epoch: Epoch,
    /// Name of the coordinate system the state is expressed in.
    pub coordinate_system: String,
}

impl Spacecraft {
    /// Spacecraft in the engine's default frame (EarthMJ2000Eq) at the
    /// default epoch.
    #[must_use]
    pub fn new(name: impl Into<String>, state: State) -> Self {
        Self {
            name: name.into(),
            state,
            epoch: Epoch::default(),
            coordinate_system: "EarthMJ2000Eq".to_string(),
        }
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_coordinate_system(mut self, frame: &CoordinateSystem) -> Self {
        self.coordinate_system = frame.name.clone();
        self
    }

    /// Parameter names relative to a body, e.g. `Sat1.Luna.RMAG`.
    #[must_use]
    pub fn relative_to(&self, body: &CelestialBody) -> BodyRelative {
        BodyRelative::new(&self.name, &body.name)
    }

    #[must_use]
    pub fn elapsed_days(&self) -> String {
        format!("{}.ElapsedDays", self.name)
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> String {
        format!("{}.ElapsedSecs", self.name)
    }

    #[must_use]
    pub fn script(&self) -> String {
        format!(
            "Create Spacecraft {name};\n{epoch}GMAT {name}.CoordinateSystem = {frame};\n{state}",
            name = self.name,
            epoch = self.epoch.script(&self.name),
            frame = self.coordinate_system,
            state = self.state.script(&self.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keplerian() -> State {
        State::Keplerian(KeplerianState::new(2000.0, 0.0, 45.0, 90.0, 135.0, 180.0))
    }

    #[test]
    fn test_spacecraft_script() {
        let sat = Spacecraft::new("Sat1", keplerian());
        let script = sat.script();
        assert!(script.starts_with("Create Spacecraft Sat1;\n"));
        assert!(script.contains("GMAT Sat1.DateFormat = TAIModJulian;"));
        assert!(script.contains("GMAT Sat1.CoordinateSystem = EarthMJ2000Eq;"));
        assert!(script.contains("GMAT Sat1.DisplayStateType = Keplerian;"));
        assert!(script.ends_with("GMAT Sat1.TA = 180;"));
    }

    #[test]
    fn test_keplerian_convenience_anchors() {
        assert_eq!(KeplerianState::periapsis(7000.0, 0.1, 0.0, 0.0, 0.0).ta, 0.0);
        assert_eq!(KeplerianState::apoapsis(7000.0, 0.1, 0.0, 0.0, 0.0).ta, 180.0);
    }

    #[test]
    fn test_r_mag_circular_orbit() {
        let state = KeplerianState::new(7000.0, 0.0, 0.0, 0.0, 0.0, 90.0);
        assert!((state.r_mag() - 7000.0).abs() < 1e-9);
    }

    #[test]
    fn test_r_mag_elliptic_periapsis() {
        let state = KeplerianState::periapsis(10_000.0, 0.2, 0.0, 0.0, 0.0);
        // At periapsis r = a(1 - e)
        assert!((state.r_mag() - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn test_modified_keplerian_rejects_crossed_radii() {
        let err = ModifiedKeplerianState::new(2000.0, 1500.0, 0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrbitShape { .. }));
    }

    #[test]
    fn test_body_relative_parameter_names() {
        let sat = Spacecraft::new("Sat1", keplerian());
        let rel = sat.relative_to(&CelestialBody::luna());
        assert_eq!(rel.rmag(), "Sat1.Luna.RMAG");
        assert_eq!(rel.apoapsis_radius(), "Sat1.Luna.RadApo");
        assert_eq!(sat.elapsed_secs(), "Sat1.ElapsedSecs");
    }
}
