//! # TLE low-order general-perturbations theory
//!
//! Mapping between TLE-style Brouwer mean elements and the osculating state,
//! using the SGP4 periodic terms evaluated at the element epoch: J3-driven
//! long-period terms folded into the `(axn, ayn)` pair, a Kepler solve in
//! those variables, and the J2 short-period corrections on radius, latitude
//! argument, node and inclination. Drag and deep-space resonance handling are
//! not part of the mapping – at the epoch itself they contribute nothing.
//!
//! The theory works in **WGS-72 units and the TEME frame**, as any
//! general-perturbations element set does; the public interface stays in SI
//! and the frame requirement is enforced by the state constructors.

use hifitime::Epoch;
use nalgebra::{Vector3, Vector6};

use crate::cartesian::CartesianState;
use crate::constants::{WGS72_EQUATORIAL_RADIUS, WGS72_J2, WGS72_J3, WGS72_J4, WGS72_MU};
use crate::orbit_type::ElementSetKind;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;
use crate::theory::MeanTheory;

const TWOPI: f64 = 2.0 * std::f64::consts::PI;

/// TLE low-order GP theory on Keplerian elements (TEME frame).
#[derive(Debug, Clone, Copy)]
pub struct TleGp {
    mu: f64, // km³/s²
    radiusearthkm: f64,
    xke: f64,
    j2: f64,
    j3oj2: f64,
    j4: f64,
}

impl Default for TleGp {
    fn default() -> Self {
        let mu = WGS72_MU;
        let radiusearthkm = WGS72_EQUATORIAL_RADIUS;
        let xke = 60.0 / (radiusearthkm * radiusearthkm * radiusearthkm / mu).sqrt();
        Self {
            mu,
            radiusearthkm,
            xke,
            j2: WGS72_J2,
            j3oj2: WGS72_J3 / WGS72_J2,
            j4: WGS72_J4,
        }
    }
}

impl TleGp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeanTheory for TleGp {
    fn name(&self) -> &'static str {
        "TLE low-order GP"
    }

    fn element_set(&self) -> ElementSetKind {
        ElementSetKind::Keplerian
    }

    fn frame(&self) -> Frame {
        Frame::Teme
    }

    fn gravitational_parameter(&self) -> f64 {
        self.mu * 1.0e9
    }

    fn check_admissible(&self, mean: &Vector6<f64>) -> Result<(), OsmeanError> {
        let (a, e) = (mean[0], mean[1]);
        let re_m = self.radiusearthkm * 1.0e3;

        if !(0.0..=0.9).contains(&e) {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("eccentricity {e:.6} outside the supported range [0, 0.9]"),
            });
        }
        // Perigee below the surface means the element set has decayed.
        if a * (1.0 - e) <= re_m {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("perigee radius {:.1} m is below the surface", a * (1.0 - e)),
            });
        }
        Ok(())
    }

    fn osculating_from_mean(
        &self,
        mean: &Vector6<f64>,
        epoch: Epoch,
    ) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;
        let temp4 = 1.5e-12_f64;

        // SI → SGP4 internal units (Earth radii, minutes).
        let am = mean[0] / (self.radiusearthkm * 1.0e3);
        let ep = mean[1];
        let xincp = mean[2];
        let nodep = mean[3];
        let argpp = mean[4];
        let mp = mean[5];

        let sinip = xincp.sin();
        let cosip = xincp.cos();
        let cosip2 = cosip * cosip;
        let con41 = 3.0 * cosip2 - 1.0;
        let x1mth2 = 1.0 - cosip2;
        let x7thm1 = 7.0 * cosip2 - 1.0;

        let aycof = -0.5 * self.j3oj2 * sinip;
        let xlcof = if (cosip + 1.0).abs() > 1.5e-12 {
            -0.25 * self.j3oj2 * sinip * (3.0 + 5.0 * cosip) / (1.0 + cosip)
        } else {
            -0.25 * self.j3oj2 * sinip * (3.0 + 5.0 * cosip) / temp4
        };

        let nm = self.xke / am.powf(1.5);

        // Long-period periodics.
        let axnl = ep * argpp.cos();
        let temp = 1.0 / (am * (1.0 - ep * ep));
        let aynl = ep * argpp.sin() + temp * aycof;
        let xl = mp + argpp + nodep + temp * xlcof * axnl;

        // Kepler equation in the (axn, ayn) variables.
        let u = (xl - nodep) % TWOPI;
        let mut eo1 = u;
        let mut tem5 = 9999.9_f64;
        let mut ktr = 1;

        while tem5.abs() >= 1.0e-12 && ktr <= 10 {
            let sineo1 = eo1.sin();
            let coseo1 = eo1.cos();
            tem5 = 1.0 - coseo1 * axnl - sineo1 * aynl;
            tem5 = (u - aynl * coseo1 + axnl * sineo1 - eo1) / tem5;
            if tem5.abs() >= 0.95 {
                tem5 = if tem5 > 0.0 { 0.95 } else { -0.95 };
            }
            eo1 += tem5;
            ktr += 1;
        }

        let sineo1 = eo1.sin();
        let coseo1 = eo1.cos();
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);

        if pl < 0.0 {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("semilatus rectum {pl:.6} er is negative"),
            });
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        let temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let mut su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;

        // Short-period periodics.
        let temp = 1.0 / pl;
        let temp1 = 0.5 * self.j2 * temp;
        let temp2 = temp1 * temp;

        let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
        if mrt < 1.0 {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: "osculating radius is below the surface (decayed state)".into(),
            });
        }
        su -= 0.25 * temp2 * x7thm1 * sin2u;
        let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = xincp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / self.xke;
        let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / self.xke;

        // Orientation vectors and the TEME state.
        let sinsu = su.sin();
        let cossu = su.cos();
        let snod = xnode.sin();
        let cnod = xnode.cos();
        let sini = xinc.sin();
        let cosi = xinc.cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let ux = xmx * sinsu + cnod * cossu;
        let uy = xmy * sinsu + snod * cossu;
        let uz = sini * sinsu;
        let vx = xmx * cossu - cnod * sinsu;
        let vy = xmy * cossu - snod * sinsu;
        let vz = sini * cossu;

        let vkmpersec = self.radiusearthkm * self.xke / 60.0;
        let mr_km = mrt * self.radiusearthkm;

        let position = Vector3::new(mr_km * ux, mr_km * uy, mr_km * uz) * 1.0e3;
        let velocity = Vector3::new(
            (mvt * ux + rvdot * vx) * vkmpersec,
            (mvt * uy + rvdot * vy) * vkmpersec,
            (mvt * uz + rvdot * vz) * vkmpersec,
        ) * 1.0e3;

        let state = CartesianState::new(epoch, Frame::Teme, position, velocity);
        let osc = state.to_keplerian(self.mu * 1.0e9)?;
        Ok(osc.to_vector())
    }

    fn mean_rates(&self, mean: &Vector6<f64>) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;

        let ao = mean[0] / (self.radiusearthkm * 1.0e3);
        let ecco = mean[1];
        let cosio = mean[2].cos();
        let cosio2 = cosio * cosio;
        let cosio4 = cosio2 * cosio2;
        let con41 = 3.0 * cosio2 - 1.0;
        let con42 = 1.0 - 5.0 * cosio2;

        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let no = self.xke / ao.powf(1.5);
        let posq = (ao * omeosq).powi(2);
        let pinvsq = 1.0 / posq;

        let temp1 = 1.5 * self.j2 * pinvsq * no;
        let temp2 = 0.5 * temp1 * self.j2 * pinvsq;
        let temp3 = -0.46875 * self.j4 * pinvsq * pinvsq * no;

        let mdot = no
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        let argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        let nodedot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;

        // rad/min → rad/s
        Ok(Vector6::new(
            0.0,
            0.0,
            0.0,
            nodedot / 60.0,
            argpdot / 60.0,
            mdot / 60.0,
        ))
    }
}
