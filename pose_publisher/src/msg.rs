//! Wire-shaped pose message model, following the ROS `geometry_msgs` layout.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

impl Time {
    /// Current wall-clock time. A clock before the epoch is reported as zero.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            secs: elapsed.as_secs() as u32,
            nsecs: elapsed.subsec_nanos(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub seq: u32,
    pub stamp: Time,
    pub frame_id: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.,
            y: 0.,
            z: 0.,
            w: 1.,
        }
    }
}

impl Quaternion {
    /// Rotation by `yaw` radians around the vertical axis.
    pub fn from_yaw(yaw: f64) -> Self {
        let (sin, cos) = (yaw / 2.).sin_cos();
        Self {
            x: 0.,
            y: 0.,
            z: sin,
            w: cos,
        }
    }

    /// The yaw angle this quaternion encodes, assuming a yaw-only rotation.
    pub fn yaw(&self) -> f64 {
        2. * self.z.atan2(self.w)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseWithCovariance {
    pub pose: Pose,
    /// Row-major 6x6 covariance over (x, y, z, roll, pitch, yaw). Left zeroed.
    pub covariance: Vec<f64>,
}

impl Default for PoseWithCovariance {
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            covariance: vec![0.; 36],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseWithCovarianceStamped {
    pub header: Header,
    pub pose: PoseWithCovariance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn yaw_quaternion_round_trip() {
        for yaw in [0., FRAC_PI_2, -FRAC_PI_2, 0.1, -2.9, PI - 1e-6] {
            assert_relative_eq!(yaw, Quaternion::from_yaw(yaw).yaw(), epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_yaw_is_the_identity_rotation() {
        assert_eq!(Quaternion::default(), Quaternion::from_yaw(0.));
    }

    #[test]
    fn covariance_starts_zeroed() {
        let pose = PoseWithCovariance::default();
        assert_eq!(36, pose.covariance.len());
        assert!(pose.covariance.iter().all(|entry| *entry == 0.));
    }
}
