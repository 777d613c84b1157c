//! Compact unit-normal encoding.
//!
//! Normals are folded onto an octahedron, unwrapped onto the unit square and
//! quantized to one byte per axis. Decoding reverses the fold and
//! renormalizes. Round-trip angular error stays under two degrees.

use nalgebra::Vector3;

// Even step count so that 0.0 has an exact code.
const STEPS: f64 = 254.0;

/// A unit vector packed into two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedNormal {
    u: u8,
    v: u8,
}

#[inline]
fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
fn quantize(x: f64) -> u8 {
    ((x.clamp(-1.0, 1.0) * 0.5 + 0.5) * STEPS).round() as u8
}

#[inline]
fn dequantize(b: u8) -> f64 {
    b as f64 / STEPS * 2.0 - 1.0
}

impl PackedNormal {
    /// Pack a direction. The input does not need to be normalized; a zero
    /// vector packs as +Z.
    pub fn pack(n: &Vector3<f64>) -> Self {
        let l1 = n.x.abs() + n.y.abs() + n.z.abs();
        if l1 == 0.0 || !l1.is_finite() {
            return Self::pack(&Vector3::z());
        }
        let (mut px, mut py) = (n.x / l1, n.y / l1);
        if n.z < 0.0 {
            let (ox, oy) = (px, py);
            px = (1.0 - oy.abs()) * sign(ox);
            py = (1.0 - ox.abs()) * sign(oy);
        }
        Self {
            u: quantize(px),
            v: quantize(py),
        }
    }

    /// Unpack to a unit vector.
    pub fn unpack(&self) -> Vector3<f64> {
        let x = dequantize(self.u);
        let y = dequantize(self.v);
        let z = 1.0 - x.abs() - y.abs();
        let n = if z < 0.0 {
            Vector3::new((1.0 - y.abs()) * sign(x), (1.0 - x.abs()) * sign(y), z)
        } else {
            Vector3::new(x, y, z)
        };
        n.normalize()
    }

    /// Rebuild from the two stored bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            u: bytes[0],
            v: bytes[1],
        }
    }

    /// The two stored bytes.
    pub fn to_bytes(self) -> [u8; 2] {
        [self.u, self.v]
    }
}

impl From<Vector3<f64>> for PackedNormal {
    fn from(n: Vector3<f64>) -> Self {
        Self::pack(&n)
    }
}
