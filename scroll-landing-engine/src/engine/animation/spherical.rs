use rand::Rng;
use std::f32::consts::TAU;

/// Point on a sphere of `radius` from azimuth `theta` and polar angle `phi`.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> [f32; 3] {
    let sin_phi = phi.sin();
    [
        radius * sin_phi * theta.cos(),
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
    ]
}

/// Sample a point uniformly over the surface of a sphere.
///
/// `phi = acos(2u - 1)` keeps the density uniform in area; sampling `phi`
/// uniformly would bunch points at the poles.
pub fn sample_sphere_surface<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> [f32; 3] {
    let theta = rng.gen_range(0.0..TAU);
    let u: f32 = rng.r#gen();
    let phi = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    spherical_to_cartesian(radius, theta, phi)
}
