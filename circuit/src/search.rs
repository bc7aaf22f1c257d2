//! Finding coordinates that satisfy [`crate::InitCircuit`].

use field::Fr;
use mimc::MimcSponge;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{CircuitError, Result};
use crate::init::InitWitness;

/// Rejection-sampling budget of [`sample_candidate`].
pub const MAX_ATTEMPTS: usize = 1 << 16;

/// Largest radius whose candidates stay in the signed 32-bit range.
pub const MAX_RADIUS: u64 = 1 << 31;

/// A point inside the annulus together with its commitment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub radius: u64,
    pub key: Fr,
    pub x: i64,
    pub y: i64,
    pub location_id: Fr,
}

impl Location {
    pub fn witness(&self) -> InitWitness {
        InitWitness {
            radius: self.radius,
            key: self.key,
            x: self.x,
            y: self.y,
        }
    }
}

/// `0.98 * r^2 < x^2 + y^2 < r^2`, in exact integer arithmetic.
///
/// Coordinates outside the signed 32-bit range the circuit admits are never inside.
pub fn in_annulus(radius: u64, x: i64, y: i64) -> bool {
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
        return false;
    };
    let d = x.unsigned_abs() as u128 * x.unsigned_abs() as u128
        + y.unsigned_abs() as u128 * y.unsigned_abs() as u128;
    let r_sq = radius as u128 * radius as u128;
    match r_sq.checked_mul(98) {
        Some(lower) => d < r_sq && 100 * d > lower,
        None => false,
    }
}

/// Draw a uniform integer point of the annulus, or `None` if the budget runs out.
pub fn sample_candidate<R: Rng + ?Sized>(rng: &mut R, radius: u64) -> Option<(i64, i64)> {
    if radius == 0 || radius > MAX_RADIUS {
        return None;
    }
    let bound = (radius - 1) as i64;
    for attempt in 0..MAX_ATTEMPTS {
        let x = rng.random_range(-bound..=bound);
        let y = rng.random_range(-bound..=bound);
        if in_annulus(radius, x, y) {
            tracing::trace!(radius, attempt, "annulus candidate found");
            return Some((x, y));
        }
    }
    None
}

/// Sample a location for `radius` and commit to it under `key`.
pub fn find_location<R: Rng + ?Sized>(radius: u64, key: Fr, rng: &mut R) -> Result<Location> {
    if radius > MAX_RADIUS {
        return Err(CircuitError::RadiusOutOfRange(radius));
    }
    let (x, y) = sample_candidate(rng, radius).ok_or(CircuitError::EmptyAnnulus { radius })?;
    let location_id = MimcSponge::new(key).hash_one(&[Fr::from_i64(x)])?;
    tracing::debug!(radius, %location_id, "found location");
    Ok(Location {
        radius,
        key,
        x,
        y,
        location_id,
    })
}

/// Location ids of many `x` coordinates, hashed in parallel.
pub fn location_ids(key: Fr, xs: &[i64]) -> Result<Vec<Fr>> {
    let sponge = MimcSponge::new(key);
    xs.par_iter()
        .map(|&x| sponge.hash_one(&[Fr::from_i64(x)]).map_err(CircuitError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_in_annulus_boundaries() {
        assert!(!in_annulus(1000, 700, 700));
        assert!(in_annulus(1000, 701, 700));
        assert!(in_annulus(1000, -701, 700));
        assert!(!in_annulus(1000, 1000, 0));
        assert!(!in_annulus(1000, 0, 0));
    }

    #[test]
    fn test_in_annulus_extreme_inputs() {
        assert!(!in_annulus(1000, i64::MIN, i64::MIN));
        assert!(!in_annulus(1000, i64::MAX, 0));
        assert!(!in_annulus(u64::MAX, 0, 0));
        assert!(!in_annulus(u64::MAX, i32::MAX as i64, i32::MIN as i64));
        assert!(!in_annulus(MAX_RADIUS, 1 << 31, 0));
        assert!(in_annulus(MAX_RADIUS + 2, -(1 << 31), 0));
    }

    #[test]
    fn test_sample_candidate_lands_in_annulus() {
        let mut rng = StdRng::seed_from_u64(1);
        for radius in [100, 1000, 1 << 20, MAX_RADIUS] {
            let (x, y) = sample_candidate(&mut rng, radius).unwrap();
            assert!(in_annulus(radius, x, y));
        }
    }

    #[test]
    fn test_small_radius_has_no_points() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(sample_candidate(&mut rng, 0), None);
        assert_eq!(sample_candidate(&mut rng, 1), None);
        let err = find_location(1, Fr::ZERO, &mut rng).unwrap_err();
        assert_eq!(err, CircuitError::EmptyAnnulus { radius: 1 });
    }

    #[test]
    fn test_radius_out_of_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = find_location(MAX_RADIUS + 1, Fr::ZERO, &mut rng).unwrap_err();
        assert_eq!(err, CircuitError::RadiusOutOfRange(MAX_RADIUS + 1));
    }

    #[test]
    fn test_location_ids_match_sequential() {
        let key = Fr::from_canonical_u64(9);
        let xs: Vec<i64> = (-20..20).collect();
        let parallel = location_ids(key, &xs).unwrap();
        let sponge = MimcSponge::new(key);
        for (&x, id) in xs.iter().zip(&parallel) {
            assert_eq!(*id, sponge.hash_one(&[Fr::from_i64(x)]).unwrap());
        }
    }
}
