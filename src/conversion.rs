use crate::constants::{
    Degree, Radian, DEGREES_PER_SIGN, FULL_TURN, HALF_TURN, RADEG, ZODIAC_SIGNS,
};
use crate::marsfit_errors::MarsFitError;

/// Convert an angle from degrees to radians.
#[inline]
pub fn to_radians(angle: Degree) -> Radian {
    angle * RADEG
}

/// Convert an angle from radians to degrees.
#[inline]
pub fn to_degrees(angle: Radian) -> Degree {
    angle.to_degrees()
}

/// Principal value of an angle in degrees, in `[0, 360)`.
///
/// `rem_euclid` may round a tiny negative input up to exactly `360.0`; that case is folded
/// back to `0.0` so the result is always strictly below a full turn and the function is idempotent.
#[inline]
pub fn normalize_degrees(angle: Degree) -> Degree {
    let a = angle.rem_euclid(FULL_TURN);
    if a >= FULL_TURN {
        0.0
    } else {
        a
    }
}

/// Signed shortest rotation from `b` to `a`, in degrees.
///
/// Computes `((a - b + 180) mod 360) - 180` with a non-negative modulo, so inputs outside
/// `[0, 360)` and negative differences are handled. The lone boundary value `-180` is reported
/// as `+180`, which keeps the result in `(-180, 180]` without changing its magnitude.
///
/// Arguments
/// -----------------
/// * `a`: target angle in degrees (the prediction, in the residual convention).
/// * `b`: reference angle in degrees (the observation).
///
/// Return
/// ----------
/// * The signed difference `a - b` wrapped into `(-180, 180]`.
#[inline]
pub fn signed_angular_difference(a: Degree, b: Degree) -> Degree {
    let d = (a - b + HALF_TURN).rem_euclid(FULL_TURN) - HALF_TURN;
    if d <= -HALF_TURN {
        HALF_TURN
    } else {
        d
    }
}

/// Reconstruct an ecliptic longitude from its zodiac-sexagesimal form.
///
/// Longitude = `zodiac_index * 30 + degree + arc_minute / 60 + arc_second / 3600` (degrees).
///
/// Arguments
/// ---------
/// * `zodiac_index`: the zodiac sign (Aries 0, Taurus 1, …, Pisces 11)
/// * `degree`, `arc_minute`, `arc_second`: position inside the sign
///
/// Returns
/// -------
/// * The longitude in degrees, or an error if the sign is out of range or a component is not finite.
pub fn zodiac_to_longitude(
    zodiac_index: i64,
    degree: f64,
    arc_minute: f64,
    arc_second: f64,
) -> Result<Degree, MarsFitError> {
    if !(0..i64::from(ZODIAC_SIGNS)).contains(&zodiac_index) {
        return Err(MarsFitError::InvalidZodiacIndex(zodiac_index));
    }
    if ![degree, arc_minute, arc_second]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(MarsFitError::NumericDomain(format!(
            "zodiac position ({degree}, {arc_minute}, {arc_second}) is not finite"
        )));
    }

    Ok(zodiac_index as f64 * DEGREES_PER_SIGN + degree + arc_minute / 60.0 + arc_second / 3600.0)
}
