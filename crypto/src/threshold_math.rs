use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::group::GroupElement;
use crate::id::Id;
use crate::scalar::Scalar;

/// Rejects zero ids and repeated ids in an interpolation or derivation set.
pub fn validate_unique_nonzero_ids(ids: &[Id]) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        if id.is_zero() {
            return Err(Error::ZeroId { index });
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateId { index });
        }
    }
    Ok(())
}

/// λ_i = ∏(j≠i) x_j / (x_j - x_i), the weight of point `i` when
/// interpolating at x = 0.
///
/// Returns `None` when two x coordinates coincide.
pub fn lagrange_coefficient_at_zero(xs: &[Scalar], i: usize) -> Option<Scalar> {
    let mut numerator = Scalar::one();
    let mut denominator = Scalar::one();

    for (j, x_j) in xs.iter().enumerate() {
        if i == j {
            continue;
        }
        numerator = numerator.mul(x_j);
        let diff = x_j.sub(&xs[i]);
        denominator = denominator.mul(&diff);
    }

    numerator.div(&denominator)
}

pub fn lagrange_coefficients_at_zero(xs: &[Scalar]) -> Option<Vec<Scalar>> {
    (0..xs.len())
        .map(|i| lagrange_coefficient_at_zero(xs, i))
        .collect()
}

/// Lagrange coefficients at zero for a validated id set.
///
/// The coefficients depend only on the ids, so callers recovering several
/// values over the same signer set can compute them once.
pub fn lagrange_coefficients_for_ids(ids: &[Id]) -> Result<Vec<Scalar>> {
    validate_unique_nonzero_ids(ids)?;
    let xs: Vec<Scalar> = ids.iter().map(|id| id.as_scalar().clone()).collect();
    let lambdas = lagrange_coefficients_at_zero(&xs)
        .expect("validated ids have pairwise distinct x coordinates");
    Ok(lambdas)
}

/// Linear combination `Σ lambdas[i] · values[i]` in any group.
pub fn combine_with_lagrange<G: GroupElement>(values: &[G], lambdas: &[Scalar]) -> G {
    assert_eq!(
        values.len(),
        lambdas.len(),
        "one Lagrange coefficient per value"
    );
    values
        .iter()
        .zip(lambdas)
        .fold(G::identity(), |acc, (value, lambda)| {
            acc.add_element(&value.mul_scalar(lambda))
        })
}

/// Recovers `f(0)` from the evaluations `values[i] = f(ids[i])`.
///
/// The result is only meaningful when exactly `degree + 1` evaluations are
/// supplied; fewer shares interpolate a different polynomial without any
/// detectable error.
///
/// # Errors
/// Empty input, mismatched lengths, and zero or duplicate ids.
pub fn interpolate_at_zero<G: GroupElement>(values: &[G], ids: &[Id]) -> Result<G> {
    if values.is_empty() {
        return Err(Error::EmptyInput("cannot interpolate from an empty share set"));
    }
    if values.len() != ids.len() {
        return Err(Error::LengthMismatch {
            values: values.len(),
            ids: ids.len(),
        });
    }
    let lambdas = lagrange_coefficients_for_ids(ids)?;
    Ok(combine_with_lagrange(values, &lambdas))
}
