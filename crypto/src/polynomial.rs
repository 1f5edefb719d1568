use crate::group::GroupElement;
use crate::scalar::Scalar;

/// Evaluates `Σ coefficients[j] · x^j` with Horner's method.
///
/// `coefficients[0]` is the constant term. An empty slice evaluates to the
/// identity.
pub fn evaluate<G: GroupElement>(coefficients: &[G], x: &Scalar) -> G {
    let Some((highest, rest)) = coefficients.split_last() else {
        return G::identity();
    };

    // Horner's method: work backwards from highest degree
    rest.iter()
        .rev()
        .fold(highest.clone(), |acc, coeff| acc.mul_scalar(x).add_element(coeff))
}
