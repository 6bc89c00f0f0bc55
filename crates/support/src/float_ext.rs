use crate::f;

/// Extends floating point primitives with more specific formatting options
pub trait FloatExt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition of the precision and exponent padding.
    ///
    /// ```rust
    /// # use gtools_support::FloatExt;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!(5.049e10.sci(3, 2), "5.049e+10".to_string());
    /// assert_eq!(1.643e-4.sci(2, 2), "1.64e-04".to_string());
    /// ```
    ///
    /// Infinite values, used for stable half-lives, are written out as
    /// `stable` rather than `inf`.
    ///
    /// ```rust
    /// # use gtools_support::FloatExt;
    /// assert_eq!(f64::INFINITY.sci(5, 2), "stable".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl FloatExt for f64 {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        if !self.is_finite() {
            return match self.is_sign_positive() && self.is_infinite() {
                true => "stable".to_string(),
                false => f!("{self}"),
            };
        }

        let num = f!("{:.precision$e}", self);
        match num.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                f!("{mantissa}e{sign}{digits:0>exp_pad$}")
            }
            None => num,
        }
    }
}
