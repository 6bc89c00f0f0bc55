/// Extends Option for display in tables and summaries
pub trait OptionExt {
    /// The contained value, or `none` when missing
    ///
    /// ```rust
    /// # use gtools_support::OptionExt;
    /// let half_life: Option<f64> = Some(1600.0);
    /// assert_eq!(half_life.display(), "1600");
    ///
    /// let half_life: Option<f64> = None;
    /// assert_eq!(half_life.display(), "none");
    /// ```
    fn display(&self) -> String;

    /// The contained value, or a placeholder when missing
    ///
    /// ```rust
    /// # use gtools_support::OptionExt;
    /// let mode: Option<&str> = None;
    /// assert_eq!(mode.display_or("n/a"), "n/a");
    /// ```
    fn display_or(&self, placeholder: &str) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.display_or("none")
    }

    fn display_or(&self, placeholder: &str) -> String {
        self.as_ref()
            .map_or_else(|| placeholder.to_string(), |value| value.to_string())
    }
}
