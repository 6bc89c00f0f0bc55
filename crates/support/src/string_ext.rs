/// Extends string types with element symbol handling
pub trait StringExt {
    /// Normalise to the element symbol convention
    ///
    /// Surrounding whitespace is dropped, then the first letter is made upper
    /// case and any others lower case. Data sources disagree on this (`CO`,
    /// `co`, `Co`), so symbols are normalised before any comparison.
    ///
    /// ```rust
    /// # use gtools_support::StringExt;
    /// assert_eq!("RA".as_symbol(), "Ra".to_string());
    /// assert_eq!(" pb ".as_symbol(), "Pb".to_string());
    /// assert_eq!("u".as_symbol(), "U".to_string());
    /// assert_eq!("".as_symbol(), "".to_string());
    /// ```
    fn as_symbol(&self) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn as_symbol(&self) -> String {
        self.as_ref()
            .trim()
            .chars()
            .enumerate()
            .map(|(i, c)| match i {
                0 => c.to_ascii_uppercase(),
                _ => c.to_ascii_lowercase(),
            })
            .collect()
    }
}
