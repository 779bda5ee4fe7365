//! User confirmation for destructive page actions.

/// Asks the user a yes/no question.
///
/// Closures taking the prompt work directly:
///
/// ```
/// use regform::confirm::Confirm;
///
/// let always = |_: &str| true;
/// assert!(always.confirm("Clear the form?"));
/// ```
pub trait Confirm {
    /// Returns `true` if the user agreed.
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
