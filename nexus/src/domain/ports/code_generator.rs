//! Port producing one-time codes.

use crate::domain::OneTimeCode;

/// Source of one-time codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produce the code for the next issuance.
    fn generate(&self) -> OneTimeCode;

    /// Whether generated codes are public demo values that may be logged.
    fn is_demo(&self) -> bool {
        false
    }
}

/// Demo generator that always yields [`crate::domain::DEMO_CODE`].
///
/// This keeps the walkthrough usable without a mail channel. It must not be
/// wired when codes guard anything real.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedCodeGenerator;

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> OneTimeCode {
        OneTimeCode::demo()
    }

    fn is_demo(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEMO_CODE;

    #[test]
    fn fixed_generator_yields_demo_code() {
        let generator = FixedCodeGenerator;
        assert_eq!(generator.generate().as_str(), DEMO_CODE);
        assert_eq!(generator.generate(), generator.generate());
        assert!(generator.is_demo());
    }
}
