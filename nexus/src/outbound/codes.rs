//! Random one-time codes.

use rand::Rng;

use crate::domain::OneTimeCode;
use crate::domain::ports::CodeGenerator;

/// Uniformly random six-digit codes from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> OneTimeCode {
        OneTimeCode::from_number(rand::thread_rng().gen_range(0..=OneTimeCode::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn codes_are_six_ascii_digits() {
        let generator = RandomCodeGenerator;
        for _ in 0..200 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), OneTimeCode::LENGTH);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[rstest]
    fn codes_vary_between_issues() {
        let generator = RandomCodeGenerator;
        let distinct: HashSet<String> = (0..50)
            .map(|_| generator.generate().as_str().to_owned())
            .collect();
        assert!(distinct.len() > 1);
        assert!(!generator.is_demo());
    }
}
