use super::codec::TestResult;

/// A test score at or above this counts as a pass even when `passed` is false.
pub const PASSING_SCORE: f64 = 7.0;

/// Whether a user may be listed as a teacher: they must offer at least one
/// subject and have a proficiency test that was passed or scored high enough.
pub fn is_eligible(teach_subjects: &[String], test: Option<&TestResult>) -> bool {
    !teach_subjects.is_empty()
        && test.is_some_and(|test| test.passed || test.score.is_some_and(|score| score >= PASSING_SCORE))
}
