//! GPA Arithmetic
//!
//! Marks map to a letter grade and grade point on the institution's
//! percentage scale; the GPA is the credit-weighted average.

/// One course entered into the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct CourseEntry {
    pub name: String,
    pub marks: f64,
    pub credit_hours: u8,
}

/// Marks → (letter, grade point). Marks outside 0..=100 are invalid.
pub fn grade_for_marks(marks: f64) -> Result<(&'static str, f64), String> {
    if !(0.0..=100.0).contains(&marks) {
        return Err(format!("Marks must be between 0 and 100, got {marks}"));
    }
    Ok(match marks {
        m if m >= 90.0 => ("A+", 4.0),
        m if m >= 80.0 => ("A", 3.6),
        m if m >= 70.0 => ("B+", 3.2),
        m if m >= 60.0 => ("B", 2.8),
        m if m >= 50.0 => ("C+", 2.4),
        m if m >= 45.0 => ("C", 2.0),
        m if m >= 40.0 => ("D", 1.6),
        _ => ("F", 0.0),
    })
}

/// Credit-weighted GPA over the entered courses. Empty input is 0.0;
/// any invalid marks value fails the whole computation.
pub fn compute_gpa(entries: &[CourseEntry]) -> Result<f64, String> {
    let mut weighted = 0.0;
    let mut credits = 0u32;
    for entry in entries {
        let (_, points) = grade_for_marks(entry.marks)?;
        weighted += points * entry.credit_hours as f64;
        credits += entry.credit_hours as u32;
    }
    if credits == 0 {
        return Ok(0.0);
    }
    Ok(weighted / credits as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(marks: f64, credit_hours: u8) -> CourseEntry {
        CourseEntry { name: String::new(), marks, credit_hours }
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_for_marks(100.0).unwrap(), ("A+", 4.0));
        assert_eq!(grade_for_marks(90.0).unwrap(), ("A+", 4.0));
        assert_eq!(grade_for_marks(89.99).unwrap(), ("A", 3.6));
        assert_eq!(grade_for_marks(80.0).unwrap(), ("A", 3.6));
        assert_eq!(grade_for_marks(70.0).unwrap(), ("B+", 3.2));
        assert_eq!(grade_for_marks(60.0).unwrap(), ("B", 2.8));
        assert_eq!(grade_for_marks(50.0).unwrap(), ("C+", 2.4));
        assert_eq!(grade_for_marks(45.0).unwrap(), ("C", 2.0));
        assert_eq!(grade_for_marks(40.0).unwrap(), ("D", 1.6));
        assert_eq!(grade_for_marks(39.99).unwrap(), ("F", 0.0));
        assert_eq!(grade_for_marks(0.0).unwrap(), ("F", 0.0));
    }

    #[test]
    fn test_invalid_marks_rejected() {
        assert!(grade_for_marks(-0.5).is_err());
        assert!(grade_for_marks(100.5).is_err());
        assert!(compute_gpa(&[entry(50.0, 3), entry(101.0, 3)]).is_err());
    }

    #[test]
    fn test_weighted_average() {
        // 4.0 * 3 + 2.8 * 1 = 14.8 over 4 credits
        let gpa = compute_gpa(&[entry(95.0, 3), entry(65.0, 1)]).unwrap();
        assert!((gpa - 3.7).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(compute_gpa(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_credit_rows_ignored() {
        assert_eq!(compute_gpa(&[entry(80.0, 0)]).unwrap(), 0.0);
    }
}
