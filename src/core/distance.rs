use crate::models::{DonorRecord, RequesterProfile};

/// Inclusive age range around a requester's age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeWindow {
    pub min_age: u32,
    pub max_age: u32,
}

/// Calculate the age window `[age - tolerance, age + tolerance]`
///
/// The lower bound saturates at zero.
pub fn calculate_age_window(age: u32, tolerance: u32) -> AgeWindow {
    AgeWindow {
        min_age: age.saturating_sub(tolerance),
        max_age: age.saturating_add(tolerance),
    }
}

/// Check if an age falls inside the window (both ends inclusive)
#[inline]
pub fn is_within_age_window(age: u32, window: &AgeWindow) -> bool {
    age >= window.min_age && age <= window.max_age
}

/// Absolute BMI difference, the 1-D distance used inside the age window
#[inline]
pub fn bmi_distance(donor_bmi: f64, requester_bmi: f64) -> f64 {
    (donor_bmi - requester_bmi).abs()
}

/// Euclidean distance in the (BMI, Age) plane
///
/// No scaling is applied: one year of age weighs the same as one BMI point.
#[inline]
pub fn bmi_age_distance(donor: &DonorRecord, requester: &RequesterProfile) -> f64 {
    let d_bmi = donor.bmi - requester.bmi;
    let d_age = f64::from(donor.age) - f64::from(requester.age);
    d_bmi.hypot(d_age)
}
