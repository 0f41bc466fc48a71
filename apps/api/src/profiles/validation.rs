use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::profile::Profile;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct ProfileValidationResult {
    pub passed: bool,
    /// Form field key → message, e.g. `exp_0_company` → "Company is required".
    pub errors: BTreeMap<String, String>,
}

/// Checks a profile for the fields the builder form marks as required.
///
/// Every problem is reported at once, keyed the way the form keys its inputs:
/// - `fullName`, `email`, `phone`, `location`
/// - `exp_{i}_company`, `exp_{i}_position`, `exp_{i}_startDate`, `exp_{i}_endDate`
///   (end date only when the role is not current)
/// - `edu_{i}_institution`, `edu_{i}_degree`, `edu_{i}_field`
pub fn validate_profile(profile: &Profile) -> ProfileValidationResult {
    let mut errors = BTreeMap::new();
    let mut require = |key: String, value: &str, message: &str| {
        if value.trim().is_empty() {
            errors.insert(key, message.to_string());
        }
    };

    require("fullName".into(), &profile.full_name, "Full name is required");
    require("email".into(), &profile.email, "Email is required");
    require("phone".into(), &profile.phone, "Phone is required");
    require("location".into(), &profile.location, "Location is required");

    for (i, exp) in profile.experience.iter().enumerate() {
        require(format!("exp_{i}_company"), &exp.company, "Company is required");
        require(format!("exp_{i}_position"), &exp.position, "Position is required");
        require(format!("exp_{i}_startDate"), &exp.start_date, "Start date is required");
        if !exp.current {
            require(format!("exp_{i}_endDate"), &exp.end_date, "End date is required");
        }
    }

    for (i, edu) in profile.education.iter().enumerate() {
        require(format!("edu_{i}_institution"), &edu.institution, "Institution is required");
        require(format!("edu_{i}_degree"), &edu.degree, "Degree is required");
        require(format!("edu_{i}_field"), &edu.field, "Field of study is required");
    }

    let email = profile.email.trim();
    if !email.is_empty() && !EMAIL.is_match(email) {
        errors.insert("email".to_string(), "Invalid email format".to_string());
    }

    ProfileValidationResult {
        passed: errors.is_empty(),
        errors,
    }
}
