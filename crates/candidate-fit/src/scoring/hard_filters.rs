use super::domain::{names_match, normalize_name, Candidate, Job};

/// Compare the job's hard filters against the candidate, one flag per mismatch.
///
/// Candidates without a declared work authorization or location pass those checks;
/// only the experience minimum treats a missing value as a failure.
pub(crate) fn evaluate(job: &Job, candidate: &Candidate) -> Vec<String> {
    let mut red_flags = Vec::new();

    let Some(filters) = &job.hard_filters else {
        return red_flags;
    };

    if let Some(required) = filters.min_total_experience_years {
        let meets = candidate
            .total_experience_years
            .map(|years| years >= required)
            .unwrap_or(false);
        if !meets {
            red_flags.push(format!(
                "total_experience_years={} < required {}",
                candidate.total_experience_years.unwrap_or(0.0),
                required
            ));
        }
    }

    if let (Some(allowed), Some(work_auth)) = (
        filters.allowed_work_auth.as_deref().filter(|list| !list.is_empty()),
        candidate.declared_work_auth(),
    ) {
        let authorized = allowed.iter().any(|entry| names_match(entry, work_auth));
        if !authorized {
            red_flags.push(format!(
                "work_auth={} not in required [{}]",
                work_auth,
                allowed.join(", ")
            ));
        }
    }

    if let (Some(allowed), Some(location)) = (
        filters.allowed_locations.as_deref().filter(|list| !list.is_empty()),
        candidate.declared_location(),
    ) {
        let location_key = normalize_name(location);
        let within = allowed
            .iter()
            .any(|entry| location_key.contains(&normalize_name(entry)));
        if !within {
            red_flags.push(format!(
                "location={} not in required [{}]",
                location,
                allowed.join(", ")
            ));
        }
    }

    red_flags
}
