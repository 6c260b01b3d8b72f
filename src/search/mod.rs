use mongodb::bson::{doc, Bson, Document};

use crate::models::Candidate;

/// Filter values that mean "no constraint for this field". Recruiter search
/// sends "All", resume search sends "Any"; both are honored everywhere.
const WILDCARD_SENTINELS: [&str; 2] = ["All", "Any"];

fn is_wildcard(value: &str) -> bool {
    WILDCARD_SENTINELS.contains(&value)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
enum Predicate {
    Substring { field: &'static str, value: String },
    Equals { field: &'static str, value: Bson },
    AnyOf { field: &'static str, values: Vec<String> },
    AtLeast { field: &'static str, value: Bson },
    AtMost { field: &'static str, value: Bson },
}

impl Predicate {
    fn to_document(&self) -> Document {
        match self {
            // Escaped so the needle matches literally, not as a pattern.
            Predicate::Substring { field, value } => doc! {
                *field: { "$regex": regex::escape(value), "$options": "i" }
            },
            Predicate::Equals { field, value } => doc! { *field: value.clone() },
            Predicate::AnyOf { field, values } => doc! { *field: { "$in": values.clone() } },
            Predicate::AtLeast { field, value } => doc! { *field: { "$gte": value.clone() } },
            Predicate::AtMost { field, value } => doc! { *field: { "$lte": value.clone() } },
        }
    }
}

/// Folds an arbitrary subset of search criteria into a single MongoDB filter:
/// the logical AND of every present criterion. Absent or empty criteria add
/// nothing. The free-text experience field cannot be filtered in the query, so
/// its bounds are held back and applied to the fetched rows as a final stage.
#[derive(Debug, Default)]
pub struct CandidateQuery {
    predicates: Vec<Predicate>,
    experience_floor: Option<f64>,
    experience_ceiling: Option<f64>,
}

impl CandidateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on a free-text field.
    pub fn substring(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            self.predicates.push(Predicate::Substring {
                field,
                value: v.to_string(),
            });
        }
        self
    }

    /// Exact match on a categorical field.
    pub fn equals(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            self.predicates.push(Predicate::Equals {
                field,
                value: Bson::String(v.to_string()),
            });
        }
        self
    }

    /// Exact match that skips the "All"/"Any" sentinels.
    pub fn categorical(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            if !is_wildcard(v) {
                self.predicates.push(Predicate::Equals {
                    field,
                    value: Bson::String(v.to_string()),
                });
            }
        }
        self
    }

    /// Membership match; a list containing a sentinel imposes no constraint.
    pub fn any_of(mut self, field: &'static str, values: Option<&[String]>) -> Self {
        if let Some(vs) = values {
            if !vs.is_empty() && !vs.iter().any(|v| is_wildcard(v)) {
                self.predicates.push(Predicate::AnyOf {
                    field,
                    values: vs.to_vec(),
                });
            }
        }
        self
    }

    pub fn equals_int(mut self, field: &'static str, value: Option<i32>) -> Self {
        if let Some(v) = value {
            self.predicates.push(Predicate::Equals {
                field,
                value: Bson::Int32(v),
            });
        }
        self
    }

    pub fn at_least_int(mut self, field: &'static str, value: Option<i32>) -> Self {
        if let Some(v) = value {
            self.predicates.push(Predicate::AtLeast {
                field,
                value: Bson::Int32(v),
            });
        }
        self
    }

    /// Age bounds become a date-of-birth window. Birth dates are stored as ISO
    /// `YYYY-MM-DD` strings, so the window endpoints compare lexically.
    pub fn age_range(mut self, min_age: Option<i32>, max_age: Option<i32>, current_year: i32) -> Self {
        if let Some(min) = min_age {
            let latest_dob = format!("{}-12-31", current_year - min);
            self.predicates.push(Predicate::AtMost {
                field: "dob",
                value: Bson::String(latest_dob),
            });
        }
        if let Some(max) = max_age {
            let earliest_dob = format!("{}-01-01", current_year - max);
            self.predicates.push(Predicate::AtLeast {
                field: "dob",
                value: Bson::String(earliest_dob),
            });
        }
        self
    }

    pub fn min_experience(mut self, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            if let Ok(years) = v.parse::<f64>() {
                self.experience_floor = Some(years);
            }
        }
        self
    }

    pub fn max_experience(mut self, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            if let Ok(years) = v.parse::<f64>() {
                self.experience_ceiling = Some(years);
            }
        }
        self
    }

    /// The composed filter. An empty criteria set yields an empty document,
    /// which matches every candidate.
    pub fn filter_document(&self) -> Document {
        if self.predicates.is_empty() {
            return Document::new();
        }
        let clauses: Vec<Document> = self.predicates.iter().map(Predicate::to_document).collect();
        doc! { "$and": clauses }
    }

    /// Final transform stage for the free-text experience field: parse each
    /// fetched row and drop the ones outside the requested bounds. Runs after
    /// every database predicate, so no criterion is ever silently skipped.
    pub fn apply_experience_bounds(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        if self.experience_floor.is_none() && self.experience_ceiling.is_none() {
            return candidates;
        }
        candidates.retain(|c| {
            let years = parse_experience_years(c.experience.as_deref().unwrap_or(""));
            self.experience_floor.map_or(true, |min| years >= min)
                && self.experience_ceiling.map_or(true, |max| years <= max)
        });
        candidates
    }
}

/// Leading numeric portion of a free-text experience value: "3.5 years" is
/// 3.5, "2 years 6 months" is 2.0, empty or unparseable is 0.
pub fn parse_experience_years(raw: &str) -> f64 {
    let leading: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate_with_experience(experience: &str) -> Candidate {
        Candidate {
            experience: Some(experience.to_string()),
            ..Candidate::default()
        }
    }

    #[test]
    fn no_criteria_matches_everything() {
        let query = CandidateQuery::new()
            .substring("full_name", None)
            .categorical("gender", None)
            .age_range(None, None, 2026);
        assert_eq!(query.filter_document(), Document::new());
    }

    #[test]
    fn empty_values_add_no_predicates() {
        let query = CandidateQuery::new()
            .substring("skills", Some(""))
            .substring("languages", Some("   "))
            .equals("availability", Some(""));
        assert_eq!(query.filter_document(), Document::new());
    }

    #[test]
    fn substring_is_case_insensitive_and_escaped() {
        let query = CandidateQuery::new().substring("skills", Some("c++"));
        assert_eq!(
            query.filter_document(),
            doc! { "$and": [ { "skills": { "$regex": r"c\+\+", "$options": "i" } } ] }
        );
    }

    #[test]
    fn present_criteria_are_anded_in_order() {
        let query = CandidateQuery::new()
            .substring("full_name", Some("jane"))
            .equals("availability", Some("Immediate"));
        assert_eq!(
            query.filter_document(),
            doc! { "$and": [
                { "full_name": { "$regex": "jane", "$options": "i" } },
                { "availability": "Immediate" },
            ] }
        );
    }

    #[test]
    fn repeated_fields_all_constrain() {
        // Mandatory-skills mode pushes one predicate per skill on the same field.
        let query = CandidateQuery::new()
            .substring("skills", Some("rust"))
            .substring("skills", Some("sql"));
        assert_eq!(
            query.filter_document(),
            doc! { "$and": [
                { "skills": { "$regex": "rust", "$options": "i" } },
                { "skills": { "$regex": "sql", "$options": "i" } },
            ] }
        );
    }

    #[test]
    fn gender_sentinels_are_wildcards() {
        assert_eq!(
            CandidateQuery::new().categorical("gender", Some("All")).filter_document(),
            Document::new()
        );
        assert_eq!(
            CandidateQuery::new().categorical("gender", Some("Any")).filter_document(),
            Document::new()
        );
        assert_eq!(
            CandidateQuery::new().categorical("gender", Some("Female")).filter_document(),
            doc! { "$and": [ { "gender": "Female" } ] }
        );
    }

    #[test]
    fn job_type_list_with_sentinel_is_unconstrained() {
        let any = vec!["Any".to_string(), "Remote".to_string()];
        assert_eq!(
            CandidateQuery::new().any_of("job_type", Some(&any)).filter_document(),
            Document::new()
        );

        let listed = vec!["Full-time".to_string(), "Contract".to_string()];
        assert_eq!(
            CandidateQuery::new().any_of("job_type", Some(&listed)).filter_document(),
            doc! { "$and": [ { "job_type": { "$in": ["Full-time", "Contract"] } } ] }
        );
    }

    #[test]
    fn age_range_maps_to_dob_window() {
        let query = CandidateQuery::new().age_range(Some(25), Some(30), 2026);
        assert_eq!(
            query.filter_document(),
            doc! { "$and": [
                { "dob": { "$lte": "2001-12-31" } },
                { "dob": { "$gte": "1996-01-01" } },
            ] }
        );
    }

    #[test]
    fn graduation_year_threshold() {
        let query = CandidateQuery::new().at_least_int("graduation_year", Some(2020));
        assert_eq!(
            query.filter_document(),
            doc! { "$and": [ { "graduation_year": { "$gte": 2020 } } ] }
        );
    }

    #[test]
    fn parses_leading_numeric_experience() {
        assert_eq!(parse_experience_years("3.5 years"), 3.5);
        assert_eq!(parse_experience_years("2 years 6 months"), 2.0);
        assert_eq!(parse_experience_years("10+ years"), 10.0);
        assert_eq!(parse_experience_years(" 7"), 7.0);
        assert_eq!(parse_experience_years(""), 0.0);
        assert_eq!(parse_experience_years("fresher"), 0.0);
    }

    #[test]
    fn experience_floor_drops_short_tenures() {
        let query = CandidateQuery::new().min_experience(Some("3"));
        let results = query.apply_experience_bounds(vec![
            candidate_with_experience("3.5 years"),
            candidate_with_experience("2 years 6 months"),
            candidate_with_experience(""),
            candidate_with_experience("3 years"),
        ]);

        let kept: Vec<_> = results
            .iter()
            .map(|c| c.experience.as_deref().unwrap())
            .collect();
        assert_eq!(kept, vec!["3.5 years", "3 years"]);
    }

    #[test]
    fn experience_bounds_apply_both_ends() {
        let query = CandidateQuery::new()
            .min_experience(Some("2"))
            .max_experience(Some("5"));
        let results = query.apply_experience_bounds(vec![
            candidate_with_experience("1 year"),
            candidate_with_experience("4 years"),
            candidate_with_experience("8 years"),
        ]);

        let kept: Vec<_> = results
            .iter()
            .map(|c| c.experience.as_deref().unwrap())
            .collect();
        assert_eq!(kept, vec!["4 years"]);
    }

    #[test]
    fn without_bounds_rows_pass_through() {
        let query = CandidateQuery::new();
        let results = query.apply_experience_bounds(vec![
            candidate_with_experience(""),
            candidate_with_experience("fresher"),
        ]);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn unparseable_threshold_is_ignored() {
        let query = CandidateQuery::new().min_experience(Some("lots"));
        let results = query.apply_experience_bounds(vec![candidate_with_experience("1 year")]);
        assert_eq!(results.len(), 1);
    }
}
