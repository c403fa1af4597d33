//! The closed course catalogue.
//!
//! Courses are a fixed set of values defined at compile time; they carry a
//! stable machine name (the wire representation) and a human-readable display
//! label. Comparison and uniqueness use the machine name, never the label.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A course a student can enrol in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Course {
    /// Computer Science.
    ComputerScience,
    /// Mathematics.
    Mathematics,
    /// Physics.
    Physics,
    /// Chemistry.
    Chemistry,
    /// Biology.
    Biology,
    /// Engineering.
    Engineering,
    /// Business Administration.
    Business,
    /// Economics.
    Economics,
    /// Psychology.
    Psychology,
    /// Literature.
    Literature,
}

/// Error returned when a stored course name no longer matches the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown course name: {name}")]
pub struct CourseParseError {
    /// The unrecognised machine name.
    pub name: String,
}

impl Course {
    /// Every course in the catalogue, in stable order.
    pub const ALL: [Course; 10] = [
        Course::ComputerScience,
        Course::Mathematics,
        Course::Physics,
        Course::Chemistry,
        Course::Biology,
        Course::Engineering,
        Course::Business,
        Course::Economics,
        Course::Psychology,
        Course::Literature,
    ];

    /// Stable machine name, as used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Course::ComputerScience => "COMPUTER_SCIENCE",
            Course::Mathematics => "MATHEMATICS",
            Course::Physics => "PHYSICS",
            Course::Chemistry => "CHEMISTRY",
            Course::Biology => "BIOLOGY",
            Course::Engineering => "ENGINEERING",
            Course::Business => "BUSINESS",
            Course::Economics => "ECONOMICS",
            Course::Psychology => "PSYCHOLOGY",
            Course::Literature => "LITERATURE",
        }
    }

    /// Human-readable display label.
    pub const fn display_name(self) -> &'static str {
        match self {
            Course::ComputerScience => "Computer Science",
            Course::Mathematics => "Mathematics",
            Course::Physics => "Physics",
            Course::Chemistry => "Chemistry",
            Course::Biology => "Biology",
            Course::Engineering => "Engineering",
            Course::Business => "Business Administration",
            Course::Economics => "Economics",
            Course::Psychology => "Psychology",
            Course::Literature => "Literature",
        }
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Course {
    type Err = CourseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|course| course.as_str() == s)
            .ok_or_else(|| CourseParseError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn catalogue_has_ten_distinct_machine_names() {
        let mut names: Vec<&str> = Course::ALL.iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[rstest]
    #[case(Course::ComputerScience, "COMPUTER_SCIENCE", "Computer Science")]
    #[case(Course::Business, "BUSINESS", "Business Administration")]
    #[case(Course::Literature, "LITERATURE", "Literature")]
    fn machine_name_and_label(#[case] course: Course, #[case] name: &str, #[case] label: &str) {
        assert_eq!(course.as_str(), name);
        assert_eq!(course.display_name(), label);
        assert_eq!(course.to_string(), label);
    }

    #[rstest]
    fn serde_uses_machine_names() {
        let json = serde_json::to_string(&Course::ComputerScience).expect("serialise course");
        assert_eq!(json, "\"COMPUTER_SCIENCE\"");
        let back: Course = serde_json::from_str(&json).expect("deserialise course");
        assert_eq!(back, Course::ComputerScience);
    }

    #[rstest]
    fn from_str_round_trips_every_course() {
        for course in Course::ALL {
            let parsed: Course = course.as_str().parse().expect("known name parses");
            assert_eq!(parsed, course);
        }
    }

    #[rstest]
    fn from_str_rejects_unknown_and_labels() {
        assert!("UNDERWATER_BASKET_WEAVING".parse::<Course>().is_err());
        // Display labels are not machine names.
        assert!("Computer Science".parse::<Course>().is_err());
    }
}
