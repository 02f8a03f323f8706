use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wire string that names no variant of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Gender of a student. Wire strings are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "gender",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic branch (department).
///
/// This is every branch the system knows about. Which of them a deployment
/// accepts is configuration, see `StudentRules::allowed_branches`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "EE")]
    Ee,
    #[serde(rename = "ME")]
    Me,
    #[serde(rename = "CE")]
    Ce,
    #[serde(rename = "BME")]
    Bme,
}

impl Branch {
    pub const ALL: [Branch; 6] = [
        Branch::Cse,
        Branch::Ece,
        Branch::Ee,
        Branch::Me,
        Branch::Ce,
        Branch::Bme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Cse => "CSE",
            Branch::Ece => "ECE",
            Branch::Ee => "EE",
            Branch::Me => "ME",
            Branch::Ce => "CE",
            Branch::Bme => "BME",
        }
    }
}

impl FromStr for Branch {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::ALL
            .into_iter()
            .find(|branch| branch.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "branch",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything about a student except the store-assigned identity.
///
/// Values of this type have already passed validation; stores persist them
/// as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub gender: Gender,
    pub branch: Branch,
    pub year: i32,
    pub image: Vec<u8>,
}

/// Student model - one persisted record plus its photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Assigned by the store on insert, never reused.
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub branch: Branch,
    pub year: i32,
    pub image: Vec<u8>,
}

impl Student {
    pub fn from_fields(id: i64, fields: StudentFields) -> Self {
        Self {
            id,
            name: fields.name,
            gender: fields.gender,
            branch: fields.branch,
            year: fields.year,
            image: fields.image,
        }
    }

    /// Split off the identity, leaving the mutable part of the record.
    pub fn into_fields(self) -> (i64, StudentFields) {
        (
            self.id,
            StudentFields {
                name: self.name,
                gender: self.gender,
                branch: self.branch,
                year: self.year,
                image: self.image,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_exact_wire_strings() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Other".parse::<Gender>().unwrap(), Gender::Other);
    }

    #[test]
    fn gender_is_case_sensitive() {
        let err = "male".parse::<Gender>().unwrap_err();
        assert_eq!(err.kind, "gender");
        assert_eq!(err.value, "male");
        assert!(" Male".parse::<Gender>().is_err());
    }

    #[test]
    fn branch_round_trips_through_wire_string() {
        for branch in Branch::ALL {
            assert_eq!(branch.as_str().parse::<Branch>().unwrap(), branch);
        }
        assert!("cse".parse::<Branch>().is_err());
        assert!("IT".parse::<Branch>().is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&Branch::Bme).unwrap(), "\"BME\"");
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"Other\"");
        let branch: Branch = serde_json::from_str("\"ECE\"").unwrap();
        assert_eq!(branch, Branch::Ece);
    }

    #[test]
    fn fields_round_trip_through_student() {
        let fields = StudentFields {
            name: "Asha".to_string(),
            gender: Gender::Female,
            branch: Branch::Cse,
            year: 2021,
            image: vec![1, 2, 3],
        };
        let student = Student::from_fields(7, fields.clone());
        assert_eq!(student.id, 7);
        assert_eq!(student.into_fields(), (7, fields));
    }
}
