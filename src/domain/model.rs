use crate::utils::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person in the roster.
///
/// Two persons are equal when name, surname and age all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    name: String,
    surname: String,
    age: u32,
}

impl Person {
    /// Creates a person, rejecting negative or out-of-range ages with `InvalidAge`.
    pub fn new(name: impl Into<String>, surname: impl Into<String>, age: i64) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            surname: surname.into(),
            age: checked_age(age)?,
        })
    }

    /// Builds a person from an age that has already been validated.
    pub fn with_age(name: impl Into<String>, surname: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) {
        self.surname = surname.into();
    }

    /// Updates the age. On failure the person is left untouched.
    pub fn set_age(&mut self, age: i64) -> Result<()> {
        self.age = checked_age(age)?;
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} años)", self.name, self.surname, self.age)
    }
}

/// Largest accepted age (`i32::MAX`).
pub const MAX_AGE: u32 = i32::MAX as u32;

fn checked_age(age: i64) -> Result<u32> {
    u32::try_from(age)
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .ok_or_else(|| RosterError::InvalidAge {
            value: age.to_string(),
        })
}

/// Parses raw age input (form field or CSV column).
///
/// Accepts a base-10 integer with an optional sign; surrounding whitespace is
/// not trimmed.
pub fn parse_age(raw: &str) -> Result<u32> {
    let value: i64 = raw.parse().map_err(|_| RosterError::InvalidAge {
        value: raw.to_string(),
    })?;
    checked_age(value)
}
