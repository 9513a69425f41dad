use crate::core::csv_codec::CsvDialect;
use crate::domain::model::{parse_age, Person};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_text;

/// Raw text entered for a person, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    pub name: String,
    pub surname: String,
    pub age: String,
}

impl PersonForm {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            age: age.into(),
        }
    }

    /// Pre-fills the form with an existing person for editing.
    pub fn from_person(person: &Person) -> Self {
        Self::new(person.name(), person.surname(), person.age().to_string())
    }

    /// Checks that every field is filled and the age parses, then builds the person.
    pub fn to_person(&self) -> Result<Person> {
        validate_required_text("name", &self.name)?;
        validate_required_text("surname", &self.surname)?;
        validate_required_text("age", &self.age)?;
        let age = parse_age(&self.age)?;
        Ok(Person::with_age(self.name.as_str(), self.surname.as_str(), age))
    }

    /// Like [`to_person`](Self::to_person), also refusing text `dialect` cannot store.
    pub fn to_person_for(&self, dialect: CsvDialect) -> Result<Person> {
        let person = self.to_person()?;
        dialect.check_field("name", person.name())?;
        dialect.check_field("surname", person.surname())?;
        Ok(person)
    }

    /// Applies the form to a copy of `person` through its setters.
    ///
    /// The original is untouched; nothing changes if any field fails.
    pub fn apply_to(&self, person: &Person, dialect: CsvDialect) -> Result<Person> {
        let validated = self.to_person_for(dialect)?;
        let mut updated = person.clone();
        updated.set_name(validated.name());
        updated.set_surname(validated.surname());
        updated.set_age(i64::from(validated.age()))?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RosterError;

    #[test]
    fn test_valid_form() {
        let person = PersonForm::new("Ana", "Lopez", "30").to_person().unwrap();
        assert_eq!(person, Person::new("Ana", "Lopez", 30).unwrap());
    }

    #[test]
    fn test_empty_field_rejected() {
        let err = PersonForm::new("Ana", "", "30").to_person().unwrap_err();
        assert!(matches!(err, RosterError::MissingField { ref field } if field == "surname"));

        let err = PersonForm::new("Ana", "Lopez", "").to_person().unwrap_err();
        assert!(matches!(err, RosterError::MissingField { ref field } if field == "age"));
    }

    #[test]
    fn test_bad_age_rejected() {
        assert!(matches!(
            PersonForm::new("Ana", "Lopez", "treinta").to_person(),
            Err(RosterError::InvalidAge { .. })
        ));
        assert!(matches!(
            PersonForm::new("Ana", "Lopez", "-2").to_person(),
            Err(RosterError::InvalidAge { .. })
        ));
    }

    #[test]
    fn test_comma_rejected_only_for_legacy() {
        let form = PersonForm::new("Ana, María", "Lopez", "30");
        assert!(form.to_person().is_ok());
        assert!(matches!(
            form.to_person_for(CsvDialect::Legacy),
            Err(RosterError::UnencodableField { ref field, .. }) if field == "name"
        ));
        assert!(form.to_person_for(CsvDialect::Quoted).is_ok());

        let original = Person::new("Ana", "Lopez", 30).unwrap();
        let form = PersonForm::new("Ana", "Lopez,Ruiz", "30");
        assert!(form.apply_to(&original, CsvDialect::Legacy).is_err());
    }

    #[test]
    fn test_apply_to_existing() {
        let original = Person::new("Ana", "Lopez", 30).unwrap();
        let form = PersonForm::from_person(&original);
        assert_eq!(form.age, "30");

        let edited = PersonForm { age: "31".to_string(), ..form }
            .apply_to(&original, CsvDialect::Legacy)
            .unwrap();
        assert_eq!(edited.age(), 31);
        assert_eq!(original.age(), 30);
    }
}
