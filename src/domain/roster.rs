use crate::domain::model::Person;
use crate::utils::error::{Result, RosterError};

/// Ordered collection of unique persons.
///
/// Insertion order is kept and never re-sorted. No two elements are ever
/// structurally equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `person`, failing with `DuplicatePerson` if an equal one exists.
    pub fn add(&mut self, person: Person) -> Result<()> {
        if self.contains(&person) {
            return Err(RosterError::DuplicatePerson {
                person: person.to_string(),
            });
        }
        self.people.push(person);
        Ok(())
    }

    /// Removes the first element equal to `person`. Absent is not an error.
    pub fn remove(&mut self, person: &Person) -> Option<Person> {
        let index = self.position(person)?;
        Some(self.people.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Person> {
        (index < self.people.len()).then(|| self.people.remove(index))
    }

    /// Replaces the element at `index` and returns the previous value.
    ///
    /// Fails if `person` equals some other element.
    pub fn replace(&mut self, index: usize, person: Person) -> Result<Person> {
        let len = self.people.len();
        if index >= len {
            return Err(RosterError::IndexOutOfRange { index, len });
        }
        if self
            .people
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && *existing == person)
        {
            return Err(RosterError::DuplicatePerson {
                person: person.to_string(),
            });
        }
        Ok(std::mem::replace(&mut self.people[index], person))
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.people.contains(person)
    }

    pub fn position(&self, person: &Person) -> Option<usize> {
        self.people.iter().position(|p| p == person)
    }

    pub fn get(&self, index: usize) -> Option<&Person> {
        self.people.get(index)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.people.iter()
    }

    /// Persons whose name contains `substring`, ignoring case.
    ///
    /// `None` or an empty string yields the whole roster.
    pub fn filter_by_name<'a>(&'a self, substring: Option<&str>) -> NameFilter<'a> {
        let needle = substring
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        NameFilter {
            inner: self.people.iter(),
            needle,
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}

/// Lazy read-only view produced by [`Roster::filter_by_name`].
///
/// Cloning restarts the sequence from the current position of the clone.
#[derive(Debug, Clone)]
pub struct NameFilter<'a> {
    inner: std::slice::Iter<'a, Person>,
    needle: Option<String>,
}

impl<'a> Iterator for NameFilter<'a> {
    type Item = &'a Person;

    fn next(&mut self) -> Option<Self::Item> {
        match &self.needle {
            None => self.inner.next(),
            Some(needle) => self
                .inner
                .find(|p| p.name().to_lowercase().contains(needle.as_str())),
        }
    }
}
