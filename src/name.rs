use crate::errors::BankingError;
use std::fmt;
use std::str::FromStr;

/// An account holder's name: first, optional middle, and last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    parts: Vec<String>,
}

impl Name {
    /// Builds a name from two or three parts, in order. A part must be a single non-empty word,
    /// so that the joined name splits back into the same parts.
    pub fn new<S: AsRef<str>>(parts: &[S]) -> Result<Name, BankingError> {
        let parts: Vec<String> = parts.iter().map(|p| p.as_ref().trim().to_string()).collect();
        if !(2..=3).contains(&parts.len())
            || parts
                .iter()
                .any(|p| p.is_empty() || p.chars().any(char::is_whitespace))
        {
            return Err(BankingError::InvalidName(parts.join(" ")));
        }
        Ok(Name { parts })
    }

    pub fn first(&self) -> &str {
        &self.parts[0]
    }

    pub fn middle(&self) -> Option<&str> {
        if self.parts.len() == 3 {
            Some(&self.parts[1])
        } else {
            None
        }
    }

    pub fn last(&self) -> &str {
        &self.parts[self.parts.len() - 1]
    }
}

impl FromStr for Name {
    type Err = BankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        Name::new(parts.as_slice()).map_err(|_| BankingError::InvalidName(s.to_string()))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("John Smith")]
    #[case("John Adam Smith")]
    #[case("  Dane   Doe ")]
    fn accepts_two_or_three_parts(#[case] input: &str) {
        assert!(input.parse::<Name>().is_ok());
    }

    #[rstest]
    #[case("John")]
    #[case("John Quincy Adam Smith")]
    #[case("")]
    fn rejects_other_part_counts(#[case] input: &str) {
        assert_eq!(
            input.parse::<Name>(),
            Err(BankingError::InvalidName(input.to_string()))
        );
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(Name::new(&["John", ""]).is_err());
    }

    #[test]
    fn rejects_parts_with_inner_whitespace() {
        assert_eq!(
            Name::new(&["Mary Ann", "Lee", "Smith"]),
            Err(BankingError::InvalidName("Mary Ann Lee Smith".to_string()))
        );
        assert!(Name::new(&["Mary\tAnn", "Lee"]).is_err());
    }

    #[test]
    fn display_parses_back_to_the_same_name() {
        let name = Name::new(&[" Mary ", "Lee"]).unwrap();
        assert_eq!(name.to_string().parse::<Name>(), Ok(name));
    }

    #[test]
    fn accessors_and_display() {
        let name: Name = "John Adam Smith".parse().unwrap();
        assert_eq!(name.first(), "John");
        assert_eq!(name.middle(), Some("Adam"));
        assert_eq!(name.last(), "Smith");
        assert_eq!(name.to_string(), "John Adam Smith");

        let name = Name::new(&["Jane", "Doe"]).unwrap();
        assert_eq!(name.middle(), None);
        assert_eq!(name.to_string(), "Jane Doe");
    }
}
