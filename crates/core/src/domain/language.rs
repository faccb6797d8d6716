use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Cpp17,
    Cpp20,
    Java,
    CSharp,
    Python,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Cpp17,
        Language::Cpp20,
        Language::Java,
        Language::CSharp,
        Language::Python,
    ];

    /// Identifier the backend expects in the `language` form field.
    pub fn id(self) -> &'static str {
        match self {
            Language::Cpp17 => "cpp17",
            Language::Cpp20 => "cpp20",
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Python => "py",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Cpp17 => "C++ 17",
            Language::Cpp20 => "C++ 20",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.id() == s)
            .ok_or_else(|| DomainError::UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_parses_from_its_id() {
        for language in Language::ALL {
            let parsed: Language = language.id().parse().expect("id should parse");
            assert_eq!(parsed, language);
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = "rust".parse::<Language>().expect_err("rust is not supported");

        assert_eq!(err, DomainError::UnsupportedLanguage("rust".to_string()));
    }

    #[test]
    fn default_language_is_cpp17() {
        assert_eq!(Language::default().id(), "cpp17");
    }
}
