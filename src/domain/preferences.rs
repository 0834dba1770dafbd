//! User-selectable scan preferences
//!
//! The output language of the report and the camera facing mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language for the generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hindi
    #[default]
    Hi,
    /// English
    En,
}

impl Language {
    /// Language selector code sent with requests (`hi`, `en`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hi => "hi",
            Language::En => "en",
        }
    }

    /// English name of the language, used in service prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Hi => "Hindi",
            Language::En => "English",
        }
    }

    /// The other supported language
    pub fn toggled(self) -> Self {
        match self {
            Language::Hi => Language::En,
            Language::En => Language::Hi,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hi" | "hindi" => Ok(Language::Hi),
            "en" | "english" => Ok(Language::En),
            other => Err(format!(
                "Invalid language '{other}'. Must be one of: hi, en"
            )),
        }
    }
}

/// Which physical camera a scan requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// User-facing camera
    #[default]
    Front,
    /// Environment-facing camera
    Back,
}

impl FacingMode {
    /// The opposite camera
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::Front => FacingMode::Back,
            FacingMode::Back => FacingMode::Front,
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacingMode::Front => f.write_str("front"),
            FacingMode::Back => f.write_str("back"),
        }
    }
}

impl FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "front" | "user" => Ok(FacingMode::Front),
            "back" | "environment" => Ok(FacingMode::Back),
            other => Err(format!(
                "Invalid facing mode '{other}'. Must be one of: front, back"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hi", Language::Hi ; "code hi")]
    #[test_case("EN", Language::En ; "uppercase code")]
    #[test_case("English", Language::En ; "full name")]
    fn test_language_parse(input: &str, expected: Language) {
        assert_eq!(input.parse::<Language>().unwrap(), expected);
    }

    #[test]
    fn test_language_parse_invalid() {
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_defaults_and_toggle() {
        assert_eq!(Language::default(), Language::Hi);
        assert_eq!(Language::Hi.toggled(), Language::En);
        assert_eq!(Language::En.display_name(), "English");
    }

    #[test_case("front", FacingMode::Front ; "front")]
    #[test_case("user", FacingMode::Front ; "media alias user")]
    #[test_case("environment", FacingMode::Back ; "media alias environment")]
    fn test_facing_parse(input: &str, expected: FacingMode) {
        assert_eq!(input.parse::<FacingMode>().unwrap(), expected);
    }

    #[test]
    fn test_facing_toggle() {
        assert_eq!(FacingMode::Front.toggled(), FacingMode::Back);
        assert_eq!(FacingMode::Back.toggled().toggled(), FacingMode::Back);
    }
}
