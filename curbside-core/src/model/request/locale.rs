use std::fmt::Display;

/// the response language. only the language component of a locale spec
/// is kept; country and variant parts are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
}

impl Locale {
    pub fn new(language: &str) -> Locale {
        Locale {
            language: language.to_string(),
        }
    }

    /// parses specs of the form `lang`, `lang_COUNTRY`, or
    /// `lang_COUNTRY_variant`. anything else logs and defaults to `en`.
    pub fn from_spec(spec: &str) -> Locale {
        let parts: Vec<&str> = spec.split('_').collect();
        match parts.len() {
            1..=3 => Locale::new(parts[0]),
            _ => {
                log::debug!("bogus locale {spec}, defaulting to en");
                Locale::new("en")
            }
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en")
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language)
    }
}
