//! Identifier naming styles and the converters behind them.

use std::{fmt, str::FromStr};

/// Naming style applied to identifiers (table names, column names, ...).
///
/// Parsed once from configuration; unknown style names are rejected at parse
/// time rather than when an identifier is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingStyle {
    /// `employee_jobs`
    SnakeCase,
    /// `EMPLOYEE_JOBS` (also accepted under its legacy name `ANACONDA_CASE`)
    ScreamingSnakeCase,
    /// `employeeJobs`
    CamelCase,
    /// `EmployeeJobs`
    PascalCase,
}

impl NamingStyle {
    /// All styles, in the order they are documented.
    pub const ALL: [NamingStyle; 4] = [
        NamingStyle::SnakeCase,
        NamingStyle::ScreamingSnakeCase,
        NamingStyle::CamelCase,
        NamingStyle::PascalCase,
    ];

    /// Configuration name of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingStyle::SnakeCase => "snake_case",
            NamingStyle::ScreamingSnakeCase => "SCREAMING_SNAKE_CASE",
            NamingStyle::CamelCase => "camelCase",
            NamingStyle::PascalCase => "PascalCase",
        }
    }

    /// Convert `name` to this style.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingStyle::SnakeCase => to_snake_case(name),
            NamingStyle::ScreamingSnakeCase => to_screaming_snake_case(name),
            NamingStyle::CamelCase => to_camel_case(name),
            NamingStyle::PascalCase => to_pascal_case(name),
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "snake_case" => Ok(NamingStyle::SnakeCase),
            "SCREAMING_SNAKE_CASE" | "ANACONDA_CASE" => Ok(NamingStyle::ScreamingSnakeCase),
            "camelCase" => Ok(NamingStyle::CamelCase),
            "PascalCase" => Ok(NamingStyle::PascalCase),
            other => Err(format!(
                "unknown naming style '{}', expected one of: snake_case, SCREAMING_SNAKE_CASE, camelCase, PascalCase",
                other
            )),
        }
    }
}

/// Split an identifier into its words.
///
/// Any non-alphanumeric character separates words. Inside a run of
/// alphanumerics a new word starts on a lower-to-upper transition
/// (`cityCode`) and on the last capital of an acronym followed by a
/// lowercase letter (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert a string to snake_case (e.g., "EmployeeJobs" -> "employee_jobs")
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "EmployeeJobs" -> "EMPLOYEE_JOBS")
pub fn to_screaming_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to PascalCase (e.g., "employee_jobs" -> "EmployeeJobs")
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "employee_jobs" -> "employeeJobs")
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}
