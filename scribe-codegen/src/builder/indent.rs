//! Indentation configuration for generated code.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation (C#, Java).
    pub const CSHARP: Self = Self::Spaces(4);

    /// 2-space indentation (TypeScript, YAML).
    pub const TWO_SPACES: Self = Self::Spaces(2);

    /// Build an indent from the text of one indentation level, e.g. `"  "` or
    /// `"\t"`. Returns `None` for anything else, including the empty string.
    pub fn from_unit(unit: &str) -> Option<Self> {
        if unit == "\t" {
            return Some(Self::Tab);
        }
        if !unit.is_empty() && unit.len() <= u8::MAX as usize && unit.chars().all(|c| c == ' ') {
            return Some(Self::Spaces(unit.len() as u8));
        }
        None
    }

    /// String for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(*n as usize),
            Self::Tab => "\t".to_string(),
        }
    }

    /// String for `level` indent levels.
    pub fn repeat(&self, level: usize) -> String {
        self.unit().repeat(level)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Tab
    }
}
