//! Candidate profile collected before the interview starts
//!
//! The setup form buffers editable fields with widget-style limits; on
//! confirmation the buffer freezes into an immutable [`Profile`] that seeds
//! the interviewer's system instruction.

use serde::{Deserialize, Serialize};

/// Character limit on the name field
pub const NAME_MAX_CHARS: usize = 50;

/// Character limit on the experience and skills text areas
pub const TEXT_AREA_MAX_CHARS: usize = 500;

/// Seniority of the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [Self; 3] = [Self::Junior, Self::Mid, Self::Senior];

    pub fn label(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
        }
    }
}

/// Role the candidate is interviewing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    SoftwareEngineer,
    DataScientist,
    ProductManager,
    Designer,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::SoftwareEngineer,
        Self::DataScientist,
        Self::ProductManager,
        Self::Designer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SoftwareEngineer => "Software Engineer",
            Self::DataScientist => "Data Scientist",
            Self::ProductManager => "Product Manager",
            Self::Designer => "Designer",
        }
    }
}

/// Company the candidate is interviewing at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Company {
    #[default]
    Google,
    Microsoft,
    Amazon,
    Facebook,
    Apple,
}

impl Company {
    pub const ALL: [Self; 5] = [
        Self::Google,
        Self::Microsoft,
        Self::Amazon,
        Self::Facebook,
        Self::Apple,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Microsoft => "Microsoft",
            Self::Amazon => "Amazon",
            Self::Facebook => "Facebook",
            Self::Apple => "Apple",
        }
    }
}

/// Frozen snapshot of the setup form, immutable once the session starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub experience: String,
    pub skills: String,
    pub level: ExperienceLevel,
    pub position: Position,
    pub company: Company,
}

/// Mutable buffer backing the setup form.
///
/// Text setters truncate at the widget limit instead of erroring, matching
/// input fields with a hard `max_chars`. Selections are already constrained
/// to valid enum values by construction, so freezing cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    name: String,
    experience: String,
    skills: String,
    level: ExperienceLevel,
    position: Position,
    company: Company,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: &str) {
        self.name = clamp_chars(value, NAME_MAX_CHARS);
    }

    pub fn set_experience(&mut self, value: &str) {
        self.experience = clamp_chars(value, TEXT_AREA_MAX_CHARS);
    }

    pub fn set_skills(&mut self, value: &str) {
        self.skills = clamp_chars(value, TEXT_AREA_MAX_CHARS);
    }

    pub fn set_level(&mut self, level: ExperienceLevel) {
        self.level = level;
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_company(&mut self, company: Company) {
        self.company = company;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> ExperienceLevel {
        self.level
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn company(&self) -> Company {
        self.company
    }

    /// Freeze the current field values into an immutable [`Profile`].
    pub fn freeze(self) -> Profile {
        Profile {
            name: self.name,
            experience: self.experience,
            skills: self.skills,
            level: self.level,
            position: self.position,
            company: self.company,
        }
    }
}

/// Truncate to `max` characters, respecting char boundaries
fn clamp_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
