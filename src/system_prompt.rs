//! System prompt construction from the frozen candidate profile
//!
//! The instruction sits at transcript index 0, is sent with every provider
//! request, and is never rendered to the user.

use crate::profile::Profile;

/// Build the hidden interviewer instruction for a session.
///
/// Names the candidate, the position, and the company; the experience and
/// skills fields intentionally stay out of the prompt and only inform what
/// the user chooses to type during the interview.
pub fn build_system_prompt(profile: &Profile) -> String {
    format!(
        "You are a HR Executive that takes questions from {} \
         who is applying for a {} position at {}. \
         You will ask questions based on the information provided by the user.",
        profile.name,
        profile.position.label(),
        profile.company.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Company, ExperienceLevel, Position, ProfileForm};

    fn ada() -> Profile {
        let mut form = ProfileForm::new();
        form.set_name("Ada");
        form.set_level(ExperienceLevel::Mid);
        form.set_position(Position::SoftwareEngineer);
        form.set_company(Company::Google);
        form.freeze()
    }

    #[test]
    fn prompt_names_candidate_position_and_company() {
        let prompt = build_system_prompt(&ada());
        assert!(prompt.contains("Ada"));
        assert!(prompt.contains("Software Engineer"));
        assert!(prompt.contains("Google"));
    }

    #[test]
    fn prompt_omits_free_text_fields() {
        let mut form = ProfileForm::new();
        form.set_name("Ada");
        form.set_experience("secret experience blob");
        form.set_skills("secret skills blob");
        let prompt = build_system_prompt(&form.freeze());
        assert!(!prompt.contains("secret experience blob"));
        assert!(!prompt.contains("secret skills blob"));
    }
}
