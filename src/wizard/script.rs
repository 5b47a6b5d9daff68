use serde::Serialize;

use crate::utils::phone;

/// Placeholder recorded when the name step is skipped or left blank.
pub const ANONYMOUS_NAME: &str = "Anonymous";

pub const MIN_SKILLS_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    /// Single-line free text.
    Input,
    /// One of the step's declared options.
    Options,
    /// Long-form free text.
    Textarea,
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    MinLength(usize),
    MalaysianMobile,
}

pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: AnswerKind,
    pub options: &'static [&'static str],
    pub skippable: bool,
    pub check: Option<Check>,
}

/// The fixed profile script. Order is part of the contract: answers are
/// keyed by `key` and the final record is assembled from all nine.
pub const QUESTIONS: &[Question] = &[
    Question {
        key: "name",
        prompt: "Hi! I'll help you create your job profile. What's your name?",
        kind: AnswerKind::Input,
        options: &[],
        skippable: true,
        check: None,
    },
    Question {
        key: "age",
        prompt: "How old are you?",
        kind: AnswerKind::Options,
        options: &["18-25", "26-35", "36-45", "46-55", "55+"],
        skippable: false,
        check: None,
    },
    Question {
        key: "visa",
        prompt: "What type of visa do you hold?",
        kind: AnswerKind::Options,
        options: &["Work Permit", "Student Visa", "Dependent Pass", "Other"],
        skippable: false,
        check: None,
    },
    Question {
        key: "nationality",
        prompt: "Where are you from?",
        kind: AnswerKind::Options,
        options: &[
            "Bangladesh",
            "Nepal",
            "India",
            "Pakistan",
            "Myanmar",
            "Indonesia",
            "Philippines",
            "Other",
        ],
        skippable: false,
        check: None,
    },
    Question {
        key: "experience",
        prompt: "How many years of work experience do you have?",
        kind: AnswerKind::Options,
        options: &[
            "No experience",
            "1-2 years",
            "3-5 years",
            "5-10 years",
            "10+ years",
        ],
        skippable: false,
        check: None,
    },
    Question {
        key: "job",
        prompt: "What kind of job are you looking for?",
        kind: AnswerKind::Options,
        options: &[
            "Factory Worker",
            "Restaurant/Kitchen Helper",
            "Cleaner/Housekeeper",
            "Construction Worker",
            "Security Guard",
            "Driver",
            "Technician/Mechanic",
            "General Worker",
            "Other",
        ],
        skippable: false,
        check: None,
    },
    Question {
        key: "skills",
        prompt: "Tell me about your skills and experience.",
        kind: AnswerKind::Textarea,
        options: &[],
        skippable: false,
        check: Some(Check::MinLength(MIN_SKILLS_LEN)),
    },
    Question {
        key: "phone",
        prompt: "What's your phone number? Employers will contact you on this.",
        kind: AnswerKind::Input,
        options: &[],
        skippable: false,
        check: Some(Check::MalaysianMobile),
    },
    Question {
        key: "location",
        prompt: "Which area are you in?",
        kind: AnswerKind::Input,
        options: &[],
        skippable: false,
        check: None,
    },
];

/// Checks a raw answer against a step's declared constraints. `Ok` means
/// the machine may record it; `Err` carries the inline error message.
pub fn validate_answer(question: &Question, value: &str) -> Result<(), String> {
    if question.kind == AnswerKind::Options {
        if !question.options.contains(&value) {
            return Err(format!("\"{}\" is not one of the offered options.", value));
        }
        return Ok(());
    }

    if value.trim().is_empty() {
        if question.skippable {
            return Ok(());
        }
        return Err("This field is required.".to_string());
    }

    match question.check {
        Some(Check::MinLength(min)) if value.chars().count() < min => Err(format!(
            "Please write at least {} characters so employers know what you can do.",
            min
        )),
        Some(Check::MalaysianMobile) if !phone::is_valid_mobile(value) => {
            Err("Please enter a valid Malaysian phone number.".to_string())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_order_is_fixed() {
        let keys: Vec<&str> = QUESTIONS.iter().map(|q| q.key).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "age",
                "visa",
                "nationality",
                "experience",
                "job",
                "skills",
                "phone",
                "location"
            ]
        );
    }

    #[test]
    fn only_name_is_skippable() {
        assert!(QUESTIONS[0].skippable);
        assert!(QUESTIONS[1..].iter().all(|q| !q.skippable));
    }

    #[test]
    fn short_skills_answers_are_rejected() {
        let skills = QUESTIONS.iter().find(|q| q.key == "skills").unwrap();
        assert!(validate_answer(skills, "welding").is_err());
        assert!(validate_answer(skills, "welding and forklift").is_ok());
    }

    #[test]
    fn phone_step_uses_mobile_pattern() {
        let phone = QUESTIONS.iter().find(|q| q.key == "phone").unwrap();
        assert!(validate_answer(phone, "+60123456789").is_ok());
        assert!(validate_answer(phone, "12345").is_err());
    }

    #[test]
    fn option_answers_must_match_an_option() {
        let age = QUESTIONS.iter().find(|q| q.key == "age").unwrap();
        assert!(validate_answer(age, "26-35").is_ok());
        assert!(validate_answer(age, "27").is_err());
    }

    #[test]
    fn blank_name_is_allowed_blank_location_is_not() {
        let name = QUESTIONS.iter().find(|q| q.key == "name").unwrap();
        let location = QUESTIONS.iter().find(|q| q.key == "location").unwrap();
        assert!(validate_answer(name, "").is_ok());
        assert!(validate_answer(location, "  ").is_err());
    }
}
