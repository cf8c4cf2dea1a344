//! Shared fixtures for integration tests.

#![allow(dead_code)]

use reglens::model::{ManualSection, Question};

/// Builder for [`Question`] records with test-friendly defaults.
#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    question: Question,
}

impl QuestionBuilder {
    pub fn new(qid: &str) -> Self {
        Self {
            question: Question::new(qid, ""),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.question.text_full = text.to_string();
        self
    }

    pub fn condensed(mut self, text: &str) -> Self {
        self.question.text_condensed = text.to_string();
        self
    }

    pub fn guidance(mut self, text: &str) -> Self {
        self.question.guidance = text.to_string();
        self
    }

    pub fn citation(mut self, citation: &str) -> Self {
        self.question.citations.push(citation.to_string());
        self
    }

    pub fn reference(mut self, reference: &str) -> Self {
        self.question.other_references.push(reference.to_string());
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.question.notes.push(note.to_string());
        self
    }

    pub fn build(self) -> Question {
        self.question
    }
}

/// Builder for [`ManualSection`] records.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    section: ManualSection,
}

impl SectionBuilder {
    pub fn new(id: &str, manual_type: &str) -> Self {
        Self {
            section: ManualSection::new(id, format!("{manual_type}-1"), manual_type),
        }
    }

    pub fn number(mut self, number: &str) -> Self {
        self.section.section_number = Some(number.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.section.title = title.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.section.text = text.to_string();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.section.page_number = Some(page);
        self
    }

    pub fn citation(mut self, citation: &str) -> Self {
        self.section.citations.push(citation.to_string());
        self
    }

    pub fn build(self) -> ManualSection {
        self.section
    }
}

/// A small, varied questionnaire.
pub fn sample_questions() -> Vec<Question> {
    vec![
        QuestionBuilder::new("Q-001")
            .text("Does the certificate holder have a procedure for MEL deferral and dispatch release?")
            .citation("14 CFR 121.628")
            .build(),
        QuestionBuilder::new("Q-002")
            .text("Are maintenance records retained for the required period?")
            .citation("14 CFR 121.380")
            .build(),
        QuestionBuilder::new("Q-003")
            .text("Does the operator have an airworthiness directive management process?")
            .reference("AC 39-9")
            .guidance("Review the AD compliance status report.")
            .build(),
        QuestionBuilder::new("Q-004")
            .text("Is initial and recurrent training provided to inspection personnel?")
            .build(),
        QuestionBuilder::new("Q-005").build(),
    ]
}

/// Manual sections covering the sample questionnaire.
pub fn sample_sections() -> Vec<ManualSection> {
    vec![
        SectionBuilder::new("gmm-6-4", "GMM")
            .number("6.4")
            .title("Airworthiness Directive Control")
            .page(112)
            .text(
                "The AD management process is owned by Maintenance Planning. \
                 (a) Each airworthiness directive is evaluated for applicability. \
                 (b) Continued AD compliance is verified by Quality audits.",
            )
            .build(),
        SectionBuilder::new("gmm-3-2", "GMM")
            .number("3.2")
            .title("Minimum Equipment List")
            .page(48)
            .text(
                "(a) Inoperative equipment is deferred under the MEL. \
                 (b) The aircraft may not be operated unless the deferral is approved.",
            )
            .build(),
        SectionBuilder::new("gmm-9-1", "GMM")
            .number("9.1")
            .title("Maintenance Records")
            .page(201)
            .citation("14 CFR 121.380")
            .text("Maintenance records are retained for the period required by 121.380.")
            .build(),
        SectionBuilder::new("gmm-1-1", "GMM")
            .number("1.1")
            .title("General")
            .page(1)
            .text("This manual describes maintenance procedures.")
            .build(),
        SectionBuilder::new("tm-2-1", "TM")
            .number("2.1")
            .title("Inspector Training")
            .page(14)
            .text("Inspection personnel complete initial and recurrent training annually.")
            .build(),
        SectionBuilder::new("tm-0", "TM").title("Blank").text("   ").build(),
    ]
}
