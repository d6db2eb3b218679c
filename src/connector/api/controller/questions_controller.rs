use anyhow::Result;

use crate::domain::{QuestionKind, Questionnaire};

use super::super::Container;

pub struct QuestionsController<'a> {
    container: &'a Container,
}

impl<'a> QuestionsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<String> {
        Ok(self.format_questionnaire(self.container.questionnaire()))
    }

    fn format_questionnaire(&self, questionnaire: &Questionnaire) -> String {
        let total = questionnaire.sections().len();
        let mut output = String::new();

        for (i, section) in questionnaire.sections().iter().enumerate() {
            output.push_str(&format!("Step {} of {}: {}\n", i + 1, total, section.title));

            for question in &section.questions {
                let kind = match question.kind {
                    QuestionKind::Select => "choose one",
                    QuestionKind::MultiSelect => "choose any",
                };
                output.push_str(&format!(
                    "  {} [{}, {}]\n",
                    question.question, question.category, kind
                ));
                for option in question.options {
                    output.push_str(&format!("    - {}\n", option));
                }
            }
            output.push('\n');
        }

        output.trim_end().to_string()
    }
}
