use anyhow::Result;

use super::input::{prepare, read_input};
use super::super::Container;

pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn prompt(&self, input: String, answers: bool) -> Result<String> {
        let raw = read_input(&input).await?;
        let use_case = self.container.generate_use_case();
        Ok(prepare(&use_case, &raw, answers)?.prompt)
    }
}
