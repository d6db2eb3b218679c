use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::MethodologyResponse;

use super::input::{prepare, read_input};
use super::super::Container;

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(
        &self,
        input: String,
        format: OutputFormat,
        answers: bool,
    ) -> Result<String> {
        let raw = read_input(&input).await?;
        let use_case = self.container.generate_use_case();
        let prepared = prepare(&use_case, &raw, answers)?;
        let methodology = use_case.run(prepared).await?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&methodology)?),
            OutputFormat::Text => Ok(format_methodology(&methodology)),
        }
    }
}

fn heading(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(title.len()));
    output.push('\n');
}

pub fn format_methodology(methodology: &MethodologyResponse) -> String {
    let mut output = String::from("Your Blockchain Learning Path\n=============================\n\n");

    heading(&mut output, "Learning Path");
    output.push_str(&methodology.learning_path);
    output.push_str("\n\n");

    heading(&mut output, "Time Strategy");
    output.push_str(&methodology.time_strategy);
    output.push_str("\n\n");

    heading(&mut output, "Recommendations");
    for rec in &methodology.recommendations {
        output.push_str(&format!("{} recommendations\n", rec.category));
        for item in &rec.items {
            output.push_str(&format!("  • {}\n", item));
        }
    }
    output.push('\n');

    heading(&mut output, "Weekly Schedule");
    for day in &methodology.weekly_schedule.schedule {
        output.push_str(&format!("{}\n", day.day));
        for block in &day.blocks {
            output.push_str(&format!(
                "  {} - {}: {} [{}]\n",
                block.start_time, block.end_time, block.activity, block.category
            ));
            if !block.description.is_empty() {
                output.push_str(&format!("      {}\n", block.description));
            }
        }
    }
    if !methodology.weekly_schedule.notes.is_empty() {
        output.push_str("Notes\n");
        for note in &methodology.weekly_schedule.notes {
            output.push_str(&format!("  • {}\n", note));
        }
    }
    output.push('\n');

    heading(&mut output, "Suggested Resources");
    for resource in &methodology.suggested_resources {
        output.push_str(&format!("  • {}\n", resource));
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BlockCategory, DaySchedule, Recommendation, TimeBlock, Weekday, WeeklySchedule,
    };

    #[test]
    fn test_format_methodology_renders_every_section() {
        let methodology = MethodologyResponse {
            learning_path: "Fundamentals first.".to_string(),
            time_strategy: "Evenings.".to_string(),
            recommendations: vec![Recommendation {
                category: "background".to_string(),
                items: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            }],
            suggested_resources: vec!["Mastering Ethereum".to_string()],
            weekly_schedule: WeeklySchedule {
                schedule: vec![DaySchedule {
                    day: Weekday::Monday,
                    blocks: vec![TimeBlock {
                        start_time: "19:00".to_string(),
                        end_time: "20:00".to_string(),
                        activity: "Fundamentals".to_string(),
                        category: BlockCategory::Learning,
                        description: "Videos".to_string(),
                    }],
                }],
                notes: vec!["Stay flexible".to_string()],
            },
        };

        let text = format_methodology(&methodology);

        assert!(text.starts_with("Your Blockchain Learning Path"));
        assert!(text.contains("Learning Path\n-------------\nFundamentals first."));
        assert!(text.contains("background recommendations\n  • a\n  • b\n  • c"));
        assert!(text.contains("Monday\n  19:00 - 20:00: Fundamentals [learning]"));
        assert!(text.contains("  • Stay flexible"));
        assert!(text.ends_with("  • Mastering Ethereum"));
    }
}
