use crate::models::{Operation, ResearchRequest};
use crate::{Error, Result};

pub const SUMMARIZE: &str = include_str!("../data/prompts/summarize.txt");
pub const SUGGEST: &str = include_str!("../data/prompts/suggest.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substituted values are not scanned again, so content containing
/// placeholder syntax is inserted verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

pub fn template_for(operation: Operation) -> &'static str {
    match operation {
        Operation::Summarize => SUMMARIZE,
        Operation::Suggest => SUGGEST,
    }
}

/// Build the outbound prompt for a request.
///
/// `None` stands for an absent request body.
pub fn build_prompt(request: Option<&ResearchRequest>) -> Result<String> {
    let request =
        request.ok_or_else(|| Error::InvalidArgument("Request object is null".to_string()))?;

    let (Some(operation), Some(content)) = (&request.operation, &request.content) else {
        return Err(Error::InvalidArgument(
            "Operation or content is missing in the request".to_string(),
        ));
    };

    let operation: Operation = operation.parse()?;
    Ok(render(template_for(operation), &[("content", content.as_str())]))
}
