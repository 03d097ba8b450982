use crate::domain::dataset::Dataset;

/// Persona and answer constraints sent ahead of every dataset question
pub const ANALYST_INSTRUCTION: &str = "You are a data analyst and chart design expert helping users \
build charts and answer questions about arbitrary datasets. The user's question will be provided. \
Answer it accurately and in the context of the dataset described below. The user will use your \
commentary to build a chart or to research the data with Dash Chart Editor, a product built by \
Plotly. If the question doesn't make sense, feel free to make a witty remark about Plotly and Dash. \
Your response should use Markdown markup. Limit your response to only 1-3 sentences. Address the \
user directly as they can see your response.";

const DEFAULT_HEAD_ROWS: usize = 5;

/// Turns a dataset and a question into a single grounded prompt
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instruction: String,
    head_rows: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            instruction: ANALYST_INSTRUCTION.to_string(),
            head_rows: DEFAULT_HEAD_ROWS,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Compose instruction, dataset insights and the question
    pub fn generate_prompt(&self, dataset: &Dataset, question: &str) -> String {
        format!(
            "{}\n\nContext:\n\n{}\n\nUser's Question: {}",
            self.instruction,
            self.insights_text(dataset),
            question
        )
    }

    /// Shape, preview, statistics, cardinality, missing values and modes
    pub fn insights_text(&self, dataset: &Dataset) -> String {
        let mut insights = Vec::new();

        insights.push(format!(
            "The DataFrame contains {} rows and {} columns.",
            dataset.row_count(),
            dataset.column_count()
        ));
        insights.push(format!(
            "Here are the first {} rows of the DataFrame:\n",
            self.head_rows
        ));
        insights.push(dataset.head_table(self.head_rows));

        insights.push("\nSummary Statistics:".to_string());
        if let Some(table) = dataset.describe_table() {
            insights.push(table);
        }

        insights.push("\nColumn Information:".to_string());
        for column in dataset.columns() {
            insights.push(format!(
                "- Column '{}' has {} unique values.",
                column.name(),
                column.unique_count()
            ));
        }

        insights.push("\nMissing Values:".to_string());
        for column in dataset.columns() {
            let missing = column.missing_count();
            if missing > 0 {
                insights.push(format!(
                    "- Column '{}' has {} missing values.",
                    column.name(),
                    missing
                ));
            }
        }

        for column in dataset.text_columns() {
            if let Some(value) = column.most_common() {
                insights.push(format!(
                    "\nMost common value in '{}' column: {}",
                    column.name(),
                    value
                ));
            }
        }

        insights.join("\n")
    }
}
