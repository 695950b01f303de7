use memgate_core::GateReport;

use super::QueryInput;

/// Input parameters for the Check command strategy.
#[derive(Debug, Clone)]
pub struct CheckInput {
    pub query: QueryInput,
    /// Emit the report as pretty-printed JSON instead of text.
    pub json: bool,
}

/// Strategy running the full gate over a single query.
///
/// Prints the skip decision with the rule that produced it, the risk flag,
/// and the query that would be handed to retrieval.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = CheckInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let report = input.query.gate.report(&input.query.query);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_report(&report));
        }
        Ok(())
    }
}

fn render_report(report: &GateReport) -> String {
    let action = if report.skip { "skip" } else { "retrieve" };
    let mut out = format!(
        "Decision: {action} ({})\nRisky:    {}\n",
        report.reason, report.risky
    );
    if !report.skip {
        out.push_str("Query:\n");
        for line in report.expanded.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use memgate_core::default_gate;

    #[test]
    fn test_render_skipped_query() {
        let rendered = render_report(&default_gate().report("ok"));
        assert_eq!(rendered, "Decision: skip (too_short)\nRisky:    false\n");
    }

    #[test]
    fn test_render_retrieved_risky_query() {
        let rendered = render_report(&default_gate().report("did I tell you my ssh password?"));

        assert!(rendered.starts_with("Decision: retrieve (force_retrieve)\nRisky:    true\n"));
        assert!(rendered.contains("  did I tell you my ssh password?\n"));
        assert!(rendered.contains("  [policy-hints] "));
    }
}
