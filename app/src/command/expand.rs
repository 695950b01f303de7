use super::QueryInput;

/// Strategy printing the query as it should be handed to retrieval.
#[derive(Debug, Clone, Copy)]
pub struct ExpandStrategy;

impl super::CommandStrategy for ExpandStrategy {
    type Input = QueryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        println!("{}", input.gate.expand_query_for_risk(&input.query));
        Ok(())
    }
}
