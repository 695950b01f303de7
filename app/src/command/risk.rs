use super::QueryInput;

/// Strategy printing `true` or `false` for the risk flag.
#[derive(Debug, Clone, Copy)]
pub struct RiskStrategy;

impl super::CommandStrategy for RiskStrategy {
    type Input = QueryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        println!("{}", input.gate.is_risk_related_query(&input.query));
        Ok(())
    }
}
