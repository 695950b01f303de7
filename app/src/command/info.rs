use memgate_config::Config;
use memgate_core::PatternSet;

/// Strategy for displaying the effective gate configuration.
///
/// Compiles the gate first, so invalid user patterns are reported here
/// rather than on the first `check`.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let gate = config.build_gate()?;

        println!("=== memgate Configuration ===\n");

        println!("Gate:");
        println!("  Enabled: {}", gate.is_enabled());
        println!("  Min Length: {}", config.gate.min_length);
        println!("  Min Length (CJK): {}", config.gate.min_length_cjk);
        println!("  Min Length (other): {}", config.gate.min_length_other);
        println!();

        println!("Pattern Tables:");
        for (set, extra) in [
            (PatternSet::Force, &config.gate.extra_force_patterns),
            (PatternSet::Skip, &config.gate.extra_skip_patterns),
            (PatternSet::Risk, &config.gate.extra_risk_patterns),
        ] {
            let table = gate.table(set);
            println!(
                "  {set}: {} patterns ({} built-in, {} extra)",
                table.len(),
                table.len() - extra.len(),
                extra.len()
            );
            for pattern in extra {
                println!("    + {pattern}");
            }
        }
        println!();

        println!("Risk Expansion:");
        println!("  Marker: {}", gate.expansion().marker);
        println!("  Anchors: {}", gate.expansion().anchors.join(", "));
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);

        Ok(())
    }
}
