use crossterm::style::Stylize;
use squares_core::PipelineOutcome;
use std::io::{self, Write};

const RULE: &str = "============";

/// Print the winning grid framed by rules, followed by run counters.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &PipelineOutcome, color: bool) -> io::Result<()> {
    let grid = &outcome.grid;
    let headline = "Found a valid square!";
    if color {
        writeln!(out, "{}", headline.green().bold())?;
    } else {
        writeln!(out, "{}", headline)?;
    }

    writeln!(out, "{}", RULE)?;
    if grid.is_self_test() {
        writeln!(out, "Self-test fixture (owner = {}) :", grid.owner_id())?;
    } else {
        writeln!(out, "Owner = {}, seq = {} :", grid.owner_id(), grid.sequence())?;
    }
    for row in grid.rows() {
        if color {
            writeln!(out, "{}", row.as_str().bold())?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }
    writeln!(out, "{}", RULE)?;

    writeln!(
        out,
        "{} grids generated, {} evaluated in {:.2?}",
        outcome.generated, outcome.evaluated, outcome.elapsed
    )
}

/// Emit the outcome as a single JSON object.
pub fn write_json<W: Write>(out: &mut W, outcome: &PipelineOutcome) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "grid": outcome.grid.report(),
        "generated": outcome.generated,
        "evaluated": outcome.evaluated,
        "elapsed_ms": outcome.elapsed.as_millis() as u64,
    });
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use squares_core::{build_spec, Pipeline, PipelineConfig};
    use std::time::Duration;

    fn fixture_outcome() -> PipelineOutcome {
        let spec = build_spec(4, 4, ["SWOT", "PIG", "AND", "GNU"]).unwrap();
        let config = PipelineConfig::new(1, 1)
            .with_self_test(true)
            .with_generator_delay(Duration::from_secs(5));
        Pipeline::new(spec, config).run().unwrap()
    }

    #[test]
    fn test_plain_report_lists_rows() {
        let outcome = fixture_outcome();
        let mut buf = Vec::new();
        write_outcome(&mut buf, &outcome, false).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Found a valid square!\n"));
        assert!(text.contains("Self-test fixture"));
        assert!(text.contains("SWOT\nPIGU\nANDB\nRGNU\n"));
        assert_eq!(text.matches(RULE).count(), 2);
    }

    #[test]
    fn test_json_report() {
        let outcome = fixture_outcome();
        let mut buf = Vec::new();
        write_json(&mut buf, &outcome).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["grid"]["found"], true);
        assert_eq!(value["grid"]["self_test"], true);
        assert_eq!(value["grid"]["rows"][0], "SWOT");
    }
}
