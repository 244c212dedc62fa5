//! Text rendering of core results.

use std::io::{self, Write};

use oraculo_core::{
    Contribution, DecisionLog, DecisionOutcome, Principle, RelevanceFactors, SituationCatalog,
};

pub fn format_factors(factors: &RelevanceFactors) -> String {
    if factors.is_empty() {
        return "{}".to_string();
    }
    let pairs: Vec<String> = factors
        .iter()
        .map(|(principle, relevance)| format!("{}: {}", principle, relevance))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &DecisionOutcome,
    explanation: Option<&[Contribution]>,
) -> io::Result<()> {
    writeln!(out, "Situation: {}", outcome.situation)?;
    writeln!(out, "Decision: {}", outcome.decision)?;
    writeln!(out, "Score: {:.3}", outcome.display_score())?;
    writeln!(out, "Factors: {}", format_factors(&outcome.factors))?;

    if let Some(contributions) = explanation {
        writeln!(out)?;
        writeln!(out, "--- Contributions ---")?;
        for c in contributions {
            let note = if c.defaulted { " (default weight)" } else { "" };
            writeln!(
                out,
                "  {}: {} x {} = {:.3}{}",
                c.principle, c.weight, c.relevance, c.value, note
            )?;
        }
    }
    Ok(())
}

pub fn write_principles<W: Write>(out: &mut W, principles: &[Principle]) -> io::Result<()> {
    writeln!(out, "Current principle weights:")?;
    for p in principles {
        writeln!(out, "  - {}: {}", p.name, p.weight)?;
    }
    Ok(())
}

pub fn write_situations<W: Write>(out: &mut W, catalog: &SituationCatalog) -> io::Result<()> {
    for situation in catalog.situations() {
        writeln!(out, "{}: {}", situation.name, format_factors(&situation.factors))?;
    }
    Ok(())
}

pub fn write_log<W: Write>(out: &mut W, log: &DecisionLog) -> io::Result<()> {
    if log.is_empty() {
        return writeln!(out, "No decisions yet.");
    }
    for entry in log {
        writeln!(
            out,
            "{} {} {} {:.3}",
            entry.timestamp.to_rfc3339(),
            entry.situation,
            entry.decision,
            entry.ethical_score
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oraculo_core::DecisionEngine;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_factors() {
        let mut factors = RelevanceFactors::new();
        assert_eq!(format_factors(&factors), "{}");

        factors.insert("vida_humana".to_string(), 0.8);
        factors.insert("seguridad".to_string(), 0.6);
        assert_eq!(format_factors(&factors), "{seguridad: 0.6, vida_humana: 0.8}");
    }

    #[test]
    fn test_write_outcome_with_explanation() {
        let mut engine = DecisionEngine::default();
        let outcome = engine.decide("corte_energia");
        let explanation = engine.explain("corte_energia");

        let text = render(|out| write_outcome(out, &outcome, Some(explanation.as_slice())));
        assert!(text.contains("Decision: APPROVED"));
        assert!(text.contains("Score: 1.200"));
        assert!(text.contains("vida_humana: 0.9 x 0.8 = 0.720"));
    }

    #[test]
    fn test_unknown_situation_renders_zero() {
        let mut engine = DecisionEngine::default();
        let outcome = engine.decide("unknown_xyz");

        let text = render(|out| write_outcome(out, &outcome, None));
        assert!(text.contains("Score: 0.000"));
        assert!(text.contains("Factors: {}"));
    }

    #[test]
    fn test_empty_log() {
        let engine = DecisionEngine::default();
        let text = render(|out| write_log(out, engine.log()));
        assert_eq!(text, "No decisions yet.\n");
    }
}
