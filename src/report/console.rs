use crate::engine::Summary;
use crate::model::{Analysis, AnalysisConfig};

/// Print the per-symbol table and the run summary to stdout.
pub fn print_table(config: &AnalysisConfig, analysis: &Analysis, summary: &Summary) {
    println!("\n{}", "═".repeat(118));
    println!(
        "  Options Analysis  (margin {}%, lot x{}, {} days, strike grid {})",
        config.margin_percent,
        config.lot_multiplier,
        config.days_to_expiry,
        config.strike_interval
    );
    println!("{}", "═".repeat(118));
    println!(
        "  {:<12} {:>10} {:>7} {:>7} {:>10} {:>10} {:>9} {:>10} {:>10} {:>9}",
        "Symbol",
        "Spot",
        "Pctl%",
        "Lot",
        "CE Strike",
        "CE Prem",
        "CE IRR%",
        "PE Strike",
        "PE Prem",
        "PE IRR%",
    );
    println!("  {}", "-".repeat(112));
    for r in &analysis.rows {
        let flag = if r.is_degenerate() { " *" } else { "" };
        println!(
            "  {:<12} {:>10.2} {:>7.2} {:>7} {:>10.2} {:>10.2} {:>9.2} {:>10.2} {:>10.2} {:>9.2}{}",
            r.symbol,
            r.spot_price,
            r.percentile,
            r.effective_lot_size,
            r.ce_strike,
            r.ce_premium,
            r.ce_irr,
            r.pe_strike,
            r.pe_premium,
            r.pe_irr,
            flag,
        );
    }
    println!("{}", "═".repeat(118));
    println!(
        "  {} rows, {} skipped | avg CE IRR {:.2}% | avg PE IRR {:.2}% | >=50 pctl: {} | <50 pctl: {}",
        summary.rows,
        summary.skipped,
        summary.mean_ce_irr,
        summary.mean_pe_irr,
        summary.at_or_above_median_band,
        summary.below_median_band,
    );
    if summary.degenerate_legs > 0 {
        println!(
            "  * {} leg(s) with zero margin required; IRR reported as 0",
            summary.degenerate_legs
        );
    }
    for skip in &analysis.skipped {
        println!("  skipped {}: {}", skip.symbol, skip.reason);
    }
}
