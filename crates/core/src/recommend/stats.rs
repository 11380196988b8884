use super::types::RuleStats;
use super::STATS_WINDOW;
use crate::mining::AssociationRule;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn windowed_mean(rules: &[AssociationRule], metric: impl Fn(&AssociationRule) -> f64) -> f64 {
    let window = &rules[..rules.len().min(STATS_WINDOW)];
    if window.is_empty() {
        return 0.0;
    }
    round2(window.iter().map(metric).sum::<f64>() / window.len() as f64)
}

/// Summarizes a rule set already in canonical order.
pub fn summarize(total_transactions: usize, total_itemsets: usize, rules: &[AssociationRule]) -> RuleStats {
    RuleStats {
        total_transactions,
        total_itemsets,
        total_rules: rules.len(),
        avg_confidence: windowed_mean(rules, |rule| rule.confidence),
        avg_lift: windowed_mean(rules, |rule| rule.lift),
        strong_rules: rules.iter().filter(|rule| rule.is_strong()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::Itemset;

    fn rule(confidence: f64, lift: f64) -> AssociationRule {
        AssociationRule {
            antecedent: Itemset::single("A_1"),
            consequent: Itemset::single("B_2"),
            support: 0.2,
            confidence,
            lift,
        }
    }

    #[test]
    fn empty_rule_set_reports_zeros() {
        let stats = summarize(0, 0, &[]);
        assert_eq!(
            stats,
            RuleStats {
                total_transactions: 0,
                total_itemsets: 0,
                total_rules: 0,
                avg_confidence: 0.0,
                avg_lift: 0.0,
                strong_rules: 0,
            }
        );
    }

    #[test]
    fn averages_use_top_window_and_round_to_two_decimals() {
        let mut rules = vec![rule(0.333, 3.0); STATS_WINDOW];
        // Outside the window: ignored by averages, counted as strong.
        rules.push(rule(0.9, 9.0));

        let stats = summarize(50, 20, &rules);

        assert_eq!(stats.total_rules, 11);
        assert_eq!(stats.avg_confidence, 0.33);
        assert_eq!(stats.avg_lift, 3.0);
        assert_eq!(stats.strong_rules, 1);
    }

    #[test]
    fn strong_rules_count_the_full_set() {
        let rules = vec![rule(0.6, 1.6), rule(0.51, 1.51), rule(0.5, 2.0), rule(0.9, 1.5)];
        assert_eq!(summarize(4, 4, &rules).strong_rules, 2);
    }
}
