pub(crate) mod field;

use crate::config::ValidationConfig;
use crate::violation::{FailureKind, Violation};

use super::rules::number::{Number, NumberRule};

/// Run compiled rules against a value.
///
/// Every rule is evaluated in compiled order; the verdict is the logical AND
/// of all outcomes and the messages are those of the failing rules, in order.
/// An empty rule list always passes.
pub fn run<T: Number>(value: T, rules: &[NumberRule<T>]) -> (bool, Vec<String>) {
    let messages: Vec<String> = rules
        .iter()
        .filter_map(|rule| rule.check(value).err())
        .collect();
    (messages.is_empty(), messages)
}

/// Run compiled rules one at a time through [`run`], reporting failures as
/// violations of `family` rules on `field`. Stops after the first failure
/// when `fail_fast` is set.
pub(crate) fn run_rules<T: Number>(
    field: &str,
    family: &str,
    value: T,
    rules: &[NumberRule<T>],
    cfg: &ValidationConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rule in rules {
        let (passed, messages) = run(value, std::slice::from_ref(rule));
        if passed {
            continue;
        }
        let rule_id = format!("{family}.{}", rule.rule_name());
        violations.extend(messages.into_iter().map(|message| {
            Violation::new(field, FailureKind::RuleViolation, rule_id.as_str(), message)
        }));
        if cfg.fail_fast {
            break;
        }
    }
    violations
}
