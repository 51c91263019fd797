//! Problem generation.
//!
//! Draws operand pairs inside the configured digit range and, when asked to,
//! keeps redrawing until the problem needs a carry or a borrow. The
//! carry/borrow checks look at each column on its own and never propagate a
//! carry or borrow into the next column.

use crate::model::{Configuration, OperationType, Operator, Problem};
use crate::source::NumberSource;

/// Draws per problem before settling for the last pair.
pub const MAX_ATTEMPTS: usize = 50;

/// Inclusive operand range for a digit count.
///
/// One digit allows 0-9; `d > 1` digits allow exactly-`d`-digit numbers,
/// `10^(d-1) ..= 10^d - 1`.
pub fn number_range(max_digits: u32) -> (u64, u64) {
    let max = 10u64.saturating_pow(max_digits).saturating_sub(1);
    let min = if max_digits > 1 {
        10u64.saturating_pow(max_digits - 1)
    } else {
        0
    };
    (min, max)
}

/// Whether some column of `a + b` sums to 10 or more.
pub fn has_carry(a: u64, b: u64) -> bool {
    let (mut a, mut b) = (a, b);
    while a > 0 || b > 0 {
        if a % 10 + b % 10 >= 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }
    false
}

/// Whether some column of `a - b` has a smaller digit on top.
pub fn has_borrow(a: u64, b: u64) -> bool {
    let (mut a, mut b) = (a, b);
    while b > 0 {
        if a % 10 < b % 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }
    false
}

fn needs_regrouping(operator: Operator, a: u64, b: u64) -> bool {
    match operator {
        Operator::Add => has_carry(a, b),
        Operator::Subtract => has_borrow(a, b),
    }
}

fn choose_operator<S: NumberSource + ?Sized>(operation: OperationType, source: &mut S) -> Operator {
    match operation {
        OperationType::Add => Operator::Add,
        OperationType::Subtract => Operator::Subtract,
        OperationType::Mixed => {
            if source.coin_flip() {
                Operator::Add
            } else {
                Operator::Subtract
            }
        }
    }
}

/// Generate a batch of `config.num_problems` problems with ids `0..n`.
///
/// Never fails: when forced carry/borrow cannot be satisfied within
/// [`MAX_ATTEMPTS`] draws, the last pair drawn is used.
pub fn generate<S: NumberSource + ?Sized>(config: &Configuration, source: &mut S) -> Vec<Problem> {
    let (min, max) = number_range(config.max_digits);

    (0..config.num_problems)
        .map(|id| {
            let operator = choose_operator(config.operation_type, source);
            let (mut operand1, mut operand2) = (min, min);

            for attempt in 1..=MAX_ATTEMPTS {
                let a = source.draw(min, max);
                let b = source.draw(min, max);
                (operand1, operand2) = if operator == Operator::Subtract && a < b {
                    (b, a)
                } else {
                    (a, b)
                };

                if !config.force_carry || needs_regrouping(operator, operand1, operand2) {
                    break;
                }
                if attempt == MAX_ATTEMPTS {
                    tracing::debug!(
                        id,
                        operand1,
                        operand2,
                        "no carry/borrow after {MAX_ATTEMPTS} draws, keeping last pair"
                    );
                }
            }

            Problem::new(id, operand1, operand2, operator)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(max_digits: u32, num_problems: usize, op: OperationType, force: bool) -> Configuration {
        Configuration {
            max_digits,
            num_problems,
            operation_type: op,
            force_carry: force,
        }
    }

    #[test]
    fn number_range_by_digits() {
        assert_eq!(number_range(1), (0, 9));
        assert_eq!(number_range(2), (10, 99));
        assert_eq!(number_range(3), (100, 999));
        assert_eq!(number_range(5), (10_000, 99_999));
    }

    #[test]
    fn carry_is_per_column() {
        assert!(has_carry(5, 5));
        assert!(has_carry(47, 38));
        assert!(has_carry(91, 20));
        assert!(!has_carry(12, 34));
        assert!(!has_carry(0, 0));
        // Different lengths are compared as if zero-padded.
        assert!(!has_carry(100, 99));
        assert!(has_carry(105, 9));
        // 45 + 55: the units carry, which is enough.
        assert!(has_carry(45, 55));
        // 50 + 50 carries only in the tens column.
        assert!(has_carry(50, 50));
    }

    #[test]
    fn carry_ignores_propagation() {
        // 95 + 4: no column reaches 10 on its own.
        assert!(!has_carry(95, 4));
        // 19 + 81 carries in the units, 1 + 8 stays at 9 without the carry-in.
        assert!(has_carry(19, 81));
    }

    #[test]
    fn borrow_is_per_column() {
        assert!(has_borrow(62, 38));
        assert!(has_borrow(30, 1));
        assert!(!has_borrow(50, 50));
        assert!(!has_borrow(62, 31));
        assert!(!has_borrow(9, 0));
        // 100 - 1: units 0 < 1.
        assert!(has_borrow(100, 1));
        // Columns above the subtrahend's length are never checked.
        assert!(!has_borrow(109, 9));
    }

    #[test]
    fn borrow_checks_each_column_alone() {
        assert!(has_borrow(101, 2));
        assert!(has_borrow(110, 11));
        // Equal digits in every column never borrow.
        assert!(!has_borrow(111, 11));
    }

    #[test]
    fn generates_exact_count_with_dense_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [1, 7, 50] {
            let problems = generate(&config(2, n, OperationType::Mixed, false), &mut rng);
            assert_eq!(problems.len(), n);
            for (i, p) in problems.iter().enumerate() {
                assert_eq!(p.id, i);
                assert!(p.user_answer.is_none());
                assert!(!p.marked_for_review);
            }
        }
    }

    #[test]
    fn operands_in_range_and_subtraction_non_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        for digits in 1..=5 {
            let (min, max) = number_range(digits);
            let problems = generate(&config(digits, 50, OperationType::Mixed, false), &mut rng);
            for p in &problems {
                assert!((min..=max).contains(&p.operand1), "{p:?}");
                assert!((min..=max).contains(&p.operand2), "{p:?}");
                match p.operator {
                    Operator::Add => assert_eq!(p.correct_answer(), p.operand1 + p.operand2),
                    Operator::Subtract => {
                        assert!(p.operand1 >= p.operand2, "{p:?}");
                        assert_eq!(p.correct_answer(), p.operand1 - p.operand2);
                    }
                }
            }
        }
    }

    #[test]
    fn operation_type_fixes_operator() {
        let mut rng = StdRng::seed_from_u64(3);
        let adds = generate(&config(3, 20, OperationType::Add, false), &mut rng);
        assert!(adds.iter().all(|p| p.operator == Operator::Add));
        let subs = generate(&config(3, 20, OperationType::Subtract, false), &mut rng);
        assert!(subs.iter().all(|p| p.operator == Operator::Subtract));
    }

    #[test]
    fn mixed_uses_one_flip_per_problem() {
        let mut source = ScriptedSource::with_flips(vec![40, 20], vec![true, false]);
        let problems = generate(&config(2, 4, OperationType::Mixed, false), &mut source);
        let ops: Vec<Operator> = problems.iter().map(|p| p.operator).collect();
        assert_eq!(
            ops,
            vec![
                Operator::Add,
                Operator::Subtract,
                Operator::Add,
                Operator::Subtract
            ]
        );
    }

    #[test]
    fn without_force_first_draw_is_accepted() {
        let mut source = ScriptedSource::new(vec![12, 34]);
        let problems = generate(&config(2, 1, OperationType::Add, false), &mut source);
        assert_eq!(source.draws(), 2);
        assert_eq!(problems[0].operand1, 12);
        assert_eq!(problems[0].operand2, 34);
        assert_eq!(problems[0].correct_answer(), 46);
    }

    #[test]
    fn subtraction_swaps_smaller_first_operand() {
        let mut source = ScriptedSource::new(vec![31, 62]);
        let problems = generate(&config(2, 1, OperationType::Subtract, false), &mut source);
        assert_eq!(problems[0].operand1, 62);
        assert_eq!(problems[0].operand2, 31);
        assert_eq!(problems[0].correct_answer(), 31);
    }

    #[test]
    fn addition_keeps_draw_order() {
        let mut source = ScriptedSource::new(vec![31, 62]);
        let problems = generate(&config(2, 1, OperationType::Add, false), &mut source);
        assert_eq!((problems[0].operand1, problems[0].operand2), (31, 62));
    }

    #[test]
    fn forced_borrow_retries_until_borrow() {
        let mut source = ScriptedSource::new(vec![50, 50, 62, 31, 62, 38, 99, 99]);
        let problems = generate(&config(2, 1, OperationType::Subtract, true), &mut source);
        assert_eq!(source.draws(), 6);
        assert_eq!(problems[0].operand1, 62);
        assert_eq!(problems[0].operand2, 38);
        assert_eq!(problems[0].correct_answer(), 24);
    }

    #[test]
    fn forced_borrow_swaps_before_testing() {
        // 38 - 62 is swapped to 62 - 38, which borrows.
        let mut source = ScriptedSource::new(vec![38, 62]);
        let problems = generate(&config(2, 1, OperationType::Subtract, true), &mut source);
        assert_eq!(source.draws(), 2);
        assert_eq!((problems[0].operand1, problems[0].operand2), (62, 38));
    }

    #[test]
    fn forced_carry_retries_until_carry() {
        let mut source = ScriptedSource::new(vec![12, 34, 21, 43, 47, 38]);
        let problems = generate(&config(2, 1, OperationType::Add, true), &mut source);
        assert_eq!(source.draws(), 6);
        assert_eq!(problems[0].correct_answer(), 85);
    }

    #[test]
    fn forced_carry_gives_up_after_max_attempts() {
        let mut source = ScriptedSource::new(vec![50, 50]);
        let problems = generate(&config(2, 1, OperationType::Subtract, true), &mut source);
        assert_eq!(source.draws(), 2 * MAX_ATTEMPTS);
        assert_eq!((problems[0].operand1, problems[0].operand2), (50, 50));
        assert_eq!(problems[0].correct_answer(), 0);
    }

    #[test]
    fn forced_carry_gives_up_on_single_digit_zero_pair() {
        let mut source = ScriptedSource::new(vec![0]);
        let problems = generate(&config(1, 2, OperationType::Add, true), &mut source);
        assert_eq!(problems.len(), 2);
        assert_eq!(source.draws(), 4 * MAX_ATTEMPTS);
        assert!(problems.iter().all(|p| p.correct_answer() == 0));
    }

    #[test]
    fn forced_carry_with_random_source_mostly_regroups() {
        let mut rng = StdRng::seed_from_u64(9);
        let problems = generate(&config(2, 50, OperationType::Mixed, true), &mut rng);
        let regrouped = problems
            .iter()
            .filter(|p| needs_regrouping(p.operator, p.operand1, p.operand2))
            .count();
        // Two-digit pairs regroup often enough that 50 draws always succeed
        // in practice.
        assert_eq!(regrouped, 50);
    }
}
