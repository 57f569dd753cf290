//! Evaluation metrics derived from predictions and true labels.

/// Confusion matrix indexed `[actual][predicted]`.
///
/// Pairs with either index out of `[0, num_classes)` are skipped silently,
/// not counted and not an error.
pub fn confusion_matrix(
    predictions: &[usize],
    actual: &[usize],
    num_classes: usize,
) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; num_classes]; num_classes];
    for (&pred, &truth) in predictions.iter().zip(actual) {
        if pred < num_classes && truth < num_classes {
            matrix[truth][pred] += 1;
        }
    }
    matrix
}

/// Fraction of predictions matching the true label; 0 for empty input.
pub fn accuracy(predictions: &[usize], actual: &[usize]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions.iter().zip(actual).filter(|(p, a)| p == a).count();
    correct as f64 / predictions.len() as f64
}

/// Precision, recall, and F1 for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

fn guarded_div(num: f64, denom: f64) -> f64 {
    // Zero denominator substitutes 1, yielding 0 instead of NaN.
    num / if denom == 0.0 { 1.0 } else { denom }
}

/// Per-class precision/recall/F1 from a confusion matrix.
pub fn per_class_metrics(matrix: &[Vec<usize>]) -> Vec<ClassMetrics> {
    let n = matrix.len();
    (0..n)
        .map(|class| {
            let tp = matrix[class][class] as f64;
            let fp: f64 = (0..n).filter(|&r| r != class).map(|r| matrix[r][class] as f64).sum();
            let fn_: f64 = (0..n).filter(|&c| c != class).map(|c| matrix[class][c] as f64).sum();
            let precision = guarded_div(tp, tp + fp);
            let recall = guarded_div(tp, tp + fn_);
            let f1 = guarded_div(2.0 * precision * recall, precision + recall);
            ClassMetrics { precision, recall, f1 }
        })
        .collect()
}

/// Unweighted means of the per-class metrics.
pub fn macro_metrics(per_class: &[ClassMetrics]) -> ClassMetrics {
    if per_class.is_empty() {
        return ClassMetrics { precision: 0.0, recall: 0.0, f1: 0.0 };
    }
    let n = per_class.len() as f64;
    ClassMetrics {
        precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
        recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
        f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_sum_to_in_range_pairs() {
        let predictions = [0, 1, 2, 1, 0];
        let actual = [0, 1, 1, 1, 2];
        let m = confusion_matrix(&predictions, &actual, 3);
        let total: usize = m.iter().flatten().sum();
        assert_eq!(total, 5);
        assert_eq!(m[1][1], 2);
        assert_eq!(m[1][2], 1);
        assert_eq!(m[2][0], 1);
    }

    #[test]
    fn out_of_range_pairs_are_skipped() {
        let predictions = [0, 5, 1];
        let actual = [0, 1, 7];
        let m = confusion_matrix(&predictions, &actual, 2);
        let total: usize = m.iter().flatten().sum();
        assert_eq!(total, 1);
        assert_eq!(m[0][0], 1);
    }

    #[test]
    fn perfect_predictor_is_diagonal_with_full_accuracy() {
        let labels = [0, 1, 2, 2, 1, 0];
        let m = confusion_matrix(&labels, &labels, 3);
        for (r, row) in m.iter().enumerate() {
            for (c, &count) in row.iter().enumerate() {
                assert_eq!(count > 0, r == c && count == 2);
            }
        }
        assert_eq!(accuracy(&labels, &labels), 1.0);
        let macros = macro_metrics(&per_class_metrics(&m));
        assert_eq!(macros.precision, 1.0);
        assert_eq!(macros.recall, 1.0);
        assert_eq!(macros.f1, 1.0);
    }

    #[test]
    fn absent_class_scores_zero_not_nan() {
        // Class 2 never occurs as truth or prediction.
        let predictions = [0, 1, 0, 1];
        let actual = [0, 1, 1, 0];
        let metrics = per_class_metrics(&confusion_matrix(&predictions, &actual, 3));
        assert_eq!(metrics[2], ClassMetrics { precision: 0.0, recall: 0.0, f1: 0.0 });
        assert!(metrics.iter().all(|m| m.precision.is_finite() && m.recall.is_finite() && m.f1.is_finite()));
    }

    #[test]
    fn accuracy_of_empty_input_is_zero() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn mixed_matrix_metrics_match_hand_computation() {
        // actual:    [0, 0, 0, 1, 1]
        // predicted: [0, 0, 1, 1, 0]
        let m = confusion_matrix(&[0, 0, 1, 1, 0], &[0, 0, 0, 1, 1], 2);
        let metrics = per_class_metrics(&m);
        assert!((metrics[0].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics[0].recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics[1].precision - 0.5).abs() < 1e-12);
        assert!((metrics[1].recall - 0.5).abs() < 1e-12);
    }
}
