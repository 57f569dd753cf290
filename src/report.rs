//! Plain-text tables for the demo binary.
use crate::metrics::{macro_metrics, ClassMetrics};

/// Render a confusion matrix as an ASCII table, rows = actual classes.
pub fn format_confusion_matrix(matrix: &[Vec<usize>], target_names: &[String]) -> String {
    let width = target_names
        .iter()
        .map(|n| n.len())
        .chain(std::iter::once(6))
        .max()
        .unwrap_or(6);
    let mut out = String::new();
    out.push_str(&format!("{:>w$} |", "", w = width));
    for name in target_names {
        out.push_str(&format!(" {:>w$}", name, w = width));
    }
    out.push('\n');
    for (row, name) in matrix.iter().zip(target_names) {
        out.push_str(&format!("{:>w$} |", name, w = width));
        for &count in row {
            out.push_str(&format!(" {:>w$}", count, w = width));
        }
        out.push('\n');
    }
    out
}

/// Render per-class precision/recall/F1 plus the macro-average row.
pub fn format_class_metrics(per_class: &[ClassMetrics], target_names: &[String]) -> String {
    let mut out = String::new();
    out.push_str("class            precision  recall     f1\n");
    for (metrics, name) in per_class.iter().zip(target_names) {
        out.push_str(&format!(
            "{:<16} {:>9.3}  {:>6.3}  {:>6.3}\n",
            name, metrics.precision, metrics.recall, metrics.f1
        ));
    }
    let macros = macro_metrics(per_class);
    out.push_str(&format!(
        "{:<16} {:>9.3}  {:>6.3}  {:>6.3}\n",
        "macro avg", macros.precision, macros.recall, macros.f1
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confusion_table_has_a_row_per_class() {
        let names = vec!["setosa".to_string(), "virginica".to_string()];
        let table = format_confusion_matrix(&[vec![3, 0], vec![1, 2]], &names);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("setosa"));
        assert!(lines[2].contains("virginica"));
    }

    #[test]
    fn metrics_table_ends_with_macro_row() {
        let names = vec!["a".to_string(), "b".to_string()];
        let per_class = vec![
            ClassMetrics { precision: 1.0, recall: 0.5, f1: 2.0 / 3.0 },
            ClassMetrics { precision: 0.5, recall: 1.0, f1: 2.0 / 3.0 },
        ];
        let table = format_class_metrics(&per_class, &names);
        assert!(table.lines().last().unwrap().starts_with("macro avg"));
        assert!(table.contains("0.750"));
    }
}
