//! Plain-text and JSON rendering of evaluation reports.

use std::io::{self, Write};
use std::path::Path;

use modeval_metrics::{BinaryReport, ConfusionMatrix, Metric, MulticlassReport, RegressionReport};
use serde::Serialize;

/// Serialize `report` as pretty JSON, tagged with the input it came from.
pub fn write_json<R: Serialize>(
    out: &mut impl Write,
    input: &Path,
    report: &R,
) -> io::Result<()> {
    #[derive(Serialize)]
    struct Output<'a, R: Serialize> {
        input: &'a Path,
        report: &'a R,
    }
    serde_json::to_writer_pretty(&mut *out, &Output { input, report })?;
    writeln!(out)
}

pub fn write_multiclass(
    out: &mut impl Write,
    input: &Path,
    r: &MulticlassReport,
) -> io::Result<()> {
    writeln!(out, "Evaluation Results For {}:", input.display())?;
    writeln!(out, "Cross-Entropy (CE): {}", r.cross_entropy)?;
    writeln!(out, "Confusion Matrix:")?;
    write_confusion(out, &r.confusion)?;
    writeln!(out, "Accuracy: {}", r.accuracy)?;
    writeln!(out, "Macro Precision: {}", r.macro_precision)?;
    writeln!(out, "Macro Recall: {}", r.macro_recall)?;
    writeln!(out, "Macro F1 Score: {}", r.macro_f1)
}

pub fn write_binary(out: &mut impl Write, input: &Path, r: &BinaryReport) -> io::Result<()> {
    let c = &r.counts;
    writeln!(out, "Evaluation Results For {}:", input.display())?;
    writeln!(out, "Binary Cross-Entropy (BCE): {}", r.cross_entropy)?;
    writeln!(out, "Confusion Matrix:")?;
    writeln!(out, "TP: {} | FP: {}", c.tp, c.fp)?;
    writeln!(out, "FN: {} | TN: {}", c.fn_, c.tn)?;
    writeln!(out, "Accuracy: {}", r.accuracy)?;
    writeln!(out, "Precision: {}", r.precision)?;
    writeln!(out, "Recall: {}", r.recall)?;
    writeln!(out, "F1 Score: {}", r.f1)?;
    writeln!(out, "AUC-ROC: {}", metric(&r.auc_roc, ""))
}

pub fn write_regression(
    out: &mut impl Write,
    input: &Path,
    r: &RegressionReport,
) -> io::Result<()> {
    writeln!(out, "Evaluation Results For {}:", input.display())?;
    writeln!(out, "MSE: {}", r.mse)?;
    writeln!(out, "MAE: {}", r.mae)?;
    writeln!(out, "MARE: {}", metric(&r.mare, " %"))
}

fn metric(m: &Metric, unit: &str) -> String {
    match m {
        Metric::Value(v) => format!("{v}{unit}"),
        Metric::Unavailable(reason) => format!("unavailable ({reason})"),
    }
}

/// K×K grid, rows = actual class, columns = predicted class, 1-based labels.
fn write_confusion(out: &mut impl Write, cm: &ConfusionMatrix) -> io::Result<()> {
    let k = cm.n_classes();
    let widest = cm.rows().flatten().copied().max().unwrap_or(0).max(k);
    let w = widest.to_string().len().max(3);
    let gutter = k.to_string().len();

    writeln!(out, "{:gutter$}   Predicted", "")?;
    write!(out, "{:gutter$}  ", "")?;
    for j in 1..=k {
        write!(out, " {j:>w$}")?;
    }
    writeln!(out)?;
    for (i, row) in cm.rows().enumerate() {
        write!(out, "{:>gutter$} |", i + 1)?;
        for count in row {
            write!(out, " {count:>w$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
