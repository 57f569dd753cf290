use anyhow::{bail, Context, Result};
use explorer_ml::{
    get_dataset, init_backend, per_class_metrics, profiles, train_model,
    report::{format_class_metrics, format_confusion_matrix},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Usage: ml_demo [profile] [train_percentage]
///
/// With no arguments, trains every catalog profile at an 80% split.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if !init_backend() {
        bail!("numeric backend failed its self-check");
    }

    let mut args = std::env::args().skip(1);
    let profile_arg = args.next();
    let train_percentage: u32 = match args.next() {
        Some(raw) => {
            let pct = raw.parse().context("train percentage must be an integer")?;
            if !(50..=90).contains(&pct) {
                bail!("train percentage must be between 50 and 90, got {pct}");
            }
            pct
        }
        None => 80,
    };

    let selected: Vec<String> = match profile_arg {
        Some(name) => vec![name],
        None => profiles().iter().map(|p| p.id.name().to_string()).collect(),
    };

    for name in selected {
        let dataset = get_dataset(&name)
            .with_context(|| format!("dataset `{name}` not found"))?;
        info!(profile = %name, samples = dataset.data.len(), "training");

        let result = train_model(&dataset, train_percentage)
            .with_context(|| format!("training on `{name}` failed"))?;

        println!("=== {name} ({train_percentage}% train) ===");
        println!("{}", dataset.description);
        println!("accuracy: {:.2}%", result.accuracy * 100.0);
        println!("{}", format_confusion_matrix(&result.confusion_matrix, &dataset.target_names));
        let per_class = per_class_metrics(&result.confusion_matrix);
        println!("{}", format_class_metrics(&per_class, &dataset.target_names));
        println!("{}", serde_json::to_string(&result)?);
        println!();
    }

    Ok(())
}
