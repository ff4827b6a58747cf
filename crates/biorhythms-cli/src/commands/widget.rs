//! Widget command: the condensed summary the home-screen widget renders.

use clap::{Args, Subcommand};

use biorhythms_core::{SeriesGenerator, SettingsRepository, TomlSettingsStore, WidgetContent, WidgetSummary};

use super::{paint, reference_date, CmdResult};

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct WidgetArgs {
    #[command(subcommand)]
    action: Option<WidgetAction>,
    /// Widget id (selects the stored opacity)
    #[arg(long, default_value_t = 0)]
    id: u32,
    /// Date to evaluate (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Treat the system theme as dark
    #[arg(long)]
    system_dark: bool,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Store a widget's background opacity
    Opacity {
        /// Widget id
        #[arg(long)]
        id: u32,
        /// Opacity in percent
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// Forget a removed widget's stored opacity
    Remove {
        /// Widget id
        #[arg(long)]
        id: u32,
    },
}

const BAR_WIDTH: usize = 24;

pub fn run(args: WidgetArgs) -> CmdResult {
    match args.action {
        Some(action) => configure(action),
        None => show(args),
    }
}

fn configure(action: WidgetAction) -> CmdResult {
    let store = TomlSettingsStore::open_default()?;
    match action {
        WidgetAction::Opacity { id, percent } => {
            store.update(|s| {
                s.widget.set_opacity(id, percent);
                Ok(())
            })?;
            println!("widget {id} opacity {percent}%");
        }
        WidgetAction::Remove { id } => {
            store.update(|s| {
                s.widget.remove(id);
                Ok(())
            })?;
            println!("widget {id} settings removed");
        }
    }
    Ok(())
}

fn show(args: WidgetArgs) -> CmdResult {
    let settings = TomlSettingsStore::open_default()?.load()?;
    let today = reference_date(args.date.as_deref())?;
    let summary = WidgetSummary::build(
        &SeriesGenerator::default(),
        &settings,
        args.id,
        today,
        args.system_dark,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", summary.title);
    match &summary.content {
        WidgetContent::Ready { rows, .. } => {
            for row in rows {
                let filled = (row.bar_fill * BAR_WIDTH as f64).round() as usize;
                let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
                println!(
                    "{:<18} {} {}",
                    row.label,
                    paint(&bar, row.bar_color),
                    paint(&format!("{:>5}", row.display_percent()), row.percent_color)
                );
            }
        }
        WidgetContent::NoBirthDate => {}
    }
    println!(
        "background {} alpha {} ({})",
        summary.background.color,
        summary.background.alpha,
        if summary.dark { "dark" } else { "light" }
    );
    Ok(())
}
