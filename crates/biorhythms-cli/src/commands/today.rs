//! Today command: legend percentages for a single day.

use clap::Args;

use biorhythms_core::{ChartData, PercentColorMapper, SeriesGenerator, SettingsRepository, TomlSettingsStore};

use super::{birth_date, paint, reference_date, CmdResult};

#[derive(Args)]
pub struct TodayArgs {
    /// Birth date (YYYY-MM-DD); defaults to the stored one
    #[arg(long)]
    birth: Option<String>,
    /// Date to evaluate (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TodayArgs) -> CmdResult {
    let settings = TomlSettingsStore::open_default()?.load()?;
    let birth = birth_date(args.birth.as_deref(), &settings)?;
    let reference = reference_date(args.date.as_deref())?;

    let series = SeriesGenerator::default().generate_for(birth, reference, 0, 0)?;
    let data = ChartData::from_series(&series, settings.language, &PercentColorMapper::default());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data.legend)?);
        return Ok(());
    }

    println!("{}", reference.format("%Y-%m-%d"));
    for entry in &data.legend {
        println!(
            "{} {:<18} {}",
            paint("■", entry.line_color),
            entry.label,
            paint(&format!("{:>5}", entry.display_percent()), entry.color)
        );
    }
    Ok(())
}
