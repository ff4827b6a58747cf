//! Chart command: ASCII chart plus legend for a window of days.

use clap::Args;

use biorhythms_core::{ChartData, PercentColorMapper, SeriesGenerator, SettingsRepository, TomlSettingsStore};

use super::{birth_date, paint, reference_date, CmdResult};

#[derive(Args)]
pub struct ChartArgs {
    /// Birth date (YYYY-MM-DD); defaults to the stored one
    #[arg(long)]
    birth: Option<String>,
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Days before the reference date
    #[arg(long, allow_negative_numbers = true)]
    past: Option<i64>,
    /// Days after the reference date
    #[arg(long, allow_negative_numbers = true)]
    future: Option<i64>,
    /// Chart height in text rows
    #[arg(long, default_value_t = 11)]
    rows: usize,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ChartArgs) -> CmdResult {
    let settings = TomlSettingsStore::open_default()?.load()?;
    let birth = birth_date(args.birth.as_deref(), &settings)?;
    let reference = reference_date(args.date.as_deref())?;
    let past = args.past.unwrap_or(i64::from(settings.chart.past_days));
    let future = args.future.unwrap_or(i64::from(settings.chart.future_days));

    let series = SeriesGenerator::default().generate_for(birth, reference, past, future)?;
    let data = ChartData::from_series(&series, settings.language, &PercentColorMapper::default());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let text = data.render_ascii(args.rows, settings.language);
    // Color the legend percentages; the chart body stays plain.
    for line in text.lines() {
        match data
            .legend
            .iter()
            .find(|e| line.starts_with('■') && line.contains(&e.label))
        {
            Some(entry) => {
                let pct = entry.display_percent();
                let colored = line.replacen(&pct, &paint(&pct, entry.color), 1);
                println!("{}", colored.replacen('■', &paint("■", entry.line_color), 1));
            }
            None => println!("{line}"),
        }
    }
    Ok(())
}
