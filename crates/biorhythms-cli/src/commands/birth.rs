use clap::Subcommand;

use biorhythms_core::{parse_date, SettingsRepository, TomlSettingsStore};

use super::CmdResult;

#[derive(Subcommand)]
pub enum BirthAction {
    /// Store the birth date
    Set {
        /// Birth date (YYYY-MM-DD)
        date: String,
    },
    /// Print the stored birth date
    Show,
    /// Remove the stored birth date
    Clear,
}

pub fn run(action: BirthAction) -> CmdResult {
    let store = TomlSettingsStore::open_default()?;
    match action {
        BirthAction::Set { date } => {
            let date = parse_date(&date)?;
            store.update(|s| {
                s.birth_date = Some(date);
                Ok(())
            })?;
            println!("birth date set to {date}");
        }
        BirthAction::Show => {
            let settings = store.load()?;
            println!("{}", settings.require_birth_date()?);
        }
        BirthAction::Clear => {
            store.update(|s| {
                s.birth_date = None;
                Ok(())
            })?;
            println!("birth date cleared");
        }
    }
    Ok(())
}
