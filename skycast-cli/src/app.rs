use anyhow::Result;
use inquire::{Select, Text};
use skycast_core::{
    Config, FileStorage, HistoryStore, LookupService, SearchRecord, providers_from_config,
};

use crate::output;

const SEARCH_NEW: &str = "Search a new location";
const SHOW_CURRENT: &str = "Show the current result";
const RESEARCH: &str = "Re-search a history entry";
const REMOVE: &str = "Remove a history entry";
const QUIT: &str = "Quit";

/// Wires the lookup service to the session history and holds the single
/// current-result slot. Each new lookup replaces the slot wholesale.
pub struct App {
    lookup: LookupService,
    history: HistoryStore,
    current: Option<SearchRecord>,
}

impl App {
    pub fn init() -> Result<Self> {
        let config = Config::load()?;
        let (geocoder, weather) = providers_from_config(&config)?;
        let storage = FileStorage::new(Config::session_dir()?);

        Ok(Self {
            lookup: LookupService::new(geocoder, weather),
            history: HistoryStore::load(Box::new(storage)),
            current: None,
        })
    }

    pub fn configure() -> Result<()> {
        let mut config = Config::load()?;

        let api_key = Text::new("OpenWeather API key:").prompt()?;
        config.set_api_key(api_key.trim().to_string());
        config.save()?;

        println!(
            "Saved configuration to {}",
            Config::config_file_path()?.display()
        );
        Ok(())
    }

    /// One user-initiated lookup: fetch, record in history, show the result.
    pub async fn search(&mut self, city: &str, country_code: &str) -> Result<()> {
        let record = self.lookup.lookup(city, country_code).await?;
        self.history.append(record.to_history_entry())?;

        println!("{}", output::render_record(&record));
        self.current = Some(record);
        Ok(())
    }

    /// Re-run the last appended search to fill the current-result slot.
    /// Replay never appends to history, and a failed replay leaves both the
    /// slot and the persisted history untouched.
    pub async fn replay_last(&mut self) -> Result<()> {
        let Some(entry) = self.history.last_inserted().cloned() else {
            println!("No search history yet.");
            return Ok(());
        };

        let replayed = self
            .lookup
            .lookup(&entry.location.city, &entry.location.country_code)
            .await;

        match replayed {
            Ok(record) => {
                println!("{}", output::render_record(&record));
                self.current = Some(record);
            }
            Err(err) => println!("Could not replay the last search: {err}"),
        }
        Ok(())
    }

    pub fn print_history(&self) {
        let entries = self.history.sorted_entries();
        if entries.is_empty() {
            println!("No search history yet.");
        } else {
            println!("{}", output::render_history(&entries));
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<()> {
        let removed = self.history.remove_at(index)?;
        println!(
            "Removed {}, {}",
            removed.location.city, removed.location.country_code
        );
        Ok(())
    }

    /// The widget loop: replay the last search on startup, then take user
    /// intents until quit.
    pub async fn run_interactive(&mut self) -> Result<()> {
        if !self.history.is_empty() {
            self.replay_last().await?;
        }

        loop {
            let mut options = vec![SEARCH_NEW];
            if self.current.is_some() {
                options.push(SHOW_CURRENT);
            }
            if !self.history.is_empty() {
                options.push(RESEARCH);
                options.push(REMOVE);
            }
            options.push(QUIT);

            match Select::new("What next?", options).prompt()? {
                SEARCH_NEW => {
                    let city = Text::new("City:").prompt()?;
                    let country_code = Text::new("Country code:").prompt()?;
                    if let Err(err) = self.search(&city, &country_code).await {
                        println!("Search failed: {err}");
                    }
                }
                SHOW_CURRENT => {
                    if let Some(record) = &self.current {
                        println!("{}", output::render_record(record));
                    }
                    self.print_history();
                }
                RESEARCH => {
                    if let Some(index) = self.pick_entry("Re-search which entry?")? {
                        let entry = self.history.sorted_entries()[index].clone();
                        let city = entry.location.city;
                        let country_code = entry.location.country_code;
                        if let Err(err) = self.search(&city, &country_code).await {
                            println!("Search failed: {err}");
                        }
                    }
                }
                REMOVE => {
                    if let Some(index) = self.pick_entry("Remove which entry?")? {
                        self.remove(index)?;
                    }
                }
                _ => break,
            }
        }

        Ok(())
    }

    fn pick_entry(&self, prompt: &str) -> Result<Option<usize>> {
        let rows: Vec<String> = self
            .history
            .sorted_entries()
            .iter()
            .enumerate()
            .map(|(i, e)| output::history_row(i, e))
            .collect();

        if rows.is_empty() {
            println!("No search history yet.");
            return Ok(None);
        }

        let picked = Select::new(prompt, rows).raw_prompt()?;
        Ok(Some(picked.index))
    }
}
