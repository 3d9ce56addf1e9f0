//! One-shot commands that print to stdout instead of opening the terminal view

use {
    crate::{
        app::{
            AppState, IpoSource, RefreshOutcome,
            fetch::{check_status, load, refresh},
            state::ApiStatus,
        },
        config::Settings,
        tui_log_layer::LogBuffer,
    },
    anyhow::{Context, Result, bail},
    colored::{ColoredString, Colorize},
    ipo_api::{IpoRecord, StatusCategory, field_icon, field_label, format_value, status_category},
    tokio::sync::Mutex as TokioMutex,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { json: bool },
    Show { name: String },
    Refresh,
    Status,
}

pub async fn run(command: Command, settings: Settings, source: &dyn IpoSource) -> Result<()> {
    let app_state = TokioMutex::new(AppState::new(settings, LogBuffer::new()));

    match command {
        Command::List { json } => {
            load(&app_state, source)
                .await
                .context("Failed to load IPO list")?;
            let app = app_state.lock().await;
            if json {
                println!("{}", serde_json::to_string_pretty(app.view.records())?);
            } else {
                print!("{}", format_list(app.view.records()));
            }
        },
        Command::Show { name } => {
            load(&app_state, source)
                .await
                .context("Failed to load IPO list")?;
            let mut app = app_state.lock().await;
            app.view.select_by_name(&name);
            match app.view.selected_record() {
                Some(record) => print!("{}", format_card(record)),
                None => bail!("No IPO named '{}'", name),
            }
        },
        Command::Refresh => {
            match refresh(&app_state, source)
                .await
                .context("Failed to refresh IPO data")?
            {
                RefreshOutcome::Refreshed(count) => {
                    println!("{} {} IPO records", "Refreshed:".green().bold(), count);
                },
                RefreshOutcome::Skipped => println!("Refresh already in progress"),
            }
        },
        Command::Status => match check_status(&app_state, source).await {
            ApiStatus::Online(message) => println!("{} {}", "online".green().bold(), message),
            _ => bail!("API at {} is not reachable", app_state.lock().await.settings.api_url),
        },
    }

    Ok(())
}

/// Paint `text` in the color of `status`
fn colored_status(status: &str, text: &str) -> ColoredString {
    match status_category(Some(status)) {
        StatusCategory::Active => text.green(),
        StatusCategory::Closed => text.red(),
        StatusCategory::Upcoming => text.blue(),
        StatusCategory::Unknown => text.dimmed(),
    }
}

/// One line per record: name, status, price, GMP, subscription, size
pub fn format_list(records: &[IpoRecord]) -> String {
    if records.is_empty() {
        return "No IPO data\n".to_string();
    }

    let name_width = records
        .iter()
        .map(|r| r.name().chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "{:>3}  {:<name_width$}  {:<10}  {:>10}  {:>10}  {:>8}  {:>14}\n",
        "#", "Name", "Status", "Price", "GMP", "Sub", "Size"
    )
    .bold()
    .to_string();

    for (i, record) in records.iter().enumerate() {
        let status = record.status.to_string();
        let status_cell = format!("{:<10}", if status.is_empty() { "-" } else { &status });
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {}  {:>10}  {:>10}  {:>8}  {:>14}\n",
            i + 1,
            record.name(),
            colored_status(&status, &status_cell),
            format_value("ipo_price", &record.ipo_price),
            format_value("ipo_gmp", &record.ipo_gmp),
            format_value("subscription_percent", &record.subscription_percent),
            format_value("ipo_size", &record.ipo_size),
        ));
    }
    out
}

/// The detail card of one record
pub fn format_card(record: &IpoRecord) -> String {
    let status = record.status.to_string();
    let mut out = format!(
        "{}  [{}]\n",
        record.name().bold(),
        colored_status(&status, &status)
    );

    for (key, value) in record.detail_fields() {
        let icon = field_icon(key).map(|i| i.glyph()).unwrap_or(" ");
        out.push_str(&format!(
            "  {} {:<20} {}\n",
            icon.dimmed(),
            field_label(key),
            format_value(key, value)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::app::state::tests::record,
        std::sync::{Mutex, MutexGuard},
    };

    // The color override is process-wide
    static COLOR_OVERRIDE: Mutex<()> = Mutex::new(());

    fn colors(enabled: bool) -> MutexGuard<'static, ()> {
        let guard = COLOR_OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
        colored::control::set_override(enabled);
        guard
    }

    #[test]
    fn card_lists_formatted_fields() {
        let _colors = colors(false);
        let card = format_card(&record("Beta", "Upcoming"));
        assert!(card.starts_with("Beta  [Upcoming]"));
        assert!(card.contains("Ipo Price"));
        assert!(card.contains("₹ 100"));
        assert!(card.contains("₹ 1,500 Cr"));
        assert!(card.contains("Open Date"));
    }

    #[test]
    fn list_has_one_row_per_record() {
        let _colors = colors(false);
        let list = format_list(&[record("Alpha", "Active"), record("Beta", "Close")]);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Alpha"));
        assert!(lines[2].contains("Beta"));
        assert_eq!(format_list(&[]), "No IPO data\n");
    }

    #[test]
    fn list_colors_status_by_category() {
        let _colors = colors(true);
        let list = format_list(&[
            record("Alpha", "Active"),
            record("Beta", "Close"),
            record("Gamma", "upcoming"),
            record("Delta", "Withdrawn"),
        ]);
        let lines: Vec<&str> = list.lines().collect();
        assert!(lines[1].contains(&"Active    ".green().to_string()));
        assert!(lines[2].contains(&"Close     ".red().to_string()));
        assert!(lines[3].contains(&"upcoming  ".blue().to_string()));
        assert!(lines[4].contains(&"Withdrawn ".dimmed().to_string()));
        assert!(lines[1].contains("\u{1b}[32m"));
    }
}
