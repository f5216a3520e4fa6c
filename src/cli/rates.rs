use super::ui;
use crate::core::{Currency, CurrencyRateProvider, RateSnapshot};
use crate::fetcher::RateFetcher;
use anyhow::Result;
use comfy_table::Cell;

impl RateSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Rate ({})", self.window.to.format("%d.%m.%Y"))),
            ui::header_cell(&format!("Change vs {}", self.window.from.format("%d.%m.%Y"))),
        ]);

        for currency in [Currency::Usd, Currency::Eur] {
            let rate = self.get(currency);
            table.add_row(vec![
                Cell::new(currency.to_string()),
                ui::rate_cell(rate.latest),
                ui::delta_cell(rate.delta),
            ]);
        }

        table.to_string()
    }
}

pub async fn run<P: CurrencyRateProvider>(fetcher: &RateFetcher<P>, json: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching CBR rates");
    let result = fetcher.fetch().await;
    pb.finish_and_clear();

    let snapshot = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "\n{}",
            ui::style_text("CBR reference rates (RUB)", ui::StyleType::Title)
        );
        println!("{}", snapshot.display_as_table());
        println!(
            "{}",
            ui::style_text("Holidays are not accounted for.", ui::StyleType::Subtle)
        );
    }
    Ok(())
}
