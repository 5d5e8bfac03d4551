use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

use wttr_core::{Config, ErrorKind, FetchError, WeatherRequest, WttrClient, extract_report, store};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wttr", version, about = "Weather reports and PNG cards from wttr.in")]
pub struct Cli {
    /// City to report the weather for. Defaults to the configured city.
    #[arg(short, long)]
    pub city: Option<String>,

    /// Also download the rendered PNG weather card.
    #[arg(long)]
    pub image: bool,

    /// Output file for the PNG card, only used with --image.
    /// Defaults to <city>.png.
    #[arg(long)]
    pub filename: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        let city = self.city.unwrap_or_else(|| config.default_city.clone());
        let client = WttrClient::new(&config.base_url)?;
        let request = WeatherRequest {
            location: city.clone(),
            lang: config.lang.clone(),
        };

        info!(%city, "fetching current weather");
        report_weather(&client, &request, &city, &config).await;

        if self.image {
            let filename = self.filename.unwrap_or_else(|| format!("{city}.png"));
            save_weather_image(&client, &request, &filename).await;
        }

        Ok(())
    }
}

/// Fetch, persist, and print the current conditions.
///
/// Fetch and extraction failures are reported on the console and never
/// escalate into a non-zero exit code. The payload lands on disk before
/// field extraction, so a document with missing keys still leaves the
/// raw response available for inspection.
async fn report_weather(
    client: &WttrClient,
    request: &WeatherRequest,
    city: &str,
    config: &Config,
) {
    let payload = match client.fetch_current(request).await {
        Ok(payload) => payload,
        Err(err) => return print_error(&err),
    };

    if let Err(err) = store::save_payload(&config.data_file, &payload) {
        return print_error(&err);
    }

    match extract_report(&payload, &request.lang) {
        Ok(weather) => println!("{}", report::render(city, &weather)),
        Err(err) => print_error(&err),
    }
}

async fn save_weather_image(client: &WttrClient, request: &WeatherRequest, filename: &str) {
    let bytes = match client.fetch_image(request).await {
        Ok(bytes) => bytes,
        Err(err) => return print_error(&err),
    };

    match store::save_image(Path::new(filename), &bytes) {
        Ok(()) => println!("[+] Картинка сохранена как \"{filename}\""),
        Err(err) => print_error(&err),
    }
}

fn print_error(err: &FetchError) {
    match err.kind() {
        ErrorKind::Request => println!("[X] Ошибка при запросе: {err}"),
        ErrorKind::DataFormat => println!("[X] Ошибка в формате данных: {err}"),
        ErrorKind::Storage => println!("[X] Ошибка записи файла: {err}"),
    }
}
