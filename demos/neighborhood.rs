//! Neighborhood report from the command line
//!
//! ```text
//! GEMINI_API_KEY=... cargo run --example neighborhood -- "Yaba, Lagos" --lat 6.5095 --lng 3.3711
//! ```

use std::process::ExitCode;

use amebo::prelude::*;
use amebo::LatLng;
use clap::Parser;
use display_error_chain::DisplayErrorChain;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "neighborhood")]
#[command(about = "Real-time gist about a neighborhood", long_about = None)]
struct Args {
    /// Neighborhood or city to summarize
    #[arg(default_value = "Lagos")]
    location: String,

    /// Latitude used to bias maps results
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude used to bias maps results
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl Args {
    fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }
}

fn print_summary(location: &str, summary: &Summary) {
    println!("=== The Real Gist for {location} ===\n");

    if summary.is_empty() {
        println!("🤷 AmeboAI no see any fresh gist for this place o.");
    }

    if let Some(weather) = &summary.weather {
        let value = |v: Option<f64>| v.map_or("?".to_string(), |v| format!("{v:.0}"));
        println!(
            "🌤️  {}°C, {} | humidity {}% | wind {} km/h",
            value(weather.temperature),
            weather.condition.as_deref().unwrap_or("unknown"),
            value(weather.humidity),
            value(weather.wind_speed),
        );
    }

    if let Some(social) = &summary.social {
        println!("\n📡 Social Radar");
        if let Some(topic) = &social.top_discussion {
            println!("  \"{topic}\"");
        }
        if !social.hashtags.is_empty() {
            println!("  {}", social.hashtags.join(" "));
        }
        if let Some(score) = social.vibe_score {
            println!("  vibe activity {score:.0}/10");
        }
    }

    if let Some(deep_dive) = &summary.deep_dive {
        println!("\n🔎 Deep Dive");
        for (label, text) in [
            ("Security", &deep_dive.security),
            ("Power", &deep_dive.power),
            ("Infrastructure", &deep_dive.infrastructure),
        ] {
            println!("  {label}: {}", text.as_deref().unwrap_or("no data"));
        }
    }

    if let Some(guide) = &summary.renters_guide {
        println!("\n🏠 Renters Guide");
        println!("  Rent: {}", guide.average_rent.as_deref().unwrap_or("no data"));
        if let Some(score) = guide.livability_score {
            println!("  Livability: {score:.0}/10");
        }
        for tip in &guide.tips {
            println!("  • {tip}");
        }
    }

    if !summary.news().is_empty() {
        println!("\n📰 Latest News");
        for article in summary.news() {
            println!(
                "  • {} ({})",
                article.headline.as_deref().unwrap_or("untitled"),
                article.source.as_deref().unwrap_or("unknown source"),
            );
        }
    }

    for vibe in &summary.vibes {
        let main = &vibe.main_insight;
        println!("\n{} {} [{:?}]", vibe.icon, vibe.category, main.sentiment);
        println!("  {} {}: {}", main.icon, main.title, main.description);
        if let Some(sub) = &vibe.sub_insight {
            println!("  Side gist [{:?}]: {}", sub.sentiment, sub.text);
        }
    }

    if !summary.sources.is_empty() {
        println!("\n📚 Sources");
        for source in &summary.sources {
            println!("  • [{}]({})", source.title, source.url);
        }
    }
}

async fn do_main(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let summarizer = Summarizer::from_config(&config);

    info!(location = %args.location, "summarizing");

    let result = match args.position() {
        Some(position) => {
            summarizer
                .summarize_with_location(&args.location, &FixedLocation(position))
                .await
        }
        None => summarizer.summarize(&args.location, None).await,
    };

    match result {
        Ok(summary) => {
            print_summary(&args.location, &summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("💥 {}", e.user_message());
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if let Err(err) = do_main(args).await {
        let formated = DisplayErrorChain::new(err.as_ref()).to_string();
        tracing::error!(error.chained = %formated, "summary failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn location_defaults_to_lagos() {
        let args = Args::try_parse_from(["neighborhood"]).unwrap();
        assert_eq!(args.location, "Lagos");
        assert_eq!(args.position(), None);
    }

    #[test]
    fn coordinates_must_come_together() {
        let err = Args::try_parse_from(["neighborhood", "Yaba", "--lat", "6.5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn negative_coordinates_parse() {
        let args =
            Args::try_parse_from(["neighborhood", "Lima", "--lat", "-12.05", "--lng", "-77.04"])
                .unwrap();
        assert_eq!(args.location, "Lima");
        assert_eq!(args.position(), Some(LatLng::new(-12.05, -77.04)));
    }

    #[test]
    fn help_is_not_a_location() {
        let err = Args::try_parse_from(["neighborhood", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
