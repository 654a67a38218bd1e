use chem_match::config::{AnalyzerKind, Settings};
use chem_match::core::{count_local, GestureParams, GestureResolver};
use chem_match::models::{CardView, Catalog, Locality, SwipeDirection};
use chem_match::services::{transfer_draft, Analyzer, Enrichment, HttpAnalyzer, SimulatedAnalyzer};
use chem_match::session::Session;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "commands: left | right | drag <offset> | show | reset | dismiss | help | quit";

fn init_logging(settings: Option<&Settings>) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        settings
            .map(|s| s.logging.level.clone())
            .unwrap_or_else(|| "info".to_string())
    });
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| {
        settings
            .map(|s| s.logging.format.clone())
            .unwrap_or_else(|| "json".to_string())
    });

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_analyzer(settings: &Settings) -> Arc<dyn Analyzer> {
    let enrichment = &settings.enrichment;

    match (enrichment.analyzer, enrichment.endpoint.clone()) {
        (AnalyzerKind::Http, Some(endpoint)) => {
            match HttpAnalyzer::new(endpoint.clone(), enrichment.api_key.clone(), enrichment.timeout()) {
                Ok(analyzer) => {
                    info!("Using HTTP analyzer at {}", endpoint);
                    return Arc::new(analyzer);
                }
                Err(e) => error!("Failed to build HTTP analyzer ({}), falling back to simulated", e),
            }
        }
        (AnalyzerKind::Http, None) => {
            warn!("HTTP analyzer selected without an endpoint, falling back to simulated");
        }
        (AnalyzerKind::Simulated, _) => {}
    }

    info!("Using simulated analyzer ({}ms latency)", enrichment.latency_ms);
    Arc::new(SimulatedAnalyzer::new(enrichment.latency()))
}

fn print_card(label: &str, view: &CardView) {
    let item = &view.item;
    println!(
        "{} [{}] {} - {} | {} | purity {}% | {} | AI match {:.0}%",
        label, item.id, item.name, item.generator, item.location_tag, item.purity, item.price, view.display_score
    );
    if let Some(reasoning) = &view.reasoning {
        println!("    {}", reasoning);
    }
}

fn render(session: &Session, settings: &Settings) {
    match session.front_view() {
        Some(front) => {
            print_card(">>", &front);
            if let Some(next) = session.next_view() {
                print_card("  ", &next);
            }
            println!("{} cards left", session.remaining());
        }
        None => {
            println!(
                "End of inventory: every listing for the {} hub has been reviewed. Type `reset` to see everything again.",
                session.locality().label()
            );
        }
    }

    if let Some(record) = session.last_match() {
        println!("It's a match! Symbiosis detected with {}", record.item.generator);
        println!(
            "{}",
            transfer_draft(
                &record.item,
                &settings.session.buyer_company,
                session.locality().label(),
                record.matched_at.date_naive(),
            )
        );
        println!("Type `dismiss` to close the notification.");
    }
}

fn commit(session: &mut Session, direction: SwipeDirection) {
    if session.is_exhausted() {
        println!("Nothing left to swipe.");
        return;
    }
    if let Err(e) = session.swipe(direction) {
        error!("Swipe failed: {}", e);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load();
    init_logging(loaded.as_ref().ok());

    info!("Starting ChemMatch deck...");

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match Catalog::load(&settings.catalog.path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog {}: {}", settings.catalog.path, e);
            std::process::exit(1);
        }
    };

    info!("Catalog loaded with {} items", catalog.len());

    let locality = Locality::parse(&settings.session.locality, &settings.session.global_sentinel);
    if locality.region().is_some() {
        info!(
            "{} of {} listings are local to {}",
            count_local(&catalog.items, &locality),
            catalog.len(),
            locality.label()
        );
    }
    let resolver = GestureResolver::new(GestureParams::from(&settings.gesture));
    let enrichment = Enrichment::new(
        build_analyzer(&settings),
        locality.label(),
        settings.enrichment.timeout(),
    );

    let mut session = Session::new(catalog.into_items(), locality, resolver, enrichment);
    session.observe_front();

    println!("{}", HELP);
    render(&session, &settings);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("left") | Some("l") => commit(&mut session, SwipeDirection::Left),
            Some("right") | Some("r") => commit(&mut session, SwipeDirection::Right),
            Some("drag") | Some("d") => match parts.next().map(str::parse::<f64>) {
                Some(Ok(offset)) => {
                    let feedback = session.drag_feedback(offset);
                    println!(
                        "reject {:.2} | match {:.2} | tilt {:.1}°",
                        feedback.left, feedback.right, feedback.tilt_degrees
                    );
                    if session.is_exhausted() {
                        println!("Nothing left to swipe.");
                    } else {
                        match session.release(offset) {
                            Ok(None) => println!("Snapped back."),
                            Ok(Some(_)) => {}
                            Err(e) => error!("Swipe failed: {}", e),
                        }
                    }
                }
                _ => println!("usage: drag <offset>"),
            },
            Some("reset") => {
                session.reset();
            }
            Some("dismiss") => {
                session.dismiss_match();
            }
            Some("show") | None => {}
            Some("help") => {
                println!("{}", HELP);
                continue;
            }
            Some("quit") | Some("q") => break,
            Some(other) => {
                println!("unknown command `{}`; {}", other, HELP);
                continue;
            }
        }

        render(&session, &settings);
    }

    let stats = session.enrichment().stats();
    info!(
        "Session {} closed ({} analyses cached, {} pending)",
        session.id(),
        stats.cached,
        stats.in_flight
    );

    Ok(())
}
