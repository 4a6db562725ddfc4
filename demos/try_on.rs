use fitroom::{
    catalog, logger, preview, selection, Config, FitRoom, GeminiClient, GenerateTransport,
    PreviewView, ProxyClient,
};

// cargo run --example try_on -- <person image> <garment image | catalog id> [output] [--direct]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(logger::LoggerConfig::development())?;

    if dotenv_loaded {
        log::info!(".env file loaded");
    } else {
        log::warn!("No .env file found");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let direct = args.iter().any(|a| a == "--direct");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if positional.len() < 2 {
        eprintln!("usage: try_on <person image> <garment image | catalog id> [output] [--direct]");
        std::process::exit(2);
    }

    let config = Config::from_env();
    let mut store = FitRoom::new();

    store.set_person_image(Some(selection::load_image_file(positional[0]).await?));

    let garment = match catalog::find_clothing_item(positional[1]) {
        Some(item) => selection::fetch_clothing_image(&reqwest::Client::new(), item).await?,
        None => selection::load_image_file(positional[1]).await?,
    };
    store.set_clothing_image(Some(garment));

    let transport: Box<dyn GenerateTransport> = if direct {
        Box::new(GeminiClient::new(&config.gemini))
    } else {
        Box::new(ProxyClient::new(config.proxy_url.clone()))
    };

    let timer = logger::timer("try-on generation");
    let outcome = store.generate(transport.as_ref()).await;
    timer.stop();

    for note in store.take_notifications() {
        log::info!("{}: {}", note.title, note.description);
    }

    match PreviewView::from_state(store.state()) {
        PreviewView::Result(_) => {
            let output = positional
                .get(2)
                .map(|s| s.as_str())
                .unwrap_or(preview::DOWNLOAD_FILE_NAME);
            let written = preview::save_result(store.state(), output).await?;
            log::info!("Wrote {} bytes to {}", written, output);
        }
        PreviewView::Error(message) => log::error!("{}", message),
        PreviewView::Loading | PreviewView::Empty => {}
    }

    outcome?;
    Ok(())
}
