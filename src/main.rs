use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::app::App;
use crate::router::handle;
use crate::scheduler::RunConfig;

mod analysis;
mod app;
mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scheduler;
mod scraper;
mod spreadsheets;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let config_path = config::config_path();
    let config = config::load_config(&config_path);

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid bind address '{}': {e}", config.bind_addr);
            std::process::exit(1);
        }
    };

    let resume = config.auto_collect.then(|| RunConfig {
        complex_no: config.complex_no.clone(),
        trade_type: config.trade_type.clone(),
        interval_min: config.interval_min,
    });

    let app = match App::new(config, config_path) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            eprintln!("❌ Startup failed: {e}");
            std::process::exit(1);
        }
    };

    // Pick the collection loop back up if it was active at last shutdown.
    if let Some(run) = resume {
        println!(
            "🔁 Resuming auto collection for complex {} every {} min",
            run.complex_no, run.interval_min
        );
        app.scheduler.start(Arc::clone(&app.store), run);
    }

    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, app.as_ref()) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
