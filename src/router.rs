use astra::Request;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::analysis;
use crate::app::App;
use crate::config::AppConfig;
use crate::domain::anomaly::AnomalyPolicy;
use crate::domain::record::ListingRecord;
use crate::domain::snapshot::{kst_now, parse_snapshot_time, SnapshotSequence};
use crate::errors::ServerError;
use crate::responses::{html_response, redirect_response, ResultResp};
use crate::scheduler::RunConfig;
use crate::scraper;
use crate::spreadsheets::export_records_xlsx;
use crate::templates::pages;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => dashboard(&req, app),
        ("GET", "/diff") => diff_view(&req, app),
        ("GET", "/export") => export(&req, app),
        ("GET", "/admin") => admin(app),
        ("POST", "/collect") => collect(&mut req, app),
        ("POST", "/scheduler/start") => scheduler_start(&mut req, app),
        ("POST", "/scheduler/stop") => scheduler_stop(&mut req, app),
        ("POST", "/clear") => clear(&mut req, app),
        _ => Err(ServerError::NotFound),
    }
}

fn dashboard(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let config = app.config()?;
    let store = app.store.as_ref();

    let scope = match param(&params, "complex") {
        Some(scope) => Some(scope.to_string()),
        None => analysis::default_scope(store)?,
    };
    let Some(scope) = scope else {
        return html_response(pages::dashboard_empty_page());
    };

    let complexes = analysis::complex_names(store)?;
    let sequence = analysis::get_sequence(store, &scope)?;
    let metrics = analysis::latest_metrics(&sequence);

    let policy = AnomalyPolicy::new(config.anomaly_threshold);
    let reference = metrics
        .taken_at
        .unwrap_or_else(|| kst_now().naive_local());
    let aggregate = analysis::aggregate_window(
        store,
        &scope,
        reference,
        config.window_days,
        &policy,
        config.leaderboard_size,
    )?;

    let lowest = match metrics.taken_at {
        Some(at) => analysis::lowest_price_by_type(store, &scope, at)?,
        None => Vec::new(),
    };

    let history = analysis::collection_history(&sequence);
    let mut latest: Vec<ListingRecord> = sequence
        .latest()
        .map(|s| s.records.clone())
        .unwrap_or_default();
    latest.sort_by(|a, b| b.price_amount.cmp(&a.price_amount));

    html_response(pages::dashboard_page(&pages::DashboardVm {
        scope,
        complexes,
        metrics,
        window_days: config.window_days,
        aggregate,
        lowest,
        history,
        latest,
    }))
}

fn diff_view(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let config = app.config()?;

    let scope = param(&params, "complex")
        .ok_or_else(|| ServerError::BadRequest("complex is required".to_string()))?
        .to_string();
    let to = parse_time_param(&params, "to")?
        .ok_or_else(|| ServerError::BadRequest("to is required".to_string()))?;
    let from = parse_time_param(&params, "from")?;

    let policy = AnomalyPolicy::new(config.anomaly_threshold);
    let detail = match from {
        Some(from) => {
            analysis::diff_between(app.store.as_ref(), &scope, Some(from), to, &policy)?
        }
        None => analysis::diff_at(app.store.as_ref(), &scope, to, &policy)?,
    };

    html_response(pages::diff_page(&pages::DiffVm { scope, detail }))
}

fn export(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let scope = param(&params, "complex")
        .ok_or_else(|| ServerError::BadRequest("complex is required".to_string()))?;

    let records = app.store.load(scope)?;
    export_records_xlsx(&records)
}

fn admin(app: &App) -> ResultResp {
    let config = app.config()?;
    let all = app.store.load_all()?;
    let totals = analysis::store_totals(&all);
    let history = analysis::collection_history(&SnapshotSequence::index(&all));
    let status = app.scheduler.status();

    html_response(pages::admin_page(&pages::AdminVm {
        totals,
        history,
        status,
        complex_no: config.complex_no,
        trade_type: config.trade_type,
        interval_min: config.interval_min,
    }))
}

fn collect(req: &mut Request, app: &App) -> ResultResp {
    let params = parse_form(req)?;
    let config = app.config()?;
    require_key(&params, &config)?;

    let complex_no = param(&params, "complex_no")
        .map(str::to_string)
        .unwrap_or(config.complex_no);
    let trade_type = param(&params, "trade_type")
        .map(str::to_string)
        .unwrap_or(config.trade_type);

    scraper::run_background_collection(Arc::clone(&app.store), complex_no, trade_type);
    redirect_response("/admin")
}

fn scheduler_start(req: &mut Request, app: &App) -> ResultResp {
    let params = parse_form(req)?;
    let config = app.config()?;
    require_key(&params, &config)?;

    let complex_no = param(&params, "complex_no")
        .map(str::to_string)
        .unwrap_or(config.complex_no);
    let trade_type = param(&params, "trade_type")
        .map(str::to_string)
        .unwrap_or(config.trade_type);
    let interval_min = match param(&params, "interval_min") {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            ServerError::BadRequest("interval_min must be a number".to_string())
        })?,
        None => config.interval_min,
    };
    if interval_min == 0 || interval_min > 1440 {
        return Err(ServerError::BadRequest(
            "interval_min must be between 1 and 1440".to_string(),
        ));
    }

    app.scheduler.start(
        Arc::clone(&app.store),
        RunConfig {
            complex_no: complex_no.clone(),
            trade_type: trade_type.clone(),
            interval_min,
        },
    );
    app.update_config(|c| {
        c.complex_no = complex_no;
        c.trade_type = trade_type;
        c.interval_min = interval_min;
        c.auto_collect = true;
    })?;

    redirect_response("/admin")
}

fn scheduler_stop(req: &mut Request, app: &App) -> ResultResp {
    let params = parse_form(req)?;
    let config = app.config()?;
    require_key(&params, &config)?;

    app.scheduler.stop();
    app.update_config(|c| c.auto_collect = false)?;

    redirect_response("/admin")
}

fn clear(req: &mut Request, app: &App) -> ResultResp {
    let params = parse_form(req)?;
    let config = app.config()?;
    require_key(&params, &config)?;

    let scope = param(&params, "complex")
        .ok_or_else(|| ServerError::BadRequest("complex is required".to_string()))?;
    app.store.clear(scope)?;
    eprintln!("🗑️ Cleared all records for {scope}");

    redirect_response("/admin")
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => HashMap::new(),
    }
}

fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut raw)
        .map_err(|_| ServerError::BadRequest("Unreadable request body".to_string()))?;

    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}

/// A named parameter, with empty values treated as absent.
fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn parse_time_param(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<Option<NaiveDateTime>, ServerError> {
    match param(params, name) {
        None => Ok(None),
        Some(raw) => parse_snapshot_time(raw)
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest(format!("Malformed timestamp '{raw}'"))),
    }
}

fn require_key(params: &HashMap<String, String>, config: &AppConfig) -> Result<(), ServerError> {
    let presented = param(params, "key").unwrap_or("");
    if config.key_matches(presented) {
        Ok(())
    } else {
        Err(ServerError::Unauthorized)
    }
}
